use serde::{Deserialize, Serialize};

/// Identifies a texture. Ids come from the asset manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Sprite component: a whole texture drawn at the entity's size.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    pub texture: TextureId,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl SpriteComponent {
    pub fn new(texture: TextureId) -> Self {
        Self { texture, alpha: 1.0 }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self::new(TextureId(0))
    }
}
