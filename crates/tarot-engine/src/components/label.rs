use serde::Serialize;

/// Horizontal anchoring of a label relative to the entity position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
}

/// Text drawn by the host's font renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelComponent {
    pub text: String,
    /// Font size in canvas units.
    pub size: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    pub align: TextAlign,
}

impl LabelComponent {
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
            alpha: 1.0,
            align: TextAlign::Center,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}
