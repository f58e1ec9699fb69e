//! Texture ids the game draws with, resolved from the asset manifest.

use tarot_engine::{AssetError, AssetManifest, TextureId};

use crate::deck::{card_name, card_slug, DECK_SIZE};
use crate::fetch::LOADING_FRAME_COUNT;
use crate::sound::Sfx;

/// First id of the card face range in the standard manifest.
const CARD_FACE_BASE: u32 = 100;

#[derive(Debug, Clone)]
pub struct Textures {
    pub tablecloth: TextureId,
    pub title: TextureId,
    /// House frames: start, left, center, right.
    pub outside: [TextureId; 4],
    pub card_back: TextureId,
    pub button: TextureId,
    pub button_hover: TextureId,
    pub popup: TextureId,
    pub menu: TextureId,
    pub progress_bar: TextureId,
    pub progress_fill: TextureId,
    pub loading: [TextureId; LOADING_FRAME_COUNT],
    card_faces: Vec<TextureId>,
}

const OUTSIDE_FRAMES: [&str; 4] = ["outside_start", "outside_left", "outside_center", "outside_right"];

fn loading_frame_name(i: usize) -> String {
    format!("loading_{}", i)
}

/// Manifest name of a card face, e.g. `card_the_fool`.
pub fn card_texture_name(index: usize) -> Option<String> {
    card_name(index).map(|name| format!("card_{}", card_slug(&name)))
}

impl Textures {
    /// Look up every texture the game uses. A missing one is fatal.
    pub fn resolve(manifest: &AssetManifest) -> Result<Self, AssetError> {
        let mut outside = [TextureId::default(); 4];
        for (slot, name) in outside.iter_mut().zip(OUTSIDE_FRAMES) {
            *slot = manifest.texture(name)?;
        }
        let mut loading = [TextureId::default(); LOADING_FRAME_COUNT];
        for (i, slot) in loading.iter_mut().enumerate() {
            *slot = manifest.texture(&loading_frame_name(i))?;
        }
        let card_faces = (0..DECK_SIZE)
            .filter_map(card_texture_name)
            .map(|name| manifest.texture(&name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            tablecloth: manifest.texture("tablecloth")?,
            title: manifest.texture("title")?,
            outside,
            card_back: manifest.texture("card_back")?,
            button: manifest.texture("button")?,
            button_hover: manifest.texture("button_hover")?,
            popup: manifest.texture("popup")?,
            menu: manifest.texture("options_menu")?,
            progress_bar: manifest.texture("progress_bar")?,
            progress_fill: manifest.texture("progress_fill")?,
            loading,
            card_faces,
        })
    }

    /// Face texture for a catalog card id.
    pub fn card_face(&self, card_id: usize) -> TextureId {
        self.card_faces.get(card_id).copied().unwrap_or(self.card_back)
    }
}

/// The manifest for the standard asset layout: `images/...` and `sounds/...`.
pub fn standard_manifest() -> AssetManifest {
    let mut manifest = AssetManifest::default();
    let fixed = [
        ("tablecloth", "images/tablecloth.png"),
        ("title", "images/title.png"),
        ("card_back", "images/card_back.png"),
        ("button", "images/button.png"),
        ("button_hover", "images/button_pressed.png"),
        ("popup", "images/popup.png"),
        ("options_menu", "images/options_menu.png"),
        ("progress_bar", "images/progress_bar.png"),
        ("progress_fill", "images/progress_fill.png"),
    ];
    let mut next_id = 1;
    for (name, path) in fixed {
        manifest.insert_texture(name, path, next_id);
        next_id += 1;
    }
    for name in OUTSIDE_FRAMES {
        manifest.insert_texture(name, format!("images/{}.png", name), next_id);
        next_id += 1;
    }
    for i in 0..LOADING_FRAME_COUNT {
        let name = loading_frame_name(i);
        manifest.insert_texture(name.clone(), format!("images/{}.png", name), next_id);
        next_id += 1;
    }
    for index in 0..DECK_SIZE {
        if let Some(name) = card_name(index) {
            let slug = card_slug(&name);
            manifest.insert_texture(
                format!("card_{}", slug),
                format!("images/cards/{}.png", slug),
                CARD_FACE_BASE + index as u32,
            );
        }
    }
    for sfx in Sfx::ALL {
        manifest.insert_sound(sfx.name(), format!("sounds/{}.wav", sfx.name()), sfx.event().0);
    }
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_manifest_resolves() {
        let textures = Textures::resolve(&standard_manifest()).unwrap();
        assert_eq!(textures.card_face(0), TextureId(CARD_FACE_BASE));
        assert_eq!(textures.card_face(77), TextureId(CARD_FACE_BASE + 77));
        assert_eq!(textures.card_face(500), textures.card_back);
    }

    #[test]
    fn missing_card_face_is_fatal() {
        let mut manifest = standard_manifest();
        manifest.textures.remove("card_the_fool");
        match Textures::resolve(&manifest) {
            Err(AssetError::MissingTexture(name)) => assert_eq!(name, "card_the_fool"),
            other => panic!("expected missing texture, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn sounds_carry_cue_ids() {
        let manifest = standard_manifest();
        for sfx in Sfx::ALL {
            assert_eq!(manifest.sound(sfx.name()).unwrap(), sfx.event());
        }
    }
}
