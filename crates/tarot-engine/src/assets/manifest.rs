use std::collections::HashMap;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::api::types::SoundEvent;
use crate::components::sprite::TextureId;

/// Problems loading or validating assets. All of them are fatal at startup.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid asset manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("manifest has no texture named '{0}'")]
    MissingTexture(String),
    #[error("manifest has no sound named '{0}'")]
    MissingSound(String),
    #[error("asset file not found: {0}")]
    FileNotFound(PathBuf),
}

/// Asset manifest naming every texture and sound a game draws or plays.
/// Loaded from a JSON file at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub textures: HashMap<String, TextureDescriptor>,
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Path relative to the asset root (e.g., "images/cards/the_fool.png").
    pub path: String,
    /// Numeric id written into render instances.
    pub id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Path relative to the asset root.
    pub path: String,
    /// Numeric event id that triggers this sound from game code.
    #[serde(default)]
    pub event_id: Option<u32>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a manifest file.
    pub fn from_file(path: &Path) -> Result<Self, AssetError> {
        let json = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&json)?)
    }

    pub fn insert_texture(&mut self, name: impl Into<String>, path: impl Into<String>, id: u32) {
        self.textures.insert(name.into(), TextureDescriptor { path: path.into(), id });
    }

    pub fn insert_sound(&mut self, name: impl Into<String>, path: impl Into<String>, event_id: u32) {
        self.sounds.insert(
            name.into(),
            SoundDescriptor {
                path: path.into(),
                event_id: Some(event_id),
            },
        );
    }

    /// Look up a texture id by name.
    pub fn texture(&self, name: &str) -> Result<TextureId, AssetError> {
        self.textures
            .get(name)
            .map(|t| TextureId(t.id))
            .ok_or_else(|| AssetError::MissingTexture(name.to_string()))
    }

    /// Look up the event id of a named sound.
    pub fn sound(&self, name: &str) -> Result<SoundEvent, AssetError> {
        self.sounds
            .get(name)
            .and_then(|s| s.event_id)
            .map(SoundEvent)
            .ok_or_else(|| AssetError::MissingSound(name.to_string()))
    }

    /// Check that every file the manifest names exists under `root`.
    pub fn verify_files(&self, root: &Path) -> Result<(), AssetError> {
        let paths = self
            .textures
            .values()
            .map(|t| &t.path)
            .chain(self.sounds.values().map(|s| &s.path));
        for relative in paths {
            let full = root.join(relative);
            if !full.is_file() {
                return Err(AssetError::FileNotFound(full));
            }
        }
        log::info!(
            "Verified {} textures and {} sounds under {}",
            self.textures.len(),
            self.sounds.len(),
            root.display()
        );
        Ok(())
    }
}
