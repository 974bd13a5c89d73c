// Asset loading functionality

use super::AssetError;
use std::path::{Path, PathBuf};

/// Directory under the asset root where image files live
const TEXTURE_DIRECTORY: &str = "textures";

/// Asset loader responsible for finding and loading asset files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for a texture file
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(TEXTURE_DIRECTORY).join(name)
    }

    /// Load texture bytes from disk
    pub fn load_bytes(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        std::fs::read(&path)
            .map_err(|e| AssetError::LoadError(format!("Failed to read {}: {}", name, e)))
    }

    /// Check if a texture file exists
    pub fn exists(&self, name: &str) -> bool {
        self.resolve_path(name).exists()
    }
}
