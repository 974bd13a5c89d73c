// Asset management system
//
// Loads the game's image files and maps them onto the logical sprite slots
// the simulation references. A missing file is a degraded state (the slot
// stays empty and its draws are skipped), not a startup failure.

pub mod loader;
pub mod manager;

pub use loader::AssetLoader;
pub use manager::{SpriteCatalog, RUN_FRAME_COUNT};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("cloud_1.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: cloud_1.png");
    }
}
