// Sprite catalog - the logical slots the simulation draws by

use super::loader::AssetLoader;
use crate::engine::renderer::scene::SpriteSlot;
use crate::engine::renderer::texture::TextureHandle;
use crate::engine::renderer::Renderer;
use log::{info, warn};

/// Number of frames in the player's run cycle
pub const RUN_FRAME_COUNT: usize = 10;

/// Maps logical sprite slots to loaded textures
///
/// Slots whose file is missing or undecodable stay empty; the renderer
/// skips blits against empty slots, so the game runs (with colored rects
/// and no sprites) even with no assets on disk.
pub struct SpriteCatalog {
    run_frames: [Option<TextureHandle>; RUN_FRAME_COUNT],
    cloud: Option<TextureHandle>,
}

impl SpriteCatalog {
    /// A catalog with every slot empty
    pub fn empty() -> Self {
        Self {
            run_frames: [None; RUN_FRAME_COUNT],
            cloud: None,
        }
    }

    /// Load every slot from disk, degrading missing files to empty slots
    pub fn load(loader: &AssetLoader, renderer: &mut Renderer) -> Self {
        let mut catalog = Self::empty();

        for frame in 0..RUN_FRAME_COUNT {
            let name = format!("run_{}.png", frame + 1);
            catalog.run_frames[frame] = load_slot(loader, renderer, &name);
        }
        catalog.cloud = load_slot(loader, renderer, "cloud_1.png");

        info!(
            "Sprite catalog ready: {}/{} slots loaded",
            catalog.loaded_count(),
            RUN_FRAME_COUNT + 1
        );
        catalog
    }

    /// Resolve a slot to its texture, if loaded
    pub fn resolve(&self, slot: SpriteSlot) -> Option<TextureHandle> {
        match slot {
            SpriteSlot::Run(frame) => self.run_frames.get(frame).copied().flatten(),
            SpriteSlot::Cloud => self.cloud,
        }
    }

    /// Number of slots with a loaded texture
    pub fn loaded_count(&self) -> usize {
        let run = self.run_frames.iter().filter(|f| f.is_some()).count();
        run + usize::from(self.cloud.is_some())
    }

    pub(crate) fn set_cloud(&mut self, handle: Option<TextureHandle>) {
        self.cloud = handle;
    }

    #[allow(dead_code)]
    pub(crate) fn set_run_frame(&mut self, frame: usize, handle: Option<TextureHandle>) {
        if let Some(slot) = self.run_frames.get_mut(frame) {
            *slot = handle;
        }
    }
}

fn load_slot(loader: &AssetLoader, renderer: &mut Renderer, name: &str) -> Option<TextureHandle> {
    match loader.load_bytes(name) {
        Ok(bytes) => match renderer.load_texture(&bytes, name) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Failed to decode {}: {} (blits will be skipped)", name, e);
                None
            }
        },
        Err(e) => {
            warn!("{} (blits will be skipped)", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_resolves_nothing() {
        let catalog = SpriteCatalog::empty();
        assert_eq!(catalog.resolve(SpriteSlot::Cloud), None);
        for frame in 0..RUN_FRAME_COUNT {
            assert_eq!(catalog.resolve(SpriteSlot::Run(frame)), None);
        }
        assert_eq!(catalog.loaded_count(), 0);
    }

    #[test]
    fn test_out_of_range_run_frame_resolves_nothing() {
        let catalog = SpriteCatalog::empty();
        assert_eq!(catalog.resolve(SpriteSlot::Run(RUN_FRAME_COUNT)), None);
    }

    #[test]
    fn test_set_slots() {
        let mut catalog = SpriteCatalog::empty();
        let handle = TextureHandle::from_index(3);

        catalog.set_cloud(Some(handle));
        catalog.set_run_frame(2, Some(handle));

        assert_eq!(catalog.resolve(SpriteSlot::Cloud), Some(handle));
        assert_eq!(catalog.resolve(SpriteSlot::Run(2)), Some(handle));
        assert_eq!(catalog.loaded_count(), 2);
    }
}
