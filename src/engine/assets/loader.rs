// Asset file resolution and image loading

use super::AssetError;
use anyhow::Result;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// The kinds of image assets the client loads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Standalone images: background, static props
    Image,
    /// Grid spritesheets that get sliced into animation frames
    Spritesheet,
}

impl AssetKind {
    /// Supported file extensions
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetKind::Image | AssetKind::Spritesheet => &["png", "jpg", "jpeg"],
        }
    }
}

/// Resolves asset names against the configured roots and decodes images
pub struct AssetLoader {
    image_root: PathBuf,
    spritesheet_root: PathBuf,
}

impl AssetLoader {
    /// Create a loader over the two asset roots
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(image_root: P, spritesheet_root: Q) -> Self {
        Self {
            image_root: image_root.as_ref().to_path_buf(),
            spritesheet_root: spritesheet_root.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, kind: AssetKind, name: &str) -> PathBuf {
        let root = match kind {
            AssetKind::Image => &self.image_root,
            AssetKind::Spritesheet => &self.spritesheet_root,
        };
        root.join(name)
    }

    /// Check if an asset exists on disk
    pub fn exists(&self, kind: AssetKind, name: &str) -> bool {
        self.resolve_path(kind, name).exists()
    }

    /// Load and decode an image asset
    pub fn load_image(&self, kind: AssetKind, name: &str) -> Result<DynamicImage> {
        let path = self.resolve_path(kind, name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()).into());
        }

        let bytes = std::fs::read(&path).map_err(AssetError::Io)?;
        image::load_from_memory(&bytes)
            .map_err(|e| AssetError::LoadError(format!("Failed to decode {}: {}", name, e)).into())
    }
}
