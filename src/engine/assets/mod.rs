// Asset loading system
//
// Loads images from the configured asset roots and turns spritesheets into
// named animation frame sequences.

mod loader;
mod sheet;

pub use loader::{AssetKind, AssetLoader};
pub use sheet::{name_frames, slice, SheetError, SheetSpec, SliceOptions};

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
