// Client configuration

use std::path::PathBuf;

/// Configuration for the client: tile resolution, screen layout, tick rate
/// and asset roots. Passed explicitly to the subsystems that need it instead
/// of living in module-level globals.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Tile size in pixels (sprites are authored on this grid)
    pub resolution: u32,

    /// Screen size in tiles (columns, rows)
    pub screen_tiles: (u32, u32),

    /// Target tick rate in frames per second
    pub frame_rate: u32,

    /// Root directory for standalone images (background etc.)
    pub image_directory: PathBuf,

    /// Root directory for spritesheets
    pub spritesheet_directory: PathBuf,
}

impl GameConfig {
    /// Screen size in pixels, derived from the tile grid
    pub fn screen_size(&self) -> (u32, u32) {
        (
            self.screen_tiles.0 * self.resolution,
            self.screen_tiles.1 * self.resolution,
        )
    }

    /// Milliseconds per animation frame at the configured rate.
    /// Integer division truncates: 13 fps gives 76 ms, slightly under 13 fps.
    pub fn frame_period_ms(&self) -> u64 {
        1000 / self.frame_rate as u64
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            screen_tiles: (12, 9),
            frame_rate: 30,
            image_directory: PathBuf::from("assets/images"),
            spritesheet_directory: PathBuf::from("assets/spritesheets"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_screen_size() {
        let config = GameConfig::default();
        assert_eq!(config.screen_size(), (768, 576));
    }

    #[test]
    fn test_frame_period_truncates() {
        let config = GameConfig {
            frame_rate: 13,
            ..Default::default()
        };
        assert_eq!(config.frame_period_ms(), 76);
    }

    #[test]
    fn test_default_frame_rate() {
        let config = GameConfig::default();
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.frame_period_ms(), 33);
    }
}
