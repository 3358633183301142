//! Session configuration.

use crate::error::ConfigError;

/// Smallest and largest accepted board side.
pub const MIN_SIDE: usize = 2;
pub const MAX_SIDE: usize = 16;

/// Tile value that wins the classic game.
pub const DEFAULT_TARGET: u32 = 2048;

/// Parameters fixed for the lifetime of a [`Game`](crate::Game).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// A tile of at least this value wins.
    pub target: u32,
    /// Tiles placed by every reset.
    pub initial_tiles: usize,
}

impl GameConfig {
    /// Set the board dimensions (builder).
    pub const fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Set the winning tile (builder).
    pub const fn with_target(mut self, target: u32) -> Self {
        self.target = target;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = MIN_SIDE..=MAX_SIDE;
        if !side.contains(&self.rows) || !side.contains(&self.cols) {
            return Err(ConfigError::Dimensions {
                rows: self.rows,
                cols: self.cols,
                min: MIN_SIDE,
                max: MAX_SIDE,
            });
        }
        if self.target < 4 || !self.target.is_power_of_two() {
            return Err(ConfigError::Target(self.target));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            target: DEFAULT_TARGET,
            initial_tiles: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_classic() {
        let c = GameConfig::default();
        assert_eq!((c.rows, c.cols, c.target, c.initial_tiles), (4, 4, 2048, 2));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_dimensions() {
        let c = GameConfig::default().with_size(1, 4);
        assert!(matches!(c.validate(), Err(ConfigError::Dimensions { rows: 1, .. })));
        let c = GameConfig::default().with_size(4, 17);
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_bad_target() {
        for target in [0, 2, 3, 1000] {
            let c = GameConfig::default().with_target(target);
            assert_eq!(c.validate(), Err(ConfigError::Target(target)));
        }
        assert!(GameConfig::default().with_target(4).validate().is_ok());
    }
}
