use thiserror::Error;

/// Grid side length the original canvas used
pub const DEFAULT_ROWS: usize = 50;
pub const DEFAULT_COLUMNS: usize = 50;

/// Largest grid side. Rows and columns must fit terminal coordinates.
pub const MAX_SIDE: usize = 4096;

/// Ticks per second
pub const DEFAULT_TICK_RATE: u32 = 1000;

/// Classic Langton's ant
pub const DEFAULT_INSTRUCTIONS: &str = "RL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Grid must have at least one row and one column, got {rows}x{columns}")]
    EmptyGrid { rows: usize, columns: usize },

    #[error("Grid can be at most {MAX_SIDE}x{MAX_SIDE}, got {rows}x{columns}")]
    GridTooLarge { rows: usize, columns: usize },

    #[error("Tick rate must be at least 1 tick per second")]
    ZeroTickRate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub columns: usize,

    /// How many times per second the host calls `on_tick`. The simulation itself never reads
    /// this.
    pub tick_rate: u32,

    /// Raw instruction text, as typed by the user
    pub instructions: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            tick_rate: DEFAULT_TICK_RATE,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                columns: self.columns,
            });
        }

        if self.rows > MAX_SIDE || self.columns > MAX_SIDE {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                columns: self.columns,
            });
        }

        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        Ok(())
    }

    /// Time between two ticks
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.tick_rate.max(1)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Config;
    use super::ConfigError;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn rejects_empty_grid() {
        let config = Config {
            rows: 0,
            ..Config::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                rows: 0,
                columns: 50
            })
        );
    }

    #[test]
    fn rejects_grid_past_terminal_range() {
        let config = Config {
            rows: u16::MAX as usize,
            ..Config::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooLarge {
                rows: 65535,
                columns: 50
            })
        );

        let config = Config {
            rows: super::MAX_SIDE,
            columns: super::MAX_SIDE,
            ..Config::default()
        };

        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_tick_rate() {
        let config = Config {
            tick_rate: 0,
            ..Config::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));
    }
}
