//! Game configuration
//!
//! Recognized keys (JSON, camelCase): `columns`, `rows`, `tickIntervalMs`.
//! The board is fixed at 10x20, so `columns` and `rows` are accepted only
//! with those values; the tick interval is freely configurable.

use serde::{Deserialize, Serialize};

use crate::types::{GameError, BASE_TICK_MS, BOARD_HEIGHT, BOARD_WIDTH};

/// Environment variable overriding `tickIntervalMs`
pub const TICK_ENV: &str = "MATRIS_TICK_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub columns: u8,
    pub rows: u8,
    pub tick_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: BOARD_WIDTH,
            rows: BOARD_HEIGHT,
            tick_interval_ms: BASE_TICK_MS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, GameError> {
        let config: GameConfig =
            serde_json::from_str(s).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_tick_override(std::env::var(TICK_ENV).ok().as_deref())
    }

    /// Apply a raw tick override value. Unparsable or zero values are ignored.
    pub fn with_tick_override(mut self, value: Option<&str>) -> Self {
        if let Some(ms) = value
            .map(str::trim)
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&ms| ms > 0)
        {
            self.tick_interval_ms = ms;
        }
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.columns != BOARD_WIDTH || self.rows != BOARD_HEIGHT {
            return Err(GameError::InvalidConfig(format!(
                "board is fixed at {}x{}, got {}x{}",
                BOARD_WIDTH, BOARD_HEIGHT, self.columns, self.rows
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tickIntervalMs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.columns, 10);
        assert_eq!(config.rows, 20);
        assert_eq!(config.tick_interval_ms, 800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_camel_case_and_partial() {
        let config = GameConfig::from_json_str(r#"{"tickIntervalMs": 500}"#).unwrap();
        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.columns, 10);

        let config =
            GameConfig::from_json_str(r#"{"columns":10,"rows":20,"tickIntervalMs":250}"#).unwrap();
        assert_eq!(config.tick_interval_ms, 250);
    }

    #[test]
    fn test_rejects_other_dimensions() {
        let err = GameConfig::from_json_str(r#"{"columns": 12}"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
        assert!(GameConfig::from_json_str(r#"{"tickIntervalMs": 0}"#).is_err());
        assert!(GameConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_tick_override() {
        let base = GameConfig::default();
        assert_eq!(base.with_tick_override(Some(" 300 ")).tick_interval_ms, 300);
        assert_eq!(base.with_tick_override(Some("fast")).tick_interval_ms, 800);
        assert_eq!(base.with_tick_override(Some("0")).tick_interval_ms, 800);
        assert_eq!(base.with_tick_override(None).tick_interval_ms, 800);
    }
}
