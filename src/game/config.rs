//! Game Configuration
//!
//! Every gameplay constant that differs between the two known rule sets lives
//! here as a named, overridable value. Lengths are whole pixels; the
//! simulation converts them to fixed-point on use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::fixed::{from_int, Fixed};

/// Largest field dimension that keeps every coordinate well inside Q16.16.
const MAX_FIELD_DIMENSION: i32 = 16_000;

/// What happens when a falling block touches a floor platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrashPolicy {
    /// The block is destroyed; the floor is untouched.
    #[default]
    RemoveBlock,
    /// The platform tile is destroyed and the block keeps falling.
    ErodePlatform,
}

/// Ground player dimensions and movement tuning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPlayerConfig {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Horizontal speed in pixels per tick.
    pub speed: i32,
    /// Upward speed granted by a jump, in pixels per tick.
    pub jump_height: i32,
}

impl Default for GroundPlayerConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            speed: 3,
            jump_height: 6,
        }
    }
}

impl GroundPlayerConfig {
    /// Speed as fixed-point.
    pub fn speed_fixed(&self) -> Fixed {
        from_int(self.speed)
    }

    /// Jump speed as fixed-point.
    pub fn jump_fixed(&self) -> Fixed {
        from_int(self.jump_height)
    }
}

/// Configuration for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Field width in pixels.
    pub field_width: i32,
    /// Field height in pixels.
    pub field_height: i32,
    /// Blocks created when the world is built.
    pub initial_block_count: u32,
    /// Chance (0-100) that a block carries a Bomb or Fuel payload.
    pub payload_chance_percent: u32,
    /// Chance (0-100) that a block uses the gravity fall strategy.
    pub gravity_fall_chance_percent: u32,
    /// Lowest spawn height above the field (negative, pixels).
    pub spawn_min_y: i32,
    /// Respawned blocks land in `[spawn_min_y, respawn_max_y)`.
    pub respawn_max_y: i32,
    /// Ammo the plane starts with.
    pub plane_starting_ammo: u32,
    /// Ammo granted per collected ammo box.
    pub ammo_box_bonus: u32,
    /// Side length of a floor tile in pixels.
    pub floor_tile_size: i32,
    /// Upper bound on tiles removed from the floor row (at least one is).
    pub max_floor_gaps: u32,
    /// Recycle shot blocks instead of removing them.
    pub respawn_shot_blocks: bool,
    /// Block vs platform outcome.
    pub crash_policy: CrashPolicy,
    /// Publish the ground player's animation state in snapshots.
    pub animate_ground_player: bool,
    /// Ground player tuning.
    pub ground_player: GroundPlayerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    /// Five blocks, frequent payloads, animated ground player.
    pub fn classic() -> Self {
        Self {
            field_width: 800,
            field_height: 600,
            initial_block_count: 5,
            payload_chance_percent: 50,
            gravity_fall_chance_percent: 5,
            spawn_min_y: -300,
            respawn_max_y: -20,
            plane_starting_ammo: 20,
            ammo_box_bonus: 10,
            floor_tile_size: 10,
            max_floor_gaps: 10,
            respawn_shot_blocks: false,
            crash_policy: CrashPolicy::RemoveBlock,
            animate_ground_player: true,
            ground_player: GroundPlayerConfig::default(),
        }
    }

    /// Twenty blocks, rare payloads, no animation state.
    pub fn storm() -> Self {
        Self {
            initial_block_count: 20,
            payload_chance_percent: 5,
            animate_ground_player: false,
            ..Self::classic()
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::classic()),
            "storm" => Ok(Self::storm()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    /// Parse and validate a JSON document. Missing fields take classic values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Create config from environment variables.
    ///
    /// `ORE_STORM_CONFIG` names a JSON file and wins over
    /// `ORE_STORM_PRESET`; with neither set the classic preset is used.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("ORE_STORM_CONFIG") {
            return Self::load(path);
        }
        let config = match std::env::var("ORE_STORM_PRESET") {
            Ok(name) => Self::preset(&name)?,
            Err(_) => Self::classic(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid { field, reason: reason.into() }
        }

        if !(1..=MAX_FIELD_DIMENSION).contains(&self.field_width) {
            return Err(invalid("field_width", format!("must be in 1..={}", MAX_FIELD_DIMENSION)));
        }
        if !(1..=MAX_FIELD_DIMENSION).contains(&self.field_height) {
            return Err(invalid("field_height", format!("must be in 1..={}", MAX_FIELD_DIMENSION)));
        }
        if self.initial_block_count == 0 {
            return Err(invalid("initial_block_count", "at least one block is required"));
        }
        if self.payload_chance_percent > 100 {
            return Err(invalid("payload_chance_percent", "must be at most 100"));
        }
        if self.gravity_fall_chance_percent > 100 {
            return Err(invalid("gravity_fall_chance_percent", "must be at most 100"));
        }
        if self.spawn_min_y >= self.respawn_max_y || self.respawn_max_y > 0 {
            return Err(invalid("respawn_max_y", "need spawn_min_y < respawn_max_y <= 0"));
        }
        if self.spawn_min_y < -MAX_FIELD_DIMENSION {
            return Err(invalid("spawn_min_y", "too far above the field"));
        }
        if self.floor_tile_size <= 0 || self.floor_tile_size > self.field_width {
            return Err(invalid("floor_tile_size", "must be positive and fit the field"));
        }
        if self.max_floor_gaps == 0 {
            return Err(invalid("max_floor_gaps", "at least one gap is always cut"));
        }
        let ground = &self.ground_player;
        if ground.width <= 0 || ground.height <= 0 {
            return Err(invalid("ground_player", "size must be positive"));
        }
        if ground.speed < 0 || ground.jump_height < 0 {
            return Err(invalid("ground_player", "speed and jump height must not be negative"));
        }
        Ok(())
    }

    /// Field width as fixed-point.
    pub fn width_fixed(&self) -> Fixed {
        from_int(self.field_width)
    }

    /// Field height as fixed-point.
    pub fn height_fixed(&self) -> Fixed {
        from_int(self.field_height)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `GameConfig`.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// No preset with that name.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A value is out of range.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(GameConfig::classic().validate().is_ok());
        assert!(GameConfig::storm().validate().is_ok());
        assert_eq!(GameConfig::default(), GameConfig::classic());
    }

    #[test]
    fn test_presets_differ_only_where_variants_do() {
        let classic = GameConfig::classic();
        let storm = GameConfig::storm();
        assert_eq!(classic.initial_block_count, 5);
        assert_eq!(storm.initial_block_count, 20);
        assert_eq!(classic.payload_chance_percent, 50);
        assert_eq!(storm.payload_chance_percent, 5);
        assert!(classic.animate_ground_player);
        assert!(!storm.animate_ground_player);
        assert_eq!(classic.ground_player, storm.ground_player);
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(GameConfig::preset(" Storm ").unwrap(), GameConfig::storm());
        assert!(matches!(
            GameConfig::preset("hurricane"),
            Err(ConfigError::UnknownPreset(name)) if name == "hurricane"
        ));
    }

    #[test]
    fn test_json_partial_override() {
        let config = GameConfig::from_json_str(
            r#"{ "initial_block_count": 7, "crash_policy": "erode_platform",
                 "ground_player": { "speed": 5 } }"#,
        )
        .unwrap();
        assert_eq!(config.initial_block_count, 7);
        assert_eq!(config.crash_policy, CrashPolicy::ErodePlatform);
        assert_eq!(config.ground_player.speed, 5);
        assert_eq!(config.ground_player.width, 32);
        assert_eq!(config.field_width, 800);
    }

    #[test]
    fn test_json_rejects_invalid_values() {
        let err = GameConfig::from_json_str(r#"{ "payload_chance_percent": 150 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "payload_chance_percent", .. }));

        let err = GameConfig::from_json_str(r#"{ "initial_block_count": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "initial_block_count", .. }));

        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_fixed_accessors() {
        let config = GameConfig::classic();
        assert_eq!(config.width_fixed(), crate::core::fixed::FIELD_WIDTH);
        assert_eq!(config.height_fixed(), crate::core::fixed::FIELD_HEIGHT);
        assert_eq!(config.ground_player.speed_fixed(), from_int(3));
        assert_eq!(config.ground_player.jump_fixed(), from_int(6));
    }
}
