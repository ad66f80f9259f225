use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine::Viewport;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use super::gameplay::{CameraMode, PlayerTuning, SceneSettings, JUMP_CLEARANCE};

pub(crate) const CONFIG_ENV_VAR: &str = "QUESTRUN_CONFIG";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse config '{path}' at {location}: {source}")]
    Parse {
        path: PathBuf,
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("validation failed at {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Game tuning read from an optional JSON file. Every field has a default,
/// so an empty object is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub viewport: Viewport,
    pub window_scale: f64,
    pub world_width: f32,
    pub ground_thickness: f32,
    pub player: PlayerTuning,
    pub scroll_speed: f32,
    pub camera_mode: CameraMode,
    /// `None` or 0 renders uncapped.
    pub fps_cap: Option<u32>,
    pub show_overlay: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        let scene = SceneSettings::default();
        Self {
            viewport: scene.viewport,
            window_scale: 1.0,
            world_width: scene.world_width,
            ground_thickness: scene.ground_thickness,
            player: scene.tuning,
            scroll_speed: scene.scroll_speed,
            camera_mode: scene.camera_mode,
            fps_cap: Some(60),
            show_overlay: false,
        }
    }
}

impl GameConfig {
    pub(crate) fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            viewport: self.viewport,
            world_width: self.world_width,
            ground_thickness: self.ground_thickness,
            tuning: self.player,
            scroll_speed: self.scroll_speed,
            camera_mode: self.camera_mode,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(invalid(
                "viewport",
                format!(
                    "expected non-zero size, got {}x{}",
                    self.viewport.width, self.viewport.height
                ),
            ));
        }
        if !self.window_scale.is_finite() || self.window_scale <= 0.0 {
            return Err(expected_actual(
                "window_scale",
                "a positive number",
                self.window_scale,
            ));
        }
        if !at_least(self.world_width, self.viewport.width as f32) {
            return Err(expected_actual(
                "world_width",
                format!("at least viewport width {}", self.viewport.width),
                self.world_width,
            ));
        }
        if !at_least(self.ground_thickness, 0.0)
            || self.ground_thickness >= self.viewport.height as f32
        {
            return Err(expected_actual(
                "ground_thickness",
                format!("between 0 and viewport height {}", self.viewport.height),
                self.ground_thickness,
            ));
        }
        let player = &self.player;
        if !positive(player.width) || !positive(player.height) {
            return Err(invalid(
                "player",
                format!(
                    "expected positive size, got {}x{}",
                    player.width, player.height
                ),
            ));
        }
        if !positive(player.gravity_accel) {
            return Err(expected_actual(
                "player.gravity_accel",
                "a positive number",
                player.gravity_accel,
            ));
        }
        if !positive(-player.jump_impulse) {
            return Err(expected_actual(
                "player.jump_impulse",
                "a negative number",
                player.jump_impulse,
            ));
        }
        let apex = player.jump_apex_height();
        if apex <= JUMP_CLEARANCE {
            return Err(expected_actual(
                "player.jump_impulse",
                format!("a jump rising more than {JUMP_CLEARANCE} units"),
                format!("{apex:.1}"),
            ));
        }
        if !at_least(player.horizontal_speed, 0.0) {
            return Err(expected_actual(
                "player.horizontal_speed",
                "zero or more",
                player.horizontal_speed,
            ));
        }
        if !at_least(self.scroll_speed, 0.0) {
            return Err(expected_actual(
                "scroll_speed",
                "zero or more",
                self.scroll_speed,
            ));
        }
        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn at_least(value: f32, min: f32) -> bool {
    value.is_finite() && value >= min
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: message.into(),
    }
}

fn expected_actual(
    field: &'static str,
    expected: impl std::fmt::Display,
    actual: impl std::fmt::Display,
) -> ConfigError {
    invalid(field, format!("expected {expected}, got {actual}"))
}

/// Loads the file named by `QUESTRUN_CONFIG`, or defaults when it is unset.
pub(crate) fn load_from_env() -> Result<GameConfig, ConfigError> {
    match env::var(CONFIG_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => load_from_path(Path::new(path.trim())),
        Ok(_) | Err(env::VarError::NotPresent) => Ok(GameConfig::default()),
        Err(error) => {
            warn!(
                env_var = CONFIG_ENV_VAR,
                error = %error,
                "unable to read config env var; using defaults"
            );
            Ok(GameConfig::default())
        }
    }
}

pub(crate) fn load_from_path(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_json(&raw, path)
}

pub(crate) fn parse_config_json(raw: &str, path: &Path) -> Result<GameConfig, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let config: GameConfig =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
            let location = error.path().to_string();
            ConfigError::Parse {
                path: path.to_path_buf(),
                location,
                source: error.into_inner(),
            }
        })?;
    config.validate()?;
    Ok(config)
}
