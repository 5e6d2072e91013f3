//! User zoom configuration.
//!
//! Config keys (TOML): `features`, `values`. Missing keys fall back to the
//! default preset. The active [`ZoomSettings`] are derived from the user
//! config and the current server policy by [`configure`].

use crate::constants::*;
use crate::divisor::DivisorBounds;
use crate::input::ZoomKeyMode;
use crate::policy::{DivisorRange, PolicyFlags};
use crate::transition::TransitionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that may occur while loading, saving or validating the zoom config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Smoothing factor outside (0, 1].
    #[error("Smooth multiplier must be in (0, 1], got {0}")]
    InvalidSmoothing(f64),
    /// Linear steps not positive or out of order.
    #[error("Linear steps must satisfy 0 < min <= max, got min {min} max {max}")]
    InvalidLinearSteps { min: f64, max: f64 },
    /// Divisor bounds not positive or out of order.
    #[error("Zoom divisor bounds must satisfy 0 < min <= max, got min {min} max {max}")]
    InvalidDivisorRange { min: f64, max: f64 },
    /// Scroll steps must be positive.
    #[error("Scroll steps must be positive, got {scroll} and {lesser}")]
    InvalidScrollStep { scroll: f64, lesser: f64 },
}

/// Transition option as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionOption {
    Off,
    Smooth,
    Linear,
}

/// Built-in config presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Default,
    /// The plain zoom: no transition, no scrolling, no extras. Forced by servers.
    Classic,
    Persistent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSettings {
    pub zoom_transition: TransitionOption,
    pub zoom_mode: ZoomKeyMode,
    pub zoom_scrolling: bool,
    pub extra_keybinds: bool,
    pub zoom_overlay: bool,
    pub reduce_sensitivity: bool,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            zoom_transition: TransitionOption::Smooth,
            zoom_mode: ZoomKeyMode::Hold,
            zoom_scrolling: true,
            extra_keybinds: true,
            zoom_overlay: false,
            reduce_sensitivity: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueSettings {
    pub zoom_divisor: f64,
    pub minimum_zoom_divisor: f64,
    pub maximum_zoom_divisor: f64,
    pub scroll_step: f64,
    pub lesser_scroll_step: f64,
    pub smooth_multiplier: f64,
    pub minimum_linear_step: f64,
    pub maximum_linear_step: f64,
}

impl Default for ValueSettings {
    fn default() -> Self {
        Self {
            zoom_divisor: DEFAULT_ZOOM_DIVISOR,
            minimum_zoom_divisor: DEFAULT_MINIMUM_ZOOM_DIVISOR,
            maximum_zoom_divisor: DEFAULT_MAXIMUM_ZOOM_DIVISOR,
            scroll_step: DEFAULT_SCROLL_STEP,
            lesser_scroll_step: DEFAULT_LESSER_SCROLL_STEP,
            smooth_multiplier: DEFAULT_SMOOTH_MULTIPLIER,
            minimum_linear_step: DEFAULT_MINIMUM_LINEAR_STEP,
            maximum_linear_step: DEFAULT_MAXIMUM_LINEAR_STEP,
        }
    }
}

/// Zoom configuration as stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub features: FeatureSettings,
    pub values: ValueSettings,
}

impl ZoomConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Default => Self::default(),
            Preset::Classic => Self {
                features: FeatureSettings {
                    zoom_transition: TransitionOption::Off,
                    zoom_mode: ZoomKeyMode::Hold,
                    zoom_scrolling: false,
                    extra_keybinds: false,
                    zoom_overlay: false,
                    reduce_sensitivity: false,
                },
                values: ValueSettings::default(),
            },
            Preset::Persistent => Self {
                features: FeatureSettings {
                    zoom_mode: ZoomKeyMode::Persistent,
                    ..FeatureSettings::default()
                },
                values: ValueSettings::default(),
            },
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load a config file, or the defaults when it does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No zoom config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_toml_string()?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject values the transition engine and divisor logic cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.values;
        if !(v.smooth_multiplier > 0.0 && v.smooth_multiplier <= 1.0) {
            return Err(ConfigError::InvalidSmoothing(v.smooth_multiplier));
        }
        if !(v.minimum_linear_step > 0.0 && v.minimum_linear_step <= v.maximum_linear_step) {
            return Err(ConfigError::InvalidLinearSteps {
                min: v.minimum_linear_step,
                max: v.maximum_linear_step,
            });
        }
        if !(v.minimum_zoom_divisor > 0.0 && v.minimum_zoom_divisor <= v.maximum_zoom_divisor) {
            return Err(ConfigError::InvalidDivisorRange {
                min: v.minimum_zoom_divisor,
                max: v.maximum_zoom_divisor,
            });
        }
        if !(v.scroll_step > 0.0 && v.lesser_scroll_step > 0.0) {
            return Err(ConfigError::InvalidScrollStep {
                scroll: v.scroll_step,
                lesser: v.lesser_scroll_step,
            });
        }
        Ok(())
    }

    pub fn transition(&self) -> TransitionConfig {
        match self.features.zoom_transition {
            TransitionOption::Off => TransitionConfig::Instant,
            TransitionOption::Smooth => TransitionConfig::smooth(self.values.smooth_multiplier),
            TransitionOption::Linear => TransitionConfig::linear(
                self.values.minimum_linear_step,
                self.values.maximum_linear_step,
            ),
        }
    }
}

/// Settings the zoom runs with right now
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSettings {
    pub transition: TransitionConfig,
    pub bounds: DivisorBounds,
    pub zoom_mode: ZoomKeyMode,
    pub zoom_scrolling: bool,
    pub extra_keybinds: bool,
    pub zoom_overlay: bool,
    pub reduce_sensitivity: bool,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        configure(&ZoomConfig::default(), &PolicyFlags::default())
    }
}

/// Merge the user config with server policy.
///
/// A forced classic mode swaps in the classic preset's features; a forced
/// divisor range replaces the configured bounds. The default divisor is kept
/// inside whatever bounds end up active.
pub fn configure(user: &ZoomConfig, flags: &PolicyFlags) -> ZoomSettings {
    let features = if flags.classic_mode_forced() {
        ZoomConfig::preset(Preset::Classic).features
    } else {
        user.features
    };
    let effective = ZoomConfig {
        features,
        values: user.values,
    };

    let (minimum, maximum) = match flags.forced_range().filter(DivisorRange::is_valid) {
        Some(range) => (range.min, range.max),
        None => (user.values.minimum_zoom_divisor, user.values.maximum_zoom_divisor),
    };
    let mut bounds = DivisorBounds {
        minimum,
        maximum,
        scroll_step: user.values.scroll_step,
        lesser_scroll_step: user.values.lesser_scroll_step,
        default_divisor: user.values.zoom_divisor,
    };
    bounds.default_divisor = bounds.clamp(user.values.zoom_divisor);

    ZoomSettings {
        transition: effective.transition(),
        bounds,
        zoom_mode: features.zoom_mode,
        zoom_scrolling: features.zoom_scrolling,
        extra_keybinds: features.extra_keybinds,
        zoom_overlay: features.zoom_overlay,
        reduce_sensitivity: features.reduce_sensitivity,
    }
}
