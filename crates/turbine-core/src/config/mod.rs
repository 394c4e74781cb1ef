//! YAML configuration: field seeds, labels, palettes and service settings.
//!
//! Defaults are embedded at compile time. A user file is overlaid on top of
//! them key by key, so it only needs to name what it changes.
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::ConfigError;
use crate::params::ParamKey;
use crate::presentation::ThemeMode;

// ============================================================================
// Fields
// ============================================================================

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: String,
    pub seed: String,
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FieldsConfig {
    pub low: FieldSpec,
    pub high: FieldSpec,
    pub certainty: FieldSpec,
    pub delay: FieldSpec,
}

impl FieldsConfig {
    pub fn get(&self, key: ParamKey) -> &FieldSpec {
        match key {
            ParamKey::Low => &self.low,
            ParamKey::High => &self.high,
            ParamKey::Certainty => &self.certainty,
            ParamKey::Delay => &self.delay,
        }
    }
}

// ============================================================================
// Labels & presentation
// ============================================================================

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Shown before the first result
    pub placeholder: String,
    /// Interim text while a request is in flight; `None` keeps the last value
    #[serde(default)]
    pub working: Option<String>,
    pub failed: String,
    pub unavailable: String,
    pub submit: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PresentationConfig {
    pub theme: ThemeMode,
    pub history_len: usize,
}

/// RGB color as [r, g, b] array
pub type RgbColor = [u8; 3];

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Palette {
    /// First slot of the output color cycle
    pub primary: RgbColor,
    /// Second slot of the output color cycle
    pub alternate: RgbColor,
    pub text: RgbColor,
    pub text_muted: RgbColor,
    pub input_bg: RgbColor,
    pub button_bg: RgbColor,
    pub button_bg_busy: RgbColor,
    pub spinner: RgbColor,
    pub notice: RgbColor,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Palettes {
    pub light: Palette,
    pub dark: Palette,
}

impl Palettes {
    pub fn get(&self, mode: ThemeMode) -> &Palette {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

// ============================================================================
// Service
// ============================================================================

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Local,
    Http,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub kind: ServiceKind,
    pub warmup_ms: u64,
    pub endpoint: String,
    #[serde(default)]
    pub readiness_timeout_ms: Option<u64>,
}

impl ServiceConfig {
    pub fn warmup(&self) -> Duration {
        Duration::from_millis(self.warmup_ms)
    }

    pub fn readiness_timeout(&self) -> Option<Duration> {
        self.readiness_timeout_ms.map(Duration::from_millis)
    }
}

// ============================================================================
// Root
// ============================================================================

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub fields: FieldsConfig,
    pub labels: Labels,
    pub presentation: PresentationConfig,
    pub palettes: Palettes,
    pub service: ServiceConfig,
}

static DEFAULTS: LazyLock<Value> = LazyLock::new(|| {
    serde_yaml::from_str(include_str!("../../../../yamls/turbine.yaml"))
        .unwrap_or_else(|e| panic!("Failed to parse turbine.yaml: {}", e))
});

impl Default for Config {
    fn default() -> Self {
        serde_yaml::from_value(DEFAULTS.clone()).unwrap_or_else(|e| panic!("Invalid embedded turbine.yaml: {}", e))
    }
}

impl Config {
    /// Embedded defaults, optionally overlaid with the file at `path`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_overlay(&text)
    }

    /// Parse `text` and overlay it on the embedded defaults.
    pub fn from_overlay(text: &str) -> Result<Self, ConfigError> {
        let mut merged = DEFAULTS.clone();
        let user: Value = serde_yaml::from_str(text)?;
        // An empty file parses as null
        if !user.is_null() {
            overlay(&mut merged, user);
        }
        let config: Config = serde_yaml::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for key in ParamKey::ALL {
            let spec = self.fields.get(key);
            if let (Some(min), Some(max)) = (spec.min, spec.max)
                && min > max
            {
                return Err(ConfigError::Invalid(format!("{key}: min {min} is above max {max}")));
            }
        }
        if self.service.kind == ServiceKind::Http && self.service.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("service.endpoint is required for the http service".into()));
        }
        Ok(())
    }
}

/// Recursively merge mappings; any non-mapping value in `top` replaces `base`.
fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Mapping(base), Value::Mapping(top)) => {
            for (key, value) in top {
                match base.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, top) => *base = top,
    }
}
