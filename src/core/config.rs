//! Configuration for the place search and the decision wheel
//!
//! Everything has a default matching [`constants`](crate::core::constants), so an
//! application only needs to supply its API credential. Configuration can be
//! built in code, parsed from JSON, or read from the environment.

use crate::core::constants::{
    DEFAULT_LANGUAGE, DEFAULT_REGION, MAX_SPIN_ROTATION_DEG, MIN_SPIN_ROTATION_DEG,
    SEARCH_BIAS_RADIUS_DEG, SPIN_DURATION_MS,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the places API credential.
pub const ENV_API_KEY: &str = "SPINMAP_MAPS_API_KEY";
/// Environment variable overriding the requested language.
pub const ENV_LANGUAGE: &str = "SPINMAP_LANGUAGE";
/// Environment variable overriding the requested region.
pub const ENV_REGION: &str = "SPINMAP_REGION";

/// How the box around the map center constrains autocomplete results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BiasPolicy {
    /// Soft preference: results near the box rank higher
    #[default]
    Bias,
    /// Hard filter: only results inside the box are returned
    Restriction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub region_codes: Vec<String>,
    pub primary_types: Vec<String>,
    pub bias_radius_deg: f64,
    pub bias_policy: BiasPolicy,
    /// Fields requested when resolving a prediction
    pub detail_fields: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            region_codes: vec![DEFAULT_REGION.to_string()],
            primary_types: vec!["restaurant".to_string(), "food".to_string()],
            bias_radius_deg: SEARCH_BIAS_RADIUS_DEG,
            bias_policy: BiasPolicy::Bias,
            detail_fields: ["location", "displayName", "formattedAddress", "id"]
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub spin_duration_ms: u64,
    pub min_rotation_deg: f64,
    pub max_rotation_deg: f64,
}

impl WheelConfig {
    /// Zero-delay wheel, settles as soon as the spin starts
    pub fn instant() -> Self {
        Self {
            spin_duration_ms: 0,
            ..Self::default()
        }
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    /// The rotation range must be positive and non-empty so every spin
    /// moves the wheel forward
    pub fn validate(&self) -> Result<()> {
        if !self.min_rotation_deg.is_finite()
            || !self.max_rotation_deg.is_finite()
            || self.min_rotation_deg <= 0.0
            || self.max_rotation_deg <= self.min_rotation_deg
        {
            return Err(MapError::Config(format!(
                "invalid spin rotation range [{}, {})",
                self.min_rotation_deg, self.max_rotation_deg
            )));
        }
        Ok(())
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            min_rotation_deg: MIN_SPIN_ROTATION_DEG,
            max_rotation_deg: MAX_SPIN_ROTATION_DEG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub language: String,
    pub region: String,
    pub search: SearchConfig,
    pub wheel: WheelConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            language: DEFAULT_LANGUAGE.to_string(),
            region: DEFAULT_REGION.to_string(),
            search: SearchConfig::default(),
            wheel: WheelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a JSON document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `SPINMAP_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            config.api_key = Some(key);
        }
        if let Some(language) = lookup(ENV_LANGUAGE) {
            config.language = language;
        }
        if let Some(region) = lookup(ENV_REGION).filter(|r| !r.trim().is_empty()) {
            config = config.with_region(region.trim());
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the region for details lookups and the autocomplete region filter
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self.search.region_codes = vec![self.region.clone()];
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_wheel(mut self, wheel: WheelConfig) -> Self {
        self.wheel = wheel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.wheel.validate()?;
        if !self.search.bias_radius_deg.is_finite() || self.search.bias_radius_deg < 0.0 {
            return Err(MapError::Config(format!(
                "invalid bias radius {}",
                self.search.bias_radius_deg
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.language, "zh-TW");
        assert_eq!(config.region, "tw");
        assert_eq!(config.search.region_codes, vec!["tw".to_string()]);
        assert_eq!(config.search.bias_policy, BiasPolicy::Bias);
        assert_eq!(config.wheel.spin_duration(), Duration::from_millis(3000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = AppConfig::from_json(
            r#"{ "api_key": "abc", "search": { "bias_policy": "restriction" }, "wheel": { "spin_duration_ms": 0 } }"#,
        )
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.search.bias_policy, BiasPolicy::Restriction);
        assert_eq!(config.search.primary_types.len(), 2);
        assert_eq!(config.wheel, WheelConfig::instant());
    }

    #[test]
    fn test_from_json_rejects_inverted_range() {
        let result = AppConfig::from_json(
            r#"{ "wheel": { "min_rotation_deg": 2160.0, "max_rotation_deg": 1440.0 } }"#,
        );
        assert!(matches!(result, Err(MapError::Config(_))));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [(ENV_API_KEY, "key-123"), (ENV_REGION, "jp")]
            .into_iter()
            .collect();
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.region, "jp");
        assert_eq!(config.search.region_codes, vec!["jp".to_string()]);
        assert_eq!(config.language, "zh-TW");
    }

    #[test]
    fn test_region_override_drives_autocomplete_filter() {
        let config = AppConfig::from_lookup(|k| (k == ENV_REGION).then(|| " jp ".to_string())).unwrap();
        assert_eq!(config.region, "jp");
        assert_eq!(config.search.region_codes, vec!["jp".to_string()]);

        let blank = AppConfig::from_lookup(|k| (k == ENV_REGION).then(String::new)).unwrap();
        assert_eq!(blank.region, "tw");
        assert_eq!(blank.search.region_codes, vec!["tw".to_string()]);

        let built = AppConfig::default().with_region("kr");
        assert_eq!(built.search.region_codes, vec!["kr".to_string()]);
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = AppConfig::from_lookup(|k| (k == ENV_API_KEY).then(|| "  ".to_string())).unwrap();
        assert!(config.api_key.is_none());
    }
}
