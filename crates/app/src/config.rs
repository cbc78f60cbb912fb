//! JSON run configuration.

use std::fs;
use std::path::Path;

use control::PidGains;
use log::debug;
use serde::{Deserialize, Serialize};
use simcore::{CartPoleParams, CartPoleState, SimResult, TrackLimits};

/// Everything needed to start a run. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub params: CartPoleParams,
    pub track: TrackLimits,
    pub gains: PidGains,
    pub initial_state: CartPoleState,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            params: CartPoleParams::default(),
            track: TrackLimits::default(),
            gains: PidGains::default(),
            initial_state: CartPoleState::new(0.0, 0.0, 0.15, 0.0),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simcore::SimError;

    #[test]
    fn test_empty_object_is_default() {
        let config = SimConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.initial_state.theta, 0.15);
    }

    #[test]
    fn test_nested_overrides() {
        let json = r#"{
            "params": { "substeps": 4, "settle": { "hold_time": 2.0 } },
            "track": { "x_min": -1.0, "x_max": 1.0 },
            "gains": { "k_p": 8.0 }
        }"#;
        let config = SimConfig::from_json_str(json).unwrap();
        assert_eq!(config.params.substeps, 4);
        assert_eq!(config.params.settle.hold_time, 2.0);
        assert_eq!(config.params.settle.x_thresh, 0.05);
        assert_eq!(config.track, TrackLimits::new(-1.0, 1.0));
        assert_eq!(config.gains.k_p, 8.0);
        assert_eq!(config.gains.k_d, 3.0);
    }

    #[test]
    fn test_written_config_reads_back() {
        let mut config = SimConfig::default();
        config.gains.k_i = 0.25;
        let json = config.to_json_string().unwrap();
        assert_eq!(SimConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_bad_json_and_missing_file() {
        assert!(matches!(SimConfig::from_json_str("{ params"), Err(SimError::Json(_))));
        assert!(matches!(
            SimConfig::from_path("/definitely/not/here.json"),
            Err(SimError::Io(_))
        ));
    }
}
