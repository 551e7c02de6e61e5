//! Optional YAML configuration and data directory resolution.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use wellness_core::mortgage::{ClosingCostSchedule, CostAssumptions};
use wellness_core::storage::FileStore;

/// Environment variable consulted when neither the flag nor the config
/// file names a data directory.
pub const DATA_DIR_ENV: &str = "WELLNESS_DATA_DIR";

pub const DEFAULT_DATA_DIR: &str = ".wellness";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellnessConfig {
    pub data_dir: Option<PathBuf>,
    pub cost_assumptions: CostAssumptions,
    pub closing_costs: ClosingCostSchedule,
}

impl WellnessConfig {
    /// Load the config file if one was given; defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
        let config: WellnessConfig = serde_yaml::from_str(&text)
            .map_err(|e| format!("Failed to parse config '{}': {}", path.display(), e))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// Flag, then config file, then environment, then `./.wellness`.
pub fn resolve_data_dir(
    flag: Option<&Path>,
    config: &WellnessConfig,
    env_value: Option<String>,
) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.data_dir.clone())
        .or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: WellnessConfig,
    pub data_dir: PathBuf,
}

impl AppContext {
    pub fn new(
        config_path: Option<&Path>,
        data_dir_flag: Option<&Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = WellnessConfig::load(config_path)?;
        let data_dir = resolve_data_dir(data_dir_flag, &config, std::env::var(DATA_DIR_ENV).ok());
        debug!(data_dir = %data_dir.display(), "resolved data directory");
        Ok(Self { config, data_dir })
    }

    pub fn open_store(&self) -> Result<FileStore, Box<dyn std::error::Error>> {
        Ok(FileStore::open(&self.data_dir)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_data_dir_precedence() {
        let config = WellnessConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let flag = PathBuf::from("/from/flag");

        assert_eq!(
            resolve_data_dir(Some(&flag), &config, Some("/from/env".into())),
            flag
        );
        assert_eq!(
            resolve_data_dir(None, &config, Some("/from/env".into())),
            PathBuf::from("/from/config")
        );
        assert_eq!(
            resolve_data_dir(None, &WellnessConfig::default(), Some("/from/env".into())),
            PathBuf::from("/from/env")
        );
        assert_eq!(
            resolve_data_dir(None, &WellnessConfig::default(), Some("  ".into())),
            PathBuf::from(DEFAULT_DATA_DIR)
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wellness.yaml");
        std::fs::write(
            &path,
            "data_dir: /tmp/wellness\ncost_assumptions:\n  utilities_monthly: \"300\"\n",
        )
        .unwrap();

        let config = WellnessConfig::load(Some(&path)).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/wellness")));
        assert_eq!(config.cost_assumptions.utilities_monthly, dec!(300));
        assert_eq!(config.cost_assumptions.property_tax_rate, dec!(0.012));
        assert_eq!(config.closing_costs, ClosingCostSchedule::default());
    }

    #[test]
    fn test_missing_config_file_errors() {
        assert!(WellnessConfig::load(Some(Path::new("/no/such/wellness.yaml"))).is_err());
    }
}
