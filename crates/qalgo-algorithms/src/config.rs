//! Run configuration.
//!
//! Sources, highest precedence first:
//! 1. Environment variables (`QALGO_BACKEND`, `QALGO_SHOTS`, `QALGO_SEED`)
//! 2. A YAML configuration file
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AlgoError, AlgoResult};

/// Environment variable naming the backend.
pub const ENV_BACKEND: &str = "QALGO_BACKEND";
/// Environment variable holding the shot count.
pub const ENV_SHOTS: &str = "QALGO_SHOTS";
/// Environment variable holding the RNG seed.
pub const ENV_SEED: &str = "QALGO_SEED";

/// How algorithms are run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Name of the backend the circuits are meant for.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Repetitions per circuit.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Seed for the Deutsch-Jozsa constant coin flip. Unseeded runs draw from
    /// the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_backend() -> String {
    "qasm_simulator".to_string()
}

fn default_shots() -> u32 {
    1024
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            shots: default_shots(),
            seed: None,
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AlgoResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AlgoError::Config(format!("cannot read {}: {e}", path.display())))?;

        let config: RunConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| AlgoError::Config(format!("cannot parse {}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by the environment.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Load from an optional file, then apply environment overrides.
    pub fn load(config_file: Option<&Path>) -> AlgoResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply the `QALGO_*` environment variables that are set.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    pub fn merge_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_BACKEND) {
            self.backend = v;
        }
        if let Some(v) = lookup(ENV_SHOTS) {
            match v.parse() {
                Ok(shots) => self.shots = shots,
                Err(_) => warn!(var = ENV_SHOTS, value = %v, "Ignoring unparsable shot count"),
            }
        }
        if let Some(v) = lookup(ENV_SEED) {
            match v.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => warn!(var = ENV_SEED, value = %v, "Ignoring unparsable seed"),
            }
        }
        self
    }

    /// Reject settings no run can use.
    pub fn validate(&self) -> AlgoResult<()> {
        if self.shots == 0 {
            return Err(AlgoError::Config("shots must be positive".to_string()));
        }
        if self.backend.trim().is_empty() {
            return Err(AlgoError::Config("backend name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.backend, "qasm_simulator");
        assert_eq!(config.shots, 1024);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_shots_and_empty_backend() {
        let mut config = RunConfig::default();
        config.shots = 0;
        assert!(matches!(config.validate(), Err(AlgoError::Config(_))));

        let mut config = RunConfig::default();
        config.backend = "  ".to_string();
        assert!(matches!(config.validate(), Err(AlgoError::Config(_))));
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shots: 2048\nseed: 42").unwrap();

        let config = RunConfig::from_file(file.path()).unwrap();
        assert_eq!(config.backend, "qasm_simulator");
        assert_eq!(config.shots, 2048);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(matches!(RunConfig::from_file(&missing), Err(AlgoError::Config(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shots: [1, 2]").unwrap();
        assert!(matches!(RunConfig::from_file(file.path()), Err(AlgoError::Config(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shots: 0").unwrap();
        assert!(matches!(RunConfig::from_file(file.path()), Err(AlgoError::Config(_))));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend: aer\nshots: 2048").unwrap();

        let config = RunConfig::from_file(file.path())
            .unwrap()
            .merge_vars(vars(&[(ENV_SHOTS, "512"), (ENV_SEED, "7")]));
        assert_eq!(config.backend, "aer");
        assert_eq!(config.shots, 512);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_unparsable_env_values_are_ignored() {
        let config = RunConfig::default()
            .merge_vars(vars(&[(ENV_SHOTS, "lots"), (ENV_SEED, "-1"), (ENV_BACKEND, "sv")]));
        assert_eq!(config.shots, 1024);
        assert_eq!(config.seed, None);
        assert_eq!(config.backend, "sv");
    }
}
