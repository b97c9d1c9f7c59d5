//! Configuration models and loaders for planning runs.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// How staggered launches are enforced.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LaunchPolicy {
    /// Hold the balloon at launch until its slot opens, then plan freely.
    #[default]
    Parked,
    /// Plan freely from turn 0, but force an ascent once the slot opens if the
    /// balloon is still grounded.
    Deadline,
}

/// Tuning knobs for the sequential lookahead planner.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PlannerConfig {
    pub random_seed: u64,
    pub lookahead_depth: usize,
    /// Turns between consecutive launch slots.
    pub stagger_interval: usize,
    /// Balloons sharing one launch slot.
    pub batch_size: usize,
    pub launch_policy: LaunchPolicy,
    /// Keep balloon 0 on the ground for the whole horizon.
    pub anchor_first_balloon: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            random_seed: 2000,
            lookahead_depth: 50,
            stagger_interval: 10,
            batch_size: 5,
            launch_policy: LaunchPolicy::Parked,
            anchor_first_balloon: false,
        }
    }
}

impl PlannerConfig {
    /// Turn at which balloon `index` may first leave the ground.
    pub fn launch_slot(&self, index: usize) -> usize {
        (index / self.batch_size.max(1)) * self.stagger_interval
    }
}

/// Hill-climbing baseline settings.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LocalSearchConfig {
    pub iterations: usize,
    pub random_seed: u64,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            iterations: 200,
            random_seed: 2000,
        }
    }
}

/// Complete run configuration as read from disk.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
    pub planner: PlannerConfig,
    pub local_search: LocalSearchConfig,
}

impl RunConfig {
    /// Reject settings the planner cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.planner.batch_size == 0 {
            return Err(ConfigError::Invalid("planner.batch_size must be positive".into()));
        }
        if self.planner.lookahead_depth == 0 {
            return Err(ConfigError::Invalid(
                "planner.lookahead_depth must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load and validate a run configuration from a `.toml` or YAML file.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let config: RunConfig = load_record(path)?;
    config.validate()?;
    Ok(config)
}

/// Parse a run configuration from TOML text.
pub fn parse_toml(contents: &str) -> Result<RunConfig, ConfigError> {
    let config: RunConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

fn load_record<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = parse_toml("[planner]\nlookahead_depth = 8\n").unwrap();
        assert_eq!(config.planner.lookahead_depth, 8);
        assert_eq!(config.planner.batch_size, 5);
        assert_eq!(config.local_search, LocalSearchConfig::default());
    }

    #[test]
    fn launch_policy_parses_snake_case() {
        let config = parse_toml("[planner]\nlaunch_policy = \"deadline\"\n").unwrap();
        assert_eq!(config.planner.launch_policy, LaunchPolicy::Deadline);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = parse_toml("[planner]\nbatch_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn launch_slots_advance_per_batch() {
        let planner = PlannerConfig {
            batch_size: 2,
            stagger_interval: 7,
            ..PlannerConfig::default()
        };
        assert_eq!(planner.launch_slot(0), 0);
        assert_eq!(planner.launch_slot(1), 0);
        assert_eq!(planner.launch_slot(2), 7);
        assert_eq!(planner.launch_slot(5), 14);
    }
}
