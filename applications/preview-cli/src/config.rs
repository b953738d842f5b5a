/// CLI configuration
use crate::error::Result;
use preview_playback::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "preview.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Virtual clock of the simulated output
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Media seconds advanced per wall-clock second
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Length reported for every preview
    #[serde(default = "default_preview_length_secs")]
    pub preview_length_secs: f64,

    /// Delay before an attached item becomes ready
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,
}

impl SimulationSettings {
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    pub fn preview_length(&self) -> Duration {
        Duration::try_from_secs_f64(self.preview_length_secs).unwrap_or_default()
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            preview_length_secs: default_preview_length_secs(),
            load_delay_ms: default_load_delay_ms(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `preview.toml` is read if
    /// present. `PREVIEW_` variables override both, e.g.
    /// `PREVIEW_ENGINE__REPEAT=true` or `PREVIEW_SIMULATION__SPEED=4`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        let config = settings.add_source(env).build()?;
        Ok(config.try_deserialize()?)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("PREVIEW")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn default_speed() -> f64 {
    1.0
}

fn default_preview_length_secs() -> f64 {
    30.0
}

fn default_load_delay_ms() -> u64 {
    250
}
