use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{errors::ConfigError, recurrence::DEFAULT_MAX_EXPANSION_STEPS};

const CONFIG_DIR_NAME: &str = "finance_recurrence";
const CONFIG_FILE_NAME: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Tunables for the recurrence engine and its tooling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "Config::default_max_expansion_steps")]
    pub max_expansion_steps: usize,
    /// Tracing filter directive, e.g. `finance_recurrence=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_directive: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_expansion_steps: Self::default_max_expansion_steps(),
            log_directive: None,
        }
    }
}

impl Config {
    pub fn default_max_expansion_steps() -> usize {
        DEFAULT_MAX_EXPANSION_STEPS
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_expansion_steps == 0 {
            return Err(ConfigError::Invalid(
                "max_expansion_steps must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Loads and stores [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<platform config dir>/finance_recurrence/config.json`.
    pub fn default_location() -> Result<Self, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns defaults when no file exists yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config =
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
