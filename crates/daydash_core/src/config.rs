//! Layered dashboard configuration.
//!
//! # Responsibility
//! - Merge built-in defaults, an optional TOML file and `DAYDASH_*`
//!   environment variables into one `DashboardConfig`.
//! - Reject values the managers and timer cannot work with.
//!
//! # Invariants
//! - Later layers win: defaults < TOML file < environment.
//! - A config file named explicitly must exist; the default one is optional.

use crate::logging::default_log_level;
use crate::timer::focus_timer::FocusTimer;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "daydash.toml";
pub const ENV_PREFIX: &str = "DAYDASH_";
const DEFAULT_DB_FILE: &str = "daydash.sqlite3";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    /// Explicitly requested config file does not exist.
    MissingFile(PathBuf),
    Extract(Box<figment::Error>),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFile(path) => write!(f, "config file not found: {}", path.display()),
            Self::Extract(err) => write!(f, "failed to read configuration: {err}"),
            Self::Invalid(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Extract(err) => Some(err.as_ref()),
            Self::MissingFile(_) | Self::Invalid(_) => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Extract(Box::new(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    /// TOML: `[data]`.
    #[serde(default)]
    pub data: DataConfig,
    /// TOML: `[logging]`.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// TOML: `[timer]`.
    #[serde(default)]
    pub timer: TimerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// SQLite file holding every persisted key. Default: `daydash.sqlite3`.
    pub db_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `trace|debug|info|warn|error`. Default depends on build mode.
    pub level: String,
    /// Absolute directory for rolling log files. Unset disables file logging.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
        }
    }
}

impl TimerConfig {
    pub fn work_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.work_minutes) * 60)
    }

    pub fn break_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.break_minutes) * 60)
    }

    pub fn build_timer(&self) -> FocusTimer {
        FocusTimer::with_durations(self.work_duration(), self.break_duration())
    }
}

impl DashboardConfig {
    /// Builds the layered figment.
    ///
    /// `config_file = None` uses `daydash.toml` in the working directory when
    /// it exists.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(DashboardConfig::default()));
        let figment = match config_file {
            Some(path) => figment.merge(Toml::file(path)),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
            }
            None => figment,
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extracts and validates configuration.
    pub fn load(config_file: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
        }
        Self::from_figment(&Self::figment(config_file))
    }

    pub fn from_figment(figment: &Figment) -> ConfigResult<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.data.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data.db_path must not be empty".to_string()));
        }
        if self.timer.work_minutes == 0 || self.timer.break_minutes == 0 {
            return Err(ConfigError::Invalid(
                "timer.work_minutes and timer.break_minutes must be at least 1".to_string(),
            ));
        }
        if let Some(dir) = &self.logging.dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "logging.dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}
