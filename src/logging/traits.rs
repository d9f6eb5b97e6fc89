//! Logging configuration traits
//!
//! The session core does not own a logging backend. It asks a
//! [`LogConfigurator`] to apply levels and the output path before a handshake
//! emits anything.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{Error, Result};

/// Log level of the global or a named logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    /// `EnvFilter` directive for this level
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "off",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directive())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "silent" | "off" => Ok(LogLevel::Silent),
            other => Err(Error::configuration(format!("Unknown log level: {}", other))),
        }
    }
}

/// Settings applied by a handshake
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// Global level; `None` keeps the default (`info`)
    pub level: Option<LogLevel>,
    /// Per-logger (tracing target) levels, winning over `level` for that target
    pub logger_levels: BTreeMap<String, LogLevel>,
    /// Directory diagnostics are written to
    pub output_path: Option<PathBuf>,
}

impl LogSettings {
    /// Output path for a handshake.
    ///
    /// An already-established path wins unconditionally, then the caller's
    /// output directory; otherwise the path stays unset.
    pub fn resolve_output_path(prior: Option<PathBuf>, output_dir: Option<&Path>) -> Option<PathBuf> {
        prior.or_else(|| output_dir.map(Path::to_path_buf))
    }

    /// `EnvFilter` directives, e.g. `warn,webdriver_session::session=debug`
    pub fn directives(&self) -> String {
        let mut directives = vec![self.level.unwrap_or_default().directive().to_string()];
        directives.extend(
            self.logger_levels
                .iter()
                .map(|(logger, level)| format!("{}={}", logger, level.directive())),
        );
        directives.join(",")
    }
}

/// Logging configuration collaborator
pub trait LogConfigurator: Send + Sync + fmt::Debug {
    /// Output path currently in effect
    fn output_path(&self) -> Option<PathBuf>;

    /// Apply levels and output path; must take effect before returning
    fn configure(&self, settings: &LogSettings) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("silent".parse::<LogLevel>().unwrap(), LogLevel::Silent);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_prior_output_path_wins() {
        let prior = Some(PathBuf::from("/var/log/prior"));
        let resolved = LogSettings::resolve_output_path(prior.clone(), Some(Path::new("/tmp/out")));
        assert_eq!(resolved, prior);
    }

    #[test]
    fn test_output_dir_used_without_prior() {
        let resolved = LogSettings::resolve_output_path(None, Some(Path::new("/tmp/out")));
        assert_eq!(resolved, Some(PathBuf::from("/tmp/out")));
        assert_eq!(LogSettings::resolve_output_path(None, None), None);
    }

    #[test]
    fn test_directives_with_overrides() {
        let mut settings = LogSettings {
            level: Some(LogLevel::Warn),
            ..Default::default()
        };
        settings
            .logger_levels
            .insert("webdriver_session::session".to_string(), LogLevel::Debug);
        settings
            .logger_levels
            .insert("webdriver_session::commands".to_string(), LogLevel::Silent);

        assert_eq!(
            settings.directives(),
            "warn,webdriver_session::commands=off,webdriver_session::session=debug"
        );
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(LogSettings::default().directives(), "info");
    }
}
