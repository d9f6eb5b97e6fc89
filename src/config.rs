//! Configuration management for the WebDriver client

use crate::connection::{ConnectionInfo, Protocol};
use crate::logging::LogLevel;
use crate::transport::HttpOptions;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of every environment variable read by [`Config`]
pub const ENV_PREFIX: &str = "WEBDRIVER";

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scheme of the remote end
    pub protocol: Protocol,

    /// Host of the remote end
    pub host: String,

    /// Port of the remote end
    pub port: u16,

    /// Base path of the remote end, e.g. `/wd/hub`
    pub path: String,

    /// Global log level
    pub log_level: String,

    /// Directory for diagnostics when no output path is established yet
    pub output_dir: Option<PathBuf>,

    /// Output path established before any session is created
    pub log_path: Option<PathBuf>,

    /// Request timeout in milliseconds
    pub timeout: u64,

    /// `User-Agent` header override
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: Protocol::Http,
            host: "localhost".to_string(),
            port: 4444,
            path: "/".to_string(),
            log_level: "info".to_string(),
            output_dir: None,
            log_path: None,
            timeout: 120_000,
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(protocol) = env::var("WEBDRIVER_PROTOCOL") {
            config.protocol = protocol
                .parse()
                .map_err(|_| Error::configuration("Invalid WEBDRIVER_PROTOCOL"))?;
        }

        if let Ok(host) = env::var("WEBDRIVER_HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("WEBDRIVER_PORT") {
            config.port = port
                .parse()
                .map_err(|_| Error::configuration("Invalid WEBDRIVER_PORT"))?;
        }

        if let Ok(path) = env::var("WEBDRIVER_PATH") {
            config.path = path;
        }

        if let Ok(log_level) = env::var("WEBDRIVER_LOG_LEVEL") {
            log_level
                .parse::<LogLevel>()
                .map_err(|_| Error::configuration("Invalid WEBDRIVER_LOG_LEVEL"))?;
            config.log_level = log_level;
        }

        if let Ok(output_dir) = env::var("WEBDRIVER_OUTPUT_DIR") {
            config.output_dir = Some(PathBuf::from(output_dir));
        }

        if let Ok(log_path) = env::var("WEBDRIVER_LOG_PATH") {
            config.log_path = Some(PathBuf::from(log_path));
        }

        if let Ok(timeout) = env::var("WEBDRIVER_TIMEOUT") {
            config.timeout = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid WEBDRIVER_TIMEOUT"))?;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Layer defaults, an optional file and `WEBDRIVER_*` variables, later wins
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let config: Config = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .and_then(|layered| layered.try_deserialize())
            .map_err(|e| Error::configuration(format!("Failed to load config: {}", e)))?;

        config.log_level()?;
        Ok(config)
    }

    /// Parsed global log level
    pub fn log_level(&self) -> Result<LogLevel> {
        self.log_level.parse()
    }

    /// Endpoint new sessions are requested from
    pub fn connection(&self) -> ConnectionInfo {
        ConnectionInfo::new(self.protocol, self.host.clone(), self.port, self.path.clone())
    }

    /// Options for the HTTP transport
    pub fn http_options(&self) -> HttpOptions {
        let mut options = HttpOptions {
            timeout: Duration::from_millis(self.timeout),
            headers: self.headers.clone(),
            ..Default::default()
        };
        if let Some(user_agent) = &self.user_agent {
            options.user_agent = user_agent.clone();
        }
        options
    }
}
