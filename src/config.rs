//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::calculator::{Calculator, DEFAULT_MAX_POINTS, DEFAULT_SCALE_ANCHOR_DAYS};
use crate::form::FormDefaults;
use crate::model::{FeeSchedule, SweepParameters};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calculator: CalculatorConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Calculator defaults and chart policy
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default = "default_total_days")]
    pub total_days: u32,

    #[serde(default = "default_max_interval")]
    pub max_interval: u32,

    #[serde(default = "default_step_days")]
    pub step_days: u32,

    #[serde(default = "default_base_months")]
    pub base_months: u32,

    #[serde(default = "default_first_visit_fee")]
    pub first_visit_fee: f64,

    #[serde(default = "default_repeat_visit_fee")]
    pub repeat_visit_fee: f64,

    #[serde(default = "default_other_fee")]
    pub other_fee: f64,

    /// Interval whose cost fixes the y axis; 0 disables the anchor
    #[serde(default = "default_scale_anchor")]
    pub scale_anchor_days: u32,

    /// Upper bound on swept points per request; larger sweeps are clamped
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

fn default_total_days() -> u32 {
    SweepParameters::DEFAULT_TOTAL_DAYS
}

fn default_max_interval() -> u32 {
    SweepParameters::DEFAULT_MAX_INTERVAL
}

fn default_step_days() -> u32 {
    SweepParameters::DEFAULT_STEP_DAYS
}

fn default_base_months() -> u32 {
    SweepParameters::DEFAULT_BASE_MONTHS
}

fn default_first_visit_fee() -> f64 {
    FeeSchedule::default().first_visit_fee
}

fn default_repeat_visit_fee() -> f64 {
    FeeSchedule::default().repeat_visit_fee
}

fn default_other_fee() -> f64 {
    FeeSchedule::default().other_fee
}

fn default_scale_anchor() -> u32 {
    DEFAULT_SCALE_ANCHOR_DAYS
}

fn default_max_points() -> usize {
    DEFAULT_MAX_POINTS
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            total_days: default_total_days(),
            max_interval: default_max_interval(),
            step_days: default_step_days(),
            base_months: default_base_months(),
            first_visit_fee: default_first_visit_fee(),
            repeat_visit_fee: default_repeat_visit_fee(),
            other_fee: default_other_fee(),
            scale_anchor_days: default_scale_anchor(),
            max_points: default_max_points(),
        }
    }
}

impl CalculatorConfig {
    pub fn fees(&self) -> FeeSchedule {
        FeeSchedule::new(self.first_visit_fee, self.repeat_visit_fee, self.other_fee)
    }

    pub fn sweep(&self) -> SweepParameters {
        SweepParameters {
            total_days: self.total_days,
            max_interval: self.max_interval,
            step_days: self.step_days,
            base_months: self.base_months,
        }
    }

    pub fn scale_anchor(&self) -> Option<u32> {
        (self.scale_anchor_days > 0).then_some(self.scale_anchor_days)
    }

    /// Build a calculator using these defaults
    pub fn calculator(&self) -> Calculator {
        Calculator::new(
            FormDefaults {
                fees: self.fees(),
                sweep: self.sweep(),
            },
            self.scale_anchor(),
        )
        .with_max_points(self.max_points)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.sweep()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.max_points == 0 {
            return Err(ConfigError::Invalid(
                "max_points must be at least 1".to_string(),
            ));
        }

        let fees = [
            ("first_visit_fee", self.first_visit_fee),
            ("repeat_visit_fee", self.repeat_visit_fee),
            ("other_fee", self.other_fee),
        ];
        for (name, value) in fees {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_enable_export")]
    pub enable_export: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_request_timeout() -> u64 {
    30
}

fn default_enable_export() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
            request_timeout_secs: default_request_timeout(),
            enable_export: default_enable_export(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.calculator.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("visitcost").join("config.toml")),
            Some(PathBuf::from("/etc/visitcost/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(host) = std::env::var("VISITCOST_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("VISITCOST_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Calculator overrides
        if let Ok(anchor) = std::env::var("VISITCOST_SCALE_ANCHOR") {
            if let Ok(days) = anchor.parse() {
                self.calculator.scale_anchor_days = days;
            }
        }
        if let Ok(max_points) = std::env::var("VISITCOST_MAX_POINTS") {
            if let Ok(n) = max_points.parse::<usize>() {
                if n > 0 {
                    self.calculator.max_points = n;
                }
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("VISITCOST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("VISITCOST_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Visitcost Configuration
#
# Environment variables override these settings:
# - VISITCOST_API_HOST
# - VISITCOST_API_PORT
# - VISITCOST_SCALE_ANCHOR
# - VISITCOST_MAX_POINTS
# - VISITCOST_LOG_LEVEL
# - VISITCOST_LOG_FORMAT

[calculator]
# Total horizon in days (6 years)
total_days = 2190

# Largest visit interval to evaluate (days)
max_interval = 120

# Increment between evaluated intervals (days)
step_days = 1

# Months separating repeat-visit from first-visit pricing (x 30 days)
base_months = 3

# Default fees
first_visit_fee = 292
repeat_visit_fee = 80
other_fee = 694

# Interval whose cost fixes the chart's y axis (0 = automatic scaling)
scale_anchor_days = 20

# Largest number of intervals evaluated per request (longer sweeps are cut short)
max_points = 100000

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Allowed CORS origins (empty = permissive)
cors_origins = ["http://localhost:8080", "http://127.0.0.1:8080"]

# Request timeout in seconds
request_timeout_secs = 30

# Enable the export endpoint
enable_export = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
