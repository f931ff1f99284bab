use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::i18n::DEFAULT_LANGUAGE_COOKIE;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub language: LanguageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-request timeout in seconds (default: 30)
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Cookie holding the language the user picked in the UI
    pub cookie_name: String,
    /// Whether a stored cookie choice takes precedence over Accept-Language
    pub honor_cookie: bool,
}

impl LanguageConfig {
    /// Cookie to consult, if cookie lookup is enabled
    pub fn active_cookie(&self) -> Option<&str> {
        self.honor_cookie.then_some(self.cookie_name.as_str())
    }
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or the first config.toml found
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let config_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::find_config_file(),
        };

        let mut config = if let Some(config_path) = config_path {
            tracing::info!("Loading configuration from {}", config_path.display());
            Self::from_toml(&config_path)?
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_REQUEST_TIMEOUT: Request timeout (accepts "30s", "5m", or plain seconds)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,output_language=debug")
    /// - APP_LOG_FILE: Log file path; empty disables file logging
    /// - APP_LANGUAGE_COOKIE_NAME: Cookie holding the stored language choice
    /// - APP_LANGUAGE_HONOR_COOKIE: Whether the stored choice is honored (true/false)
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(timeout) = std::env::var("APP_REQUEST_TIMEOUT") {
            match parse_duration_to_secs(&timeout) {
                Ok(val) => {
                    self.server.request_timeout_secs = val;
                    tracing::info!(
                        "Override server.request_timeout_secs from env: {}",
                        self.server.request_timeout_secs
                    );
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_REQUEST_TIMEOUT '{}': {} (keep {})",
                    timeout,
                    e,
                    self.server.request_timeout_secs
                ),
            }
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Ok(file) = std::env::var("APP_LOG_FILE") {
            self.logging.file = if file.trim().is_empty() { None } else { Some(file) };
            tracing::info!("Override logging.file from env: {:?}", self.logging.file);
        }

        if let Ok(name) = std::env::var("APP_LANGUAGE_COOKIE_NAME") {
            self.language.cookie_name = name;
            tracing::info!("Override language.cookie_name from env: {}", self.language.cookie_name);
        }

        if let Ok(honor) = std::env::var("APP_LANGUAGE_HONOR_COOKIE")
            && let Ok(val) = honor.parse()
        {
            self.language.honor_cookie = val;
            tracing::info!("Override language.honor_cookie from env: {}", self.language.honor_cookie);
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("server.request_timeout_secs must be > 0");
        }

        if self.language.honor_cookie
            && (self.language.cookie_name.is_empty()
                || self.language.cookie_name.contains([';', '=', ' ']))
        {
            anyhow::bail!("Invalid language.cookie_name: '{}'", self.language.cookie_name);
        }

        Ok(())
    }

    fn find_config_file() -> Option<PathBuf> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        possible_paths.iter().map(PathBuf::from).find(|path| path.exists())
    }

    fn from_toml(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn from_toml_str(content: &str) -> Result<Self, anyhow::Error> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080, request_timeout_secs: 30 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,output_language=debug".to_string(),
            file: Some("logs/output-language.log".to_string()),
        }
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self { cookie_name: DEFAULT_LANGUAGE_COOKIE.to_string(), honor_cookie: true }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    let multiplier: u64 = match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "h" | "hr" | "hour" | "hours" => 60 * 60,
        _ => return Err(format!("unsupported unit: {}", unit)),
    };
    n.checked_mul(multiplier).ok_or_else(|| "duration too large".to_string())
}

// Accepts numeric or human-friendly string values
fn deserialize_duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '30s', '5m', '1h'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(v as u64) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}
