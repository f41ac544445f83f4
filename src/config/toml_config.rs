use crate::utils::error::{ParkingError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_one_of, validate_path, validate_socket_addr, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE_PATH: &str = "parking.db";

/// Settings read from the optional `--config` file. Every section may be
/// omitted; missing values fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: default_log_format(),
        }
    }
}

impl BoardConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ParkingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ParkingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validate_socket_addr("server.bind", &self.server.bind)
    }

    pub fn database_path(&self) -> &str {
        &self.database.path
    }

    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.logging.format).unwrap_or(LogFormat::Compact)
    }
}

impl Validate for BoardConfig {
    fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        validate_path("database.path", &self.database.path)?;
        validate_one_of("logging.format", &self.logging.format, &["compact", "json"])?;
        if let Some(level) = &self.logging.level {
            validate_one_of(
                "logging.level",
                level,
                &["trace", "debug", "info", "warn", "error"],
            )?;
        }
        Ok(())
    }
}

/// Replaces `${VAR}` with the environment value; unknown variables are left as written.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ParkingError::ConfigError {
        message: format!("env var pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BoardConfig::from_toml_str("").unwrap();

        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert_eq!(config.database_path(), DEFAULT_DATABASE_PATH);
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
bind = "0.0.0.0:8080"

[database]
path = "/var/lib/parking/board.db"

[logging]
level = "debug"
format = "json"
"#;

        let config = BoardConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_addr().unwrap().port(), 8080);
        assert_eq!(config.database_path(), "/var/lib/parking/board.db");
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PARKING_BOARD_TEST_DB", "/tmp/from-env.db");

        let toml_content = r#"
[database]
path = "${PARKING_BOARD_TEST_DB}"
"#;

        let config = BoardConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.database_path(), "/tmp/from-env.db");

        std::env::remove_var("PARKING_BOARD_TEST_DB");
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let out = substitute_env_vars("path = \"${PARKING_BOARD_SURELY_UNSET}\"").unwrap();
        assert_eq!(out, "path = \"${PARKING_BOARD_SURELY_UNSET}\"");
    }

    #[test]
    fn test_config_validation() {
        let config = BoardConfig::from_toml_str("[server]\nbind = \"not-an-address\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = BoardConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = BoardConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"127.0.0.1:9000\"\n")
            .unwrap();

        let config = BoardConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9000");
    }
}
