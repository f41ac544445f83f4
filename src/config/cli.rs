use crate::config::toml_config::BoardConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "parking-board")]
#[command(about = "Parking occupancy dashboard")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the dashboard and the JSON API
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:3000
        #[arg(long)]
        bind: Option<String>,

        /// SQLite database file
        #[arg(long)]
        database: Option<String>,
    },
    /// Load lots and spaces from a TOML fixture
    Seed {
        fixture: PathBuf,

        /// SQLite database file
        #[arg(long)]
        database: Option<String>,

        /// Delete every existing lot before loading
        #[arg(long)]
        reset: bool,
    },
}

impl CliConfig {
    /// Defaults, then the config file, then flags.
    pub fn resolve(&self) -> Result<BoardConfig> {
        let mut config = match &self.config {
            Some(path) => BoardConfig::from_file(path)?,
            None => BoardConfig::default(),
        };

        match &self.command {
            Command::Serve { bind, database } => {
                if let Some(bind) = bind {
                    config.server.bind = bind.clone();
                }
                if let Some(database) = database {
                    config.database.path = database.clone();
                }
            }
            Command::Seed { database, .. } => {
                if let Some(database) = database {
                    config.database.path = database.clone();
                }
            }
        }

        if self.json_logs {
            config.logging.format = "json".to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn log_format(&self, config: &BoardConfig) -> LogFormat {
        if self.json_logs {
            LogFormat::Json
        } else {
            config.log_format()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[server]\nbind = \"127.0.0.1:9000\"\n[database]\npath = \"file.db\"\n")
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from([
            "parking-board",
            "--config",
            &path,
            "serve",
            "--bind",
            "127.0.0.1:9100",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:9100");
        assert_eq!(config.database_path(), "file.db");
    }

    #[test]
    fn seed_takes_fixture_and_reset() {
        let cli = CliConfig::parse_from([
            "parking-board",
            "seed",
            "lots.toml",
            "--database",
            "seeded.db",
            "--reset",
            "--json-logs",
        ]);

        match &cli.command {
            Command::Seed { fixture, reset, .. } => {
                assert_eq!(fixture, &PathBuf::from("lots.toml"));
                assert!(*reset);
            }
            other => panic!("unexpected command {other:?}"),
        }
        let config = cli.resolve().unwrap();
        assert_eq!(config.database_path(), "seeded.db");
        assert_eq!(cli.log_format(&config), LogFormat::Json);
    }

    #[test]
    fn invalid_bind_flag_fails_validation() {
        let cli = CliConfig::parse_from(["parking-board", "serve", "--bind", "nowhere"]);
        assert!(cli.resolve().is_err());
    }
}
