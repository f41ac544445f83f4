#[cfg(feature = "cli")]
pub mod cli;
pub mod fixture;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use fixture::Fixture;
pub use toml_config::BoardConfig;
