pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{InMemoryRepository, SqliteRepository};
pub use config::{BoardConfig, Fixture};
pub use core::{board::ParkingBoard, seeder::Seeder};
pub use http::build_router;
pub use utils::error::{ParkingError, Result};
