pub mod board;
pub mod seeder;

pub use crate::domain::model::{
    Lot, LotDetail, LotId, LotSeed, LotSummary, NewLot, NewSpace, SeedReport, Space,
    SpaceStatus,
};
pub use crate::domain::ports::{LotRepository, LotStore};
pub use crate::domain::services::{group_by_row, neighbors, Navigation, SpaceRow};
pub use crate::utils::error::Result;
