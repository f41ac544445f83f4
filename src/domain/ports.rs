use crate::domain::model::{Lot, LotId, LotSeed, NewLot, NewSpace, SeedReport, Space};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read side of the parking store.
#[async_trait]
pub trait LotRepository: Send + Sync {
    /// Active lots ordered by id ascending.
    async fn list_active(&self) -> Result<Vec<Lot>>;

    /// Any lot, active or not.
    async fn get_by_id(&self, id: LotId) -> Result<Option<Lot>>;

    /// Spaces of one lot ordered by space number.
    async fn list_spaces_for_lot(&self, id: LotId) -> Result<Vec<Space>>;
}

/// Write side, used by the seeder.
#[async_trait]
pub trait LotStore: LotRepository {
    async fn create_lot(&self, lot: NewLot) -> Result<Lot>;

    async fn create_space(&self, lot_id: LotId, space: NewSpace) -> Result<Space>;

    /// Deletes the lot and its spaces. Returns false when nothing was deleted.
    async fn delete_lot(&self, id: LotId) -> Result<bool>;

    /// Inserts every seed, after deleting all lots when `reset` is set.
    /// All or nothing: on error the store keeps its previous contents.
    async fn load(&self, seeds: Vec<LotSeed>, reset: bool) -> Result<SeedReport>;
}
