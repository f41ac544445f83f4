use crate::core::{
    Lot, LotId, LotRepository, LotSeed, LotStore, NewLot, NewSpace, Result, SeedReport, Space,
};
use crate::utils::error::ParkingError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    next_lot_id: LotId,
    next_space_id: i64,
    lots: BTreeMap<LotId, Lot>,
    spaces: Vec<Space>,
}

impl MemoryState {
    fn insert_lot(&mut self, lot: NewLot) -> Lot {
        self.next_lot_id += 1;
        let lot = Lot {
            id: self.next_lot_id,
            name: lot.name,
            total_spaces: lot.total_spaces,
            free_spaces: lot.free_spaces,
            is_active: lot.is_active,
            created_at: Utc::now(),
        };
        self.lots.insert(lot.id, lot.clone());
        lot
    }

    fn insert_space(&mut self, lot_id: LotId, space: NewSpace) -> Space {
        self.next_space_id += 1;
        let space = Space {
            id: self.next_space_id,
            lot_id,
            space_number: space.space_number,
            status: space.status,
            row: space.row,
        };
        self.spaces.push(space.clone());
        space
    }
}

/// Store kept entirely in process memory. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| ParkingError::StorageUnavailable {
                message: "in-memory store lock poisoned".to_string(),
            })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| ParkingError::StorageUnavailable {
                message: "in-memory store lock poisoned".to_string(),
            })
    }
}

#[async_trait]
impl LotRepository for InMemoryRepository {
    async fn list_active(&self) -> Result<Vec<Lot>> {
        let state = self.read()?;
        Ok(state.lots.values().filter(|l| l.is_active).cloned().collect())
    }

    async fn get_by_id(&self, id: LotId) -> Result<Option<Lot>> {
        Ok(self.read()?.lots.get(&id).cloned())
    }

    async fn list_spaces_for_lot(&self, id: LotId) -> Result<Vec<Space>> {
        let state = self.read()?;
        let mut spaces: Vec<Space> = state
            .spaces
            .iter()
            .filter(|s| s.lot_id == id)
            .cloned()
            .collect();
        spaces.sort_by(|a, b| a.space_number.cmp(&b.space_number).then(a.id.cmp(&b.id)));
        Ok(spaces)
    }
}

#[async_trait]
impl LotStore for InMemoryRepository {
    async fn create_lot(&self, lot: NewLot) -> Result<Lot> {
        Ok(self.write()?.insert_lot(lot))
    }

    async fn create_space(&self, lot_id: LotId, space: NewSpace) -> Result<Space> {
        let mut state = self.write()?;
        if !state.lots.contains_key(&lot_id) {
            return Err(ParkingError::not_found(lot_id));
        }
        Ok(state.insert_space(lot_id, space))
    }

    async fn delete_lot(&self, id: LotId) -> Result<bool> {
        let mut state = self.write()?;
        if state.lots.remove(&id).is_none() {
            return Ok(false);
        }
        state.spaces.retain(|s| s.lot_id != id);
        Ok(true)
    }

    async fn load(&self, seeds: Vec<LotSeed>, reset: bool) -> Result<SeedReport> {
        let mut state = self.write()?;
        let mut next = state.clone();
        let mut report = SeedReport::default();

        if reset {
            report.lots_deleted = next.lots.len();
            next.lots.clear();
            next.spaces.clear();
        }
        for seed in seeds {
            let lot = next.insert_lot(seed.lot);
            report.lots_created += 1;
            for space in seed.spaces {
                next.insert_space(lot.id, space);
                report.spaces_created += 1;
            }
        }

        *state = next;
        Ok(report)
    }
}
