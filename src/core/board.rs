use crate::core::{neighbors, LotDetail, LotId, LotRepository, LotSummary};
use crate::domain::model::Lot;
use crate::utils::error::{ParkingError, Result};

/// The three read operations behind the HTTP surface.
pub struct ParkingBoard<R: LotRepository> {
    repository: R,
}

impl<R: LotRepository> ParkingBoard<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self) -> Result<Vec<Lot>> {
        let lots = self.repository.list_active().await?;
        tracing::debug!("Dashboard lists {} active lots", lots.len());
        Ok(lots)
    }

    /// Loads an active lot with its spaces and neighbours. Inactive lots are
    /// reported as not found.
    pub async fn detail(&self, lot_id: LotId) -> Result<LotDetail> {
        let lot = self
            .repository
            .get_by_id(lot_id)
            .await?
            .filter(|lot| lot.is_active)
            .ok_or_else(|| ParkingError::not_found(lot_id))?;

        let spaces = self.repository.list_spaces_for_lot(lot.id).await?;
        let active = self.repository.list_active().await?;
        let nav = neighbors(&active, lot.id);
        let (prev, next) = (nav.prev.cloned(), nav.next.cloned());

        tracing::debug!(
            lot_id,
            spaces = spaces.len(),
            has_prev = prev.is_some(),
            has_next = next.is_some(),
            "Loaded lot detail"
        );

        Ok(LotDetail {
            lot,
            spaces,
            prev,
            next,
        })
    }

    /// Flat occupancy summary; the active flag is not consulted.
    pub async fn summary(&self, lot_id: LotId) -> Result<LotSummary> {
        let lot = self
            .repository
            .get_by_id(lot_id)
            .await?
            .ok_or_else(|| ParkingError::not_found(lot_id))?;
        let spaces = self.repository.list_spaces_for_lot(lot.id).await?;

        Ok(LotSummary::new(&lot, &spaces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRepository;
    use crate::core::{group_by_row, LotStore, NewLot, NewSpace, SpaceStatus};

    async fn seeded() -> (ParkingBoard<InMemoryRepository>, Vec<LotId>) {
        let repo = InMemoryRepository::new();
        let mut ids = Vec::new();
        for (name, active) in [("North", true), ("Closed", false), ("South", true), ("East", true)] {
            let lot = repo
                .create_lot(NewLot {
                    name: name.to_string(),
                    total_spaces: 5,
                    free_spaces: 3,
                    is_active: active,
                })
                .await
                .unwrap();
            ids.push(lot.id);
        }
        for (number, row) in [("B1", 2), ("A2", 1), ("A1", 1), ("B2", 2), ("C1", 3)] {
            repo.create_space(
                ids[0],
                NewSpace {
                    space_number: number.to_string(),
                    status: SpaceStatus::Free,
                    row,
                },
            )
            .await
            .unwrap();
        }
        (ParkingBoard::new(repo), ids)
    }

    #[tokio::test]
    async fn dashboard_lists_only_active_lots() {
        let (board, ids) = seeded().await;
        let names: Vec<String> = board
            .dashboard()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["North", "South", "East"]);
        assert_eq!(ids.len(), 4);
    }

    #[tokio::test]
    async fn detail_groups_spaces_and_navigates_active_lots() {
        let (board, ids) = seeded().await;

        let detail = board.detail(ids[0]).await.unwrap();
        let numbers: Vec<&str> = detail.spaces.iter().map(|s| s.space_number.as_str()).collect();
        assert_eq!(numbers, vec!["A1", "A2", "B1", "B2", "C1"]);

        let sizes: Vec<usize> = group_by_row(&detail.spaces)
            .iter()
            .map(|g| g.spaces.len())
            .collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert!(detail.prev.is_none());
        assert_eq!(detail.next.map(|l| l.id), Some(ids[2]));

        let middle = board.detail(ids[2]).await.unwrap();
        assert_eq!(middle.prev.map(|l| l.id), Some(ids[0]));
        assert_eq!(middle.next.map(|l| l.id), Some(ids[3]));
    }

    #[tokio::test]
    async fn detail_of_inactive_or_missing_lot_is_not_found() {
        let (board, ids) = seeded().await;
        assert!(board.detail(ids[1]).await.unwrap_err().is_not_found());
        assert!(board.detail(999).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn summary_ignores_active_flag() {
        let (board, ids) = seeded().await;

        let summary = board.summary(ids[1]).await.unwrap();
        assert_eq!(summary.parking.id, ids[1]);
        assert!(summary.spaces.is_empty());
        assert_eq!(summary.parking.total_spaces, 5);
        assert_eq!(summary.parking.free_spaces, 3);

        assert!(board.summary(999).await.unwrap_err().is_not_found());
    }
}
