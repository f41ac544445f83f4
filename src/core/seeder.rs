use crate::config::fixture::Fixture;
use crate::core::{LotStore, SeedReport};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Loads fixtures into a store.
pub struct Seeder<S: LotStore> {
    store: S,
}

impl<S: LotStore> Seeder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Validates the fixture, then hands it to the store as one batch so a
    /// failed load leaves the previous contents in place.
    pub async fn seed(&self, fixture: &Fixture, reset: bool) -> Result<SeedReport> {
        fixture.validate()?;
        for warning in fixture.warnings() {
            tracing::warn!("⚠️ Fixture: {}", warning);
        }

        tracing::info!(
            "Loading {} lots with {} spaces{}",
            fixture.lots.len(),
            fixture.space_count(),
            if reset { " (replacing existing lots)" } else { "" }
        );
        let report = self.store.load(fixture.to_seeds(), reset).await?;

        if reset {
            tracing::info!("Removed {} existing lots", report.lots_deleted);
        }
        tracing::info!(
            "Seeded {} lots and {} spaces",
            report.lots_created,
            report.spaces_created
        );
        Ok(report)
    }
}
