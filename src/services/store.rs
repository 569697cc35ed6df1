use crate::models::{Competitor, CompetitorId, MatchRecord, MatchWithCompetitors, NewCompetitor, StoredMatch};
use crate::services::{MemoryStore, PostgresStore};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

/// Entry and fight storage, chosen at startup
pub enum Store {
    Memory(MemoryStore),
    Postgres(PostgresStore),
}

impl Store {
    pub fn memory() -> Self {
        Store::Memory(MemoryStore::new())
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Store::Memory(_) => "memory",
            Store::Postgres(_) => "postgres",
        }
    }

    pub async fn list_competitors(&self) -> Result<Vec<Competitor>, StoreError> {
        match self {
            Store::Memory(m) => Ok(m.list_competitors().await),
            Store::Postgres(p) => p.list_competitors().await,
        }
    }

    pub async fn create_competitor(&self, new: NewCompetitor) -> Result<Competitor, StoreError> {
        match self {
            Store::Memory(m) => Ok(m.create_competitor(new).await),
            Store::Postgres(p) => p.create_competitor(new).await,
        }
    }

    /// Returns whether an entry was removed
    ///
    /// Stored fights are left alone; joined listings skip fights whose
    /// competitors are gone.
    pub async fn delete_competitor(&self, id: CompetitorId) -> Result<bool, StoreError> {
        match self {
            Store::Memory(m) => Ok(m.delete_competitor(id).await),
            Store::Postgres(p) => p.delete_competitor(id).await,
        }
    }

    pub async fn clear_competitors(&self) -> Result<u64, StoreError> {
        match self {
            Store::Memory(m) => Ok(m.clear_competitors().await),
            Store::Postgres(p) => p.clear_competitors().await,
        }
    }

    pub async fn list_stored_matches(&self) -> Result<Vec<StoredMatch>, StoreError> {
        match self {
            Store::Memory(m) => Ok(m.list_matches().await),
            Store::Postgres(p) => p.list_matches().await,
        }
    }

    /// Stored fights joined with their competitors
    pub async fn list_matches(&self) -> Result<Vec<MatchWithCompetitors>, StoreError> {
        let matches = self.list_stored_matches().await?;
        let competitors = self.list_competitors().await?;
        Ok(join_matches(matches, &competitors))
    }

    /// Discard previously stored fights and persist `records` in creation order
    pub async fn replace_matches(
        &self,
        records: Vec<MatchRecord>,
    ) -> Result<Vec<StoredMatch>, StoreError> {
        match self {
            Store::Memory(m) => Ok(m.replace_matches(records).await),
            Store::Postgres(p) => p.replace_matches(records).await,
        }
    }

    pub async fn clear_matches(&self) -> Result<u64, StoreError> {
        match self {
            Store::Memory(m) => Ok(m.clear_matches().await),
            Store::Postgres(p) => p.clear_matches().await,
        }
    }

    pub async fn health_check(&self) -> Result<bool, StoreError> {
        match self {
            Store::Memory(_) => Ok(true),
            Store::Postgres(p) => p.health_check().await,
        }
    }
}

/// Attach competitor details to fights, dropping fights with a missing side
pub fn join_matches(
    matches: Vec<StoredMatch>,
    competitors: &[Competitor],
) -> Vec<MatchWithCompetitors> {
    let by_id: HashMap<CompetitorId, &Competitor> =
        competitors.iter().map(|c| (c.id, c)).collect();

    matches
        .into_iter()
        .filter_map(|stored| {
            let a = by_id.get(&stored.record.competitor_a)?;
            let b = by_id.get(&stored.record.competitor_b)?;
            Some(MatchWithCompetitors {
                competitor_a: (*a).clone(),
                competitor_b: (*b).clone(),
                stored,
            })
        })
        .collect()
}
