use crate::models::{Competitor, CompetitorId, MatchRecord, MatchType, NewCompetitor, StoredMatch};
use crate::services::store::StoreError;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

/// PostgreSQL store for entries and fights
///
/// Table layout lives in `migrations/`; migrations run when the pool is
/// created.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn list_competitors(&self) -> Result<Vec<Competitor>, StoreError> {
        let query = r#"
            SELECT id, name, team_color, weight, is_priority
            FROM entries
            ORDER BY id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(competitor_from_row).collect())
    }

    pub async fn create_competitor(&self, new: NewCompetitor) -> Result<Competitor, StoreError> {
        let query = r#"
            INSERT INTO entries (name, team_color, weight, is_priority)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        "#;

        let row = sqlx::query(query)
            .bind(&new.name)
            .bind(&new.team)
            .bind(i32::from(new.weight))
            .bind(i32::from(new.priority))
            .fetch_one(&self.pool)
            .await?;

        let id: i32 = row.get("id");
        tracing::debug!("Created entry {} ({}, {})", id, new.name, new.weight);

        Ok(new.with_id(id as CompetitorId))
    }

    pub async fn delete_competitor(&self, id: CompetitorId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id as i32)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn clear_competitors(&self) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Lock first so the count is exactly what the truncate removes
        sqlx::query("LOCK TABLE entries IN ACCESS EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM entries")
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("TRUNCATE entries RESTART IDENTITY")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("Cleared {} entries", count);
        Ok(count as u64)
    }

    pub async fn list_matches(&self) -> Result<Vec<StoredMatch>, StoreError> {
        let query = r#"
            SELECT id, fight_number, fighter1_id, fighter2_id, weight_class, match_type
            FROM matches
            ORDER BY id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        rows.iter().map(stored_match_from_row).collect()
    }

    /// Drop every stored fight and insert `records` in order, in one transaction
    pub async fn replace_matches(
        &self,
        records: Vec<MatchRecord>,
    ) -> Result<Vec<StoredMatch>, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("TRUNCATE matches RESTART IDENTITY")
            .execute(&mut *tx)
            .await?;

        let query = r#"
            INSERT INTO matches (fight_number, fighter1_id, fighter2_id, weight_class, match_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
        "#;

        let mut stored = Vec::with_capacity(records.len());
        for record in records {
            let row = sqlx::query(query)
                .bind(record.fight_number as i32)
                .bind(record.competitor_a as i32)
                .bind(record.competitor_b as i32)
                .bind(i32::from(record.weight_class))
                .bind(record.match_type.as_str())
                .fetch_one(&mut *tx)
                .await?;

            let id: i32 = row.get("id");
            stored.push(StoredMatch {
                id: id as u32,
                record,
            });
        }

        tx.commit().await?;

        tracing::debug!("Stored {} fights", stored.len());
        Ok(stored)
    }

    pub async fn clear_matches(&self) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Lock first so the count is exactly what the truncate removes
        sqlx::query("LOCK TABLE matches IN ACCESS EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM matches")
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("TRUNCATE matches RESTART IDENTITY")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(count as u64)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn competitor_from_row(row: &PgRow) -> Competitor {
    let id: i32 = row.get("id");
    let weight: i32 = row.get("weight");
    let is_priority: i32 = row.get("is_priority");

    Competitor {
        id: id as CompetitorId,
        name: row.get("name"),
        team: row.get("team_color"),
        weight: weight as u16,
        priority: is_priority == 1,
    }
}

fn stored_match_from_row(row: &PgRow) -> Result<StoredMatch, StoreError> {
    let match_type: String = row.get("match_type");
    let match_type = MatchType::parse(&match_type)
        .ok_or_else(|| StoreError::InvalidData(format!("unknown match type '{}'", match_type)))?;

    let id: i32 = row.get("id");
    let fight_number: i32 = row.get("fight_number");
    let fighter1: i32 = row.get("fighter1_id");
    let fighter2: i32 = row.get("fighter2_id");
    let weight_class: i32 = row.get("weight_class");

    Ok(StoredMatch {
        id: id as u32,
        record: MatchRecord {
            fight_number: fight_number as u32,
            competitor_a: fighter1 as CompetitorId,
            competitor_b: fighter2 as CompetitorId,
            weight_class: weight_class as u16,
            match_type,
        },
    })
}
