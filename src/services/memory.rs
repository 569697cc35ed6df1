use crate::models::{Competitor, CompetitorId, MatchRecord, NewCompetitor, StoredMatch};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Tables {
    entries: BTreeMap<CompetitorId, Competitor>,
    matches: BTreeMap<u32, StoredMatch>,
    next_entry_id: CompetitorId,
    next_match_id: u32,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            matches: BTreeMap::new(),
            next_entry_id: 1,
            next_match_id: 1,
        }
    }
}

/// In-process store for entries and fights
///
/// Ids are allocated from 1 and clearing a table restarts its counter.
/// Listings come back in id order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list_competitors(&self) -> Vec<Competitor> {
        self.tables.read().await.entries.values().cloned().collect()
    }

    pub async fn create_competitor(&self, new: NewCompetitor) -> Competitor {
        let mut tables = self.tables.write().await;
        let id = tables.next_entry_id;
        tables.next_entry_id += 1;

        let competitor = new.with_id(id);
        tables.entries.insert(id, competitor.clone());
        competitor
    }

    pub async fn delete_competitor(&self, id: CompetitorId) -> bool {
        self.tables.write().await.entries.remove(&id).is_some()
    }

    pub async fn clear_competitors(&self) -> u64 {
        let mut tables = self.tables.write().await;
        let removed = tables.entries.len() as u64;
        tables.entries.clear();
        tables.next_entry_id = 1;
        removed
    }

    pub async fn list_matches(&self) -> Vec<StoredMatch> {
        self.tables.read().await.matches.values().cloned().collect()
    }

    /// Drop every stored fight and insert `records` in order
    pub async fn replace_matches(&self, records: Vec<MatchRecord>) -> Vec<StoredMatch> {
        let mut tables = self.tables.write().await;
        tables.matches.clear();
        tables.next_match_id = 1;

        let mut stored = Vec::with_capacity(records.len());
        for record in records {
            let id = tables.next_match_id;
            tables.next_match_id += 1;

            let m = StoredMatch { id, record };
            tables.matches.insert(id, m.clone());
            stored.push(m);
        }
        stored
    }

    pub async fn clear_matches(&self) -> u64 {
        let mut tables = self.tables.write().await;
        let removed = tables.matches.len() as u64;
        tables.matches.clear();
        tables.next_match_id = 1;
        removed
    }
}
