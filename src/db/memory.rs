use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::Match;
use super::store::MatchStore;
use crate::error::StoreError;

/// Process-local store backed by a hash map. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    matches: Arc<RwLock<HashMap<Uuid, Match>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn insert(&self, m: &Match) -> Result<(), StoreError> {
        let mut matches = self.matches.write().await;
        if matches.contains_key(&m.id) {
            return Err(StoreError::Duplicate(m.id));
        }
        matches.insert(m.id, m.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Match>, StoreError> {
        let matches = self.matches.read().await;
        Ok(matches.get(&id).cloned())
    }

    async fn update(&self, m: &Match) -> Result<(), StoreError> {
        let mut matches = self.matches.write().await;
        match matches.get_mut(&m.id) {
            Some(slot) => {
                *slot = m.clone();
                Ok(())
            }
            None => Err(StoreError::Missing(m.id)),
        }
    }

    async fn list_in_progress(&self) -> Result<Vec<Match>, StoreError> {
        let matches = self.matches.read().await;
        Ok(matches
            .values()
            .filter(|m| m.is_in_progress())
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixture(home: &str, away: &str) -> Match {
        Match::new(home.into(), away.into(), Utc::now())
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = MemoryStore::new();
        let m = fixture("Germany", "France");
        store.insert(&m).await.unwrap();
        assert_eq!(store.find_by_id(m.id).await.unwrap(), Some(m));
    }

    #[tokio::test]
    async fn test_insert_duplicate_id_rejected() {
        let store = MemoryStore::new();
        let m = fixture("Germany", "France");
        store.insert(&m).await.unwrap();
        let err = store.insert(&m).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(id) if id == m.id));
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = MemoryStore::new();
        let m = fixture("Uruguay", "Italy");
        let err = store.update(&m).await.unwrap_err();
        assert!(matches!(err, StoreError::Missing(id) if id == m.id));
    }

    #[tokio::test]
    async fn test_list_in_progress_skips_finished() {
        let store = MemoryStore::new();
        let live = fixture("Argentina", "Australia");
        let mut done = fixture("Spain", "Brazil");
        store.insert(&live).await.unwrap();
        store.insert(&done).await.unwrap();

        done.finished_at = Some(Utc::now());
        store.update(&done).await.unwrap();

        let in_progress = store.list_in_progress().await.unwrap();
        assert_eq!(in_progress, vec![live]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_from_tasks() {
        let store = MemoryStore::new();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let m = fixture(&format!("Home {i}"), &format!("Away {i}"));
                    store.insert(&m).await.unwrap();
                    m.id
                })
            })
            .collect();

        for handle in handles {
            let id = handle.await.unwrap();
            assert!(store.find_by_id(id).await.unwrap().is_some());
        }
        assert_eq!(store.list_in_progress().await.unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        let m = fixture("Mexico", "Canada");
        store.insert(&m).await.unwrap();
        assert!(other.find_by_id(m.id).await.unwrap().is_some());
    }
}
