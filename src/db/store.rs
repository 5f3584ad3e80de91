use async_trait::async_trait;
use uuid::Uuid;

use super::models::Match;
use crate::error::StoreError;

/// Persistence contract the match registry is written against.
///
/// Implementations only store and return records; every lifecycle rule lives
/// in [`MatchRegistry`](crate::scoreboard::MatchRegistry).
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Add a new record. Fails with [`StoreError::Duplicate`] if the id is taken.
    async fn insert(&self, m: &Match) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Match>, StoreError>;

    /// Overwrite an existing record. Fails with [`StoreError::Missing`] if absent.
    async fn update(&self, m: &Match) -> Result<(), StoreError>;

    /// Every match with no finish time, in no particular order.
    async fn list_in_progress(&self) -> Result<Vec<Match>, StoreError>;
}
