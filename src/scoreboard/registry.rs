use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{ranking, teams};
use crate::db::models::Match;
use crate::db::MatchStore;
use crate::error::{Result, ScoreboardError};

pub const SAME_TEAM_MSG: &str = "Away team name must be different from the home team name.";
pub const ACTIVE_MATCH_MSG: &str = "Cannot add a new match while an active match is running.";

/// Source of "now" for kick-off and final-whistle timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Owns every match state transition and the in-progress summary.
///
/// Holds no state of its own between calls; everything is read from and
/// written back to the [`MatchStore`] it was built with.
#[derive(Clone)]
pub struct MatchRegistry {
    store: Arc<dyn MatchStore>,
    clock: Clock,
}

impl MatchRegistry {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self::with_clock(store, Arc::new(Utc::now))
    }

    pub fn with_clock(store: Arc<dyn MatchStore>, clock: Clock) -> Self {
        MatchRegistry { store, clock }
    }

    /// Kick off a new 0-0 match between two teams that are not currently playing.
    ///
    /// The conflict check and the insert are separate store calls, so two
    /// concurrent starts for the same team can both pass the check.
    pub async fn start_new_match(&self, home_team: &str, away_team: &str) -> Result<Match> {
        let home = teams::clean(home_team);
        let away = teams::clean(away_team);
        if home.is_empty() {
            return Err(ScoreboardError::validation("Home team name is required."));
        }
        if away.is_empty() {
            return Err(ScoreboardError::validation("Away team name is required."));
        }
        if teams::same_team(home, away) {
            return Err(ScoreboardError::validation(SAME_TEAM_MSG));
        }

        if self.has_active_conflict(home, away).await? {
            warn!("Rejected {} vs {}: a team is already playing", home, away);
            return Err(ScoreboardError::conflict(ACTIVE_MATCH_MSG));
        }

        let m = Match::new(home.to_string(), away.to_string(), (self.clock)());
        if let Err(e) = self.store.insert(&m).await {
            error!("Error in start_new_match for match {}: {}", m.id, e);
            return Err(e.into());
        }
        info!("Match started: {} vs {} ({})", m.home_team, m.away_team, m.id);
        Ok(m)
    }

    /// Overwrite the running score. Finished matches are left untouched.
    pub async fn update_score(
        &self,
        match_id: Uuid,
        home_score: i32,
        away_score: i32,
    ) -> Result<()> {
        if home_score < 0 || away_score < 0 {
            return Err(ScoreboardError::validation(
                "Scores must be non-negative integers.",
            ));
        }

        let mut m = self.load(match_id).await?;
        if !m.is_in_progress() {
            debug!("Ignoring score update for finished match {}", match_id);
            return Ok(());
        }

        m.home_score = home_score;
        m.away_score = away_score;
        if let Err(e) = self.store.update(&m).await {
            error!("Error in update_score for match {}: {}", match_id, e);
            return Err(e.into());
        }
        debug!(
            "Score updated: {} {}-{} {}",
            m.home_team, m.home_score, m.away_score, m.away_team
        );
        Ok(())
    }

    /// Blow the final whistle. Finishing twice is a no-op.
    pub async fn finish_match(&self, match_id: Uuid) -> Result<()> {
        let mut m = self.load(match_id).await?;
        if !m.is_in_progress() {
            return Ok(());
        }

        m.finished_at = Some((self.clock)());
        if let Err(e) = self.store.update(&m).await {
            error!("Error in finish_match for match {}: {}", match_id, e);
            return Err(e.into());
        }
        info!(
            "Match finished: {} {}-{} {} ({})",
            m.home_team, m.home_score, m.away_score, m.away_team, m.id
        );
        Ok(())
    }

    /// Look up a match, finished or not. Absence is `Ok(None)`.
    pub async fn get_match(&self, match_id: Uuid) -> Result<Option<Match>> {
        self.store.find_by_id(match_id).await.map_err(|e| {
            error!("Error in get_match for match {}: {}", match_id, e);
            e.into()
        })
    }

    /// In-progress matches, highest total score first, most recent start on ties.
    pub async fn in_progress_summary(&self) -> Result<Vec<Match>> {
        let live = self.store.list_in_progress().await.map_err(|e| {
            error!("Error in in_progress_summary: {}", e);
            ScoreboardError::from(e)
        })?;
        debug!("Summary over {} in-progress match(es)", live.len());
        Ok(ranking::rank(live))
    }

    /// True if either team is already playing in an unfinished match.
    pub async fn has_active_conflict(&self, home_team: &str, away_team: &str) -> Result<bool> {
        let live = self.store.list_in_progress().await.map_err(|e| {
            error!("Error in has_active_conflict: {}", e);
            ScoreboardError::from(e)
        })?;
        Ok(live
            .iter()
            .any(|m| teams::involves_any(m, home_team, away_team)))
    }

    async fn load(&self, match_id: Uuid) -> Result<Match> {
        self.get_match(match_id)
            .await?
            .ok_or(ScoreboardError::NotFound(match_id))
    }
}
