use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single match on the scoreboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Assigned once when the match starts
    pub id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub home_score: i32,
    pub away_score: i32,
    pub started_at: DateTime<Utc>,
    /// `None` while the match is being played
    pub finished_at: Option<DateTime<Utc>>,
}

impl Match {
    /// A fresh 0-0 match kicking off at `started_at`.
    pub fn new(home_team: String, away_team: String, started_at: DateTime<Utc>) -> Self {
        Match {
            id: Uuid::new_v4(),
            home_team,
            away_team,
            home_score: 0,
            away_score: 0,
            started_at,
            finished_at: None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.finished_at.is_none()
    }

    /// Combined goals, used for ranking the summary
    pub fn total_score(&self) -> i64 {
        i64::from(self.home_score) + i64::from(self.away_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_starts_goalless() {
        let m = Match::new("Mexico".into(), "Canada".into(), Utc::now());
        assert_eq!((m.home_score, m.away_score), (0, 0));
        assert!(m.is_in_progress());
        assert_eq!(m.total_score(), 0);
    }

    #[test]
    fn test_total_score_does_not_overflow() {
        let mut m = Match::new("Spain".into(), "Brazil".into(), Utc::now());
        m.home_score = i32::MAX;
        m.away_score = i32::MAX;
        assert_eq!(m.total_score(), 2 * i64::from(i32::MAX));
    }
}
