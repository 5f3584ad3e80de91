use std::cmp::Ordering;

use crate::db::models::Match;

/// Summary order: higher combined score first, then the most recently
/// started match, then id so that equal-looking matches never swap places.
pub fn summary_order(a: &Match, b: &Match) -> Ordering {
    b.total_score()
        .cmp(&a.total_score())
        .then_with(|| b.started_at.cmp(&a.started_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort in-progress matches into scoreboard order.
pub fn rank(mut matches: Vec<Match>) -> Vec<Match> {
    matches.sort_by(summary_order);
    matches
}
