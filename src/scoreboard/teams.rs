//! Team-name normalisation and comparison.
//!
//! Names are compared after trimming and Unicode lowercase folding. The fold
//! is locale-independent, so "İstanbul" and "istanbul" are not guaranteed to
//! match the way a Turkish-culture comparison would.

use crate::db::models::Match;

/// Trimmed display form stored on the match.
pub fn clean(name: &str) -> &str {
    name.trim()
}

/// Key used for every equality check between team names.
pub fn fold(name: &str) -> String {
    clean(name).to_lowercase()
}

pub fn same_team(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

/// Whether `m` involves either of the given teams, home or away.
pub fn involves_any(m: &Match, home_team: &str, away_team: &str) -> bool {
    let home = fold(home_team);
    let away = fold(away_team);
    [fold(&m.home_team), fold(&m.away_team)]
        .iter()
        .any(|t| *t == home || *t == away)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_same_team_ignores_case_and_padding() {
        assert!(same_team("Brazil", "BRAZIL"));
        assert!(same_team("  brazil ", "Brazil"));
        assert!(!same_team("Brazil", "Germany"));
    }

    #[test]
    fn test_same_team_folds_non_ascii() {
        assert!(same_team("CÔTE D'IVOIRE", "côte d'ivoire"));
        assert!(same_team("ÖSTERREICH", "österreich"));
    }

    #[test]
    fn test_involves_any_checks_both_sides() {
        let m = Match::new("Spain".into(), "Brazil".into(), Utc::now());
        assert!(involves_any(&m, "spain", "Chile"));
        assert!(involves_any(&m, "Chile", "spain"));
        assert!(involves_any(&m, "brazil", "Chile"));
        assert!(involves_any(&m, "Chile", "BRAZIL"));
        assert!(!involves_any(&m, "Chile", "Peru"));
    }
}
