// Power rankings by two-step dominance over the season's weekly scores.
//
// For each week, every pair of teams that both played is compared: the
// higher score directly dominates the lower. One-step dominance is the sum
// of a team's direct dominances; two-step dominance additionally credits a
// team with the one-step scores of the teams it dominates, weighted by how
// often it dominates them (row sums of M + M^2 over the dominance matrix).
// Beating strong teams is worth more than beating weak ones.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analytics::AnalysisError;

/// One team's result for one week. Accumulated by the reporting pipeline
/// across the season (append-only, one record per team per week) and passed
/// in fresh at each ranking call; this module never stores history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamWeekResult {
    pub team_id: String,
    pub week: u32,
    pub score: f64,
    #[serde(default)]
    pub bench_score: f64,
    #[serde(default)]
    pub division: String,
}

/// What a direct dominance is worth when summing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DominanceWeight {
    /// Each week A outscores B counts 1.
    #[default]
    WinCount,
    /// Each week A outscores B counts the score margin.
    ScoreMargin,
}

/// A ranked team with its dominance scores, ordered strongest first.
#[derive(Debug, Clone, Serialize)]
pub struct TeamRank {
    pub team_id: String,
    pub two_step: f64,
    pub one_step: f64,
}

/// Rank all teams in `results` by descending two-step dominance.
///
/// Ties break by descending one-step dominance, then by first appearance in
/// `results`, so the output is always a total order. The full history is
/// rescanned on every call (O(teams^2 x weeks)); there is no incremental
/// update.
///
/// Fails with `AnalysisError::Validation` on a duplicate (team, week) pair
/// or a non-finite score. A single-team season degenerates to that one team
/// with zero dominance.
pub fn rank(
    results: &[TeamWeekResult],
    weight: DominanceWeight,
) -> Result<Vec<TeamRank>, AnalysisError> {
    // Teams indexed by first appearance; that order is the final tie-break.
    let mut teams: Vec<&str> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut by_week: HashMap<u32, Vec<(usize, f64)>> = HashMap::new();
    let mut seen: HashMap<(usize, u32), ()> = HashMap::new();

    for result in results {
        if !result.score.is_finite() {
            return Err(AnalysisError::validation(
                "season history",
                format!(
                    "non-finite score for team {} week {}",
                    result.team_id, result.week
                ),
            ));
        }
        let team = *index.entry(result.team_id.as_str()).or_insert_with(|| {
            teams.push(result.team_id.as_str());
            teams.len() - 1
        });
        if seen.insert((team, result.week), ()).is_some() {
            return Err(AnalysisError::validation(
                "season history",
                format!(
                    "duplicate result for team {} week {}",
                    result.team_id, result.week
                ),
            ));
        }
        by_week.entry(result.week).or_default().push((team, result.score));
    }

    let n = teams.len();
    // dominance[a][b]: summed dominance of a over b across shared weeks.
    let mut dominance = vec![vec![0.0f64; n]; n];
    for scores in by_week.values() {
        for &(a, score_a) in scores {
            for &(b, score_b) in scores {
                if score_a > score_b {
                    dominance[a][b] += match weight {
                        DominanceWeight::WinCount => 1.0,
                        DominanceWeight::ScoreMargin => score_a - score_b,
                    };
                }
            }
        }
    }

    let one_step: Vec<f64> = dominance.iter().map(|row| row.iter().sum()).collect();
    let two_step: Vec<f64> = (0..n)
        .map(|a| {
            one_step[a]
                + (0..n)
                    .map(|b| dominance[a][b] * one_step[b])
                    .sum::<f64>()
        })
        .collect();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        two_step[b]
            .partial_cmp(&two_step[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                one_step[b]
                    .partial_cmp(&one_step[a])
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then(a.cmp(&b))
    });

    Ok(order
        .into_iter()
        .map(|i| TeamRank {
            team_id: teams[i].to_string(),
            two_step: two_step[i],
            one_step: one_step[i],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(team: &str, week: u32, score: f64) -> TeamWeekResult {
        TeamWeekResult {
            team_id: team.to_string(),
            week,
            score,
            bench_score: 0.0,
            division: String::new(),
        }
    }

    #[test]
    fn always_winning_team_strictly_dominates() {
        // A outscores B every shared week and no other data exists:
        // A's one-step score strictly exceeds B's.
        let results = vec![
            result("a", 1, 100.0),
            result("b", 1, 90.0),
            result("a", 2, 95.0),
            result("b", 2, 80.0),
        ];
        let ranks = rank(&results, DominanceWeight::WinCount).unwrap();
        assert_eq!(ranks[0].team_id, "a");
        assert_eq!(ranks[0].one_step, 2.0);
        assert_eq!(ranks[1].one_step, 0.0);
        assert!(ranks[0].one_step > ranks[1].one_step);
    }

    #[test]
    fn two_step_rewards_beating_strong_teams() {
        // Week 1 scores: a=100, b=90, c=80, d=70.
        // One-step: a=3, b=2, c=1, d=0.
        // Two-step: a = 3 + (2+1+0) = 6, b = 2 + (1+0) = 3, c = 1, d = 0.
        let results = vec![
            result("a", 1, 100.0),
            result("b", 1, 90.0),
            result("c", 1, 80.0),
            result("d", 1, 70.0),
        ];
        let ranks = rank(&results, DominanceWeight::WinCount).unwrap();
        let by_team: HashMap<&str, &TeamRank> =
            ranks.iter().map(|r| (r.team_id.as_str(), r)).collect();
        assert_eq!(by_team["a"].two_step, 6.0);
        assert_eq!(by_team["b"].two_step, 3.0);
        assert_eq!(by_team["c"].two_step, 1.0);
        assert_eq!(by_team["d"].two_step, 0.0);
        assert_eq!(ranks[0].team_id, "a");
        assert_eq!(ranks[3].team_id, "d");
    }

    #[test]
    fn beating_the_leader_outranks_beating_the_doormat() {
        // b and c each have exactly one direct dominance, but b's victim (s)
        // dominates two other teams while c's victim (w) dominates one.
        // Two-step credit must put b above c. Teams absent from a week are
        // not compared that week (bye weeks).
        let results = vec![
            result("b", 1, 2.0),
            result("s", 1, 1.0),
            result("c", 2, 2.0),
            result("w", 2, 1.0),
            result("s", 3, 3.0),
            result("w", 3, 2.0),
            result("x", 3, 1.0),
        ];
        let ranks = rank(&results, DominanceWeight::WinCount).unwrap();
        let by_team: HashMap<&str, &TeamRank> =
            ranks.iter().map(|r| (r.team_id.as_str(), r)).collect();
        assert_eq!(by_team["b"].one_step, by_team["c"].one_step);
        assert_eq!(by_team["b"].two_step, 3.0); // 1 + one_step(s)=2
        assert_eq!(by_team["c"].two_step, 2.0); // 1 + one_step(w)=1
        let pos = |team: &str| ranks.iter().position(|r| r.team_id == team).unwrap();
        assert!(
            pos("b") < pos("c"),
            "beating the strong team must outrank beating the weak one: {ranks:?}"
        );
    }

    #[test]
    fn margin_weighting_differs_from_win_count() {
        // b has more wins, but a's single win is by a huge margin.
        let results = vec![
            result("a", 1, 200.0),
            result("b", 1, 50.0),
            result("a", 2, 60.0),
            result("b", 2, 61.0),
            result("a", 3, 60.0),
            result("b", 3, 61.0),
        ];
        let by_count = rank(&results, DominanceWeight::WinCount).unwrap();
        assert_eq!(by_count[0].team_id, "b", "b has 2 wins to a's 1");

        let by_margin = rank(&results, DominanceWeight::ScoreMargin).unwrap();
        assert_eq!(by_margin[0].team_id, "a", "a's margin is 150 to b's 2");
    }

    #[test]
    fn weekly_comparison_not_cumulative() {
        // a's season total (120) beats b's (110), but dominance is a
        // per-week comparison: a takes week 1 (100 > 55), b takes week 2
        // (55 > 20), so they split at one dominance each.
        let results = vec![
            result("a", 1, 100.0),
            result("b", 1, 55.0),
            result("a", 2, 20.0),
            result("b", 2, 55.0),
        ];
        let ranks = rank(&results, DominanceWeight::WinCount).unwrap();
        let by_team: HashMap<&str, &TeamRank> =
            ranks.iter().map(|r| (r.team_id.as_str(), r)).collect();
        assert_eq!(by_team["a"].one_step, 1.0);
        assert_eq!(by_team["b"].one_step, 1.0);
    }

    #[test]
    fn teams_only_compared_in_shared_weeks() {
        // c only played week 2; a's week-1 score never counts against c.
        let results = vec![
            result("a", 1, 100.0),
            result("b", 1, 90.0),
            result("a", 2, 10.0),
            result("b", 2, 20.0),
            result("c", 2, 30.0),
        ];
        let ranks = rank(&results, DominanceWeight::WinCount).unwrap();
        let by_team: HashMap<&str, &TeamRank> =
            ranks.iter().map(|r| (r.team_id.as_str(), r)).collect();
        // c dominates a and b in week 2 only.
        assert_eq!(by_team["c"].one_step, 2.0);
        // a dominates b once (week 1); b dominates a once (week 2).
        assert_eq!(by_team["a"].one_step, 1.0);
        assert_eq!(by_team["b"].one_step, 1.0);
    }

    #[test]
    fn tied_week_scores_dominate_neither_way() {
        let results = vec![result("a", 1, 80.0), result("b", 1, 80.0)];
        let ranks = rank(&results, DominanceWeight::WinCount).unwrap();
        assert_eq!(ranks[0].one_step, 0.0);
        assert_eq!(ranks[1].one_step, 0.0);
    }

    #[test]
    fn full_ties_fall_back_to_input_order() {
        let results = vec![
            result("zeta", 1, 80.0),
            result("alpha", 1, 80.0),
            result("mid", 1, 80.0),
        ];
        let ranks = rank(&results, DominanceWeight::WinCount).unwrap();
        let ids: Vec<&str> = ranks.iter().map(|r| r.team_id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn ranking_is_a_total_order() {
        let results = vec![
            result("a", 1, 100.0),
            result("b", 1, 90.0),
            result("c", 1, 95.0),
            result("a", 2, 70.0),
            result("b", 2, 85.0),
            result("c", 2, 60.0),
        ];
        let ranks = rank(&results, DominanceWeight::WinCount).unwrap();
        assert_eq!(ranks.len(), 3);
        // Every team appears exactly once.
        let mut ids: Vec<&str> = ranks.iter().map(|r| r.team_id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        // Scores are non-increasing down the ranking.
        for pair in ranks.windows(2) {
            assert!(
                pair[0].two_step >= pair[1].two_step,
                "ranking must be non-increasing: {ranks:?}"
            );
        }
    }

    #[test]
    fn single_team_season_is_a_degenerate_ranking() {
        let results = vec![result("solo", 1, 100.0), result("solo", 2, 90.0)];
        let ranks = rank(&results, DominanceWeight::WinCount).unwrap();
        assert_eq!(ranks.len(), 1);
        assert_eq!(ranks[0].team_id, "solo");
        assert_eq!(ranks[0].two_step, 0.0);
    }

    #[test]
    fn empty_history_ranks_nobody() {
        let ranks = rank(&[], DominanceWeight::WinCount).unwrap();
        assert!(ranks.is_empty());
    }

    #[test]
    fn duplicate_team_week_is_a_validation_error() {
        let results = vec![
            result("a", 1, 100.0),
            result("b", 1, 90.0),
            result("a", 1, 95.0),
        ];
        let err = rank(&results, DominanceWeight::WinCount).unwrap_err();
        assert!(matches!(err, AnalysisError::Validation { .. }));
    }

    #[test]
    fn non_finite_score_is_a_validation_error() {
        let results = vec![result("a", 1, f64::NAN)];
        let err = rank(&results, DominanceWeight::WinCount).unwrap_err();
        assert!(matches!(err, AnalysisError::Validation { .. }));
    }
}
