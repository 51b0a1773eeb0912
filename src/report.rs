// Weekly report assembly: run every analysis over one week's matchups and
// package the results for serialization.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::analytics::breakdown::{normalize_player, StatBreakdown};
use crate::analytics::outcome::{self, MatchupAnalysis};
use crate::analytics::positions::{aggregate_roster, GroupSummary};
use crate::analytics::power::{self, TeamRank, TeamWeekResult};
use crate::analytics::AnalysisError;
use crate::config::LeagueConfig;
use crate::roster::{Matchup, TeamSide, Winner};

/// One team's week at a glance, for the scoreboard section.
#[derive(Debug, Clone, Serialize)]
pub struct TeamWeekSummary {
    pub team_id: String,
    pub name: String,
    pub abbrev: String,
    /// First character of the division name, matching the scoreboard's
    /// single-letter division column.
    pub division: String,
    pub score: f64,
    pub won: bool,
    pub bench_score: f64,
    pub max_score: f64,
}

/// Everything the weekly report carries, ready to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    pub week: u32,
    pub league: String,
    pub scores: Vec<TeamWeekSummary>,
    pub matchups: Vec<MatchupAnalysis>,
    pub power_rankings: Vec<TeamRank>,
    /// Per-team positional summaries, keyed by team id then group key.
    pub positions: BTreeMap<String, BTreeMap<String, GroupSummary>>,
    pub breakdowns: Vec<StatBreakdown>,
    /// This week's results in history form, for appending to the season CSV.
    pub new_results: Vec<TeamWeekResult>,
}

/// Format a score for display. Scores stay full-precision f64 everywhere in
/// the analytics; rounding happens only here, at presentation time.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

fn summarize_side(side: &TeamSide, analysis: &outcome::SideAnalysis, won: bool) -> TeamWeekSummary {
    TeamWeekSummary {
        team_id: side.team_id.clone(),
        name: side.name.clone(),
        abbrev: side.abbrev.clone(),
        division: side.division.chars().take(1).collect(),
        score: side.score,
        won,
        bench_score: analysis.bench_score,
        max_score: analysis.max_score,
    }
}

fn result_for(side: &TeamSide, week: u32, bench_score: f64) -> TeamWeekResult {
    TeamWeekResult {
        team_id: side.team_id.clone(),
        week,
        score: side.score,
        bench_score,
        division: side.division.clone(),
    }
}

/// Build the full weekly report for one slate of matchups.
///
/// All matchups must belong to the same week. `history` carries prior weeks'
/// results; this week's results are appended to it for the power rankings
/// and also returned in the report for the caller to persist.
pub fn build_weekly_report(
    matchups: &[Matchup],
    history: &[TeamWeekResult],
    league: &LeagueConfig,
) -> Result<WeeklyReport, AnalysisError> {
    let Some(first) = matchups.first() else {
        return Err(AnalysisError::validation(
            "week snapshot",
            "no matchups in the snapshot",
        ));
    };
    let week = first.week;
    if let Some(stray) = matchups.iter().find(|m| m.week != week) {
        return Err(AnalysisError::validation(
            "week snapshot",
            format!(
                "mixed weeks in one snapshot: {} and {}",
                week, stray.week
            ),
        ));
    }

    let slots = league.lineup_slots();
    info!(week, matchups = matchups.len(), "building weekly report");

    let mut analyses = Vec::with_capacity(matchups.len());
    let mut scores = Vec::with_capacity(matchups.len() * 2);
    let mut positions = BTreeMap::new();
    let mut breakdowns = Vec::new();
    let mut new_results = Vec::with_capacity(matchups.len() * 2);

    for matchup in matchups {
        for side in [&matchup.home, &matchup.away] {
            let bench = side.bench().count();
            if bench > league.bench_slots {
                return Err(AnalysisError::validation(
                    "roster",
                    format!(
                        "team {}: {} bench players exceeds the league's {} bench slots",
                        side.team_id, bench, league.bench_slots
                    ),
                ));
            }
        }

        let analysis = outcome::analyze(matchup, &slots)?;
        let winner = matchup.winner();
        scores.push(summarize_side(
            &matchup.home,
            &analysis.home,
            winner == Winner::Home,
        ));
        scores.push(summarize_side(
            &matchup.away,
            &analysis.away,
            winner == Winner::Away,
        ));
        new_results.push(result_for(&matchup.home, week, analysis.home.bench_score));
        new_results.push(result_for(&matchup.away, week, analysis.away.bench_score));

        for side in [&matchup.home, &matchup.away] {
            positions.insert(side.team_id.clone(), aggregate_roster(side));
            for entry in &side.lineup {
                let player = &entry.player;
                if player.points_breakdown.is_empty() && player.projected_breakdown.is_empty() {
                    continue;
                }
                breakdowns.push(normalize_player(player));
            }
        }

        analyses.push(analysis);
    }

    // Highest actual score first on the scoreboard.
    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut season: Vec<TeamWeekResult> = history.to_vec();
    season.extend(new_results.iter().cloned());
    let power_rankings = power::rank(&season, league.dominance)?;
    debug!(
        teams = power_rankings.len(),
        breakdowns = breakdowns.len(),
        "report sections assembled"
    );

    Ok(WeeklyReport {
        week,
        league: league.name.clone(),
        scores,
        matchups: analyses,
        power_rankings,
        positions,
        breakdowns,
        new_results,
    })
}
