// Matchup outcome analysis: optimizer maximum, bench totals, and the
// bench-outscored / lost-could-win flags for one weekly matchup.

use serde::Serialize;
use std::collections::HashMap;

use crate::analytics::{optimizer, AnalysisError};
use crate::roster::position::{normalize_slot_label, LineupSlot};
use crate::roster::{Matchup, TeamSide, Winner};

/// Derived numbers for one side of a matchup.
#[derive(Debug, Clone, Serialize)]
pub struct SideAnalysis {
    pub team_id: String,
    /// Official actual score.
    pub score: f64,
    /// Best score any legal lineup could have produced.
    pub max_score: f64,
    /// Sum of bench players' actual points.
    pub bench_score: f64,
    /// Bench total strictly exceeded the actual score.
    pub bench_outscored: bool,
}

/// Full analysis of one weekly matchup.
#[derive(Debug, Clone, Serialize)]
pub struct MatchupAnalysis {
    pub week: u32,
    pub home: SideAnalysis,
    pub away: SideAnalysis,
    pub winner: Winner,
    /// The losing side's optimizer maximum would have met or beaten the
    /// winner's actual score. Always false for a tie.
    pub lost_could_win: bool,
}

/// Check the roster invariant for one side: the starters fill the template's
/// slots exactly (one player per slot), and every starter's native position
/// is eligible for the slot it occupies. Bench players are unconstrained.
pub fn validate_side(side: &TeamSide, slots: &[LineupSlot]) -> Result<(), AnalysisError> {
    let mut expected: HashMap<&str, i64> = HashMap::new();
    for slot in slots {
        *expected.entry(slot.label.as_str()).or_insert(0) += 1;
    }

    for entry in side.starters() {
        let label = normalize_slot_label(&entry.slot);
        let Some(slot) = slots.iter().find(|s| s.label == label) else {
            return Err(AnalysisError::validation(
                "roster",
                format!(
                    "team {}: starter {} assigned to unknown slot '{}'",
                    side.team_id, entry.player.name, entry.slot
                ),
            ));
        };

        // The map entry exists: the label was found among the slots.
        let remaining = expected.entry(slot.label.as_str()).or_insert(0);
        *remaining -= 1;
        if *remaining < 0 {
            return Err(AnalysisError::validation(
                "roster",
                format!(
                    "team {}: more than {} starters assigned to slot '{}'",
                    side.team_id,
                    slots.iter().filter(|s| s.label == label).count(),
                    label
                ),
            ));
        }

        // Every starting slot's occupant must be natively eligible for it.
        if !slot.accepts(entry.player.position) {
            return Err(AnalysisError::validation(
                "roster",
                format!(
                    "team {}: {} ({}) is not eligible for slot '{}'",
                    side.team_id,
                    entry.player.name,
                    entry.player.position,
                    label
                ),
            ));
        }
    }

    if let Some((label, missing)) = expected.iter().find(|(_, n)| **n > 0) {
        return Err(AnalysisError::validation(
            "roster",
            format!(
                "team {}: {} unfilled '{}' starting slot(s)",
                side.team_id, missing, label
            ),
        ));
    }

    Ok(())
}

fn analyze_side(side: &TeamSide, slots: &[LineupSlot]) -> Result<SideAnalysis, AnalysisError> {
    let players: Vec<&_> = side.lineup.iter().map(|e| &e.player).collect();
    let max_score = optimizer::max_score(&players, slots)?;
    let bench_score = side.bench_total();
    Ok(SideAnalysis {
        team_id: side.team_id.clone(),
        score: side.score,
        max_score,
        bench_score,
        bench_outscored: bench_score > side.score,
    })
}

/// Analyze one matchup against the league's starting-lineup template.
///
/// Both rosters are validated first; a roster that violates the lineup
/// invariant aborts the analysis for the whole matchup.
pub fn analyze(matchup: &Matchup, slots: &[LineupSlot]) -> Result<MatchupAnalysis, AnalysisError> {
    validate_side(&matchup.home, slots)?;
    validate_side(&matchup.away, slots)?;

    let home = analyze_side(&matchup.home, slots)?;
    let away = analyze_side(&matchup.away, slots)?;

    let winner = matchup.winner();
    let lost_could_win = match winner {
        Winner::Home => away.max_score >= matchup.home.score,
        Winner::Away => home.max_score >= matchup.away.score,
        Winner::Tie => false,
    };

    Ok(MatchupAnalysis {
        week: matchup.week,
        home,
        away,
        winner,
        lost_could_win,
    })
}
