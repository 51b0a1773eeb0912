// Roster and matchup data model: read-only weekly snapshots supplied by the
// provider layer, deserialized from JSON.

pub mod position;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use position::{is_bench_label, Position};

/// A rostered player for one team in one week.
///
/// The actual and projected stat breakdowns are keyed by category code
/// (e.g. "PY" passing yards, "REC" receptions) and are independently keyed:
/// the two maps are not guaranteed to share all codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Pro team affiliation (e.g. "KC"). Empty if not available.
    #[serde(default)]
    pub pro_team: String,
    /// Native position, the one that determines slot eligibility.
    pub position: Position,
    /// Slot labels the provider reports this player eligible for, in the
    /// provider's order. Empty if not available.
    #[serde(default)]
    pub eligible_slots: Vec<String>,
    /// Actual fantasy points scored this week.
    pub points: f64,
    /// Pre-game projected points, when the provider published one.
    #[serde(default)]
    pub projected_points: Option<f64>,
    /// Actual per-category point breakdown.
    #[serde(default)]
    pub points_breakdown: HashMap<String, f64>,
    /// Projected per-category point breakdown.
    #[serde(default)]
    pub projected_breakdown: HashMap<String, f64>,
}

/// A player together with the slot the team actually started (or benched)
/// them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player: Player,
    /// Assigned slot label as reported by the provider ("QB", "RB/WR/TE",
    /// "BE", ...). Normalized lazily; the raw value is preserved.
    pub slot: String,
}

impl RosterEntry {
    pub fn is_bench(&self) -> bool {
        is_bench_label(&self.slot)
    }
}

/// One team's side of a weekly matchup: identity, official score, and the
/// full lineup (starters and bench).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSide {
    pub team_id: String,
    pub name: String,
    #[serde(default)]
    pub abbrev: String,
    /// Division name; the report layer abbreviates it to its first letter.
    #[serde(default)]
    pub division: String,
    /// Official score as recorded by the provider.
    pub score: f64,
    pub lineup: Vec<RosterEntry>,
}

impl TeamSide {
    /// Starters in lineup order (every entry not assigned to a bench slot).
    pub fn starters(&self) -> impl Iterator<Item = &RosterEntry> {
        self.lineup.iter().filter(|e| !e.is_bench())
    }

    /// Bench entries in lineup order.
    pub fn bench(&self) -> impl Iterator<Item = &RosterEntry> {
        self.lineup.iter().filter(|e| e.is_bench())
    }

    /// Sum of the starters' actual points.
    pub fn starters_total(&self) -> f64 {
        self.starters().map(|e| e.player.points).sum()
    }

    /// Sum of the bench players' actual points. Zero for an empty bench.
    pub fn bench_total(&self) -> f64 {
        self.bench().map(|e| e.player.points).sum()
    }
}

/// Who won a matchup by strict actual-score comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Home,
    Away,
    Tie,
}

/// Two rosters for the same week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
    pub week: u32,
    pub home: TeamSide,
    pub away: TeamSide,
}

impl Matchup {
    /// Winner by strict comparison of the official scores. Equal scores are
    /// a tie; scores are never rounded before this comparison.
    pub fn winner(&self) -> Winner {
        if self.home.score > self.away.score {
            Winner::Home
        } else if self.away.score > self.home.score {
            Winner::Away
        } else {
            Winner::Tie
        }
    }
}
