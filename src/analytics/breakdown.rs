// Stat breakdown normalization: align a player's actual and projected
// per-category point maps into one sorted, classified table.
//
// The two maps are independently keyed; a category present on only one side
// must still appear in the output. Naive same-keys merging drops those
// columns, which is exactly the bug this module exists to prevent.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::roster::Player;

/// How a category's actual value compares to its projection.
///
/// `ActualOnly` and `ProjectedOnly` are the not-applicable family: one side
/// is absent, so no over/under call can be made. A present actual with a
/// missing projection is deliberately not classified as `Over`; the
/// presentation layer renders it as unprojected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatStatus {
    Over,
    Under,
    Meets,
    ActualOnly,
    ProjectedOnly,
}

impl StatStatus {
    /// Whether this is an "n/a" classification (either side absent).
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, StatStatus::ActualOnly | StatStatus::ProjectedOnly)
    }
}

/// One aligned row: a category code with whichever values exist for it.
#[derive(Debug, Clone, Serialize)]
pub struct StatLine {
    pub code: String,
    pub actual: Option<f64>,
    pub projected: Option<f64>,
    pub status: StatStatus,
}

/// A player's full normalized actual-vs-projected table.
#[derive(Debug, Clone, Serialize)]
pub struct StatBreakdown {
    pub player_id: String,
    pub rows: Vec<StatLine>,
}

/// Align two per-category point maps over the union of their keys, sorted
/// lexicographically by code. The ordering is deterministic regardless of
/// map iteration order, and no column present on either side is dropped.
///
/// Classification uses strict equality for `Meets`; values originate from a
/// fixed-precision source, so no epsilon tolerance applies.
pub fn normalize(actual: &HashMap<String, f64>, projected: &HashMap<String, f64>) -> Vec<StatLine> {
    let codes: BTreeSet<&str> = actual
        .keys()
        .chain(projected.keys())
        .map(String::as_str)
        .collect();

    codes
        .into_iter()
        .map(|code| {
            let a = actual.get(code).copied();
            let p = projected.get(code).copied();
            let status = match (a, p) {
                (Some(a), Some(p)) if a > p => StatStatus::Over,
                (Some(a), Some(p)) if a < p => StatStatus::Under,
                (Some(_), Some(_)) => StatStatus::Meets,
                (Some(_), None) => StatStatus::ActualOnly,
                (None, Some(_)) => StatStatus::ProjectedOnly,
                // Unreachable: the code came from one of the two maps.
                (None, None) => StatStatus::ActualOnly,
            };
            StatLine {
                code: code.to_string(),
                actual: a,
                projected: p,
                status,
            }
        })
        .collect()
}

/// Normalize one player's stat breakdowns into a `StatBreakdown` table.
pub fn normalize_player(player: &Player) -> StatBreakdown {
    StatBreakdown {
        player_id: player.id.clone(),
        rows: normalize(&player.points_breakdown, &player.projected_breakdown),
    }
}
