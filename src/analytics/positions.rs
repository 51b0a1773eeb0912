// Positional aggregation: per-slot summary statistics for one team-week.
//
// Starters group under their normalized slot label; bench players each get
// their own ordinal key (BE1, BE2, ...) so the bench is never pooled into a
// single bucket.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::roster::position::normalize_slot_label;
use crate::roster::TeamSide;

/// One member of a group: an actual score and, when the provider published
/// one, a projection.
#[derive(Debug, Clone, Copy)]
pub struct GroupScore {
    pub points: f64,
    pub projected: Option<f64>,
}

/// Summary statistics for one group key.
///
/// `min`/`max` are reported only when the group aggregated more than one
/// score; for a single-score group they would just repeat the value. The
/// projected aggregates cover the members that carry projections, under the
/// same more-than-one rule, and are absent when no member has one.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub count: usize,
    /// Individual actual scores in the order encountered.
    pub scores: Vec<f64>,
    pub total: f64,
    pub average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_max: Option<f64>,
}

fn spread(values: &[f64]) -> (Option<f64>, Option<f64>) {
    if values.len() > 1 {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (Some(lo), Some(hi))
    } else {
        (None, None)
    }
}

/// Aggregate (group key, score) pairs into per-group summaries.
///
/// The sum of all group counts equals the number of input pairs; no pair is
/// ever dropped or double-counted.
pub fn aggregate(pairs: &[(String, GroupScore)]) -> BTreeMap<String, GroupSummary> {
    let mut groups: BTreeMap<String, Vec<GroupScore>> = BTreeMap::new();
    for (key, score) in pairs {
        groups.entry(key.clone()).or_default().push(*score);
    }

    groups
        .into_iter()
        .map(|(key, members)| {
            let count = members.len();
            let scores: Vec<f64> = members.iter().map(|m| m.points).collect();
            let total: f64 = scores.iter().sum();
            let average = total / count as f64;
            let (min, max) = spread(&scores);

            let projections: Vec<f64> = members.iter().filter_map(|m| m.projected).collect();
            let projected_average = if projections.is_empty() {
                None
            } else {
                Some(projections.iter().sum::<f64>() / projections.len() as f64)
            };
            let (projected_min, projected_max) = spread(&projections);

            (
                key,
                GroupSummary {
                    count,
                    scores,
                    total,
                    average,
                    min,
                    max,
                    projected_average,
                    projected_min,
                    projected_max,
                },
            )
        })
        .collect()
}

/// Derive group keys for one team's lineup and aggregate its scores.
///
/// Starters key by normalized slot label (two RB starters both land under
/// "RB"); bench entries key by encounter-ordered ordinal ("BE1", "BE2", ...).
pub fn aggregate_roster(side: &TeamSide) -> BTreeMap<String, GroupSummary> {
    let mut bench_ordinal = 0usize;
    let pairs: Vec<(String, GroupScore)> = side
        .lineup
        .iter()
        .map(|entry| {
            let key = if entry.is_bench() {
                bench_ordinal += 1;
                format!("BE{bench_ordinal}")
            } else {
                normalize_slot_label(&entry.slot)
            };
            (
                key,
                GroupScore {
                    points: entry.player.points,
                    projected: entry.player.projected_points,
                },
            )
        })
        .collect();
    aggregate(&pairs)
}
