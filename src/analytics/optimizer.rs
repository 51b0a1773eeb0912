// Roster optimizer: the best score any legal lineup could have produced.
//
// This is a maximum-weight bipartite assignment: players on one side,
// starting slots on the other, an edge where the player's native position is
// in the slot's eligibility set, edge weight = the player's actual points.
// Greedy per-position assignment under-counts whenever shared-eligibility
// slots (FLEX) compete with dedicated RB/WR/TE slots, so the slots are
// solved jointly and exactly.

use crate::analytics::AnalysisError;
use crate::roster::position::LineupSlot;
use crate::roster::Player;

/// Upper bound on starting slots per team. Keeps the slot-subset dynamic
/// program's table (2^slots entries) small; real lineup templates are well
/// under this.
pub const MAX_SLOTS: usize = 20;

/// Maximum total score achievable by any legal assignment of `players` to
/// `slots`, with every slot filled by a distinct player.
///
/// `players` is the team's full roster for the week (starters and bench);
/// `slots` is the starting-lineup template, bench excluded. A player with no
/// eligible slot simply never appears in the optimum. If the template cannot
/// be filled at all, the roster and template are inconsistent and the call
/// fails with `AnalysisError::Configuration`.
///
/// Exact over all slots jointly: the table is indexed by the subset of slots
/// already filled, and each player may claim at most one still-open slot.
/// Negative scores are handled; the optimum must still fill every slot.
pub fn max_score(players: &[&Player], slots: &[LineupSlot]) -> Result<f64, AnalysisError> {
    if slots.is_empty() {
        return Ok(0.0);
    }
    if slots.len() > MAX_SLOTS {
        return Err(AnalysisError::configuration(format!(
            "lineup template has {} slots, maximum supported is {}",
            slots.len(),
            MAX_SLOTS
        )));
    }

    let full: usize = (1 << slots.len()) - 1;
    // best[mask] = highest total filling exactly the slots in `mask`;
    // None where that subset is unreachable.
    let mut best: Vec<Option<f64>> = vec![None; full + 1];
    best[0] = Some(0.0);

    for player in players {
        // Descending mask order: a state updated in this pass is never read
        // again in the same pass, so each player claims at most one slot.
        for mask in (0..=full).rev() {
            let Some(base) = best[mask] else {
                continue;
            };
            for (s, slot) in slots.iter().enumerate() {
                if mask & (1 << s) != 0 || !slot.accepts(player.position) {
                    continue;
                }
                let next = mask | (1 << s);
                let candidate = base + player.points;
                if best[next].map_or(true, |cur| candidate > cur) {
                    best[next] = Some(candidate);
                }
            }
        }
    }

    best[full].ok_or_else(|| {
        AnalysisError::configuration(format!(
            "no assignment of {} players fills all {} starting slots",
            players.len(),
            slots.len()
        ))
    })
}
