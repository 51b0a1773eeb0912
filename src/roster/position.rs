// Player positions, slot labels, and the static slot eligibility model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The normalized label for bench slots. Providers report "BE" or "BN".
pub const BENCH_LABEL: &str = "BE";

/// Football positions used for lineup slot assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    #[serde(rename = "D/ST")]
    Dst,
    K,
    P,
}

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles provider-style abbreviations: "D/ST" and "DST" both map to
    /// the defense/special-teams position.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "D/ST" | "DST" => Some(Position::Dst),
            "K" => Some(Position::K),
            "P" => Some(Position::P),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::Dst => "D/ST",
            Position::K => "K",
            Position::P => "P",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Normalize a slot label as reported by the provider.
///
/// The combined "RB/WR/TE" label is the provider's name for the FLEX slot;
/// "BN" is an alternate spelling of the bench label.
pub fn normalize_slot_label(label: &str) -> String {
    let upper = label.trim().to_uppercase();
    match upper.as_str() {
        "RB/WR/TE" => "FLEX".to_string(),
        "BN" => BENCH_LABEL.to_string(),
        _ => upper,
    }
}

/// Whether a normalized slot label denotes a bench slot.
pub fn is_bench_label(label: &str) -> bool {
    normalize_slot_label(label) == BENCH_LABEL
}

/// The stock eligibility set for a normalized slot label.
///
/// Returns `None` for labels with no default (the league config must then
/// list the eligible positions explicitly). Bench slots accept any position
/// and are handled separately.
pub fn default_eligibility(label: &str) -> Option<&'static [Position]> {
    match label {
        "QB" => Some(&[Position::QB]),
        "RB" => Some(&[Position::RB]),
        "WR" => Some(&[Position::WR]),
        "TE" => Some(&[Position::TE]),
        "FLEX" => Some(&[Position::RB, Position::WR, Position::TE]),
        "WR/TE" => Some(&[Position::WR, Position::TE]),
        "RB/WR" => Some(&[Position::RB, Position::WR]),
        // Superflex: any offensive player.
        "OP" => Some(&[Position::QB, Position::RB, Position::WR, Position::TE]),
        "D/ST" => Some(&[Position::Dst]),
        "K" => Some(&[Position::K]),
        "P" => Some(&[Position::P]),
        _ => None,
    }
}

/// A named starting slot with the set of positions it legally accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSlot {
    pub label: String,
    pub eligible: Vec<Position>,
}

impl LineupSlot {
    /// Build a slot from a label and an explicit eligibility set.
    /// The label is normalized.
    pub fn new(label: &str, eligible: Vec<Position>) -> Self {
        LineupSlot {
            label: normalize_slot_label(label),
            eligible,
        }
    }

    /// Build a slot from its label alone, using the stock eligibility model.
    /// Returns `None` when the label has no default eligibility.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = normalize_slot_label(label);
        let eligible = default_eligibility(&normalized)?;
        Some(LineupSlot {
            label: normalized,
            eligible: eligible.to_vec(),
        })
    }

    /// Whether a player with the given native position may start in this slot.
    pub fn accepts(&self, position: Position) -> bool {
        self.eligible.contains(&position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_pos_standard_positions() {
        assert_eq!(Position::from_str_pos("QB"), Some(Position::QB));
        assert_eq!(Position::from_str_pos("RB"), Some(Position::RB));
        assert_eq!(Position::from_str_pos("WR"), Some(Position::WR));
        assert_eq!(Position::from_str_pos("TE"), Some(Position::TE));
        assert_eq!(Position::from_str_pos("K"), Some(Position::K));
        assert_eq!(Position::from_str_pos("P"), Some(Position::P));
    }

    #[test]
    fn from_str_pos_defense_spellings() {
        assert_eq!(Position::from_str_pos("D/ST"), Some(Position::Dst));
        assert_eq!(Position::from_str_pos("DST"), Some(Position::Dst));
    }

    #[test]
    fn from_str_pos_case_insensitive() {
        assert_eq!(Position::from_str_pos("qb"), Some(Position::QB));
        assert_eq!(Position::from_str_pos("d/st"), Some(Position::Dst));
    }

    #[test]
    fn from_str_pos_invalid() {
        assert_eq!(Position::from_str_pos("XX"), None);
        assert_eq!(Position::from_str_pos(""), None);
    }

    #[test]
    fn display_str_roundtrip() {
        let positions = [
            Position::QB,
            Position::RB,
            Position::WR,
            Position::TE,
            Position::Dst,
            Position::K,
            Position::P,
        ];
        for pos in positions {
            let parsed = Position::from_str_pos(pos.display_str());
            assert_eq!(parsed, Some(pos), "Roundtrip failed for {}", pos);
        }
    }

    #[test]
    fn serde_rename_for_defense() {
        let json = serde_json::to_string(&Position::Dst).unwrap();
        assert_eq!(json, "\"D/ST\"");
        let parsed: Position = serde_json::from_str("\"D/ST\"").unwrap();
        assert_eq!(parsed, Position::Dst);
    }

    #[test]
    fn normalize_flex_label() {
        assert_eq!(normalize_slot_label("RB/WR/TE"), "FLEX");
        assert_eq!(normalize_slot_label("rb/wr/te"), "FLEX");
        assert_eq!(normalize_slot_label("FLEX"), "FLEX");
    }

    #[test]
    fn normalize_bench_label() {
        assert_eq!(normalize_slot_label("BN"), "BE");
        assert_eq!(normalize_slot_label("BE"), "BE");
        assert!(is_bench_label("bn"));
        assert!(is_bench_label("BE"));
        assert!(!is_bench_label("QB"));
    }

    #[test]
    fn default_eligibility_dedicated_slots() {
        assert_eq!(default_eligibility("QB"), Some(&[Position::QB][..]));
        assert_eq!(default_eligibility("D/ST"), Some(&[Position::Dst][..]));
        assert_eq!(default_eligibility("K"), Some(&[Position::K][..]));
    }

    #[test]
    fn default_eligibility_flex_accepts_three_positions() {
        let flex = default_eligibility("FLEX").unwrap();
        assert_eq!(flex, &[Position::RB, Position::WR, Position::TE]);
    }

    #[test]
    fn default_eligibility_unknown_label() {
        assert_eq!(default_eligibility("ZZ"), None);
        assert_eq!(default_eligibility("BE"), None);
    }

    #[test]
    fn lineup_slot_from_label_normalizes() {
        let slot = LineupSlot::from_label("RB/WR/TE").unwrap();
        assert_eq!(slot.label, "FLEX");
        assert!(slot.accepts(Position::RB));
        assert!(slot.accepts(Position::WR));
        assert!(slot.accepts(Position::TE));
        assert!(!slot.accepts(Position::QB));
    }

    #[test]
    fn lineup_slot_from_label_unknown_returns_none() {
        assert!(LineupSlot::from_label("MYSTERY").is_none());
    }

    #[test]
    fn lineup_slot_accepts_only_listed_positions() {
        let slot = LineupSlot::new("QB", vec![Position::QB]);
        assert!(slot.accepts(Position::QB));
        assert!(!slot.accepts(Position::RB));
        assert!(!slot.accepts(Position::Dst));
    }
}
