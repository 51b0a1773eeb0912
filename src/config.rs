// Configuration loading and parsing (league.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analytics::optimizer::MAX_SLOTS;
use crate::analytics::power::DominanceWeight;
use crate::roster::position::{default_eligibility, normalize_slot_label, LineupSlot, Position};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

/// The league's lineup rules: static configuration supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub num_teams: usize,
    /// Bench slot count: the most players a roster may carry outside the
    /// starting template. Bench slots accept any position and carry no
    /// scoring obligation.
    #[serde(default)]
    pub bench_slots: usize,
    /// Dominance weighting for the power rankings.
    #[serde(default)]
    pub dominance: DominanceWeight,
    /// Starting slot specs, in lineup display order.
    pub lineup: Vec<SlotSpec>,
}

/// One starting slot entry from the config.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotSpec {
    pub slot: String,
    #[serde(default = "default_slot_count")]
    pub count: usize,
    /// Eligible positions. When omitted, the stock eligibility for the slot
    /// label applies (a "FLEX" slot takes RB/WR/TE, and so on).
    #[serde(default)]
    pub eligible: Vec<Position>,
}

fn default_slot_count() -> usize {
    1
}

impl LeagueConfig {
    /// Load and validate a league config from a league.toml file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        let file: LeagueFile = toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        let league = file.league;
        validate(&league)?;
        Ok(league)
    }

    /// Expand the slot specs into the flat starting-lineup template the
    /// analytics take: one `LineupSlot` per starting position, counts
    /// unrolled, eligibility defaulted from the slot label where the config
    /// omitted it.
    pub fn lineup_slots(&self) -> Vec<LineupSlot> {
        self.lineup
            .iter()
            .flat_map(|spec| {
                let slot = if spec.eligible.is_empty() {
                    // validate() guarantees the label has a default.
                    LineupSlot::from_label(&spec.slot).unwrap_or_else(|| {
                        LineupSlot::new(&spec.slot, vec![])
                    })
                } else {
                    LineupSlot::new(&spec.slot, spec.eligible.clone())
                };
                std::iter::repeat(slot).take(spec.count)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(league: &LeagueConfig) -> Result<(), ConfigError> {
    if league.num_teams == 0 {
        return Err(ConfigError::Validation {
            field: "league.num_teams".into(),
            message: "must be greater than 0".into(),
        });
    }

    if league.lineup.is_empty() {
        return Err(ConfigError::Validation {
            field: "league.lineup".into(),
            message: "at least one starting slot is required".into(),
        });
    }

    let mut total_slots = 0usize;
    for spec in &league.lineup {
        if spec.count == 0 {
            return Err(ConfigError::Validation {
                field: format!("league.lineup[{}].count", spec.slot),
                message: "must be greater than 0".into(),
            });
        }
        total_slots += spec.count;

        let has_default = default_eligibility(&normalize_slot_label(&spec.slot)).is_some();
        if spec.eligible.is_empty() && !has_default {
            return Err(ConfigError::Validation {
                field: format!("league.lineup[{}].eligible", spec.slot),
                message: format!(
                    "slot label '{}' has no stock eligibility; list eligible positions explicitly",
                    spec.slot
                ),
            });
        }
    }

    if total_slots > MAX_SLOTS {
        return Err(ConfigError::Validation {
            field: "league.lineup".into(),
            message: format!("{total_slots} starting slots exceeds the supported maximum of {MAX_SLOTS}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
