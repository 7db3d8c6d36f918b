//! Data model of a parsed match analysis.
//!
//! The backend delivers one JSON snapshot per match. This crate turns it into
//! explicit types and rejects malformed payloads at the boundary, so the
//! analysis code never has to deal with ragged arrays or inverted envelopes.
//!
//! # Overview
//!
//! - [`MatchAnalysis`]: the full payload (`match_metadata` + `parsed_match_data`)
//! - [`PlayerPath`]: per-player position arrays indexed by [`Tick`]
//! - [`PlayerMatchData`]: sparse per-tick damage log and world positions
//! - [`BossSnapshot`] / [`BossData`]: static boss records and health timeline
//! - [`DestroyedObjective`]: structure destruction events
//! - [`CreepWaveData`] / [`LanePressureData`]: per-lane wave snapshots
//! - [`Roster`]: players joined with hero metadata
//!
//! # Examples
//!
//! ```
//! use replaylens_model::MatchAnalysis;
//!
//! let json = r#"{
//!     "match_metadata": { "match_info": { "duration_s": 10, "match_id": 1 } },
//!     "parsed_match_data": { "total_match_time_s": 10 }
//! }"#;
//! let analysis = MatchAnalysis::from_json(json).unwrap();
//! assert_eq!(analysis.parsed_match_data.total_match_time_s, 10);
//! ```

pub use self::{
    analysis::{MatchAnalysis, MatchInfo, MatchMetadata, MatchPaths, ParsedMatchData},
    boss::{BossData, BossSnapshot},
    hero::{Hero, HeroCatalog, Roster, RosterEntry},
    lane::{
        CreepWaveData, CreepWaveSnapshot, LanePressureData, LanePressureSnapshot, LaneTeamKey,
        ParseLaneTeamKeyError,
    },
    objective::DestroyedObjective,
    player::{DamageRecord, PlayerData, PlayerMatchData, PlayerPath, PlayerPosition, VictimDamage},
    team::Team,
};

mod analysis;
mod boss;
mod hero;
mod lane;
mod objective;
mod player;
mod serde_util;
mod team;

/// Index into every per-entity time series. One tick is one second of match time.
pub type Tick = usize;

/// Error returned when a payload violates the model invariants.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum ModelError {
    #[display("failed to parse match analysis JSON: {_0}")]
    Json(serde_json::Error),
    #[display("path of player slot {player_slot}: {field} has {actual} samples, expected {expected}")]
    PathLengthMismatch {
        player_slot: u32,
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[display("path of player slot {player_slot}: inverted envelope on {axis} axis")]
    InvertedEnvelope { player_slot: u32, axis: char },
    #[display("match paths: {axis} resolution must be positive, got {value}")]
    InvalidResolution { axis: char, value: f64 },
}
