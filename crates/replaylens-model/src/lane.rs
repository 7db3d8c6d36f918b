use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::serde_util::null_as_default;

/// Centroid of one creep wave at one tick, in world units.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreepWaveSnapshot {
    pub x: f64,
    pub y: f64,
    pub count: u32,
    pub team: u32,
}

/// Per-tick wave snapshots keyed by `"{lane}_{team}"`; `None` means no wave that tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreepWaveData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub waves: BTreeMap<String, Vec<Option<CreepWaveSnapshot>>>,
}

/// How far a wave has pushed toward the enemy base, with the players credited for it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LanePressureSnapshot {
    /// `0.0` at the own base, `1.0` at the enemy base.
    pub pressure: f64,
    pub team: u32,
    #[serde(default)]
    pub attributed_players: Vec<u32>,
    pub wave_x: f64,
    pub wave_y: f64,
    pub wave_count: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LanePressureData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pressure: BTreeMap<String, Vec<Option<LanePressureSnapshot>>>,
}

/// Parsed form of a `"{lane}_{team}"` series key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("{lane}_{team}")]
pub struct LaneTeamKey {
    pub lane: u32,
    pub team: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid lane/team key '{key}'")]
pub struct ParseLaneTeamKeyError {
    #[error(not(source))]
    pub key: String,
}

impl FromStr for LaneTeamKey {
    type Err = ParseLaneTeamKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLaneTeamKeyError { key: s.to_owned() };
        let (lane, team) = s.split_once('_').ok_or_else(err)?;
        let lane = lane.parse().map_err(|_| err())?;
        let team = team.parse().map_err(|_| err())?;
        Ok(Self { lane, team })
    }
}
