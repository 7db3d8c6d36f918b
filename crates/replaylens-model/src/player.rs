use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ModelError, Tick, serde_util::null_as_default};

/// Roster entry produced by the replay parser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerData {
    /// Identifier used as attacker and victim key in the damage log.
    pub custom_id: String,
    #[serde(default)]
    pub entity_id: String,
    pub hero_id: u32,
    #[serde(default)]
    pub lane: i32,
    #[serde(default)]
    pub lobby_player_slot: u32,
    pub name: String,
    #[serde(default)]
    pub steam_id_32: u32,
    pub team: u32,
    #[serde(default)]
    pub zipline_lane_color: u32,
}

/// Per-player position track in raw capture units.
///
/// `x_min..x_max` / `y_min..y_max` is the envelope observed for this player,
/// not the map bounds. Samples are `None` where the player had no position
/// (not spawned, dead, or simply not sampled).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerPath {
    pub player_slot: u32,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    #[serde(default)]
    pub x_pos: Vec<Option<f64>>,
    #[serde(default)]
    pub y_pos: Vec<Option<f64>>,
    #[serde(default)]
    pub health: Vec<Option<f64>>,
    #[serde(default)]
    pub move_type: Vec<Option<i32>>,
    #[serde(default)]
    pub combat_type: Vec<Option<i32>>,
}

impl PlayerPath {
    /// Number of ticks covered by this path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x_pos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_pos.is_empty()
    }

    /// Raw `(x, y)` sample at `tick`, if both coordinates were recorded.
    #[must_use]
    pub fn raw_position(&self, tick: Tick) -> Option<(f64, f64)> {
        let x = self.x_pos.get(tick).copied().flatten()?;
        let y = self.y_pos.get(tick).copied().flatten()?;
        Some((x, y))
    }

    #[must_use]
    pub fn health_at(&self, tick: Tick) -> Option<f64> {
        self.health.get(tick).copied().flatten()
    }

    /// Checks that the parallel arrays line up and the envelope is not inverted.
    ///
    /// `y_pos` must match `x_pos` exactly. The auxiliary series (`health`,
    /// `move_type`, `combat_type`) may be omitted entirely, but when present
    /// they must have the same length as the positions.
    pub fn validate(&self) -> Result<(), ModelError> {
        let expected = self.x_pos.len();
        let check = |field: &'static str, actual: usize, optional: bool| {
            if actual == expected || (optional && actual == 0) {
                Ok(())
            } else {
                Err(ModelError::PathLengthMismatch {
                    player_slot: self.player_slot,
                    field,
                    expected,
                    actual,
                })
            }
        };
        check("y_pos", self.y_pos.len(), false)?;
        check("health", self.health.len(), true)?;
        check("move_type", self.move_type.len(), true)?;
        check("combat_type", self.combat_type.len(), true)?;

        if self.x_min > self.x_max {
            return Err(ModelError::InvertedEnvelope {
                player_slot: self.player_slot,
                axis: 'x',
            });
        }
        if self.y_min > self.y_max {
            return Err(ModelError::InvertedEnvelope {
                player_slot: self.player_slot,
                axis: 'y',
            });
        }
        Ok(())
    }
}

/// World-space position of a player at one tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerPosition {
    pub custom_id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub is_npc: bool,
}

/// Single damage event emitted by the parser.
///
/// Only `damage` participates in aggregation; the rest is carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageRecord {
    pub damage: i64,
    pub pre_damage: i64,
    #[serde(rename = "type")]
    pub damage_type: i32,
    pub citadel_type: i32,
    pub entindex_inflictor: i32,
    pub entindex_ability: i32,
    pub damage_absorbed: i64,
    pub victim_health_max: i64,
    pub victim_health_new: i64,
    pub flags: u64,
    pub ability_id: u32,
    pub attacker_class: u32,
    pub victim_class: u32,
    pub victim_shield_max: i64,
    pub victim_shield_new: i64,
    pub hits: i32,
    pub health_lost: i64,
}

impl DamageRecord {
    #[must_use]
    pub fn new(damage: i64) -> Self {
        Self {
            damage,
            ..Self::default()
        }
    }
}

/// Damage dealt during one tick, keyed by victim id.
pub type VictimDamage = BTreeMap<String, Vec<DamageRecord>>;

/// Per-player time series attached to `parsed_match_data.per_player_data`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerMatchData {
    /// `damage[tick]` maps victim id to the records dealt that tick. A missing
    /// tick, a `null` tick, and a missing victim all mean no damage.
    #[serde(default, deserialize_with = "null_as_default")]
    pub damage: Vec<Option<VictimDamage>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub positions: Vec<Option<PlayerPosition>>,
}

impl PlayerMatchData {
    /// Victim map for `tick`; `None` past the end of the log or on an empty slot.
    #[must_use]
    pub fn damage_at(&self, tick: Tick) -> Option<&VictimDamage> {
        self.damage.get(tick).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn position_at(&self, tick: Tick) -> Option<&PlayerPosition> {
        self.positions.get(tick).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(len: usize) -> PlayerPath {
        PlayerPath {
            player_slot: 1,
            x_min: 0.0,
            x_max: 100.0,
            y_min: 0.0,
            y_max: 100.0,
            x_pos: vec![Some(1.0); len],
            y_pos: vec![Some(2.0); len],
            ..PlayerPath::default()
        }
    }

    #[test]
    fn test_validate_accepts_missing_auxiliary_series() {
        assert!(path(5).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_ragged_arrays() {
        let mut p = path(5);
        p.health = vec![Some(100.0); 4];
        let err = p.validate().unwrap_err();
        assert!(err.is_path_length_mismatch());

        let mut p = path(5);
        p.y_pos.pop();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_envelope() {
        let mut p = path(1);
        p.y_min = 200.0;
        let err = p.validate().unwrap_err();
        assert!(err.is_inverted_envelope());
    }

    #[test]
    fn test_raw_position_requires_both_coordinates() {
        let mut p = path(3);
        p.y_pos[1] = None;
        assert_eq!(p.raw_position(0), Some((1.0, 2.0)));
        assert_eq!(p.raw_position(1), None);
        assert_eq!(p.raw_position(3), None);
    }

    #[test]
    fn test_damage_log_tolerates_nulls() {
        let data: PlayerMatchData = serde_json::from_str(
            r#"{"damage": [null, {"7": [{"damage": 12}, {"type": 1}]}], "positions": null}"#,
        )
        .unwrap();
        assert!(data.damage_at(0).is_none());
        let tick = data.damage_at(1).unwrap();
        assert_eq!(tick["7"][0].damage, 12);
        assert_eq!(tick["7"][1].damage, 0);
        assert!(data.damage_at(9).is_none());
        assert!(data.positions.is_empty());
    }
}
