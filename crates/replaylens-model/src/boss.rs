use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Tick, serde_util::null_as_default};

/// Static record of one spawned boss or objective entity.
///
/// `entity_index` is unique per spawned instance and is never reused across
/// respawns. `custom_id` identifies the entity type and is shared.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BossSnapshot {
    pub entity_index: i32,
    pub custom_id: u32,
    pub boss_name_hash: u64,
    pub team: u32,
    #[serde(default)]
    pub lane: i32,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub spawn_time_s: u32,
    #[serde(default)]
    pub max_health: i32,
    #[serde(default)]
    pub life_state_on_create: i32,
    /// `None` means the boss was still alive at match end.
    #[serde(default)]
    pub death_time_s: Option<u32>,
    #[serde(default)]
    pub life_state_on_delete: Option<i32>,
}

impl BossSnapshot {
    /// Key grouping damage on one instance: `"{team}_{lane}_{custom_id}_{entity_index}"`.
    #[must_use]
    pub fn unique_key(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.team, self.lane, self.custom_id, self.entity_index
        )
    }

    /// Whether the boss had spawned and not yet died at `tick`.
    #[must_use]
    pub fn is_alive_at(&self, tick: Tick) -> bool {
        let spawned = usize::try_from(self.spawn_time_s).is_ok_and(|spawn| spawn <= tick);
        let dead = self
            .death_time_s
            .and_then(|death| usize::try_from(death).ok())
            .is_some_and(|death| death <= tick);
        spawned && !dead
    }
}

/// Boss section of the parsed match data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BossData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub snapshots: Vec<BossSnapshot>,
    /// `health_timeline[tick]` maps `entity_index` (as a string) to current health.
    #[serde(default, deserialize_with = "null_as_default")]
    pub health_timeline: Vec<BTreeMap<String, i32>>,
}

impl BossData {
    #[must_use]
    pub fn health_at(&self, entity_index: i32, tick: Tick) -> Option<i32> {
        self.health_timeline
            .get(tick)?
            .get(&entity_index.to_string())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alive_window_is_half_open() {
        let boss = BossSnapshot {
            spawn_time_s: 10,
            death_time_s: Some(20),
            ..BossSnapshot::default()
        };
        assert!(!boss.is_alive_at(9));
        assert!(boss.is_alive_at(10));
        assert!(boss.is_alive_at(19));
        assert!(!boss.is_alive_at(20));

        let survivor = BossSnapshot {
            death_time_s: None,
            ..boss
        };
        assert!(survivor.is_alive_at(10_000));
    }

    #[test]
    fn test_unique_key_includes_instance() {
        let boss = BossSnapshot {
            entity_index: 42,
            custom_id: 21,
            team: 3,
            lane: 1,
            ..BossSnapshot::default()
        };
        assert_eq!(boss.unique_key(), "3_1_21_42");
    }

    #[test]
    fn test_health_lookup_by_entity_index() {
        let data: BossData = serde_json::from_str(
            r#"{"snapshots": [], "health_timeline": [{}, {"42": 900}]}"#,
        )
        .unwrap();
        assert_eq!(data.health_at(42, 0), None);
        assert_eq!(data.health_at(42, 1), Some(900));
        assert_eq!(data.health_at(42, 2), None);
    }
}
