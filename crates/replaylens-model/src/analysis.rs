use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    BossData, CreepWaveData, DestroyedObjective, LanePressureData, ModelError, PlayerData,
    PlayerMatchData, PlayerPath, Tick, serde_util::null_as_default,
};

/// Raw-unit scale of the match paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPaths {
    pub x_resolution: f64,
    pub y_resolution: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paths: Vec<PlayerPath>,
}

impl MatchPaths {
    /// Last tick with a sample on the first path, or `0` without paths.
    #[must_use]
    pub fn max_tick(&self) -> Tick {
        self.paths
            .first()
            .map_or(0, |path| path.len().saturating_sub(1))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchInfo {
    #[serde(default)]
    pub duration_s: u32,
    #[serde(default)]
    pub match_id: u64,
    #[serde(default)]
    pub winning_team: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub objectives: Vec<DestroyedObjective>,
    #[serde(default)]
    pub match_paths: Option<MatchPaths>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchMetadata {
    #[serde(default)]
    pub match_info: MatchInfo,
}

/// Parser output enriched by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedMatchData {
    #[serde(default)]
    pub total_match_time_s: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players_data: Vec<PlayerData>,
    /// Keyed by player `custom_id`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub per_player_data: BTreeMap<String, PlayerMatchData>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bosses: BossData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creep_waves: CreepWaveData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lane_pressure: LanePressureData,
}

/// Complete match analysis payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchAnalysis {
    #[serde(default)]
    pub match_metadata: MatchMetadata,
    #[serde(default)]
    pub parsed_match_data: ParsedMatchData,
}

impl MatchAnalysis {
    /// Parses and validates a payload.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let analysis: Self = serde_json::from_str(json).map_err(ModelError::Json)?;
        analysis.validate()?;
        Ok(analysis)
    }

    /// Parses and validates an already decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ModelError> {
        let analysis: Self = serde_json::from_value(value).map_err(ModelError::Json)?;
        analysis.validate()?;
        Ok(analysis)
    }

    /// Checks the structural invariants of every path.
    pub fn validate(&self) -> Result<(), ModelError> {
        let Some(paths) = &self.match_metadata.match_info.match_paths else {
            return Ok(());
        };
        for (axis, value) in [('x', paths.x_resolution), ('y', paths.y_resolution)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ModelError::InvalidResolution { axis, value });
            }
        }
        paths.paths.iter().try_for_each(PlayerPath::validate)
    }

    #[must_use]
    pub fn match_info(&self) -> &MatchInfo {
        &self.match_metadata.match_info
    }

    /// Total match length in ticks, preferring the parser's figure.
    #[must_use]
    pub fn total_ticks(&self) -> Tick {
        let parsed = self.parsed_match_data.total_match_time_s;
        let seconds = if parsed > 0 {
            parsed
        } else {
            self.match_info().duration_s
        };
        usize::try_from(seconds).unwrap_or(usize::MAX)
    }

    /// Last valid cursor position.
    #[must_use]
    pub fn max_tick(&self) -> Tick {
        match &self.match_info().match_paths {
            Some(paths) if !paths.paths.is_empty() => paths.max_tick(),
            _ => self.total_ticks(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "match_metadata": {
            "match_info": {
                "duration_s": 1800,
                "match_id": 12345,
                "objectives": [
                    {"team": "0", "team_objective_id": "1", "destroyed_time_s": 0},
                    {"team": 1, "team_objective_id": 3, "destroyed_time_s": 500}
                ],
                "match_paths": {
                    "x_resolution": 16383,
                    "y_resolution": 16383,
                    "paths": [{
                        "player_slot": 0,
                        "x_min": -5000, "x_max": 5000, "y_min": -4000, "y_max": 4000,
                        "x_pos": [1, 2, null], "y_pos": [3, 4, 5],
                        "health": [100, 100, 0], "move_type": [0, 0, 0], "combat_type": [0, 1, 0]
                    }]
                }
            }
        },
        "parsed_match_data": {
            "total_match_time_s": 1795,
            "players_data": [
                {"custom_id": "1", "entity_id": "2", "hero_id": 7, "lane": 1,
                 "lobby_player_slot": 0, "name": "alice", "steam_id_32": 1,
                 "team": 2, "zipline_lane_color": 1}
            ],
            "per_player_data": {"1": {"damage": [{"42": [{"damage": 10}]}], "positions": []}},
            "bosses": {"snapshots": [], "health_timeline": []},
            "creep_waves": {"waves": {}},
            "lane_pressure": {"pressure": {}}
        }
    }"#;

    #[test]
    fn test_from_json_parses_full_payload() {
        let analysis = MatchAnalysis::from_json(PAYLOAD).unwrap();
        let info = analysis.match_info();
        assert_eq!(info.match_id, 12345);
        assert_eq!(info.objectives.len(), 2);
        assert_eq!(info.objectives[1].team, "1");
        assert_eq!(analysis.total_ticks(), 1795);
        assert_eq!(analysis.max_tick(), 2);
        let data = &analysis.parsed_match_data.per_player_data["1"];
        assert_eq!(data.damage_at(0).unwrap()["42"][0].damage, 10);
    }

    #[test]
    fn test_from_json_rejects_ragged_path() {
        let ragged = PAYLOAD.replace(r#""y_pos": [3, 4, 5]"#, r#""y_pos": [3, 4]"#);
        let err = MatchAnalysis::from_json(&ragged).unwrap_err();
        assert!(err.is_path_length_mismatch());
    }

    #[test]
    fn test_from_json_rejects_zero_resolution() {
        let bad = PAYLOAD.replacen(r#""x_resolution": 16383"#, r#""x_resolution": 0"#, 1);
        let err = MatchAnalysis::from_json(&bad).unwrap_err();
        assert!(err.is_invalid_resolution());
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let analysis = MatchAnalysis::from_json("{}").unwrap();
        assert!(analysis.parsed_match_data.players_data.is_empty());
        assert!(analysis.parsed_match_data.bosses.snapshots.is_empty());
        assert_eq!(analysis.max_tick(), 0);
    }
}
