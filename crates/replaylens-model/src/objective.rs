use serde::{Deserialize, Serialize};

use crate::serde_util::string_or_number;

/// Structure destruction event from the match metadata.
///
/// `destroyed_time_s == 0` is a sentinel for "not applicable" and never means
/// the structure fell at the start of the match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DestroyedObjective {
    /// Objective team index as sent by the API (`"0"` or `"1"`).
    #[serde(deserialize_with = "string_or_number")]
    pub team: String,
    #[serde(deserialize_with = "string_or_number")]
    pub team_objective_id: String,
    #[serde(default)]
    pub destroyed_time_s: u32,
    #[serde(default)]
    pub creep_damage: i64,
    #[serde(default)]
    pub creep_damage_mitigated: i64,
    #[serde(default)]
    pub player_damage: i64,
    #[serde(default)]
    pub player_damage_mitigated: i64,
    #[serde(default)]
    pub first_damage_time_s: u32,
}

impl DestroyedObjective {
    /// Composite key `"{team}_{team_objective_id}"` used to highlight markers.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}_{}", self.team, self.team_objective_id)
    }

    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.destroyed_time_s == 0
    }
}
