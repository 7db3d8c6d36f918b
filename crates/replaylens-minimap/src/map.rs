//! Static map data in normalized minimap space.

use crate::{NormalizedPoint, Region};

/// Map zones, from base to lanes to jungle. Zones may overlap.
pub static MAP_REGIONS: [Region; 9] = [
    Region::from_static(
        "Amber Base",
        &[[0.45, 0.0], [0.75, 0.0], [0.75, 0.25], [0.45, 0.25]],
    ),
    Region::from_static(
        "Sapphire Base",
        &[[0.45, 0.75], [0.75, 0.75], [0.75, 1.0], [0.45, 1.0]],
    ),
    Region::from_static(
        "Lane 1",
        &[[0.15, 0.2], [0.35, 0.2], [0.35, 0.8], [0.15, 0.8]],
    ),
    Region::from_static(
        "Lane 2",
        &[[0.5, 0.25], [0.7, 0.25], [0.7, 0.75], [0.5, 0.75]],
    ),
    Region::from_static(
        "Lane 3",
        &[[0.82, 0.2], [1.0, 0.2], [1.0, 0.8], [0.82, 0.8]],
    ),
    Region::from_static(
        "Mid Boss",
        &[[0.6, 0.44], [0.66, 0.5], [0.6, 0.56], [0.54, 0.5]],
    ),
    Region::from_static(
        "Amber Jungle",
        &[[0.35, 0.25], [0.82, 0.25], [0.82, 0.5], [0.35, 0.5]],
    ),
    Region::from_static(
        "Sapphire Jungle",
        &[[0.35, 0.5], [0.82, 0.5], [0.82, 0.75], [0.35, 0.75]],
    ),
    Region::from_static(
        "Outskirts",
        &[[0.0, 0.0], [0.15, 0.0], [0.15, 1.0], [0.0, 1.0]],
    ),
];

/// Marker position of a team structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveMarker {
    /// Objective team index (`0` Amber, `1` Sapphire); `None` for neutral objectives.
    pub team: Option<u32>,
    pub team_objective_id: Option<u32>,
    pub label: &'static str,
    pub position: NormalizedPoint,
}

const fn marker(team: u32, id: u32, label: &'static str, x: f64, y: f64) -> ObjectiveMarker {
    ObjectiveMarker {
        team: Some(team),
        team_objective_id: Some(id),
        label,
        position: NormalizedPoint { x, y },
    }
}

pub const MID_BOSS_MARKER: ObjectiveMarker = ObjectiveMarker {
    team: None,
    team_objective_id: None,
    label: "Mid Boss",
    position: NormalizedPoint { x: 0.6, y: 0.5 },
};

pub static OBJECTIVE_MARKERS: [ObjectiveMarker; 26] = [
    marker(0, 0, "Core", 0.6, 0.13),
    marker(0, 9, "Titan", 0.6, 0.15),
    marker(0, 1, "Guardian Lane 1", 0.2, 0.4),
    marker(0, 5, "Walker Lane 1", 0.3125, 0.2625),
    marker(0, 12, "Base Guardian Lane 1", 0.5, 0.2),
    marker(0, 3, "Guardian Lane 2", 0.605, 0.4125),
    marker(0, 7, "Walker Lane 2", 0.535, 0.35),
    marker(0, 14, "Base Guardian Lane 2", 0.6, 0.225),
    marker(0, 4, "Guardian Lane 3", 0.935, 0.4),
    marker(0, 8, "Walker Lane 3", 0.86, 0.275),
    marker(0, 15, "Base Guardian Lane 3", 0.7, 0.2),
    marker(0, 10, "Shrine 1", 0.5375, 0.15),
    marker(0, 11, "Shrine 2", 0.6625, 0.15),
    marker(1, 0, "Core", 0.6, 0.87),
    marker(1, 9, "Titan", 0.6, 0.85),
    marker(1, 1, "Guardian Lane 1", 0.265, 0.6),
    marker(1, 5, "Walker Lane 1", 0.34, 0.7375),
    marker(1, 12, "Base Guardian Lane 1", 0.5, 0.8),
    marker(1, 3, "Guardian Lane 2", 0.605, 0.5875),
    marker(1, 7, "Walker Lane 2", 0.665, 0.65),
    marker(1, 14, "Base Guardian Lane 2", 0.6, 0.775),
    marker(1, 4, "Guardian Lane 3", 1.0, 0.6),
    marker(1, 8, "Walker Lane 3", 0.8875, 0.725),
    marker(1, 15, "Base Guardian Lane 3", 0.7, 0.8),
    marker(1, 10, "Shrine 1", 0.5375, 0.85),
    marker(1, 11, "Shrine 2", 0.6625, 0.85),
];

/// Marker for a destroyed-objective record, matched by objective team index and id.
#[must_use]
pub fn objective_marker(team: u32, team_objective_id: u32) -> Option<&'static ObjectiveMarker> {
    OBJECTIVE_MARKERS
        .iter()
        .find(|m| m.team == Some(team) && m.team_objective_id == Some(team_objective_id))
}
