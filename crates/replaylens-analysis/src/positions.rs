//! Per-tick minimap markers.
//!
//! Path samples go through the two-stage [`PathNormalizer`]; world positions
//! through the fixed [`WORLD_BOUNDS`]. Both are labelled with the
//! [`MAP_REGIONS`] containing them, classified in top-left-origin minimap
//! space.

use std::collections::BTreeMap;

use replaylens_minimap::{
    MAP_REGIONS, MinimapProjection, NormalizedPoint, PathNormalizer, PixelPosition, WORLD_BOUNDS,
    classify,
};
use replaylens_model::{BossSnapshot, MatchPaths, PlayerMatchData, Tick};
use serde::Serialize;

use crate::damage::boss_display_name;

fn region_labels(point: NormalizedPoint) -> Vec<String> {
    classify(point, &MAP_REGIONS).map(str::to_owned).collect()
}

/// A player path sample at one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathMarker {
    pub player_slot: u32,
    /// Union-envelope coordinates, Y pointing up.
    pub position: NormalizedPoint,
    pub pixel: PixelPosition,
    pub health: Option<f64>,
    pub regions: Vec<String>,
}

/// Markers for every path with a sample at `tick`.
///
/// Empty when the paths admit no projection.
#[must_use]
pub fn path_markers(
    paths: &MatchPaths,
    tick: Tick,
    projection: MinimapProjection,
) -> Vec<PathMarker> {

    let Some(normalizer) = PathNormalizer::new(paths) else {
        return Vec::new();
    };
    paths
        .paths
        .iter()
        .filter_map(|path| {
            let position = normalizer.normalize_at(path, tick)?;
            let minimap = NormalizedPoint::new(position.x, 1.0 - position.y);
            Some(PathMarker {
                player_slot: path.player_slot,
                position,
                pixel: projection.project(position),
                health: path.health_at(tick),
                regions: region_labels(minimap),
            })
        })
        .collect()
}

/// A world-space player position at one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldMarker {
    pub custom_id: String,
    pub is_npc: bool,
    pub position: NormalizedPoint,
    pub pixel: PixelPosition,
    pub regions: Vec<String>,
}

#[must_use]
pub fn world_markers(
    per_player: &BTreeMap<String, PlayerMatchData>,
    tick: Tick,
    projection: MinimapProjection,
) -> Vec<WorldMarker> {
    per_player
        .iter()
        .filter_map(|(custom_id, data)| {
            let sample = data.position_at(tick)?;
            let position = WORLD_BOUNDS.normalize(sample.x, sample.y)?;
            Some(WorldMarker {
                custom_id: custom_id.clone(),
                is_npc: sample.is_npc,
                position,
                pixel: projection.project(position),
                regions: region_labels(position),
            })
        })
        .collect()
}

/// Static boss position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BossMarker {
    pub entity_index: i32,
    pub name: String,
    pub team: u32,
    pub position: NormalizedPoint,
    pub pixel: PixelPosition,
}

/// Markers for every boss with finite world coordinates.
#[must_use]
pub fn boss_markers(bosses: &[BossSnapshot], projection: MinimapProjection) -> Vec<BossMarker> {
    bosses
        .iter()
        .filter_map(|boss| {
            let position = WORLD_BOUNDS.normalize(boss.x, boss.y)?;
            Some(BossMarker {
                entity_index: boss.entity_index,
                name: boss_display_name(boss),
                team: boss.team,
                position,
                pixel: projection.project(position),
            })
        })
        .collect()
}

/// Last tick with a path sample, `0` without paths.
#[must_use]
pub fn max_path_tick(paths: Option<&MatchPaths>) -> Tick {
    paths.map_or(0, MatchPaths::max_tick)
}

#[cfg(test)]
mod tests {
    use replaylens_model::{PlayerPath, PlayerPosition};

    use super::*;

    const EPS: f64 = 1e-9;

    fn path(slot: u32, x_min: f64, x_max: f64, samples: Vec<Option<f64>>) -> PlayerPath {
        PlayerPath {
            player_slot: slot,
            x_min,
            x_max,
            y_min: 0.0,
            y_max: 100.0,
            y_pos: samples.clone(),
            x_pos: samples,
            ..PlayerPath::default()
        }
    }

    #[test]
    fn test_path_markers_skip_missing_samples() {
        let paths = MatchPaths {
            x_resolution: 1000.0,
            y_resolution: 1000.0,
            paths: vec![
                path(0, 0.0, 100.0, vec![Some(500.0), Some(1000.0)]),
                path(1, 50.0, 150.0, vec![None, Some(500.0)]),
            ],
        };
        let markers = path_markers(&paths, 0, MinimapProjection::PATHS);
        assert_eq!(markers.len(), 1);
        assert!((markers[0].position.x - 50.0 / 150.0).abs() < EPS);
        assert!((markers[0].pixel.top - 384.0).abs() < EPS);

        let markers = path_markers(&paths, 1, MinimapProjection::PATHS);
        let slots: Vec<_> = markers.iter().map(|m| m.player_slot).collect();
        assert_eq!(slots, [0, 1]);
        assert!(path_markers(&paths, 2, MinimapProjection::PATHS).is_empty());
        assert_eq!(max_path_tick(Some(&paths)), 1);
        assert_eq!(max_path_tick(None), 0);
    }

    #[test]
    fn test_degenerate_paths_have_no_markers() {
        let paths = MatchPaths {
            x_resolution: 1000.0,
            y_resolution: 1000.0,
            paths: vec![path(0, 5.0, 5.0, vec![Some(1.0)])],
        };
        assert!(path_markers(&paths, 0, MinimapProjection::PATHS).is_empty());
    }

    #[test]
    fn test_world_markers_are_labelled() {
        let per_player = BTreeMap::from([
            (
                "1".to_owned(),
                PlayerMatchData {
                    damage: Vec::new(),
                    // top-left corner of the map
                    positions: vec![Some(PlayerPosition {
                        custom_id: "1".to_owned(),
                        x: -10000.0,
                        y: 10000.0,
                        ..PlayerPosition::default()
                    })],
                },
            ),
            ("2".to_owned(), PlayerMatchData::default()),
        ]);
        let markers = world_markers(&per_player, 0, MinimapProjection::WORLD);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].regions, ["Outskirts"]);
        assert!(markers[0].pixel.left < 50.0);
    }

    #[test]
    fn test_boss_markers_project_world_position() {
        let bosses = [BossSnapshot {
            entity_index: 9,
            boss_name_hash: 3,
            x: 0.0,
            y: 0.0,
            ..BossSnapshot::default()
        }];
        let markers = boss_markers(&bosses, MinimapProjection::WORLD);
        assert_eq!(markers[0].name, "Boss #3");
        assert!((markers[0].pixel.left - 374.0).abs() < EPS);
        assert!((markers[0].pixel.top - 384.0).abs() < EPS);
    }
}
