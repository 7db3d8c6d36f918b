use replaylens_analysis::positions::{
    BossMarker, PathMarker, WorldMarker, boss_markers, max_path_tick, path_markers, world_markers,
};
use replaylens_minimap::MinimapProjection;
use replaylens_model::{MatchAnalysis, Tick};
use serde::Serialize;

use crate::{
    args::{ClientArg, MatchSourceArg, SourceOptionArg},
    source,
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub struct PositionsArg {
    #[command(flatten)]
    source: MatchSourceArg,

    #[command(flatten)]
    options: SourceOptionArg,

    /// Cursor position in seconds
    #[arg(long, default_value_t = 0)]
    tick: Tick,

    /// Use per-player world positions instead of the match paths
    #[arg(long)]
    world: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
enum PlayerMarkers {
    Paths {
        max_tick: Tick,
        markers: Vec<PathMarker>,
    },
    World {
        markers: Vec<WorldMarker>,
    },
}

#[derive(Debug, Serialize)]
struct PositionsReport {
    tick: Tick,
    players: PlayerMarkers,
    bosses: Vec<BossMarker>,
}

fn build_report(analysis: &MatchAnalysis, tick: Tick, world: bool) -> PositionsReport {
    let data = &analysis.parsed_match_data;
    let players = if world {
        PlayerMarkers::World {
            markers: world_markers(&data.per_player_data, tick, MinimapProjection::WORLD),
        }
    } else {
        let paths = analysis.match_info().match_paths.as_ref();
        PlayerMarkers::Paths {
            max_tick: max_path_tick(paths),
            markers: paths.map_or_else(Vec::new, |paths| {
                path_markers(paths, tick, MinimapProjection::PATHS)
            }),
        }
    };
    PositionsReport {
        tick,
        players,
        bosses: boss_markers(&data.bosses.snapshots, MinimapProjection::WORLD),
    }
}

fn regions(labels: &[String]) -> String {
    if labels.is_empty() {
        "-".to_owned()
    } else {
        labels.join(", ")
    }
}

pub fn run(client: &ClientArg, arg: &PositionsArg) -> anyhow::Result<()> {
    let loaded = source::load(client, &arg.source, &arg.options)?;
    let report = build_report(&loaded.analysis, arg.tick, arg.world);
    if arg.json {
        return Output::stdout().write_json(&report);
    }

    match &report.players {
        PlayerMarkers::Paths { max_tick, markers } => {
            println!(
                "Path markers at tick {} (last tick {max_tick})",
                report.tick
            );

            for marker in markers {
                let health = marker
                    .health
                    .map_or_else(|| "-".to_owned(), |health| format!("{health:.0}"));
                println!(
                    "  slot {:>2}  ({:>6.1}, {:>6.1}) px  hp {health:>5}  {}",
                    marker.player_slot,
                    marker.pixel.left,
                    marker.pixel.top,
                    regions(&marker.regions),
                );
            }
        }
        PlayerMarkers::World { markers } => {
            println!("World markers at tick {}", report.tick);
            for marker in markers {
                let kind = if marker.is_npc { "npc" } else { "player" };
                println!(
                    "  {:>6} {kind:<6}  ({:>6.1}, {:>6.1}) px  {}",
                    marker.custom_id,
                    marker.pixel.left,
                    marker.pixel.top,
                    regions(&marker.regions),
                );
            }
        }
    }
    println!();
    println!("Bosses:");
    for boss in &report.bosses {
        println!(
            "  {:<40} ({:>6.1}, {:>6.1}) px",
            boss.name, boss.pixel.left, boss.pixel.top
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use replaylens_model::{MatchPaths, PlayerPath};

    use super::*;

    fn analysis_with_path() -> MatchAnalysis {
        let mut analysis = MatchAnalysis::default();
        analysis.match_metadata.match_info.match_paths = Some(MatchPaths {
            x_resolution: 100.0,
            y_resolution: 100.0,
            paths: vec![PlayerPath {
                player_slot: 3,
                x_min: 0.0,
                x_max: 100.0,
                y_min: 0.0,
                y_max: 100.0,
                x_pos: vec![Some(50.0), None],
                y_pos: vec![Some(50.0), None],
                health: vec![Some(100.0), None],
                ..PlayerPath::default()
            }],
        });
        analysis
    }

    #[test]
    fn test_path_markers_by_default() {
        let report = build_report(&analysis_with_path(), 0, false);
        let PlayerMarkers::Paths { max_tick, markers } = report.players else {
            panic!("expected path markers");
        };
        assert_eq!(max_tick, 1);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].player_slot, 3);
    }

    #[test]
    fn test_gap_in_path_yields_no_marker() {
        let report = build_report(&analysis_with_path(), 1, false);
        let PlayerMarkers::Paths { markers, .. } = report.players else {
            panic!("expected path markers");
        };
        assert!(markers.is_empty());
    }

    #[test]
    fn test_world_markers_without_positions() {
        let report = build_report(&analysis_with_path(), 0, true);
        let PlayerMarkers::World { markers } = report.players else {
            panic!("expected world markers");
        };
        assert!(markers.is_empty());
        assert!(report.bosses.is_empty());
    }
}
