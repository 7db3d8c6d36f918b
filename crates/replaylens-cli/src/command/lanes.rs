use std::borrow::Cow;

use replaylens_analysis::{
    lane::{ActivePressure, PlayerNames, active_pressures, active_waves, derive_lane_pressure},
    timeline::format_mmss,
};
use replaylens_model::{LanePressureData, ParsedMatchData, Team, Tick};
use serde::Serialize;

use crate::{
    args::{ClientArg, MatchSourceArg, SourceOptionArg},
    source,
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub struct LanesArg {
    #[command(flatten)]
    source: MatchSourceArg,

    #[command(flatten)]
    options: SourceOptionArg,

    /// Cursor position in seconds
    #[arg(long, default_value_t = 0)]
    tick: Tick,

    /// Derive pressure from creep waves and player positions
    #[arg(long)]
    derive: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct WaveRow {
    lane: u32,
    team: u32,
    count: u32,
    x: f64,
    y: f64,
    pressure: Option<f64>,
}

#[derive(Debug, Serialize)]
struct LanesReport {
    tick: Tick,
    derived: bool,
    pressures: Vec<ActivePressure>,
    waves: Vec<WaveRow>,
}

/// Pressure series to read from: the payload's, or one derived from its waves.
fn pressure_data(data: &ParsedMatchData, derive: bool) -> Cow<'_, LanePressureData> {
    if derive {
        Cow::Owned(derive_lane_pressure(&data.creep_waves, &data.per_player_data))
    } else {
        Cow::Borrowed(&data.lane_pressure)
    }
}

fn build_report(data: &ParsedMatchData, tick: Tick, derive: bool) -> LanesReport {
    let pressure = pressure_data(data, derive);
    let names = PlayerNames::new(&data.players_data);
    let waves = active_waves(&data.creep_waves, &pressure, tick)
        .into_iter()
        .map(|active| WaveRow {
            lane: active.lane,
            team: active.team,
            count: active.wave.count,
            x: active.wave.x,
            y: active.wave.y,
            pressure: active.pressure.map(|snapshot| snapshot.pressure),
        })
        .collect();
    LanesReport {
        tick,
        derived: derive,
        pressures: active_pressures(&pressure, tick, &names),
        waves,
    }
}

pub fn run(client: &ClientArg, arg: &LanesArg) -> anyhow::Result<()> {
    let loaded = source::load(client, &arg.source, &arg.options)?;
    let data = &loaded.analysis.parsed_match_data;
    if !arg.derive && data.lane_pressure.pressure.is_empty() && !data.creep_waves.waves.is_empty() {
        log::warn!("payload has no lane pressure; pass --derive to compute it from creep waves");
    }

    let report = build_report(data, arg.tick, arg.derive);
    if arg.json {
        return Output::stdout().write_json(&report);
    }

    let source = if report.derived {
        "derived"
    } else {
        "recorded"
    };

    println!("Lane pressure at {} ({source})", format_mmss(report.tick));
    if report.pressures.is_empty() {
        println!("  No active lane pressure");
    }
    for pressure in &report.pressures {
        let players = if pressure.player_names.is_empty() {
            "-".to_owned()
        } else {
            pressure.player_names.join(", ")
        };
        println!(
            "  Lane {} {:<9} {:>5.1}%  {players}",
            pressure.lane,
            pressure.team_name,
            pressure.pressure * 100.0,
        );
    }
    println!();
    println!("Creep waves ({}):", report.waves.len());
    for wave in &report.waves {
        println!(
            "  Lane {} {:<9} {:>3} creeps at ({:.0}, {:.0})",
            wave.lane,
            Team::name_of(wave.team),
            wave.count,
            wave.x,
            wave.y,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use replaylens_model::{CreepWaveSnapshot, PlayerData};

    use super::*;

    fn data() -> ParsedMatchData {
        let mut data = ParsedMatchData {
            players_data: vec![PlayerData {
                custom_id: "4".to_owned(),
                name: "bob".to_owned(),
                team: 3,
                ..PlayerData::default()
            }],
            ..ParsedMatchData::default()
        };
        data.creep_waves.waves.insert(
            "1_3".to_owned(),
            vec![
                None,
                Some(CreepWaveSnapshot {
                    x: 0.0,
                    y: 0.0,
                    count: 4,
                    team: 3,
                }),
            ],
        );
        data
    }

    #[test]
    fn test_recorded_pressure_is_empty_without_series() {
        let report = build_report(&data(), 1, false);
        assert!(report.pressures.is_empty());
        assert_eq!(report.waves.len(), 1);
        assert_eq!(report.waves[0].pressure, None);
    }

    #[test]
    fn test_derived_pressure_fills_in() {
        let report = build_report(&data(), 1, true);
        assert_eq!(report.pressures.len(), 1);
        let pressure = &report.pressures[0];
        assert_eq!((pressure.lane, pressure.team), (1, 3));
        assert!((pressure.pressure - 0.5).abs() < 1e-12);
        assert_eq!(report.waves[0].pressure, Some(pressure.pressure));
    }

    #[test]
    fn test_nothing_active_before_first_wave() {
        let report = build_report(&data(), 0, true);
        assert!(report.pressures.is_empty());
        assert!(report.waves.is_empty());
    }
}
