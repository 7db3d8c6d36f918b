//! Creep wave and lane pressure lookups.
//!
//! Both series are keyed by `"{lane}_{team}"` and hold one optional snapshot
//! per tick. A tick past the end of a series, or a `null` slot, means there is
//! no wave on that lane at that moment.
//!
//! Payloads produced without lane pressure can have it rebuilt from the creep
//! waves and player positions with [`derive_lane_pressure`].

use std::collections::{BTreeMap, HashMap};

use replaylens_minimap::WORLD_BOUNDS;
use replaylens_model::{
    CreepWaveData, CreepWaveSnapshot, LanePressureData, LanePressureSnapshot, LaneTeamKey,
    PlayerData, PlayerMatchData, PlayerPosition, Team, Tick,
};
use serde::Serialize;

/// Players within this many world units of a wave centroid are credited with its pressure.
pub const ATTRIBUTION_RADIUS: f64 = 1500.0;

/// Snapshot at `tick`, or `None` past the end or on an empty slot.
#[must_use]
pub fn snapshot_at<T>(series: &[Option<T>], tick: Tick) -> Option<&T> {
    series.get(tick)?.as_ref()
}

fn parse_key(key: &str) -> Option<LaneTeamKey> {
    match key.parse() {
        Ok(key) => Some(key),
        Err(err) => {
            log::debug!("skipping lane series: {err}");
            None
        }
    }
}

/// Player names by numeric `custom_id`.
#[derive(Debug, Clone, Default)]
pub struct PlayerNames {
    by_id: HashMap<u32, String>,
}

impl PlayerNames {
    #[must_use]
    pub fn new(players: &[PlayerData]) -> Self {
        let by_id = players
            .iter()
            .filter_map(|player| Some((player.custom_id.parse().ok()?, player.name.clone())))
            .collect();
        Self { by_id }
    }

    /// Name of `custom_id`, or `"Player {id}"` when unknown.
    #[must_use]
    pub fn name(&self, custom_id: u32) -> String {
        self.by_id
            .get(&custom_id)
            .cloned()
            .unwrap_or_else(|| format!("Player {custom_id}"))
    }
}

/// A lane pressure entry visible at one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivePressure {
    pub lane: u32,
    pub team: u32,
    pub team_name: &'static str,
    pub pressure: f64,
    /// Attributed player names, sorted.
    pub player_names: Vec<String>,
}

/// Pressure entries with a snapshot at `tick`, sorted by lane and then team.
#[must_use]
pub fn active_pressures(
    data: &LanePressureData,
    tick: Tick,
    names: &PlayerNames,
) -> Vec<ActivePressure> {
    let mut active: Vec<ActivePressure> = data
        .pressure
        .iter()
        .filter_map(|(key, series)| {
            let snapshot = snapshot_at(series, tick)?;
            let key = parse_key(key)?;
            let mut player_names: Vec<String> = snapshot
                .attributed_players
                .iter()
                .map(|&id| names.name(id))
                .collect();
            player_names.sort();
            Some(ActivePressure {
                lane: key.lane,
                team: key.team,
                team_name: Team::name_of(key.team),
                pressure: snapshot.pressure,
                player_names,
            })
        })
        .collect();
    active.sort_by_key(|p| (p.lane, p.team));
    active
}

/// A creep wave visible at one tick, with its pressure snapshot when there is one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveWave<'a> {
    pub lane: u32,
    pub team: u32,
    pub wave: &'a CreepWaveSnapshot,
    pub pressure: Option<&'a LanePressureSnapshot>,
}

#[must_use]
pub fn active_waves<'a>(
    waves: &'a CreepWaveData,
    pressure: &'a LanePressureData,
    tick: Tick,
) -> Vec<ActiveWave<'a>> {
    waves
        .waves
        .iter()
        .filter_map(|(raw_key, series)| {
            let wave = snapshot_at(series, tick)?;
            let key = parse_key(raw_key)?;
            let pressure = pressure
                .pressure
                .get(raw_key)
                .and_then(|series| snapshot_at(series, tick));
            Some(ActiveWave {
                lane: key.lane,
                team: key.team,
                wave,
                pressure,
            })
        })
        .collect()
}

/// How far `wave` has pushed toward the enemy base, in `[0, 1]`.
///
/// Amber pushes toward low world Y, Sapphire toward high world Y.
#[must_use]
pub fn pressure_for_wave(wave: &CreepWaveSnapshot) -> Option<f64> {
    let normalized_y = WORLD_BOUNDS.normalized_y(wave.y)?;
    Some(match Team::from_id(wave.team) {
        Some(Team::Amber) => 1.0 - normalized_y,
        _ => normalized_y,
    })
}

/// Numeric ids of the players within `radius` of the wave centroid.
pub fn attribute_players<'a, I>(wave: &CreepWaveSnapshot, positions: I, radius: f64) -> Vec<u32>
where
    I: IntoIterator<Item = &'a PlayerPosition>,
{
    positions
        .into_iter()
        .filter(|pos| (pos.x - wave.x).hypot(pos.y - wave.y) <= radius)
        .filter_map(|pos| match pos.custom_id.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                log::debug!("skipping position with non-numeric id '{}'", pos.custom_id);
                None
            }
        })
        .collect()
}

/// Rebuilds lane pressure from creep waves and per-player positions.
#[must_use]
pub fn derive_lane_pressure(
    waves: &CreepWaveData,
    per_player: &BTreeMap<String, PlayerMatchData>,
) -> LanePressureData {
    let pressure = waves
        .waves
        .iter()
        .map(|(key, series)| {
            let snapshots: Vec<Option<LanePressureSnapshot>> = series
                .iter()
                .enumerate()
                .map(|(tick, wave)| {
                    let wave = wave.as_ref()?;
                    let pressure = pressure_for_wave(wave)?;
                    let positions = per_player
                        .values()
                        .filter_map(|data| data.position_at(tick));

                    Some(LanePressureSnapshot {
                        pressure,
                        team: wave.team,
                        attributed_players: attribute_players(wave, positions, ATTRIBUTION_RADIUS),
                        wave_x: wave.x,
                        wave_y: wave.y,
                        wave_count: wave.count,
                    })
                })
                .collect();
            (key.clone(), snapshots)
        })
        .collect();
    LanePressureData { pressure }
}
