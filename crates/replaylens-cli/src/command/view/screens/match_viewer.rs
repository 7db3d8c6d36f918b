use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout, Spacing},
    style::Color,
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Block, Padding, Paragraph},
};
use replaylens_analysis::{
    damage::{DamageContext, DamageDistribution, aggregate_team},
    lane::{ActivePressure, PlayerNames, active_pressures, derive_lane_pressure},
    positions::{path_markers, world_markers},
    timeline::{ObjectiveTimeline, TimePhase, format_mmss},
};
use replaylens_minimap::{MID_BOSS_MARKER, MinimapProjection, OBJECTIVE_MARKERS, ObjectiveMarker};
use replaylens_model::{LanePressureData, Roster, Team, Tick};
use replaylens_tui::{RepeatHandle, Runtime, Screen, ScreenTransition, ScrubDirection};


use crate::{
    command::view::{
        screens::HelpScreen,
        widgets::{DamagePanel, LanePanel, MinimapView, ObjectiveDot, PlayerDot},
    },
    source::LoadedMatch,
};

const STEP: usize = 1;
const JUMP: usize = 10;
const HELP_LINE: &str = concat!(
    "h/l ←/→ (1s) | H/L (10s) | [ ] (scrub) | space (stop) | ",
    "Tab (pane) | t (team) | p (phase) | ? (help) | q (quit)"
);


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Map,
    Damage,
    Lanes,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Self::Map => Self::Damage,
            Self::Damage => Self::Lanes,
            Self::Lanes => Self::Map,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Map => Self::Lanes,
            Self::Damage => Self::Map,
            Self::Lanes => Self::Damage,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Map => 0,
            Self::Damage => 1,
            Self::Lanes => 2,
        }
    }
}

fn scrub_direction(code: KeyCode) -> Option<ScrubDirection> {
    match code {
        KeyCode::Char('[') => Some(ScrubDirection::Backward),
        KeyCode::Char(']') => Some(ScrubDirection::Forward),
        _ => None,
    }
}

/// Replay viewer: minimap, team damage allocation and lane pressure around one cursor.
#[derive(Debug)]
pub struct MatchViewerScreen {
    loaded: LoadedMatch,
    roster: Roster,
    names: PlayerNames,
    objectives: ObjectiveTimeline,
    /// Pressure rebuilt from creep waves when the payload has none.
    derived_pressure: Option<LanePressureData>,
    max_tick: Tick,
    total_ticks: Tick,
    cursor: Tick,
    pane: Pane,
    selection: [usize; 3],
    team: Team,
    phase: TimePhase,
    damage: DamageDistribution,
    scrub: Option<RepeatHandle>,
}

impl MatchViewerScreen {
    pub fn new(loaded: LoadedMatch) -> Self {
        let roster = loaded.roster();
        let data = &loaded.analysis.parsed_match_data;
        let names = PlayerNames::new(&data.players_data);
        let objectives = ObjectiveTimeline::new(&loaded.analysis.match_info().objectives);
        let derived_pressure = (data.lane_pressure.pressure.is_empty()
            && !data.creep_waves.waves.is_empty())
        .then(|| {
            log::info!("deriving lane pressure from creep waves");
            derive_lane_pressure(&data.creep_waves, &data.per_player_data)
        });
        let max_tick = loaded.analysis.max_tick();
        let total_ticks = loaded.analysis.total_ticks();

        let mut screen = Self {
            loaded,
            roster,
            names,
            objectives,
            derived_pressure,
            max_tick,
            total_ticks,
            cursor: 0,
            pane: Pane::Map,
            selection: [0; 3],
            team: Team::Amber,
            phase: TimePhase::Full,
            damage: DamageDistribution::default(),
            scrub: None,
        };
        screen.refresh_damage();
        screen
    }

    fn refresh_damage(&mut self) {
        let ctx = DamageContext::new(&self.roster, &self.loaded.analysis.parsed_match_data);
        self.damage = aggregate_team(&ctx, self.team, self.phase.range(self.total_ticks));
    }

    /// Moves the cursor and reports whether it moved.
    fn step(&mut self, direction: ScrubDirection, amount: usize) -> bool {
        let next = direction.step(self.cursor, amount, self.max_tick);
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }

    fn at_bound(&self, direction: ScrubDirection) -> bool {
        match direction {
            ScrubDirection::Backward => self.cursor == 0,
            ScrubDirection::Forward => self.cursor >= self.max_tick,
        }
    }

    fn start_scrub(&mut self, runtime: &mut Runtime, direction: ScrubDirection) {
        if let Some(handle) = self.scrub
            && handle.direction() == direction
            && runtime.is_current_repeat(handle)
        {
            return;
        }
        self.stop_scrub(runtime);
        if self.step(direction, STEP) && !self.at_bound(direction) {
            self.scrub = Some(runtime.start_repeat(direction));
        }
    }

    /// Stops the run this screen started; a run owned by another screen is left alone.
    fn stop_scrub(&mut self, runtime: &mut Runtime) {
        if let Some(handle) = self.scrub.take() {
            runtime.stop_repeat_run(handle);
        }
    }

    fn scrubbing(&self) -> Option<ScrubDirection> {
        self.scrub.map(|handle| handle.direction())
    }

    fn pressure_data(&self) -> &LanePressureData {
        self.derived_pressure
            .as_ref()
            .unwrap_or(&self.loaded.analysis.parsed_match_data.lane_pressure)
    }

    fn pressures(&self) -> Vec<ActivePressure> {
        active_pressures(self.pressure_data(), self.cursor, &self.names)
    }

    fn player_dots(&self) -> Vec<PlayerDot> {
        let analysis = &self.loaded.analysis;
        if let Some(paths) = &analysis.match_info().match_paths
            && !paths.paths.is_empty()
        {
            return path_markers(paths, self.cursor, MinimapProjection::PATHS)
                .into_iter()
                .map(|marker| {
                    let entry = self
                        .roster
                        .iter()
                        .find(|entry| entry.player.lobby_player_slot == marker.player_slot);
                    PlayerDot {
                        label: entry.map_or_else(
                            || format!("slot {}", marker.player_slot),
                            |entry| entry.display_name(),
                        ),
                        pixel: marker.pixel,
                        team: entry.and_then(|entry| entry.team()),
                        regions: marker.regions,
                    }
                })
                .collect();
        }
        world_markers(
            &analysis.parsed_match_data.per_player_data,
            self.cursor,
            MinimapProjection::WORLD,
        )
        .into_iter()
        .filter(|marker| !marker.is_npc)
        .map(|marker| {
            let entry = self.roster.get(&marker.custom_id);
            PlayerDot {
                label: entry.map_or_else(
                    || format!("Player {}", marker.custom_id),
                    |entry| entry.display_name(),
                ),
                pixel: marker.pixel,
                team: entry.and_then(|entry| entry.team()),
                regions: marker.regions,
            }
        })
        .collect()
    }

    fn objective_dots(&self) -> Vec<ObjectiveDot> {
        let active_key = self.objectives.cursor(self.cursor).active_key;
        OBJECTIVE_MARKERS
            .iter()
            .chain([&MID_BOSS_MARKER])
            .map(|marker: &ObjectiveMarker| {
                let (destroyed, active) = match (marker.team, marker.team_objective_id) {
                    (Some(team), Some(id)) => (
                        self.objectives.is_destroyed(team, id, self.cursor),
                        active_key.as_deref() == Some(format!("{team}_{id}").as_str()),
                    ),
                    _ => (false, false),
                };
                ObjectiveDot {
                    position: marker.position,
                    team: marker.team.and_then(Team::from_objective_team),
                    destroyed,
                    active,
                }
            })
            .collect()
    }

    fn pane_len(&self) -> usize {
        match self.pane {
            Pane::Map => self.player_dots().len(),
            Pane::Damage => self.damage.targets.len(),
            Pane::Lanes => self.pressures().len(),
        }
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.pane_len();
        let selected = &mut self.selection[self.pane.index()];
        *selected = if down {
            (*selected + 1).min(len.saturating_sub(1))
        } else {
            selected.saturating_sub(1)
        };
    }

    fn header(&self) -> Paragraph<'static> {
        let info = self.loaded.analysis.match_info();
        let scrub = match self.scrubbing() {
            Some(ScrubDirection::Backward) => "  ◀◀",
            Some(ScrubDirection::Forward) => "  ▶▶",
            None => "",
        };
        Paragraph::new(vec![
            Line::from(format!(
                "Time: {:>6} / {:<6} (tick {}/{}){scrub}",
                format_mmss(self.cursor),
                format_mmss(self.max_tick),
                self.cursor,
                self.max_tick,
            )),
            Line::from(format!(
                "Phase: {} ({}) | Team: {}",
                self.phase,
                self.phase.label(self.total_ticks),
                self.team,
            )),
        ])
        .block(
            Block::bordered()
                .title(format!("Match {}", info.match_id))
                .title_alignment(HorizontalAlignment::Center)
                .padding(Padding::symmetric(1, 0))
                .merge_borders(MergeStrategy::Exact),
        )
    }
}

impl Screen for MatchViewerScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(None);
    }

    fn on_inactive(&mut self, _runtime: &mut Runtime) {
        self.scrub = None;
    }

    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        if matches!(event, Event::FocusLost) {
            self.stop_scrub(runtime);
            return ScreenTransition::Stay;
        }
        let Some(key) = event.as_key_event() else {
            return ScreenTransition::Stay;
        };
        match key.kind {
            KeyEventKind::Release => {
                if scrub_direction(key.code).is_some() {
                    self.stop_scrub(runtime);
                }
                return ScreenTransition::Stay;
            }
            KeyEventKind::Repeat if scrub_direction(key.code).is_some() => {
                return ScreenTransition::Stay;
            }
            _ => {}
        }

        if let Some(direction) = scrub_direction(key.code) {
            self.start_scrub(runtime, direction);
            return ScreenTransition::Stay;
        }
        self.stop_scrub(runtime);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return ScreenTransition::Exit,
            KeyCode::Char('?') => return ScreenTransition::Push(Box::new(HelpScreen)),
            KeyCode::Char('h') | KeyCode::Left => {
                self.step(ScrubDirection::Backward, STEP);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.step(ScrubDirection::Forward, STEP);
            }
            KeyCode::Char('H') => {
                self.step(ScrubDirection::Backward, JUMP);
            }
            KeyCode::Char('L') => {
                self.step(ScrubDirection::Forward, JUMP);
            }
            KeyCode::Char('g') | KeyCode::Home => self.cursor = 0,
            KeyCode::Char('G') | KeyCode::End => self.cursor = self.max_tick,
            KeyCode::Tab => self.pane = self.pane.next(),
            KeyCode::BackTab => self.pane = self.pane.prev(),
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(true),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(false),
            KeyCode::Char('t') => {
                self.team = self.team.enemy();
                self.refresh_damage();
            }
            KeyCode::Char('p') => {
                self.phase = self.phase.next();
                self.refresh_damage();
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn on_repeat(&mut self, runtime: &mut Runtime, direction: ScrubDirection) -> ScreenTransition {
        if !self.step(direction, STEP) || self.at_bound(direction) {
            self.stop_scrub(runtime);
        }
        ScreenTransition::Stay
    }

    fn update(&mut self, _runtime: &mut Runtime) {}

    fn draw(&self, frame: &mut Frame) {
        let [top_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .spacing(Spacing::Overlap(1))
        .areas(frame.area());

        let [map_area, side_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1))
                .areas(body_area);

        let [damage_area, lanes_area] =
            Layout::vertical([Constraint::Fill(3), Constraint::Fill(2)])
                .spacing(Spacing::Overlap(1))
                .areas(side_area);

        let players = self.player_dots();
        let objectives = self.objective_dots();
        let selected = (!players.is_empty())
            .then(|| self.selection[Pane::Map.index()].min(players.len() - 1));
        let map_title = match selected.map(|i| &players[i]) {
            Some(player) if !player.regions.is_empty() => {
                format!("Map | {}: {}", player.label, player.regions.join(", "))
            }
            Some(player) => format!("Map | {}", player.label),
            None => "Map".to_owned(),
        };
        let minimap = MinimapView {
            title: map_title,
            players: &players,
            objectives: &objectives,
            selected,
            focused: self.pane == Pane::Map,
        };

        let damage = DamagePanel {
            title: format!("{} Damage", self.team),
            dist: &self.damage,
            focused: self.pane == Pane::Damage,
            selected: self.selection[Pane::Damage.index()],
        };

        let pressures = self.pressures();
        let lanes = LanePanel {
            pressures: &pressures,
            derived: self.derived_pressure.is_some(),
            focused: self.pane == Pane::Lanes,
            selected: self.selection[Pane::Lanes.index()],
        };

        let help = Paragraph::new(vec![Line::from(HELP_LINE).centered()])
            .style(Color::DarkGray)
        .block(Block::bordered().merge_borders(MergeStrategy::Exact));

        frame.render_widget(self.header(), top_area);
        frame.render_widget(minimap, map_area);
        frame.render_widget(damage, damage_area);
        frame.render_widget(lanes, lanes_area);
        frame.render_widget(help, help_area);
    }
}
