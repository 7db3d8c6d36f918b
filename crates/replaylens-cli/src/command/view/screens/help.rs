use crossterm::event::{Event, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment},
    style::Color,
    text::Line,
    widgets::{Block, Padding, Paragraph},
};
use replaylens_tui::{Runtime, Screen, ScreenTransition};

const KEYS: &[(&str, &str)] = &[
    ("h / ←", "previous second"),
    ("l / →", "next second"),
    ("H / L", "10 seconds back / forward"),
    ("g / Home", "match start"),
    ("G / End", "match end"),
    ("[ / ]", "scrub back / forward while held"),
    ("space", "stop scrubbing"),
    ("Tab / Shift+Tab", "focus next / previous pane"),
    ("j / k", "select in focused pane"),
    ("t", "toggle team"),
    ("p", "cycle match phase"),
    ("?", "this help"),
    ("q / Esc", "quit"),
];

/// Key reference shown over the viewer; any key closes it.
#[derive(Debug, Default)]
pub struct HelpScreen;

impl Screen for HelpScreen {
    fn on_active(&mut self, _runtime: &mut Runtime) {}

    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        match event.as_key_event() {
            Some(key) if key.kind == KeyEventKind::Press => ScreenTransition::Pop,
            _ => ScreenTransition::Stay,
        }
    }

    fn update(&mut self, _runtime: &mut Runtime) {}

    fn draw(&self, frame: &mut Frame) {
        let footer = Line::from("press any key")
            .style(Color::DarkGray)
            .centered();
        let lines: Vec<Line> = KEYS
            .iter()
            .map(|(key, action)| Line::from(format!("{key:>16}  {action}")))
            .chain([Line::from(""), footer])
            .collect();

        let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
        let area = frame
            .area()
            .centered(Constraint::Max(56), Constraint::Length(height));
        let help = Paragraph::new(lines).block(
            Block::bordered()
                .title("Keys")
                .title_alignment(HorizontalAlignment::Center)
                .padding(Padding::symmetric(1, 0)),
        );
        frame.render_widget(ratatui::widgets::Clear, area);
        frame.render_widget(help, area);
    }
}
