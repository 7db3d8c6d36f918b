use crossterm::event::Event;
use ratatui::Frame;

use crate::{Runtime, ScrubDirection};

/// Application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event; configure tick and render rates here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Terminal input (keys, focus changes, resize).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// One firing of the runtime's repeat timer.
    fn on_repeat(&mut self, runtime: &mut Runtime, direction: ScrubDirection);

    fn draw(&self, frame: &mut Frame);

    /// Periodic update, on each tick.
    fn update(&mut self, runtime: &mut Runtime);
}
