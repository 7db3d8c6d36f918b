use crossterm::event::Event as CrosstermEvent;

use crate::ScrubDirection;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Periodic update, every `tick_interval`.
    Tick,
    /// Time to draw, according to the render mode.
    Render,
    /// The repeat timer fired.
    Repeat(ScrubDirection),
    /// Terminal input: keys, focus, resize.
    Crossterm(CrosstermEvent),
}
