use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use crate::{App, Runtime, ScrubDirection};

/// One view of the application, managed by a [`ScreenStack`].
///
/// A screen is activated when it reaches the top of the stack and
/// deactivated when it leaves it. Screens that leave the stack for good
/// (pop, replace, exit) are also closed; a screen covered by a push is only
/// deactivated and is activated again when the cover is popped:
///
/// ```text
/// new ─▶ on_active ─▶ (foreground) ─▶ on_inactive ─┬─▶ (covered) ─▶ on_active ...
///                                                   └─▶ on_close ─▶ drop
/// ```
///
/// Runtime settings belong in [`on_active`](Self::on_active), since a covering
/// screen may have changed them. Any running repeat is stopped before the
/// foreground changes.
pub trait Screen: fmt::Debug {
    fn on_active(&mut self, runtime: &mut Runtime);

    fn on_inactive(&mut self, runtime: &mut Runtime);

    /// The screen is leaving the stack; called right after `on_inactive`.
    fn on_close(&mut self, runtime: &mut Runtime);

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition;

    /// One firing of the repeat timer started by this screen.
    fn on_repeat(
        &mut self,
        _runtime: &mut Runtime,
        _direction: ScrubDirection,
    ) -> ScreenTransition {
        ScreenTransition::Stay
    }

    fn update(&mut self, runtime: &mut Runtime);

    fn draw(&self, frame: &mut Frame);
}

/// What the stack should do after a screen handled an event.
#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    /// Cover the current screen with a new one.
    Push(Box<dyn Screen>),
    /// Close the current screen and reactivate the one below.
    Pop,
    /// Close the current screen and activate a new one in its place.
    Replace(Box<dyn Screen>),
    /// Close every screen and leave the run loop.
    Exit,
}

/// Stack of screens; only the top one receives events.
#[derive(Debug)]
pub struct ScreenStack<'a> {
    screens: Vec<Box<dyn Screen + 'a>>,
    should_exit: bool,
}

impl<'a> ScreenStack<'a> {
    #[must_use]
    pub fn new(initial: Box<dyn Screen + 'a>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    fn close_top(&mut self, runtime: &mut Runtime) {
        if let Some(mut screen) = self.screens.pop() {
            screen.on_inactive(runtime);
            screen.on_close(runtime);
        }
    }

    fn apply_transition(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        if !matches!(transition, ScreenTransition::Stay) {
            runtime.stop_repeat();
        }
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                if let Some(top) = self.screens.last_mut() {
                    top.on_inactive(runtime);
                }
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                self.close_top(runtime);
                if let Some(top) = self.screens.last_mut() {
                    top.on_active(runtime);
                }
            }
            ScreenTransition::Replace(mut screen) => {
                self.close_top(runtime);
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Exit => {
                while !self.screens.is_empty() {
                    self.close_top(runtime);
                }
                self.should_exit = true;
            }
        }
    }
}

impl App for ScreenStack<'_> {
    fn init(&mut self, runtime: &mut Runtime) {
        if let Some(top) = self.screens.last_mut() {
            top.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(top) = self.screens.last_mut() {
            let transition = top.handle_event(runtime, &event);
            self.apply_transition(runtime, transition);
        }
    }

    fn on_repeat(&mut self, runtime: &mut Runtime, direction: ScrubDirection) {
        if let Some(top) = self.screens.last_mut() {
            let transition = top.on_repeat(runtime, direction);
            self.apply_transition(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(top) = self.screens.last() {
            top.draw(frame);
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        if let Some(top) = self.screens.last_mut() {
            top.update(runtime);
        }
    }
}
