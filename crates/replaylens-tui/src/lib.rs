//! Event-loop runtime for terminal viewers.
//!
//! A [`Runtime`] drives an [`App`] with three kinds of events: periodic ticks,
//! renders, and terminal input. On top of that it owns one [`RepeatTimer`]
//! that applications start while a scrub key is held; each firing reaches the
//! app as [`App::on_repeat`].
//!
//! [`ScreenStack`] implements [`App`] over a stack of [`Screen`]s and stops
//! any running repeat whenever the foreground screen changes.

pub use self::{
    app::App,
    event_loop::RenderMode,
    repeat::{REPEAT_INTERVAL, RepeatHandle, RepeatTimer, ScrubDirection},
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod event;
mod event_loop;
mod repeat;
mod runtime;
mod screen;
