use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};
use ratatui::DefaultTerminal;

use crate::{
    App, RepeatHandle, ScrubDirection,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Terminal runtime.
///
/// Besides the event loop this enables focus-change reporting, and key release
/// reporting where the terminal supports it, so that held keys can be tracked.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
    key_releases: bool,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick rate in Hz; `None` disables ticks.
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        self.set_tick_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Starts auto-repeat in `direction`, unless a repeat is already running.
    ///
    /// The returned handle identifies the run for [`Self::stop_repeat_run`].
    #[must_use]
    pub fn start_repeat(&mut self, direction: ScrubDirection) -> RepeatHandle {
        self.events.repeat.start(direction, Instant::now())
    }

    /// Stops auto-repeat. Does nothing when no repeat is running.
    pub fn stop_repeat(&mut self) {
        self.events.repeat.stop();
    }

    /// Stops the run started with `handle`; a newer run keeps going.
    pub fn stop_repeat_run(&mut self, handle: RepeatHandle) {
        self.events.repeat.stop_run(handle);
    }

    #[must_use]
    pub fn is_repeating(&self) -> bool {
        self.events.repeat.is_running()
    }

    /// Whether `handle` identifies the run that is currently active.
    #[must_use]
    pub fn is_current_repeat(&self, handle: RepeatHandle) -> bool {
        self.events.repeat.is_current(handle)
    }


    /// Whether the terminal reports key releases.
    #[must_use]
    pub fn reports_key_releases(&self) -> bool {
        self.key_releases
    }

    fn enable_reporting(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, EnableFocusChange)?;
        self.key_releases = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.key_releases {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        Ok(())
    }

    fn disable_reporting(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        if self.key_releases {
            execute!(stdout, PopKeyboardEnhancementFlags)?;
        }
        execute!(stdout, DisableFocusChange)
    }

    /// Runs `app` until it asks to exit.
    ///
    /// Ticks go to [`App::update`], repeats to [`App::on_repeat`], renders to
    /// [`App::draw`] and terminal input to [`App::handle_event`].
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            self.enable_reporting()?;
            let result = self.run_loop(app, terminal);
            self.stop_repeat();
            let restored = self.disable_reporting();
            result.and(restored)
        })
    }

    fn run_loop<A>(&mut self, app: &mut A, terminal: &mut DefaultTerminal) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick => app.update(self),
                TuiEvent::Repeat(direction) => app.on_repeat(self, direction),
                TuiEvent::Render => {
                    terminal.draw(|f| app.draw(f))?;
                }
                TuiEvent::Crossterm(event) => app.handle_event(self, event),
            }
        }
        Ok(())
    }
}
