use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::{CaretStyle, Config};
use crate::input::{map_key_event, InputAction, Key};
use crate::metrics::SessionResults;
use crate::passage::Passage;
use crate::runtime::PacerEvent;
use crate::session::SessionState;

/// Display settings resolved from the config file and the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub caret_style: CaretStyle,
    pub mark_incorrect_spaces: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for Settings {
    fn from(cfg: &Config) -> Self {
        Self {
            caret_style: cfg.caret_style,
            mark_incorrect_spaces: cfg.mark_incorrect_spaces,
        }
    }
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Quit,
}

/// One mounted typing test: a session plus the clock that times it.
#[derive(Debug)]
pub struct App<C: Clock = SystemClock> {
    session: SessionState,
    clock: C,
    pub settings: Settings,
    last_results: Option<SessionResults>,
}

impl App<SystemClock> {
    pub fn with_system_clock(passage: Passage, settings: Settings) -> Self {
        Self::new(passage, settings, SystemClock)
    }
}

impl<C: Clock> App<C> {
    /// Mounts the test: the session starts immediately.
    pub fn new(passage: Passage, settings: Settings, clock: C) -> Self {
        let session = SessionState::new(passage).start(clock.now());
        Self {
            session,
            clock,
            settings,
            last_results: None,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Results of the most recently finished session, kept across restarts.
    pub fn last_results(&self) -> Option<SessionResults> {
        self.last_results
    }

    pub fn on_key(&mut self, key: &Key) {
        let now = self.clock.now();
        let was_finished = self.session.is_finished();
        self.session.apply_key(key, now);

        if !was_finished {
            if let Some(results) = self.session.results() {
                self.last_results = Some(results);
            }
        }
    }

    pub fn on_event(&mut self, event: &PacerEvent) -> Flow {
        match event {
            PacerEvent::Resize => Flow::Redraw,
            PacerEvent::Key(key_event) => match map_key_event(key_event) {
                Some(InputAction::Quit) => {
                    debug!("quit requested");
                    Flow::Quit
                }
                Some(InputAction::Key(key)) => {
                    self.on_key(&key);
                    Flow::Redraw
                }
                None => Flow::Redraw,
            },
        }
    }
}
