use std::sync::mpsc::{self, Receiver};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tracing::debug;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum PacerEvent {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait PacerEventSource: Send + 'static {
    /// Block until the next event. `None` means the source is closed.
    fn recv(&self) -> Option<PacerEvent>;
}

/// Production event source using crossterm.
///
/// Spawns one reader thread for the lifetime of the source; it exits once
/// the source is dropped and the next event fails to send.
pub struct CrosstermEventSource {
    rx: Receiver<PacerEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let sent = match event::read() {
                Ok(CtEvent::Key(key)) => tx.send(PacerEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => tx.send(PacerEvent::Resize),
                Ok(_) => continue,
                Err(err) => {
                    debug!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if sent.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PacerEventSource for CrosstermEventSource {
    fn recv(&self) -> Option<PacerEvent> {
        self.rx.recv().ok()
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<PacerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<PacerEvent>) -> Self {
        Self { rx }
    }
}

impl PacerEventSource for TestEventSource {
    fn recv(&self) -> Option<PacerEvent> {
        self.rx.recv().ok()
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: PacerEventSource> {
    event_source: E,
}

impl<E: PacerEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Blocks for the next event; `None` once the source has closed.
    pub fn step(&self) -> Option<PacerEvent> {
        self.event_source.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn step_returns_none_when_source_closes() {
        let (tx, rx) = mpsc::channel::<PacerEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx));

        assert!(runner.step().is_none());
    }

    #[test]
    fn step_passes_through_events_in_order() {
        let (tx, rx) = mpsc::channel();
        tx.send(PacerEvent::Resize).unwrap();
        tx.send(PacerEvent::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        let runner = Runner::new(TestEventSource::new(rx));

        match runner.step() {
            Some(PacerEvent::Resize) => {}
            other => panic!("expected Resize event, got {other:?}"),
        }
        match runner.step() {
            Some(PacerEvent::Key(key)) => assert_eq!(key.code, KeyCode::Char('a')),
            other => panic!("expected Key event, got {other:?}"),
        }
    }
}
