use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pacer::app::{App, Flow, Settings};
use pacer::clock::ManualClock;
use pacer::metrics::SessionResults;
use pacer::passage::Passage;
use pacer::runtime::{PacerEvent, Runner, TestEventSource};
use pacer::session::Phase;

fn key(code: KeyCode) -> PacerEvent {
    PacerEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn send_str(tx: &mpsc::Sender<PacerEvent>, text: &str) {
    for c in text.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
}

// Drives the app the way main does, minus the terminal.
fn drain(runner: &Runner<TestEventSource>, app: &mut App<&ManualClock>) -> Flow {
    while let Some(event) = runner.step() {
        if app.on_event(&event) == Flow::Quit {
            return Flow::Quit;
        }
    }
    Flow::Redraw
}

// Headless integration using the runtime + App without a TTY
#[test]
fn headless_typing_flow_completes() {
    let clock = ManualClock::new();
    let mut app = App::new(Passage::new("cat dog").unwrap(), Settings::default(), &clock);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx));

    clock.advance(Duration::from_secs(6));
    send_str(&tx, "cat dog");
    drop(tx);

    assert_eq!(drain(&runner, &mut app), Flow::Redraw);
    assert_eq!(app.session().phase(), Phase::Finished);
    assert_eq!(
        app.session().results(),
        Some(SessionResults {
            wpm: 20,
            accuracy: 100
        })
    );
}

#[test]
fn headless_mistake_and_backspace_flow() {
    let clock = ManualClock::new();
    let mut app = App::new(Passage::new("cat dog").unwrap(), Settings::default(), &clock);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx));

    clock.advance(Duration::from_secs(6));
    send_str(&tx, "cb");
    tx.send(key(KeyCode::Backspace)).unwrap();
    send_str(&tx, "at dog");
    drop(tx);

    drain(&runner, &mut app);

    // the erased mistake still counts against accuracy, but "cat" ends up correct
    assert_eq!(app.session().mistakes(), 1);
    assert_eq!(
        app.last_results(),
        Some(SessionResults {
            wpm: 20,
            accuracy: 86
        })
    );
}

#[test]
fn headless_escape_restarts_after_finish() {
    let clock = ManualClock::new();
    let mut app = App::new(Passage::new("hi").unwrap(), Settings::default(), &clock);
    let first_start = app.session().started_at().unwrap();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx));

    send_str(&tx, "hi");
    tx.send(key(KeyCode::Char('z'))).unwrap();
    tx.send(key(KeyCode::Esc)).unwrap();
    drop(tx);

    drain(&runner, &mut app);

    let session = app.session();
    assert_eq!(session.phase(), Phase::Typing);
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.mistakes(), 0);
    assert!(session.started_at().unwrap() > first_start);
    assert!(app.last_results().is_some());
}

#[test]
fn headless_ctrl_c_stops_before_remaining_events() {
    let clock = ManualClock::new();
    let mut app = App::new(Passage::new("hello").unwrap(), Settings::default(), &clock);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx));

    send_str(&tx, "he");
    tx.send(PacerEvent::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )))
    .unwrap();
    send_str(&tx, "llo");
    drop(tx);

    assert_eq!(drain(&runner, &mut app), Flow::Quit);
    assert_eq!(app.session().cursor(), 2);
    assert!(!app.session().is_finished());
}
