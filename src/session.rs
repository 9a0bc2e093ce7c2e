//! Typing session state machine.
//!
//! A session moves `Ready -> Typing -> Finished`; `Escape` restarts it from
//! any phase. Every transition takes the instant it happens at, so the
//! machine itself never reads a clock.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::input::Key;
use crate::metrics::{compute_accuracy, compute_wpm, count_valid_words, SessionResults};
use crate::passage::Passage;

/// Terminal status of one passage position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Untyped,
    Correct,
    Incorrect,
}

impl CharStatus {
    pub fn is_terminal(self) -> bool {
        self != CharStatus::Untyped
    }
}

/// What the UI paints for one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharTag {
    Untyped,
    Active,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Typing,
    Finished,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    passage: Passage,
    statuses: Vec<CharStatus>,
    active: Option<usize>,
    cursor: usize,
    mistakes: usize,
    started_at: Option<Instant>,
    phase: Phase,
    wpm: u32,
    accuracy: u32,
}

impl SessionState {
    pub fn new(passage: Passage) -> Self {
        let statuses = vec![CharStatus::Untyped; passage.len()];
        Self {
            passage,
            statuses,
            active: None,
            cursor: 0,
            mistakes: 0,
            started_at: None,
            phase: Phase::Ready,
            wpm: 0,
            accuracy: 0,
        }
    }

    /// Loads the passage and starts the timer.
    pub fn start(mut self, now: Instant) -> Self {
        self.reset(now);
        debug!(len = self.passage.len(), "session started");
        self
    }

    /// Like `start`, but also drops the results of a previous run. The new
    /// start instant is always later than the previous one.
    pub fn restart(mut self, now: Instant) -> Self {
        self.apply_restart(now);
        self
    }

    /// Pure transition: the state after `key` was pressed at `now`.
    pub fn handle_key(mut self, key: &Key, now: Instant) -> Self {
        self.apply_key(key, now);
        self
    }

    /// In-place form of [`SessionState::handle_key`].
    pub fn apply_key(&mut self, key: &Key, now: Instant) {
        match key {
            Key::Escape => self.apply_restart(now),
            _ if self.phase != Phase::Typing => {
                trace!(?key, phase = ?self.phase, "key ignored outside of typing");
            }
            Key::Backspace => self.backspace(),
            Key::Named(name) if name.chars().any(|c| c.is_ascii_alphabetic()) => {
                trace!(%name, "non-printable key ignored");
            }
            // a multi-char name can never equal one passage char
            Key::Named(_) => self.advance(false, now),
            Key::Char(c) => {
                let matched = self.passage.char_at(self.cursor) == Some(*c);
                self.advance(matched, now);
            }
        }
    }

    fn reset(&mut self, now: Instant) {
        self.statuses.fill(CharStatus::Untyped);
        self.active = Some(0);
        self.cursor = 0;
        self.mistakes = 0;
        self.started_at = Some(now);
        self.phase = Phase::Typing;
    }

    fn apply_restart(&mut self, now: Instant) {
        let started_at = match self.started_at {
            Some(previous) if now <= previous => previous + Duration::from_nanos(1),
            _ => now,
        };
        self.reset(started_at);
        self.wpm = 0;
        self.accuracy = 0;
        debug!("session restarted");
    }

    fn backspace(&mut self) {
        if self.cursor == 0 || self.cursor >= self.passage.len() {
            return;
        }
        self.cursor -= 1;
        // mistakes stay counted even when the erased char was wrong
        self.statuses[self.cursor] = CharStatus::Untyped;
        self.active = Some(self.cursor);
    }

    fn advance(&mut self, matched: bool, now: Instant) {
        let idx = self.cursor;
        if matched {
            self.statuses[idx] = CharStatus::Correct;
        } else {
            self.statuses[idx] = CharStatus::Incorrect;
            self.mistakes += 1;
        }
        self.cursor += 1;

        if self.cursor == self.passage.len() {
            self.finish(now);
        } else {
            self.active = Some(self.cursor);
        }
    }

    fn finish(&mut self, now: Instant) {
        self.phase = Phase::Finished;
        self.active = Some(self.passage.len() - 1);
        debug_assert!(self.statuses.iter().all(|s| s.is_terminal()));

        let valid_words = count_valid_words(&self.passage, &self.statuses);
        match self.started_at {
            Some(started_at) => {
                let elapsed = now.saturating_duration_since(started_at);
                match compute_wpm(valid_words, elapsed) {
                    Some(wpm) => self.wpm = wpm,
                    None => warn!("no time elapsed since start, wpm left at {}", self.wpm),
                }
            }
            None => warn!("session finished without a start time, wpm skipped"),
        }
        self.accuracy = compute_accuracy(self.passage.len(), self.mistakes);

        info!(
            wpm = self.wpm,
            accuracy = self.accuracy,
            mistakes = self.mistakes,
            valid_words,
            "session finished"
        );
    }

    pub fn passage(&self) -> &Passage {
        &self.passage
    }

    pub fn statuses(&self) -> &[CharStatus] {
        &self.statuses
    }

    pub fn status(&self, idx: usize) -> Option<CharStatus> {
        self.statuses.get(idx).copied()
    }

    /// UI tag for `idx`: the active position wins over its status.
    pub fn tag(&self, idx: usize) -> Option<CharTag> {
        let status = self.status(idx)?;
        if self.active == Some(idx) {
            return Some(CharTag::Active);
        }
        Some(match status {
            CharStatus::Untyped => CharTag::Untyped,
            CharStatus::Correct => CharTag::Correct,
            CharStatus::Incorrect => CharTag::Incorrect,
        })
    }

    pub fn tags(&self) -> Vec<CharTag> {
        (0..self.passage.len()).filter_map(|idx| self.tag(idx)).collect()
    }

    /// Position tagged active. Once finished this is the last position,
    /// kept as a visual cue.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Position the caret sits before; `None` hides the caret.
    pub fn caret_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Typing => self.active,
            Phase::Ready | Phase::Finished => None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    pub fn results(&self) -> Option<SessionResults> {
        self.is_finished().then_some(SessionResults {
            wpm: self.wpm,
            accuracy: self.accuracy,
        })
    }
}
