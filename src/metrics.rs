//! Result formulas applied when a session finishes.

use std::time::Duration;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::passage::Passage;
use crate::session::CharStatus;

/// Payload handed to the UI once a session is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResults {
    pub wpm: u32,
    pub accuracy: u32,
}

/// Counts words whose every character was typed correctly.
///
/// Only positions with a terminal status take part, in passage order. A word
/// is a maximal run of non-whitespace characters; the trailing word counts
/// under the same rule as the others.
pub fn count_valid_words(passage: &Passage, statuses: &[CharStatus]) -> usize {
    let typed = passage
        .chars()
        .iter()
        .zip(statuses)
        .filter(|(_, status)| status.is_terminal());

    let mut valid = 0;
    for (is_space, mut word) in &typed.chunk_by(|(c, _)| c.is_whitespace()) {
        if !is_space && word.all(|(_, status)| *status == CharStatus::Correct) {
            valid += 1;
        }
    }
    valid
}

/// Valid words per minute of `elapsed`, rounded.
///
/// Returns `None` when no time has elapsed; the caller keeps its previous
/// value instead of storing an infinite rate.
pub fn compute_wpm(valid_words: usize, elapsed: Duration) -> Option<u32> {
    if elapsed.is_zero() {
        return None;
    }
    let minutes = elapsed.as_secs_f64() / 60.0;
    Some((valid_words as f64 / minutes).round() as u32)
}

/// Share of the passage not involved in a recorded mistake, as a rounded
/// percentage clamped to `0..=100`.
pub fn compute_accuracy(total_chars: usize, mistakes: usize) -> u32 {
    if total_chars == 0 {
        return 0;
    }
    let kept = total_chars.saturating_sub(mistakes);
    ((kept as f64 / total_chars as f64) * 100.0).round() as u32
}
