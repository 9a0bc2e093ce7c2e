use std::fmt;

use crate::error::PacerError;

/// The passage every session in the binary types.
pub const DEFAULT_PASSAGE: &str = "Photosynthesis is the process plants use to convert sunlight, carbon dioxide, and water into glucose and oxygen, providing energy for growth and releasing vital oxygen.";

/// Immutable text the user must type, indexed by character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    chars: Vec<char>,
}

impl Passage {
    pub fn new(text: &str) -> Result<Self, PacerError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Err(PacerError::EmptyPassage);
        }
        Ok(Self { chars })
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; kept alongside `len` for clippy.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl Default for Passage {
    fn default() -> Self {
        Self {
            chars: DEFAULT_PASSAGE.chars().collect(),
        }
    }
}

impl fmt::Display for Passage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
