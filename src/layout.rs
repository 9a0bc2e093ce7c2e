//! Word-wrapped placement of passage characters on screen.
//!
//! The renderer and the caret both read cell coordinates from the same
//! [`PassageLayout`], so the caret always lands on the cell the active
//! character was painted in.

use std::ops::Range;

use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthChar;

use crate::passage::Passage;
use crate::session::SessionState;

/// Column/row of a character relative to the passage area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub col: u16,
    pub row: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageLayout {
    lines: Vec<Range<usize>>,
    cells: Vec<Cell>,
}

fn char_width(c: char) -> u16 {
    c.width().unwrap_or(0).max(1) as u16
}

impl PassageLayout {
    /// Greedy word wrap into lines at most `width` cells wide. A word keeps
    /// its trailing spaces on its line; words wider than a line are split.
    pub fn new(passage: &Passage, width: u16) -> Self {
        let chars = passage.chars();
        let width = width.max(1);

        let mut lines = Vec::new();
        let mut cells = Vec::with_capacity(chars.len());
        let mut line_start = 0;
        let mut col: u16 = 0;
        let mut row: u16 = 0;
        let mut idx = 0;

        while idx < chars.len() {
            let word_end = idx
                + chars[idx..]
                    .iter()
                    .take_while(|c| !c.is_whitespace())
                    .count();
            let segment_end = word_end
                + chars[word_end..]
                    .iter()
                    .take_while(|c| c.is_whitespace())
                    .count();
            let segment_width: u32 = chars[idx..segment_end]
                .iter()
                .map(|c| char_width(*c) as u32)
                .sum();

            if col > 0 && col as u32 + segment_width > width as u32 {
                lines.push(line_start..idx);
                line_start = idx;
                row += 1;
                col = 0;
            }

            for (i, c) in chars.iter().enumerate().take(segment_end).skip(idx) {
                let w = char_width(*c);
                if col > 0 && col + w > width {
                    lines.push(line_start..i);
                    line_start = i;
                    row += 1;
                    col = 0;
                }
                cells.push(Cell { col, row });
                col += w;
            }

            idx = segment_end;
        }
        lines.push(line_start..chars.len());

        Self { lines, cells }
    }

    /// Passage index ranges, one per screen line.
    pub fn lines(&self) -> &[Range<usize>] {
        &self.lines
    }

    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }

    pub fn cell(&self, idx: usize) -> Option<Cell> {
        self.cells.get(idx).copied()
    }
}

/// Screen position of the caret for `session` drawn into `area`, or `None`
/// when the caret is hidden or would fall outside `area`.
pub fn caret_position(session: &SessionState, layout: &PassageLayout, area: Rect) -> Option<Position> {
    let cell = layout.cell(session.caret_index()?)?;
    let position = Position::new(area.x + cell.col, area.y + cell.row);
    area.contains(position).then_some(position)
}
