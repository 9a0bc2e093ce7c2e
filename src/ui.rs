use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::{
    app::{App, Settings},
    clock::Clock,
    layout::{caret_position, PassageLayout},
    session::{CharStatus, CharTag, SessionState},
};

const HORIZONTAL_MARGIN: u16 = 5;

struct Regions {
    passage: Rect,
    results: Rect,
    legend: Rect,
}

fn passage_width(area: Rect) -> u16 {
    area.width.saturating_sub(HORIZONTAL_MARGIN * 2)
}

fn regions(area: Rect, layout: &PassageLayout, finished: bool) -> Regions {
    let results_height = if finished { 2 } else { 0 };
    let body_height = layout.height() + 1 + results_height;
    let top_padding = area.height.saturating_sub(body_height + 1) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(top_padding),
            Constraint::Length(layout.height()),
            Constraint::Length(1), // gap
            Constraint::Length(results_height),
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Regions {
        passage: chunks[1],
        results: chunks[3],
        legend: chunks[5],
    }
}

/// Colour comes from the typed status, so an active position that was
/// already typed (the last char once finished) keeps its colour.
fn char_span(c: char, tag: CharTag, status: CharStatus, settings: &Settings) -> Span<'static> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let (symbol, style) = match status {
        CharStatus::Untyped => (c, bold_style.add_modifier(Modifier::DIM)),
        CharStatus::Correct => (c, bold_style.fg(Color::Green)),
        CharStatus::Incorrect if c == ' ' && settings.mark_incorrect_spaces => {
            ('·', bold_style.fg(Color::Red))
        }
        CharStatus::Incorrect => (c, bold_style.fg(Color::Red)),
    };

    let style = if tag == CharTag::Active {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    };

    Span::styled(symbol.to_string(), style)
}

fn passage_lines(session: &SessionState, layout: &PassageLayout, settings: &Settings) -> Vec<Line<'static>> {
    let chars = session.passage().chars();
    let tags = session.tags();

    layout
        .lines()
        .iter()
        .map(|range| {
            range
                .clone()
                .map(|idx| {
                    let status = session.status(idx).unwrap_or(CharStatus::Untyped);
                    char_span(chars[idx], tags[idx], status, settings)
                })
                .collect::<Vec<Span>>()
        })
        .map(Line::from)
        .collect()
}

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session();
        let finished = session.is_finished();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let layout = PassageLayout::new(session.passage(), passage_width(area));
        let regions = regions(area, &layout, finished);

        Paragraph::new(passage_lines(session, &layout, &self.settings)).render(regions.passage, buf);

        if let Some(results) = session.results() {
            let lines = vec![
                Line::from(Span::styled(
                    format!("{} wpm   {}% acc", results.wpm, results.accuracy),
                    bold_style,
                )),
                Line::from(Span::styled("press (esc) to reset", italic_style)),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(regions.results, buf);
        }

        let legend = if finished {
            "(esc) reset / (ctrl+c) quit"
        } else {
            "(esc) restart / (ctrl+c) quit"
        };
        Paragraph::new(Span::styled(legend, italic_style)).render(regions.legend, buf);
    }
}

/// Where the caret goes when `app` is drawn into `area`.
pub fn caret<C: Clock>(app: &App<C>, area: Rect) -> Option<Position> {
    let session = app.session();
    let layout = PassageLayout::new(session.passage(), passage_width(area));
    let regions = regions(area, &layout, session.is_finished());
    caret_position(session, &layout, regions.passage)
}

/// Paints the app, then places the caret; leaving it unset hides it.
pub fn draw<C: Clock>(app: &App<C>, f: &mut Frame) {
    let area = f.area();
    f.render_widget(app, area);
    if let Some(position) = caret(app, area) {
        f.set_cursor_position(position);
    }
}
