use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key press as the session sees it.
///
/// `Backspace` and `Escape` are the two distinguished names; any other
/// single character is a candidate match against the passage, and every
/// other key keeps its name in `Named`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Escape,
    Named(String),
}

impl Key {
    /// Parses a key name such as `"Backspace"`, `"a"` or `"Shift"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Backspace" => Key::Backspace,
            "Escape" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Named(name.to_string()),
                }
            }
        }
    }
}

/// What a terminal key event means to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Key(Key),
}

/// Maps a crossterm key event onto the session's key vocabulary.
///
/// Returns `None` for releases/repeats and for keys with no name the
/// session would ever act on.
pub fn map_key_event(event: &KeyEvent) -> Option<InputAction> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);

    let key = match event.code {
        // AltGr arrives as ctrl+alt on Windows and yields a plain char
        KeyCode::Char(c) if ctrl && alt => Key::Char(c),
        // ctrl+c to quit, escape is taken by restart
        KeyCode::Char('c') if ctrl => return Some(InputAction::Quit),
        KeyCode::Char(c) if ctrl => Key::Named(format!("Ctrl+{c}")),
        KeyCode::Char(c) if alt => Key::Named(format!("Alt+{c}")),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Named("Enter".into()),
        KeyCode::Tab => Key::Named("Tab".into()),
        KeyCode::BackTab => Key::Named("BackTab".into()),
        KeyCode::Delete => Key::Named("Delete".into()),
        KeyCode::Left => Key::Named("ArrowLeft".into()),
        KeyCode::Right => Key::Named("ArrowRight".into()),
        KeyCode::Up => Key::Named("ArrowUp".into()),
        KeyCode::Down => Key::Named("ArrowDown".into()),
        KeyCode::F(n) => Key::Named(format!("F{n}")),
        _ => return None,
    };

    Some(InputAction::Key(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_from_name() {
        assert_eq!(Key::from_name("Backspace"), Key::Backspace);
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("a"), Key::Char('a'));
        assert_eq!(Key::from_name(" "), Key::Char(' '));
        assert_eq!(Key::from_name("é"), Key::Char('é'));
        assert_eq!(Key::from_name("Shift"), Key::Named("Shift".into()));
    }

    #[test]
    fn test_map_plain_char() {
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(
            map_key_event(&event),
            Some(InputAction::Key(Key::Char('x')))
        );
    }

    #[test]
    fn test_map_shifted_char_keeps_char() {
        let event = KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT);
        assert_eq!(
            map_key_event(&event),
            Some(InputAction::Key(Key::Char('P')))
        );
    }

    #[test]
    fn test_map_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event(&event), Some(InputAction::Quit));
    }

    #[test]
    fn test_map_control_chord_is_named() {
        let event = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_matches!(map_key_event(&event), Some(InputAction::Key(Key::Named(_))));
    }

    #[test]
    fn test_map_alt_chord_is_labelled_alt() {
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(
            map_key_event(&event),
            Some(InputAction::Key(Key::Named("Alt+x".into())))
        );
    }

    #[test]
    fn test_map_altgr_char_is_typed() {
        let event = KeyEvent::new(
            KeyCode::Char('@'),
            KeyModifiers::CONTROL | KeyModifiers::ALT,
        );
        assert_eq!(
            map_key_event(&event),
            Some(InputAction::Key(Key::Char('@')))
        );
    }

    #[test]
    fn test_altgr_char_advances_session() {
        let t0 = std::time::Instant::now();
        let passage = crate::passage::Passage::new("a@b").unwrap();
        let mut session = crate::session::SessionState::new(passage).start(t0);
        let events = [
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('@'), KeyModifiers::CONTROL | KeyModifiers::ALT),
        ];

        for event in &events {
            if let Some(InputAction::Key(key)) = map_key_event(event) {
                session.apply_key(&key, t0);
            }
        }

        assert_eq!(session.cursor(), 2);
        assert_eq!(session.mistakes(), 0);
    }

    #[test]
    fn test_map_distinguished_keys() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let bs = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(map_key_event(&esc), Some(InputAction::Key(Key::Escape)));
        assert_eq!(map_key_event(&bs), Some(InputAction::Key(Key::Backspace)));
    }

    #[test]
    fn test_map_ignores_release() {
        let mut event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(&event), None);
    }

    #[test]
    fn test_map_function_key() {
        let event = KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(
            map_key_event(&event),
            Some(InputAction::Key(Key::Named("F1".into())))
        );
    }
}
