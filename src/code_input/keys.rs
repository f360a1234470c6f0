use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What an unmodified key press does to the focused cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Populate(u8),
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    /// Swallowed without touching the cells.
    Suppress,
}

impl KeyAction {
    /// Returns `None` for key events the widget leaves to its host: anything that
    /// is not a press, or is chorded with ctrl/super/meta.
    pub fn classify(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META)
        {
            return None;
        }
        let action = match key.code {
            KeyCode::Char(c) => match c.to_digit(10) {
                Some(d) => Self::Populate(d as u8),
                None => Self::Suppress,
            },
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Delete => Self::Delete,
            KeyCode::Left => Self::MoveLeft,
            KeyCode::Right => Self::MoveRight,
            _ => Self::Suppress,
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_populate() {
        for (c, d) in ('0'..='9').zip(0u8..) {
            assert_eq!(
                KeyAction::classify(&press(KeyCode::Char(c))),
                Some(KeyAction::Populate(d))
            );
        }
    }

    #[test]
    fn shift_does_not_pass_through() {
        let key = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(KeyAction::classify(&key), Some(KeyAction::Suppress));
    }

    #[test]
    fn modified_keys_pass_through() {
        for modifiers in [KeyModifiers::CONTROL, KeyModifiers::SUPER, KeyModifiers::META] {
            let key = KeyEvent::new(KeyCode::Char('v'), modifiers);
            assert_eq!(KeyAction::classify(&key), None);
            let key = KeyEvent::new(KeyCode::Char('1'), modifiers);
            assert_eq!(KeyAction::classify(&key), None);
        }
    }

    #[test]
    fn editing_and_navigation_keys() {
        assert_eq!(
            KeyAction::classify(&press(KeyCode::Backspace)),
            Some(KeyAction::Backspace)
        );
        assert_eq!(
            KeyAction::classify(&press(KeyCode::Delete)),
            Some(KeyAction::Delete)
        );
        assert_eq!(
            KeyAction::classify(&press(KeyCode::Left)),
            Some(KeyAction::MoveLeft)
        );
        assert_eq!(
            KeyAction::classify(&press(KeyCode::Right)),
            Some(KeyAction::MoveRight)
        );
    }

    #[test]
    fn everything_else_is_suppressed() {
        for code in [
            KeyCode::Char('f'),
            KeyCode::Char(' '),
            KeyCode::Char('٣'),
            KeyCode::Enter,
            KeyCode::Tab,
            KeyCode::Esc,
            KeyCode::Up,
            KeyCode::Home,
        ] {
            assert_eq!(KeyAction::classify(&press(code)), Some(KeyAction::Suppress));
        }
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Char('1'));
        key.kind = KeyEventKind::Release;
        assert_eq!(KeyAction::classify(&key), None);
    }
}
