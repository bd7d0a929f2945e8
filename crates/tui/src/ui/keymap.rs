use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    ToggleFullscreen,
    Cancel,
    NextField,
    PrevField,
    Submit,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Input(char),
    None,
}

/// Translates a key press. Plain `q` stays an [`AppAction::Input`]; the app
/// decides whether it quits or is typed into a field.
pub fn map_key(key: KeyEvent) -> AppAction {
    if key.kind == KeyEventKind::Release {
        return AppAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => AppAction::Quit,
            KeyCode::Char('f') => AppAction::ToggleFullscreen,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::BackTab => AppAction::PrevField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Left => AppAction::Left,
        KeyCode::Right => AppAction::Right,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> AppAction {
        map_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn control_shortcuts() {
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), AppAction::Quit);
        assert_eq!(
            press(KeyCode::Char('f'), KeyModifiers::CONTROL),
            AppAction::ToggleFullscreen
        );
        assert_eq!(press(KeyCode::Char('x'), KeyModifiers::CONTROL), AppAction::None);
    }

    #[test]
    fn plain_keys() {
        assert_eq!(press(KeyCode::Char('q'), KeyModifiers::NONE), AppAction::Input('q'));
        assert_eq!(press(KeyCode::Char('Ж'), KeyModifiers::SHIFT), AppAction::Input('Ж'));
        assert_eq!(press(KeyCode::BackTab, KeyModifiers::SHIFT), AppAction::PrevField);
        assert_eq!(press(KeyCode::Esc, KeyModifiers::NONE), AppAction::Cancel);
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), AppAction::None);
    }
}
