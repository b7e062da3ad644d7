use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Insert(char),
    Newline,
    Backspace,
    Delete,
    DeleteWord,
    Left,
    Right,
    WordLeft,
    WordRight,
    Up,
    Down,
    Home,
    End,
    Paste,
    Submit,
    Cancel,
    Clear,
    None,
}

impl From<KeyEvent> for InputAction {
    fn from(key: KeyEvent) -> Self {
        match (key.code, key.modifiers) {
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => InputAction::DeleteWord,
            (KeyCode::Backspace, KeyModifiers::ALT) => InputAction::DeleteWord,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => InputAction::Clear,
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => InputAction::Home,
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => InputAction::End,
            (KeyCode::Char('b'), KeyModifiers::CONTROL) => InputAction::Left,
            (KeyCode::Char('f'), KeyModifiers::CONTROL) => InputAction::Right,
            (KeyCode::Char('b'), KeyModifiers::ALT) => InputAction::WordLeft,
            (KeyCode::Char('f'), KeyModifiers::ALT) => InputAction::WordRight,
            (KeyCode::Left, KeyModifiers::CONTROL) => InputAction::WordLeft,
            (KeyCode::Right, KeyModifiers::CONTROL) => InputAction::WordRight,
            (KeyCode::Char('j'), KeyModifiers::CONTROL) => InputAction::Newline,
            (KeyCode::Char('v'), KeyModifiers::CONTROL) => InputAction::Paste,
            (KeyCode::Enter, m) if m.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
                InputAction::Newline
            }
            (KeyCode::Char(c), m) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                InputAction::Insert(c)
            }
            (KeyCode::Backspace, _) => InputAction::Backspace,
            (KeyCode::Delete, _) => InputAction::Delete,
            (KeyCode::Left, _) => InputAction::Left,
            (KeyCode::Right, _) => InputAction::Right,
            (KeyCode::Up, _) => InputAction::Up,
            (KeyCode::Down, _) => InputAction::Down,
            (KeyCode::Home, _) => InputAction::Home,
            (KeyCode::End, _) => InputAction::End,
            (KeyCode::Enter, _) => InputAction::Submit,
            (KeyCode::Esc, _) => InputAction::Cancel,
            _ => InputAction::None,
        }
    }
}
