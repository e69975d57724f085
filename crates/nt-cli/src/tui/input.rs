// crates/nt-cli/src/tui/input.rs - Key bindings
//
// Maps raw key presses to browser actions. The same key means different
// things in different modes ('a' adds a note from the list but is just a
// letter while typing a title), so the mapping takes the current input
// context into account.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Where keystrokes are currently going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    List,
    /// Typing into the list's title filter
    Filter,
    View,
    AddTitle,
    AddBody,
    Edit,
}

/// What a key press asks the browser to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Open,
    New,
    ToggleComplete,
    StartFilter,
    Edit,
    Delete,
    Back,
    Confirm,
    Save,
    Discard,
    /// Forward the key to the active text input
    Input(KeyEvent),
    Ignore,
}

pub fn map_key(context: InputContext, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match context {
        InputContext::List => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::Home | KeyCode::Char('g') => Action::Top,
            KeyCode::End | KeyCode::Char('G') => Action::Bottom,
            KeyCode::Enter => Action::Open,
            KeyCode::Char('a') => Action::New,
            KeyCode::Char('c') => Action::ToggleComplete,
            KeyCode::Char('/') => Action::StartFilter,
            KeyCode::Esc => Action::Back,
            _ => Action::Ignore,
        },

        InputContext::Filter => match key.code {
            KeyCode::Enter => Action::Confirm,
            KeyCode::Esc => Action::Back,
            KeyCode::Up => Action::Up,
            KeyCode::Down => Action::Down,
            _ => Action::Input(key),
        },

        InputContext::View => match key.code {
            KeyCode::Char('e') => Action::Edit,
            KeyCode::Char('d') => Action::Delete,
            KeyCode::Char('c') => Action::ToggleComplete,
            KeyCode::Esc | KeyCode::Char('q') => Action::Back,
            _ => Action::Ignore,
        },

        InputContext::AddTitle => match key.code {
            KeyCode::Enter => Action::Confirm,
            KeyCode::Esc => Action::Back,
            KeyCode::Char('x') if ctrl => Action::Discard,
            _ => Action::Input(key),
        },

        InputContext::AddBody | InputContext::Edit => match key.code {
            KeyCode::Char('s') if ctrl => Action::Save,
            KeyCode::Char('x') if ctrl => Action::Discard,
            KeyCode::Esc => Action::Back,
            _ => Action::Input(key),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        for context in [
            InputContext::List,
            InputContext::Filter,
            InputContext::View,
            InputContext::AddTitle,
            InputContext::AddBody,
            InputContext::Edit,
        ] {
            assert_eq!(map_key(context, ctrl('c')), Action::Quit);
        }
    }

    #[test]
    fn test_letters_are_commands_only_outside_inputs() {
        let a = plain(KeyCode::Char('a'));
        assert_eq!(map_key(InputContext::List, a), Action::New);
        assert_eq!(map_key(InputContext::AddTitle, a), Action::Input(a));
        assert_eq!(map_key(InputContext::AddBody, a), Action::Input(a));
        assert_eq!(map_key(InputContext::Filter, a), Action::Input(a));
        assert_eq!(map_key(InputContext::View, a), Action::Ignore);
    }

    #[test]
    fn test_enter_depends_on_stage() {
        let enter = plain(KeyCode::Enter);
        assert_eq!(map_key(InputContext::List, enter), Action::Open);
        assert_eq!(map_key(InputContext::AddTitle, enter), Action::Confirm);
        // Enter is a newline while typing a body
        assert_eq!(map_key(InputContext::AddBody, enter), Action::Input(enter));
    }

    #[test]
    fn test_save_and_discard_chords() {
        assert_eq!(map_key(InputContext::AddBody, ctrl('s')), Action::Save);
        assert_eq!(map_key(InputContext::Edit, ctrl('s')), Action::Save);
        assert_eq!(map_key(InputContext::AddTitle, ctrl('x')), Action::Discard);
        assert_eq!(map_key(InputContext::Edit, ctrl('x')), Action::Discard);
        assert_eq!(
            map_key(InputContext::AddTitle, ctrl('s')),
            Action::Input(ctrl('s'))
        );
    }
}
