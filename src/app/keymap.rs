use super::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Key table for the normal (site list) mode. Modal modes interpret keys
/// directly in `input.rs` since their bindings depend on modal state.
pub struct KeyMap {
    global: HashMap<KeyEvent, Action>,
}

impl KeyMap {
    #[must_use]
    pub fn new() -> Self {
        let mut global = HashMap::new();

        global.insert(key('q'), Action::Quit);
        global.insert(key('j'), Action::SelectNextSite);
        global.insert(key(KeyCode::Down), Action::SelectNextSite);
        global.insert(key('k'), Action::SelectPrevSite);
        global.insert(key(KeyCode::Up), Action::SelectPrevSite);
        global.insert(key('n'), Action::NewSiteIntent);
        global.insert(key('e'), Action::EditSiteIntent);
        global.insert(key(KeyCode::Enter), Action::EditSiteIntent);
        global.insert(key('d'), Action::DeleteSiteIntent);
        global.insert(key('r'), Action::RefreshSites);
        global.insert(key(':'), Action::OpenPalette);
        global.insert(ctrl('k'), Action::OpenPalette);
        global.insert(key('?'), Action::ToggleHelp);
        global.insert(key(KeyCode::Esc), Action::CancelMode);

        Self { global }
    }

    #[must_use]
    pub fn get_action(&self, event: KeyEvent) -> Option<Action> {
        self.global.get(&event).cloned()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

fn key(code: impl IntoKeyCode) -> KeyEvent {
    KeyEvent::new(code.into_key_code(), KeyModifiers::empty())
}

/// Local conversion so `key` accepts both `char` and `KeyCode` call sites.
/// `KeyCode` does not implement `From<char>`, so we can't rely on `Into<KeyCode>`.
trait IntoKeyCode {
    fn into_key_code(self) -> KeyCode;
}

impl IntoKeyCode for char {
    fn into_key_code(self) -> KeyCode {
        KeyCode::Char(self)
    }
}

impl IntoKeyCode for KeyCode {
    fn into_key_code(self) -> KeyCode {
        self
    }
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}
