use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reelfront_core::Route;

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    GoTo(Route),
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // first 'g' of "gg"
    FocusNext,
    FocusPrev,
    RailForward,
    RailBackward,
    TogglePlay,
    SeekForward,
    SeekBackward,
    NextTrack,
    PrevTrack,
    ToggleReducedMotion,
    OpenLink,
    Help,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key closes help
        return Action::ExitMode;
    }

    // Terminals disagree on SHIFT for shifted characters: uppercase letters
    // always carry it, symbols ('?', '>') never do
    let modifiers = match key.code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => key.modifiers | KeyModifiers::SHIFT,
        KeyCode::Char(c) if !c.is_alphanumeric() => key.modifiers.difference(KeyModifiers::SHIFT),
        _ => key.modifiers,
    };
    let binding = KeyBinding::new(key.code, modifiers);

    if keymap.is_g_prefix(&binding) {
        if app.pending_key == Some('g') {
            return keymap.get_pending_g_action().copied().unwrap_or(Action::None);
        }
        return Action::PendingG;
    }

    if let Some(action) = keymap.get(&binding) {
        return *action;
    }

    // Number keys jump straight to a page
    if let (KeyCode::Char(c), KeyModifiers::NONE) = (key.code, key.modifiers) {
        if let Some(route) = c
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| Route::all().get(i))
        {
            return Action::GoTo(*route);
        }
    }

    Action::None
}
