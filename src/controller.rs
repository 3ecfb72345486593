//! Key events → game requests.
//!
//! One press or repeat event maps to exactly one request, so movement and
//! fire both follow the terminal's key-repeat rate.  Release events carry no
//! request.

use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

use crate::compute::{handle_fire_request, handle_move_request, reset};
use crate::entities::{Direction, GameState};

#[derive(Clone, Debug)]
pub enum KeyAction {
    /// Leave the game loop.
    Quit,
    /// The key produced a new state.
    Update(GameState),
    /// Nothing to do for this key.
    Ignored,
}

/// Apply a single key event to `state`.
pub fn apply_key(
    state: &GameState,
    code: KeyCode,
    kind: KeyEventKind,
    modifiers: KeyModifiers,
) -> KeyAction {
    if kind == KeyEventKind::Release {
        return KeyAction::Ignored;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') if state.is_game_over() => {
            KeyAction::Update(reset(state))
        }
        KeyCode::Char(' ') => KeyAction::Update(handle_fire_request(state)),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            KeyAction::Update(handle_move_request(state, Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            KeyAction::Update(handle_move_request(state, Direction::Right))
        }
        _ => KeyAction::Ignored,
    }
}
