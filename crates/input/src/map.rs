//! Key mapping from terminal events to game intents.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Everything a key press can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(GameAction),
    Restart,
    Quit,
}

/// Map a key to a game intent, regardless of press/repeat/release.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(GameAction::SoftDrop),

        // Rotation (clockwise only)
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameAction::Rotate),

        KeyCode::Char(' ') => Some(GameAction::HardDrop),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Map a terminal key event to a command.
///
/// Releases are ignored. Held-key repeats only get through for the drop
/// intents; every other intent fires once per physical press. Enter restarts
/// only on the game-over screen.
pub fn map_key(key: KeyEvent, game_over: bool) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if should_quit(key) {
        return Some(Command::Quit);
    }

    let pressed = key.kind == KeyEventKind::Press;
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => return pressed.then_some(Command::Restart),
        KeyCode::Enter if game_over => return pressed.then_some(Command::Restart),
        _ => {}
    }

    let action = handle_key_event(key)?;
    if !pressed && !action.repeatable() {
        return None;
    }
    Some(Command::Play(action))
}
