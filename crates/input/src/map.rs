//! Key mapping from terminal events to game commands.

use crate::types::{Move, RotateDirection, ShiftDirection};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Start,
    Pause,
    Reset,
}

impl Command {
    const fn shift(dir: ShiftDirection) -> Self {
        Command::Move(Move::Shift(dir))
    }

    const fn rotate(dir: RotateDirection) -> Self {
        Command::Move(Move::Rotate(dir))
    }
}

/// Map keyboard input to a game command.
///
/// Release events and Ctrl chords are ignored (Ctrl-C is handled by
/// [`should_quit`]).
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(Command::shift(ShiftDirection::Left)),
        KeyCode::Right => Some(Command::shift(ShiftDirection::Right)),
        KeyCode::Down => Some(Command::shift(ShiftDirection::Down)),

        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::rotate(RotateDirection::Ccw)),
        KeyCode::Up
        | KeyCode::Char('c')
        | KeyCode::Char('C')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(Command::rotate(RotateDirection::Cw)),

        KeyCode::Enter => Some(Command::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
