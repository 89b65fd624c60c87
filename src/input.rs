//! Input handling: terminal key events mapped to discrete game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Discrete player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Upward impulse (Space, Up or Enter).
    Flap,
    /// Restart from the game-over screen (R).
    Restart,
    /// Leave the game (Q or Esc).
    Quit,
    /// Any other key.
    Other,
}

/// Map a key event to a game action. Only key-down edges count; repeat and
/// release events are ignored.
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let input = match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => GameInput::Flap,
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameInput::Quit,
        _ => GameInput::Other,
    };
    Some(input)
}

/// Map a mouse event to a game action. A click anywhere flaps, the
/// tap-anywhere control scheme; movement, drag and release are ignored.
pub fn map_mouse(mouse: MouseEvent) -> Option<GameInput> {
    match mouse.kind {
        MouseEventKind::Down(_) => Some(GameInput::Flap),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_flap_keys() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(GameInput::Flap));
        assert_eq!(map_key(press(KeyCode::Up)), Some(GameInput::Flap));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(GameInput::Flap));
    }

    #[test]
    fn test_restart_and_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('r'))), Some(GameInput::Restart));
        assert_eq!(map_key(press(KeyCode::Char('R'))), Some(GameInput::Restart));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(GameInput::Quit));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(GameInput::Quit));
    }

    #[test]
    fn test_unmapped_key_is_other() {
        assert_eq!(map_key(press(KeyCode::Char('x'))), Some(GameInput::Other));
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Char(' '));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn test_any_click_flaps() {
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(GameInput::Flap)
        );
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Right))),
            Some(GameInput::Flap)
        );
    }

    #[test]
    fn test_mouse_release_and_movement_are_ignored() {
        assert_eq!(map_mouse(mouse(MouseEventKind::Up(MouseButton::Left))), None);
        assert_eq!(map_mouse(mouse(MouseEventKind::Moved)), None);
    }
}
