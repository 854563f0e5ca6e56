use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::input::Key;

/// Block until the next keypress that maps to a [`Key`].
///
/// Mouse, focus, paste and resize events are skipped; the viewport is
/// re-measured before every render anyway.
pub fn read_key() -> std::io::Result<Key> {
    loop {
        if let Event::Key(key_event) = event::read()?
            && let Some(key) = map_key(key_event)
        {
            return Ok(key);
        }
    }
}

pub fn map_key(key_event: KeyEvent) -> Option<Key> {
    // Some platforms report releases and repeats as separate events
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c') => Some(Key::Interrupt),
            // ASCII control aliases: ^H backspace, ^J/^M newline
            KeyCode::Char('h') => Some(Key::Backspace),
            KeyCode::Char('j') | KeyCode::Char('m') => Some(Key::Enter),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_characters() {
        assert_eq!(
            map_key(press(KeyCode::Char('7'), KeyModifiers::NONE)),
            Some(Key::Char('7'))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('U'), KeyModifiers::SHIFT)),
            Some(Key::Char('U'))
        );
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(map_key(press(KeyCode::Enter, KeyModifiers::NONE)), Some(Key::Enter));
        assert_eq!(
            map_key(press(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Key::Backspace)
        );
        assert_eq!(map_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Key::Escape));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Interrupt)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('h'), KeyModifiers::CONTROL)),
            Some(Key::Backspace)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut event = press(KeyCode::Char('q'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key(event), None);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(map_key(press(KeyCode::Up, KeyModifiers::NONE)), None);
        assert_eq!(map_key(press(KeyCode::F(1), KeyModifiers::NONE)), None);
    }
}
