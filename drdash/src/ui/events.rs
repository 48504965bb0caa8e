//! Translation from terminal input to dashboard events.

use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::dashboard::{Event, Key};

/// Maps a key press onto the keys the dashboard knows.
pub fn map_key(key: &KeyEvent) -> Key {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Char('q') => Key::Quit,
        KeyCode::Up | KeyCode::Char('k') => Key::Up,
        KeyCode::Down | KeyCode::Char('j') => Key::Down,
        _ => Key::Other,
    }
}

/// Returns the dashboard event for a terminal event, if it is one we handle.
///
/// Key releases and repeats are dropped so a single press moves the cursor once.
pub fn translate(ev: &TermEvent) -> Option<Event> {
    match ev {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
            Some(Event::KeyPressed(map_key(key)))
        }
        TermEvent::Resize(width, height) => Some(Event::Resized {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_key_navigation() {
        assert_eq!(map_key(&press(KeyCode::Up)), Key::Up);
        assert_eq!(map_key(&press(KeyCode::Char('k'))), Key::Up);
        assert_eq!(map_key(&press(KeyCode::Down)), Key::Down);
        assert_eq!(map_key(&press(KeyCode::Char('j'))), Key::Down);
    }

    #[test]
    fn test_map_key_quit() {
        assert_eq!(map_key(&press(KeyCode::Char('q'))), Key::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Key::Quit);

        assert_eq!(map_key(&press(KeyCode::Char('c'))), Key::Other);
        assert_eq!(map_key(&press(KeyCode::Char('x'))), Key::Other);
        assert_eq!(map_key(&press(KeyCode::Enter)), Key::Other);
    }

    #[test]
    fn test_translate() {
        assert_eq!(
            translate(&TermEvent::Key(press(KeyCode::Char('q')))),
            Some(Event::KeyPressed(Key::Quit))
        );
        assert_eq!(
            translate(&TermEvent::Resize(120, 40)),
            Some(Event::Resized {
                width: 120,
                height: 40
            })
        );
        assert_eq!(translate(&TermEvent::FocusGained), None);

        let release = KeyEvent {
            code: KeyCode::Down,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(translate(&TermEvent::Key(release)), None);
    }
}
