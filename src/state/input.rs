//! Input Module - crossterm event conversion and polling
//!
//! Bridges crossterm's event system with the pointer registry and the
//! login form keys.
//!
//! # API
//!
//! - `convert_mouse_event` - crossterm mouse event → pointer move or click
//! - `convert_key_event` - crossterm key event → [`FormKey`]
//! - `poll_event` - non-blocking event check with timeout
//! - `route_event` - pointer moves go to the pointer registry
//!
//! # Example
//!
//! ```ignore
//! use login_monsters::state::input::{poll_event, route_event};
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         route_event(&event);
//!     }
//! }
//! ```

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind, poll,
    read,
};

use super::pointer::{self, PointerEvent};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Keys the login form reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    /// Focus the next field.
    Tab,
    /// Focus the previous field.
    BackTab,
    /// Show or hide the password.
    TogglePassword,
    /// Leave the form (blur).
    Escape,
    /// Submit.
    Enter,
    Backspace,
    Char(char),
    /// Ctrl+C.
    Quit,
}

/// Unified event type for the terminal host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved (cell centre, client coordinates).
    Pointer(PointerEvent),
    /// Left button pressed at a cell.
    Click(PointerEvent),
    Key(FormKey),
    /// Terminal resize (new width, height).
    Resize(u16, u16),
    /// Anything else.
    None,
}

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

/// Cell centre of a terminal position, in client coordinates.
fn cell_center(column: u16, row: u16) -> PointerEvent {
    PointerEvent::new(column as f32 + 0.5, row as f32 + 0.5)
}

/// Convert a crossterm mouse event.
///
/// Moves and drags become pointer moves; a left press becomes a click.
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> InputEvent {
    let at = cell_center(event.column, event.row);
    match event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => InputEvent::Pointer(at),
        MouseEventKind::Down(CrosstermMouseButton::Left) => InputEvent::Click(at),
        _ => InputEvent::None,
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert a crossterm key event. Releases are ignored.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<FormKey> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let key = match event.code {
        KeyCode::Char('c') if ctrl => FormKey::Quit,
        KeyCode::Char('r') if ctrl => FormKey::TogglePassword,
        KeyCode::Char(c) if !ctrl => FormKey::Char(c),
        KeyCode::Tab if event.modifiers.contains(KeyModifiers::SHIFT) => FormKey::BackTab,
        KeyCode::Tab => FormKey::Tab,
        KeyCode::BackTab => FormKey::BackTab,
        KeyCode::F(2) => FormKey::TogglePassword,
        KeyCode::Esc => FormKey::Escape,
        KeyCode::Enter => FormKey::Enter,
        KeyCode::Backspace => FormKey::Backspace,
        _ => return None,
    };
    Some(key)
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(match read()? {
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse),
        CrosstermEvent::Key(key) => convert_key_event(key).map_or(InputEvent::None, InputEvent::Key),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    })
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Route pointer positions to the pointer registry.
///
/// Clicks also move the pointer. Returns true if any listener saw it.
pub fn route_event(event: &InputEvent) -> bool {
    match event {
        InputEvent::Pointer(at) | InputEvent::Click(at) => pointer::dispatch(*at) > 0,
        _ => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermMouseEvent {
        CrosstermMouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_mouse_move() {
        let event = convert_mouse_event(mouse(MouseEventKind::Moved, 10, 5));
        assert_eq!(event, InputEvent::Pointer(PointerEvent::new(10.5, 5.5)));
    }

    #[test]
    fn test_convert_mouse_drag_is_move() {
        let event = convert_mouse_event(mouse(MouseEventKind::Drag(CrosstermMouseButton::Left), 0, 0));
        assert_eq!(event, InputEvent::Pointer(PointerEvent::new(0.5, 0.5)));
    }

    #[test]
    fn test_convert_left_click() {
        let event = convert_mouse_event(mouse(MouseEventKind::Down(CrosstermMouseButton::Left), 3, 4));
        assert_eq!(event, InputEvent::Click(PointerEvent::new(3.5, 4.5)));

        let event = convert_mouse_event(mouse(MouseEventKind::Down(CrosstermMouseButton::Right), 3, 4));
        assert_eq!(event, InputEvent::None);
    }

    #[test]
    fn test_convert_scroll_ignored() {
        let event = convert_mouse_event(mouse(MouseEventKind::ScrollDown, 0, 0));
        assert_eq!(event, InputEvent::None);
    }

    #[test]
    fn test_convert_form_keys() {
        assert_eq!(convert_key_event(key(KeyCode::Tab, KeyModifiers::NONE)), Some(FormKey::Tab));
        assert_eq!(convert_key_event(key(KeyCode::Tab, KeyModifiers::SHIFT)), Some(FormKey::BackTab));
        assert_eq!(convert_key_event(key(KeyCode::BackTab, KeyModifiers::SHIFT)), Some(FormKey::BackTab));
        assert_eq!(convert_key_event(key(KeyCode::F(2), KeyModifiers::NONE)), Some(FormKey::TogglePassword));
        assert_eq!(convert_key_event(key(KeyCode::Char('r'), KeyModifiers::CONTROL)), Some(FormKey::TogglePassword));
        assert_eq!(convert_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(FormKey::Quit));
        assert_eq!(convert_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE)), Some(FormKey::Char('x')));
        assert_eq!(convert_key_event(key(KeyCode::Esc, KeyModifiers::NONE)), Some(FormKey::Escape));
        assert_eq!(convert_key_event(key(KeyCode::Home, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut event = key(KeyCode::Tab, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(convert_key_event(event), None);
    }

    #[test]
    fn test_route_pointer_dispatches() {
        pointer::reset_pointer_state();
        let _sub = pointer::on_pointer_move(|_| {});
        assert!(route_event(&InputEvent::Pointer(PointerEvent::new(1.0, 1.0))));
        assert!(!route_event(&InputEvent::Key(FormKey::Tab)));
    }
}
