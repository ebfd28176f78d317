//! Login Form - the terminal stand-in for the page around the scene.
//!
//! Holds the two text fields, which one has focus and whether the password
//! is shown. All three live in signals, so [`LoginForm::flags`] hands the
//! scene a prop that always reads the current state:
//!
//! - any field focused → `FORM_FOCUSED`
//! - password shown → `PASSWORD_VISIBLE`
//!
//! # Example
//!
//! ```
//! use login_monsters::form::{Field, LoginForm};
//! use login_monsters::state::input::FormKey;
//!
//! let form = LoginForm::new();
//! let flags = form.flags();
//! assert!(!flags.get().form_focused());
//!
//! form.handle_key(FormKey::Tab);
//! assert_eq!(form.focused(), Some(Field::Username));
//! assert!(flags.get().form_focused());
//! ```

use spark_signals::{Signal, signal};

use crate::props::PropValue;
use crate::render::FrameBuffer;
use crate::state::input::FormKey;
use crate::types::{Bounds, ReactiveFlags, Rgba};

/// Password mask character.
pub const MASK: char = '•';

const TOGGLE_SHOW: &str = "show";
const TOGGLE_HIDE: &str = "hide";

// Rows relative to the top of the form.
const ROW_TITLE: u16 = 0;
const ROW_USERNAME_LABEL: u16 = 2;
const ROW_USERNAME: u16 = 3;
const ROW_PASSWORD_LABEL: u16 = 4;
const ROW_PASSWORD: u16 = 5;
const ROW_STATUS: u16 = 7;
const ROW_HINT: u16 = 8;

const TEXT: Rgba = Rgba::rgb(230, 230, 230);
const MUTED: Rgba = Rgba::rgb(140, 140, 150);
const FIELD_BG: Rgba = Rgba::rgb(40, 40, 48);
const FIELD_FOCUSED_BG: Rgba = Rgba::rgb(60, 50, 110);
const ACCENT: Rgba = Rgba::from_rgb_int(0x7e27ff);

/// A focusable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Username => Field::Password,
            Field::Password => Field::Username,
        }
    }
}

/// What the host should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    /// Enter on the password field.
    Submit { username: String },
    Quit,
}

/// Something clickable inside the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Field(Field),
    /// The show/hide label at the end of the password field.
    Toggle,
}

// =============================================================================
// FORM STATE
// =============================================================================

/// Username, password, focus and visibility.
#[derive(Clone)]
pub struct LoginForm {
    username: Signal<String>,
    password: Signal<String>,
    focused: Signal<Option<Field>>,
    password_visible: Signal<bool>,
    status: Signal<Option<String>>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: signal(String::new()),
            password: signal(String::new()),
            focused: signal(None),
            password_visible: signal(false),
            status: signal(None),
        }
    }

    pub fn username(&self) -> String {
        self.username.get()
    }

    pub fn password(&self) -> String {
        self.password.get()
    }

    /// Currently focused field, if any.
    pub fn focused(&self) -> Option<Field> {
        self.focused.get()
    }

    pub fn is_password_visible(&self) -> bool {
        self.password_visible.get()
    }

    /// Last status line (set on submit).
    pub fn status(&self) -> Option<String> {
        self.status.get()
    }

    /// Scene flags, read live from the form's signals.
    pub fn flags(&self) -> PropValue<ReactiveFlags> {
        let focused = self.focused.clone();
        let visible = self.password_visible.clone();
        PropValue::getter(move || ReactiveFlags::from_form(focused.get().is_some(), visible.get()))
    }

    // =========================================================================
    // FOCUS
    // =========================================================================

    /// Focus a field, or blur with `None`.
    pub fn focus(&self, field: Option<Field>) {
        if self.focused.get() != field {
            tracing::trace!(?field, "form focus");
            self.focused.set(field);
        }
    }

    /// Move focus forward. From nothing, the username gets it.
    pub fn focus_next(&self) {
        let next = self.focused.get().map_or(Field::Username, Field::next);
        self.focus(Some(next));
    }

    /// Move focus backward. From nothing, the password gets it.
    pub fn focus_previous(&self) {
        // Two fields: previous is next.
        let previous = self.focused.get().map_or(Field::Password, Field::next);
        self.focus(Some(previous));
    }

    pub fn blur(&self) {
        self.focus(None);
    }

    pub fn toggle_password(&self) {
        let visible = !self.password_visible.get();
        tracing::trace!(visible, "password visibility");
        self.password_visible.set(visible);
    }

    pub fn set_password_visible(&self, visible: bool) {
        self.password_visible.set(visible);
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    fn edit(&self, f: impl FnOnce(&mut String)) {
        let target = match self.focused.get() {
            Some(Field::Username) => &self.username,
            Some(Field::Password) => &self.password,
            None => return,
        };
        let mut text = target.get();
        f(&mut text);
        target.set(text);
        self.status.set(None);
    }

    /// Apply one key.
    pub fn handle_key(&self, key: FormKey) -> FormAction {
        match key {
            FormKey::Tab => self.focus_next(),
            FormKey::BackTab => self.focus_previous(),
            FormKey::TogglePassword => self.toggle_password(),
            FormKey::Escape => self.blur(),
            FormKey::Quit => return FormAction::Quit,
            FormKey::Backspace => self.edit(|text| {
                text.pop();
            }),
            FormKey::Char(c) => self.edit(|text| text.push(c)),
            FormKey::Enter => match self.focused.get() {
                Some(Field::Username) => self.focus(Some(Field::Password)),
                Some(Field::Password) => {
                    let username = self.username.get();
                    self.status.set(Some(format!("Signed in as {username}")));
                    return FormAction::Submit { username };
                }
                None => {}
            },
        }
        FormAction::None
    }

    /// What is under cell `(x, y)` when the form is drawn in `bounds`.
    pub fn hit_test(&self, bounds: Bounds, x: f32, y: f32) -> Option<FormTarget> {
        if !bounds.contains(x, y) {
            return None;
        }
        let row = (y - bounds.top).floor() as u16;
        match row {
            ROW_USERNAME_LABEL | ROW_USERNAME => Some(FormTarget::Field(Field::Username)),
            ROW_PASSWORD_LABEL => Some(FormTarget::Field(Field::Password)),
            ROW_PASSWORD => {
                let toggle_left = bounds.right() - (TOGGLE_SHOW.len() as f32 + 1.0);
                if x >= toggle_left {
                    Some(FormTarget::Toggle)
                } else {
                    Some(FormTarget::Field(Field::Password))
                }
            }
            _ => None,
        }
    }

    /// Apply a click. Clicking outside any field blurs the form.
    pub fn click(&self, bounds: Bounds, x: f32, y: f32) {
        match self.hit_test(bounds, x, y) {
            Some(FormTarget::Field(field)) => self.focus(Some(field)),
            Some(FormTarget::Toggle) => self.toggle_password(),
            None => self.blur(),
        }
    }

    // =========================================================================
    // DRAWING
    // =========================================================================

    fn draw_field(&self, buffer: &mut FrameBuffer, bounds: Bounds, row: u16, field: Field) {
        let (left, top, width) = (bounds.left as u16, bounds.top as u16, bounds.width as u16);
        let y = top + row;
        let focused = self.focused.get() == Some(field);
        buffer.fill_bg(left, y, width, 1, if focused { FIELD_FOCUSED_BG } else { FIELD_BG });

        let text = match field {
            Field::Username => self.username.get(),
            Field::Password if self.password_visible.get() => self.password.get(),
            Field::Password => MASK.to_string().repeat(self.password.get().chars().count()),
        };
        let reserved = if field == Field::Password { TOGGLE_SHOW.len() as u16 + 2 } else { 1 };
        let room = width.saturating_sub(reserved + 1);
        // Keep the end of long input in view.
        let skip = text.chars().count().saturating_sub(room as usize);
        let visible: String = text.chars().skip(skip).collect();
        let written = buffer.draw_text(left + 1, y, &visible, TEXT, false, room);
        if focused {
            buffer.draw_text(left + 1 + written, y, "▏", ACCENT, false, 1);
        }

        if field == Field::Password {
            let label = if self.password_visible.get() { TOGGLE_HIDE } else { TOGGLE_SHOW };
            let x = (left + width).saturating_sub(label.len() as u16 + 1);
            buffer.draw_text(x, y, label, ACCENT, true, label.len() as u16);
        }
    }

    /// Draw into the cells covered by `bounds`. Rows that do not fit are
    /// left out.
    pub fn draw(&self, buffer: &mut FrameBuffer, bounds: Bounds) {
        if bounds.is_degenerate() {
            return;
        }
        let (left, top, width) = (bounds.left as u16, bounds.top as u16, bounds.width as u16);
        let rows = bounds.height as u16;
        let fits = |row: u16| row < rows;

        if fits(ROW_TITLE) {
            buffer.draw_text(left, top + ROW_TITLE, "Welcome back!", TEXT, true, width);
        }
        if fits(ROW_USERNAME_LABEL) {
            buffer.draw_text(left, top + ROW_USERNAME_LABEL, "Username", MUTED, false, width);
        }
        if fits(ROW_USERNAME) {
            self.draw_field(buffer, bounds, ROW_USERNAME, Field::Username);
        }
        if fits(ROW_PASSWORD_LABEL) {
            buffer.draw_text(left, top + ROW_PASSWORD_LABEL, "Password", MUTED, false, width);
        }
        if fits(ROW_PASSWORD) {
            self.draw_field(buffer, bounds, ROW_PASSWORD, Field::Password);
        }
        if fits(ROW_STATUS) {
            if let Some(status) = self.status.get() {
                buffer.draw_text(left, top + ROW_STATUS, &status, ACCENT, true, width);
            }
        }
        if fits(ROW_HINT) {
            buffer.draw_text(
                left,
                top + ROW_HINT,
                "Tab next · F2 show · Esc blur · ^C quit",
                MUTED,
                false,
                width,
            );
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username.get())
            .field("focused", &self.focused.get())
            .field("password_visible", &self.password_visible.get())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================
