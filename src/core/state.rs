//! # Application State
//!
//! Core browsing state. This module contains domain logic only -
//! no terminal types. Key handling state lives in [`super::input`].
//!
//! ```text
//! App
//! ├── history: NavigationStack     // visited menus, top = current
//! ├── view: View                   // what the pager is showing
//! ├── pager: Pager                 // rendered text + cursor
//! ├── status_margin: u16           // rows reserved below each chunk
//! └── status_message: Option       // one-shot message for the next redraw
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::history::NavigationStack;
use crate::core::pager::{DEFAULT_STATUS_MARGIN, Pager};
use crate::protocol::render::{render_menu, render_text};

/// What the pager currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Nothing fetched yet.
    #[default]
    Empty,
    /// The menu on top of the history stack.
    Menu,
    /// A text file opened from the current menu. Not part of the history.
    Text,
}

pub struct App {
    pub history: NavigationStack,
    pub view: View,
    pub pager: Pager,
    pub status_margin: u16,
    pub status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_MARGIN, None)
    }
}

impl App {
    pub fn new(status_margin: u16, max_history: Option<usize>) -> Self {
        Self {
            history: NavigationStack::with_limit(max_history),
            view: View::Empty,
            pager: Pager::default(),
            status_margin,
            status_message: None,
        }
    }

    /// Re-render the top of the history into a fresh pager.
    pub fn show_current_menu(&mut self) {
        if let Ok(menu) = self.history.current() {
            self.pager = Pager::new(render_menu(menu), self.status_margin);
            self.view = View::Menu;
        }
    }

    /// Replace the pager contents with a text document.
    pub fn show_text(&mut self, raw: &[u8]) {
        self.pager = Pager::new(render_text(raw), self.status_margin);
        self.view = View::Text;
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn take_status(&mut self) -> Option<String> {
        self.status_message.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Menu;

    #[test]
    fn test_app_new_defaults() {
        let app = App::default();
        assert_eq!(app.view, View::Empty);
        assert!(app.history.is_empty());
        assert!(!app.pager.has_more());
        assert_eq!(app.status_margin, DEFAULT_STATUS_MARGIN);
    }

    #[test]
    fn test_show_current_menu_resets_pager() {
        let mut app = App::default();
        app.history
            .push(Menu::from_bytes(b"1Dir\t/d\th\t70\r\n"))
            .unwrap();
        app.show_current_menu();
        assert_eq!(app.view, View::Menu);
        assert_eq!(app.pager.content(), "(1) Dir/\n");
        assert_eq!(app.pager.cursor(), 0);
    }

    #[test]
    fn test_show_current_menu_without_history_keeps_view() {
        let mut app = App::default();
        app.show_current_menu();
        assert_eq!(app.view, View::Empty);
    }

    #[test]
    fn test_take_status_clears() {
        let mut app = App::default();
        app.notify("hello");
        assert_eq!(app.take_status().as_deref(), Some("hello"));
        assert!(app.take_status().is_none());
    }
}
