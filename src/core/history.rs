//! # Navigation History
//!
//! A stack of visited menus. Bottom is the first page loaded in the session,
//! top is the one being displayed. Going back never removes the root entry.

use std::fmt;

use crate::protocol::Menu;

/// No page has been loaded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoCurrentPage;

impl fmt::Display for NoCurrentPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no page loaded")
    }
}

impl std::error::Error for NoCurrentPage {}

/// The configured depth limit was reached; the menu was not pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryFull {
    pub limit: usize,
}

impl fmt::Display for HistoryFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "history limit of {} pages reached", self.limit)
    }
}

impl std::error::Error for HistoryFull {}

#[derive(Debug, Default)]
pub struct NavigationStack {
    pages: Vec<Menu>,
    limit: Option<usize>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack that refuses to grow past `limit` pages.
    ///
    /// The root page always fits, so a limit below 1 counts as 1.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            pages: Vec::new(),
            limit: limit.map(|l| l.max(1)),
        }
    }

    /// Make `menu` the current page.
    pub fn push(&mut self, menu: Menu) -> Result<(), HistoryFull> {
        if let Some(limit) = self.limit
            && self.pages.len() >= limit
        {
            return Err(HistoryFull { limit });
        }
        self.pages.push(menu);
        Ok(())
    }

    /// Drop the current page and return to the one below it.
    ///
    /// Returns `false` and leaves the stack untouched at depth 1 (or 0).
    pub fn pop(&mut self) -> bool {
        if self.pages.len() <= 1 {
            return false;
        }
        self.pages.pop();
        true
    }

    pub fn current(&self) -> Result<&Menu, NoCurrentPage> {
        self.pages.last().ok_or(NoCurrentPage)
    }

    pub fn depth(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
