//! # Core Browsing Logic
//!
//! This module contains Burrow's business logic.
//! It knows nothing about terminals or sockets.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (App)          │
//!                    │  • Action / Effect      │
//!                    │  • update() (reducer)   │
//!                    │  • history, pager,      │
//!                    │    input machine        │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │  Protocol  │
//!           │  Adapter   │              │ (transport │
//!           │(crossterm) │              │  + parser) │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all browsing state in one place
//! - [`action`]: `Command`, `Action` and `Effect`, plus `update()`
//! - [`history`]: The navigation stack
//! - [`pager`]: Viewport-sized chunking of rendered text
//! - [`input`]: Keypress state machine
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod history;
pub mod input;
pub mod pager;
pub mod state;
