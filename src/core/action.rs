//! # Actions
//!
//! Everything that can happen while browsing becomes an `Action`.
//! User confirms `3`? That's `Action::Command(Command::Select(3))`.
//! A fetch completes? That's `Action::Loaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` describing the I/O to perform next.
//! No sockets or terminal writes happen here.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```

use log::{debug, info, warn};

use crate::core::state::{App, View};
use crate::protocol::{ItemKind, Menu, Response, Target, TransportError};

/// Navigation commands emitted by the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open the record with this selection number.
    Select(usize),
    NavigateUp,
    ShowMore,
    Quit,
}

/// How a fetched body should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Menu,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub target: Target,
    pub kind: RequestKind,
}

impl Request {
    pub fn menu(target: Target) -> Self {
        Self {
            target,
            kind: RequestKind::Menu,
        }
    }

    pub fn text(target: Target) -> Self {
        Self {
            target,
            kind: RequestKind::Text,
        }
    }
}

#[derive(Debug)]
pub enum Action {
    Command(Command),
    Loaded { request: Request, response: Response },
    FetchFailed { request: Request, error: TransportError },
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        Action::Command(command)
    }
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Fetch and feed the result back as `Loaded` or `FetchFailed`.
    Fetch(Request),
    /// The pager was replaced: show its first chunk.
    Render,
    /// Show the next chunk of the current pager.
    ShowMore,
    /// Print `status_message`; the page is unchanged.
    Notify,
    Quit,
    /// Unrecoverable; end the session with this message.
    Fatal(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Command(command) => handle_command(app, command),
        Action::Loaded { request, response } => {
            let truncated = response.truncated;
            match request.kind {
                RequestKind::Menu => {
                    let menu = Menu::from_bytes(&response.body);
                    info!(
                        "Parsed {} records ({} selectable) from {}",
                        menu.records().len(),
                        menu.selectable_count(),
                        request.target
                    );
                    if let Err(e) = app.history.push(menu) {
                        warn!("Not opening {}: {}", request.target, e);
                        app.notify(e.to_string());
                        return Effect::Notify;
                    }
                    app.show_current_menu();
                }
                RequestKind::Text => {
                    info!("Opened text {} ({} bytes)", request.target, response.body.len());
                    app.show_text(&response.body);
                }
            }
            app.status_message = truncated
                .then(|| format!("response truncated at {} bytes", response.body.len()));
            Effect::Render
        }
        Action::FetchFailed { request, error } => {
            warn!("Fetch of {} failed: {}", request.target, error);
            if error.is_fatal() {
                return Effect::Fatal(error.user_message());
            }
            app.notify(error.user_message());
            Effect::Notify
        }
    }
}

fn handle_command(app: &mut App, command: Command) -> Effect {
    match command {
        Command::Quit => Effect::Quit,
        Command::ShowMore => {
            if app.pager.has_more() {
                Effect::ShowMore
            } else {
                Effect::None
            }
        }
        Command::NavigateUp => match app.view {
            // A text file is a leaf: leaving it shows the menu it came from.
            View::Text => {
                app.show_current_menu();
                Effect::Render
            }
            View::Menu => {
                if app.history.pop() {
                    debug!("Back to depth {}", app.history.depth());
                    app.show_current_menu();
                    Effect::Render
                } else {
                    debug!("Already at the root page");
                    Effect::None
                }
            }
            View::Empty => Effect::None,
        },
        Command::Select(index) => {
            let menu = match app.history.current() {
                Ok(menu) => menu,
                Err(e) => {
                    app.notify(e.to_string());
                    return Effect::Notify;
                }
            };
            let Some(record) = menu.get(index) else {
                debug!("No item {} (menu has {})", index, menu.selectable_count());
                app.notify(format!("no item {index}"));
                return Effect::Notify;
            };
            let Some(target) = record.target() else {
                debug!("Item {} has no host/port: {:?}", index, record);
                app.notify(format!("item {index} has no address"));
                return Effect::Notify;
            };
            match record.kind {
                ItemKind::Directory => Effect::Fetch(Request::menu(target)),
                _ => Effect::Fetch(Request::text(target)),
            }
        }
    }
}
