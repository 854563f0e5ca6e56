//! The interactive loop body, independent of the real terminal.
//!
//! A `Session` owns the browsing state, the input machine, a transport and
//! an output sink. Each keypress goes through the input machine, then
//! `update()`, then the resulting effects are carried out until the
//! session is idle again.

use std::fmt;
use std::io::{self, Write};

use log::{debug, info, warn};

use crate::core::action::{Action, Effect, Request, update};
use crate::core::input::{InputMachine, InputState, Key};
use crate::core::pager::Viewport;
use crate::core::state::App;
use crate::protocol::{Target, Transport, TransportError};
use crate::tui::screen::Screen;

#[derive(Debug)]
pub enum SessionError {
    Io(io::Error),
    /// The first page could not be fetched, so there is nothing to browse.
    Start(TransportError),
    Fatal(String),
    Encode(serde_json::Error),
}

impl SessionError {
    /// One line for the user after the terminal has been restored.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Io(e) => format!("terminal error: {e}"),
            SessionError::Start(e) => e.user_message(),
            SessionError::Fatal(message) => message.clone(),
            SessionError::Encode(e) => format!("can't encode records: {e}"),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "terminal I/O error: {e}"),
            SessionError::Start(e) => write!(f, "initial fetch failed: {e}"),
            SessionError::Fatal(message) => write!(f, "fatal: {message}"),
            SessionError::Encode(e) => write!(f, "JSON encoding failed: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        SessionError::Io(e)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::Encode(e)
    }
}

pub struct Session<T: Transport, W: Write> {
    app: App,
    input: InputMachine,
    transport: T,
    screen: Screen<W>,
    viewport: Viewport,
}

impl<T: Transport, W: Write> Session<T, W> {
    pub fn new(app: App, transport: T, out: W) -> Self {
        Self {
            app,
            input: InputMachine::new(),
            transport,
            screen: Screen::new(out),
            viewport: Viewport::default(),
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn screen(&self) -> &Screen<W> {
        &self.screen
    }

    pub fn is_finished(&self) -> bool {
        self.input.state() == InputState::Quitting
    }

    /// Fetch and show the first menu. Failure ends the session.
    pub async fn start(&mut self, target: Target) -> Result<(), SessionError> {
        info!("Session starting at {} via {}", target, self.transport.name());
        let request = Request::menu(target);
        let response = self
            .transport
            .fetch(&request.target)
            .await
            .map_err(SessionError::Start)?;
        let effect = update(&mut self.app, Action::Loaded { request, response });
        self.apply(effect).await?;
        Ok(())
    }

    /// Feed one keypress through the machine.
    ///
    /// Returns `Ok(false)` once the user has quit.
    pub async fn handle_key(&mut self, key: Key) -> Result<bool, SessionError> {
        let step = self.input.handle(key, self.app.pager.has_more());
        if let Some(echo) = step.echo {
            self.screen.echo(echo)?;
        }
        let Some(command) = step.command else {
            return Ok(true);
        };
        debug!("Command: {:?}", command);
        let effect = update(&mut self.app, command.into());
        self.apply(effect).await
    }

    async fn apply(&mut self, mut effect: Effect) -> Result<bool, SessionError> {
        loop {
            effect = match effect {
                Effect::Fetch(request) => {
                    let action = match self.transport.fetch(&request.target).await {
                        Ok(response) => Action::Loaded { request, response },
                        Err(error) => Action::FetchFailed { request, error },
                    };
                    update(&mut self.app, action)
                }
                Effect::Render => {
                    self.screen.page_break()?;
                    self.show_chunk()?;
                    return Ok(true);
                }
                Effect::ShowMore => {
                    self.show_chunk()?;
                    return Ok(true);
                }
                Effect::Notify => {
                    self.show_status()?;
                    return Ok(true);
                }
                Effect::None => return Ok(true),
                Effect::Quit => {
                    info!("User quit");
                    self.screen.end_line()?;
                    return Ok(false);
                }
                Effect::Fatal(message) => {
                    warn!("Ending session: {}", message);
                    self.screen.message(&message)?;
                    return Err(SessionError::Fatal(message));
                }
            };
        }
    }

    fn show_chunk(&mut self) -> io::Result<()> {
        let chunk = self.app.pager.next_chunk(self.viewport);
        self.screen.write_text(chunk.text)?;
        if chunk.percent_remaining > 0.0 {
            self.screen.more_indicator(chunk.percent_remaining)?;
        }
        self.show_status()
    }

    fn show_status(&mut self) -> io::Result<()> {
        if let Some(message) = self.app.take_status() {
            self.screen.message(&message)?;
        }
        Ok(())
    }
}
