//! # TUI Adapter
//!
//! The crossterm-specific layer. Puts the terminal in raw mode, reads keys
//! and appends pages, prompts and messages to the screen.
//!
//! This is the only module that knows about crossterm. The browsing loop
//! itself lives in [`session`] and is driven here with real stdin/stdout.
//!
//! ## Output Strategy
//!
//! There is no alternate screen and no redraw: output scrolls like a pager.
//! The terminal size is re-read before every key is handled so a resized
//! window gets correctly sized chunks on the next page.

mod event;
pub mod screen;
pub mod session;

use log::{info, warn};
use std::io::{self, Write, stdout};

use crossterm::terminal;

use crate::core::config::ResolvedConfig;
use crate::core::pager::Viewport;
use crate::core::state::App;
use crate::protocol::render::{render_json, render_menu};
use crate::protocol::{Menu, TcpTransport, Target, Transport};

pub use session::{Session, SessionError};

/// Raw mode for the lifetime of the guard; restored on drop, including
/// on early return and panic unwinding.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        info!("Raw mode enabled");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to restore terminal: {}", e);
        } else {
            info!("Terminal restored");
        }
    }
}

/// Build the TCP transport from a resolved config.
pub fn build_transport(config: &ResolvedConfig) -> TcpTransport {
    TcpTransport::new(
        config.connect_timeout,
        config.read_timeout,
        config.max_response_bytes,
    )
}

fn current_viewport() -> Viewport {
    match terminal::size() {
        Ok((columns, rows)) => Viewport::new(rows, columns),
        Err(e) => {
            warn!("Could not read terminal size, assuming 80x24: {}", e);
            Viewport::default()
        }
    }
}

/// Run an interactive session until the user quits.
pub async fn run(config: ResolvedConfig) -> Result<(), SessionError> {
    let transport = build_transport(&config);
    let app = App::new(config.status_margin, config.max_history);

    let _guard = TerminalModeGuard::new()?;
    let mut session = Session::new(app, transport, stdout());
    session.set_viewport(current_viewport());
    session.start(config.start_target()).await?;

    loop {
        let key = event::read_key()?;
        session.set_viewport(current_viewport());
        if !session.handle_key(key).await? {
            break;
        }
    }
    Ok(())
}

/// Fetch a single menu and print it, as text or as JSON records.
pub async fn print_once<T: Transport, W: Write>(
    transport: &T,
    target: &Target,
    json: bool,
    out: &mut W,
) -> Result<(), SessionError> {
    let response = transport
        .fetch(target)
        .await
        .map_err(SessionError::Start)?;
    if response.truncated {
        warn!("Response from {} truncated at {} bytes", target, response.body.len());
    }
    let menu = Menu::from_bytes(&response.body);
    if json {
        writeln!(out, "{}", render_json(&menu)?)?;
    } else {
        out.write_all(render_menu(&menu).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Non-interactive mode: print the start page to stdout and exit.
pub async fn run_once(config: &ResolvedConfig, json: bool) -> Result<(), SessionError> {
    let transport = build_transport(config);
    let mut out = stdout().lock();
    print_once(&transport, &config.start_target(), json, &mut out).await
}
