//! # Protocol Layer
//!
//! Everything that knows about the wire format: typed records, the menu
//! parser, text rendering and the transport that moves bytes.
//!
//! ```text
//! Target ──► Transport::fetch ──► Response { body, truncated }
//!                                      │
//!                    ┌─────────────────┴─────────────────┐
//!                    ▼                                   ▼
//!           parser::parse → Menu                render::render_text
//!                    │
//!                    ▼
//!           render::render_menu
//! ```

pub mod parser;
pub mod render;
pub mod tcp;
pub mod transport;
pub mod types;

pub use tcp::TcpTransport;
pub use transport::{Response, Transport, TransportError};
pub use types::{ItemKind, Menu, Record, Target};
