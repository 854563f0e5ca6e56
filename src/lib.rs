//! Burrow library exports for testing

pub mod core;
pub mod protocol;
pub mod tui;

#[cfg(test)]
pub mod test_support;
