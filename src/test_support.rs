//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::state::App;
use crate::protocol::{Response, Target, Transport, TransportError};

/// An in-memory server keyed by selector. Unknown selectors fail to connect.
#[derive(Default)]
pub struct StubTransport {
    pages: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<Target>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, selector: &str, body: &[u8]) -> Self {
        self.pages.insert(selector.to_string(), body.to_vec());
        self
    }

    /// Every target fetched so far, in order.
    pub fn requests(&self) -> Vec<Target> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch(&self, target: &Target) -> Result<Response, TransportError> {
        self.requests.lock().unwrap().push(target.clone());
        match self.pages.get(&target.selector) {
            Some(body) => Ok(Response {
                body: body.clone(),
                truncated: false,
            }),
            None => Err(TransportError::Connect {
                endpoint: target.endpoint(),
                reason: "no stub page".to_string(),
            }),
        }
    }
}

/// A test App with the default margin and no history limit.
pub fn test_app() -> App {
    App::default()
}
