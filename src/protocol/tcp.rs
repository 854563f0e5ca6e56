//! TCP transport.
//!
//! One connection per request: connect, write `selector\r\n`, read until the
//! server closes. The read side stops at `max_response_bytes` and flags the
//! response as truncated rather than growing without bound.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use super::transport::{DEFAULT_MAX_RESPONSE_BYTES, Response, Transport, TransportError};
use super::types::Target;

const READ_CHUNK: usize = 4096;

pub struct TcpTransport {
    connect_timeout: Duration,
    read_timeout: Duration,
    max_response_bytes: usize,
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(10),
            Duration::from_secs(30),
            DEFAULT_MAX_RESPONSE_BYTES,
        )
    }
}

impl TcpTransport {
    pub fn new(connect_timeout: Duration, read_timeout: Duration, max_response_bytes: usize) -> Self {
        Self {
            connect_timeout,
            read_timeout,
            max_response_bytes,
        }
    }

    async fn connect(&self, target: &Target) -> Result<TcpStream, TransportError> {
        let endpoint = target.endpoint();
        let connect_err = |reason: String| TransportError::Connect {
            endpoint: endpoint.clone(),
            reason,
        };

        let port: u16 = target
            .port
            .trim()
            .parse()
            .map_err(|_| connect_err(format!("invalid port '{}'", target.port)))?;

        match tokio::time::timeout(
            self.connect_timeout,
            TcpStream::connect((target.host.as_str(), port)),
        )
        .await
        {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(connect_err(e.to_string())),
            Err(_) => Err(connect_err(format!(
                "timed out after {}s",
                self.connect_timeout.as_secs()
            ))),
        }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    fn name(&self) -> &str {
        "tcp"
    }

    async fn fetch(&self, target: &Target) -> Result<Response, TransportError> {
        info!("Fetching {}", target);
        let stream = self.connect(target).await?;
        let response = exchange(
            stream,
            &target.endpoint(),
            &target.selector,
            self.max_response_bytes,
            self.read_timeout,
        )
        .await?;
        info!(
            "Fetched {} bytes from {}{}",
            response.body.len(),
            target.endpoint(),
            if response.truncated { " (truncated)" } else { "" }
        );
        Ok(response)
    }
}

/// Write the request line and buffer the reply from an already-open stream.
pub async fn exchange<S>(
    mut stream: S,
    endpoint: &str,
    selector: &str,
    max_bytes: usize,
    read_timeout: Duration,
) -> Result<Response, TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let send_err = |e: std::io::Error| TransportError::Send {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    };
    let request = format!("{selector}\r\n");
    stream
        .write_all(request.as_bytes())
        .await
        .map_err(send_err)?;
    stream.flush().await.map_err(send_err)?;
    debug!("Sent {} byte request to {}", request.len(), endpoint);

    let recv_err = |reason: String| TransportError::Receive {
        endpoint: endpoint.to_string(),
        reason,
    };

    let mut body: Vec<u8> = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = match tokio::time::timeout(read_timeout, stream.read(&mut chunk)).await {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(recv_err(e.to_string())),
            Err(_) => {
                return Err(recv_err(format!(
                    "no data for {}s",
                    read_timeout.as_secs()
                )));
            }
        };
        if n == 0 {
            break;
        }

        let room = max_bytes - body.len();
        let take = n.min(room);
        body.try_reserve(take)
            .map_err(|_| TransportError::OutOfMemory)?;
        body.extend_from_slice(&chunk[..take]);

        if take < n {
            warn!(
                "Response from {} exceeded {} bytes, truncating",
                endpoint, max_bytes
            );
            return Ok(Response {
                body,
                truncated: true,
            });
        }
    }

    Ok(Response {
        body,
        truncated: false,
    })
}
