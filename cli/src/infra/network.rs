//! Network infrastructure: implements `PortProbe` with a bounded TCP connect.

use std::time::Duration;

use tokio::net::TcpStream;
use tracing::debug;

use crate::application::ports::PortProbe;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Production implementation that performs real TCP connects.
pub struct TcpPortProbe;

impl PortProbe for TcpPortProbe {
    async fn is_listening(&self, host: &str, port: u16) -> bool {
        let connect = TcpStream::connect((host, port));
        match tokio::time::timeout(CONNECT_TIMEOUT, connect).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                debug!(host, port, error = %e, "connect failed");
                false
            }
            Err(_) => {
                debug!(host, port, "connect timed out");
                false
            }
        }
    }
}
