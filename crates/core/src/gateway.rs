//! Shared HTTPS client for talking to the local client API.

use std::{sync::Arc, time::Duration};

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use reqwest::blocking::{Client, Request, Response};
use tracing::debug;

use crate::error::Result;

/// Timeout applied when the gateway is created without configuration.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

static SHARED: OnceCell<Arc<HttpGateway>> = OnceCell::new();

/// Process-wide HTTP client wrapper.
///
/// The peer serves a locally generated certificate, so certificate validation
/// is disabled. The client can be replaced at runtime (tests swap in their own
/// client); readers clone the current handle under a read lock.
pub struct HttpGateway {
    client: RwLock<Client>,
    timeout: Duration,
}

impl HttpGateway {
    /// Build a gateway with a fresh client bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: RwLock::new(build_client(timeout)?),
            timeout,
        })
    }

    /// Install the process-wide gateway. The first caller fixes the timeout;
    /// later calls return the existing instance unchanged.
    pub fn install(timeout: Duration) -> Result<Arc<HttpGateway>> {
        SHARED
            .get_or_try_init(|| {
                debug!("installing shared http gateway (timeout {:?})", timeout);
                HttpGateway::new(timeout).map(Arc::new)
            })
            .cloned()
    }

    /// The process-wide gateway, created with [`DEFAULT_TIMEOUT`] if nothing
    /// was installed yet.
    pub fn shared() -> Result<Arc<HttpGateway>> {
        Self::install(DEFAULT_TIMEOUT)
    }

    /// Timeout the gateway was created with.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Current client handle. `Client` is reference counted, so this is cheap.
    pub fn client(&self) -> Client {
        self.client.read().clone()
    }

    /// Replace the underlying client.
    pub fn set_client(&self, client: Client) {
        *self.client.write() = client;
    }

    /// Execute a prepared request with the current client.
    pub fn execute(&self, request: Request) -> Result<Response> {
        let client = self.client();
        Ok(client.execute(request)?)
    }
}

fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(timeout)
        .build()?;
    Ok(client)
}
