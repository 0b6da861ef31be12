#![allow(missing_docs)]

//! Authenticated session against the local client API.

pub mod region;
mod request;

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::{
    discovery::Credentials,
    error::{Error, Result},
    gateway::HttpGateway,
};

pub use request::LOOPBACK_ORIGIN;

static SESSION: OnceCell<Arc<Session>> = OnceCell::new();

/// Read-only access to the local API, as used by the cache and the lookups.
pub trait LocalApi: Send + Sync {
    /// `GET` an endpoint (relative or absolute) and return the raw body.
    fn get(&self, endpoint: &str) -> Result<Vec<u8>>;

    /// Scheme, host and port that relative asset paths resolve against.
    fn origin(&self) -> String;
}

/// Connection state for one client launch. Immutable once built.
pub struct Session {
    credentials: Credentials,
    auth_header: String,
    display_region: String,
    gateway: Arc<HttpGateway>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field("display_region", &self.display_region)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build a standalone session that sends through `gateway`.
    pub fn new(credentials: Credentials, gateway: Arc<HttpGateway>) -> Self {
        let auth_header = basic_auth_header(&credentials.token);
        let display_region = region::display_region(credentials.region.as_deref());
        Self {
            credentials,
            auth_header,
            display_region,
            gateway,
        }
    }

    /// Initialise the process-wide session. Only the first call has an
    /// effect; later calls return the session that already exists.
    pub fn init(credentials: Credentials) -> Result<Arc<Session>> {
        if let Some(existing) = SESSION.get() {
            debug!("session already initialised; ignoring new credentials");
            return Ok(existing.clone());
        }

        SESSION
            .get_or_try_init(|| {
                let gateway = HttpGateway::shared()?;
                let session = Session::new(credentials, gateway);
                info!(
                    "initialised session on port {} (region {})",
                    session.port(),
                    session.display_region()
                );
                Ok(Arc::new(session))
            })
            .cloned()
    }

    /// The process-wide session, if [`Session::init`] has run.
    pub fn instance() -> Option<Arc<Session>> {
        SESSION.get().cloned()
    }

    /// Like [`Session::instance`], reporting absence as an error.
    pub fn require() -> Result<Arc<Session>> {
        Self::instance().ok_or(Error::ConfigNotInitialized)
    }

    pub fn port(&self) -> u16 {
        self.credentials.port
    }

    /// Value sent in the `Authorization` header.
    pub fn auth_header(&self) -> &str {
        &self.auth_header
    }

    /// Raw platform id reported by the client.
    pub fn region_code(&self) -> Option<&str> {
        self.credentials.region.as_deref()
    }

    /// Human-readable server name; empty when the region is unknown.
    pub fn display_region(&self) -> &str {
        &self.display_region
    }

    pub fn gateway(&self) -> &Arc<HttpGateway> {
        &self.gateway
    }
}

impl LocalApi for Session {
    fn get(&self, endpoint: &str) -> Result<Vec<u8>> {
        self.send_request(endpoint, reqwest::Method::GET)
    }

    fn origin(&self) -> String {
        format!("{}:{}", LOOPBACK_ORIGIN, self.port())
    }
}

/// `Basic base64("riot:<token>")`
pub fn basic_auth_header(token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("riot:{token}")))
}
