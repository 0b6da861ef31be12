use reqwest::{
    blocking::Request,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::Session;
use crate::error::{Error, Result};

/// Scheme and host of the local client API; the port comes from the session.
pub const LOOPBACK_ORIGIN: &str = "https://127.0.0.1";

impl Session {
    /// Absolute URL for `endpoint`. Absolute endpoints are returned untouched.
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}:{}{}", LOOPBACK_ORIGIN, self.port(), endpoint)
        }
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.credentials.port == 0 {
            warn!("refusing request: invalid port {}", self.credentials.port);
            return Err(Error::InvalidPort(self.credentials.port));
        }
        if self.credentials.token.is_empty() {
            warn!("refusing request: authorization token is empty");
            return Err(Error::EmptyToken);
        }
        Ok(())
    }

    /// Build an authenticated request without sending it.
    pub fn build_request(&self, endpoint: &str, method: Method) -> Result<Request> {
        self.ensure_usable()?;

        let request = self
            .gateway
            .client()
            .request(method, self.url_for(endpoint))
            .header(AUTHORIZATION, self.auth_header.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "*/*")
            .build()?;
        Ok(request)
    }

    /// Send an authenticated request and return the body of a 2xx response.
    pub fn send_request(&self, endpoint: &str, method: Method) -> Result<Vec<u8>> {
        let request = self.build_request(endpoint, method)?;
        info!("sending {} {}", request.method(), request.url());

        let response = self.gateway.execute(request)?;
        let status = response.status();
        debug!("received status {}", status.as_u16());

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or_default().to_string();
            warn!("http request failed with status: {} {}", status.as_u16(), reason);
            return Err(Error::HttpStatus {
                code: status.as_u16(),
                status: reason,
            });
        }

        let body = response.bytes()?.to_vec();
        debug!("received {} bytes", body.len());
        Ok(body)
    }

    /// `GET` an endpoint and decode the JSON body.
    pub fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let body = self.send_request(endpoint, Method::GET)?;
        Ok(serde_json::from_slice(&body)?)
    }
}
