//! Discovery of the per-launch connection credentials of the local client.

/// Operating-system process table access.
pub mod process;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CredentialField, Error, Result};

pub use process::{ProcessEntry, ProcessTable, SystemProcessTable};

/// Process name of the League client UX host.
pub const DEFAULT_PROCESS_NAME: &str = if cfg!(windows) {
    "LeagueClientUx.exe"
} else {
    "LeagueClientUx"
};

static PORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)--app-port[=\s]+(\d+)").expect("invalid port regex"));
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)--remoting-auth-token[=\s]+([\w-]+)").expect("invalid token regex")
});
static REGION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)--rso_platform_id[=\s]+([\w-]+)").expect("invalid region regex")
});

/// Connection details for the local client API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Loopback port the API listens on.
    pub port: u16,
    /// Remoting auth token. Never logged.
    pub token: String,
    /// Platform id such as `HN1` or `EUW1`, when known.
    pub region: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("port", &self.port)
            .field("token", &format_args!("<{} chars>", self.token.len()))
            .field("region", &self.region)
            .finish()
    }
}

/// Whether a missing `--rso_platform_id` fails discovery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionPolicy {
    /// Missing region is reported as `None`.
    #[default]
    Optional,
    /// Missing region is a [`CredentialField::Region`] failure.
    Required,
}

/// Anything that can produce credentials for the session.
pub trait DiscoverCredentials {
    /// Locate the credentials. Absence of the client is an error, not a panic.
    fn discover(&self) -> Result<Credentials>;
}

/// Discovery that inspects the launch arguments of the running client.
#[derive(Debug, Clone)]
pub struct ProcessDiscovery<T> {
    table: T,
    process_name: String,
    region_policy: RegionPolicy,
}

impl ProcessDiscovery<SystemProcessTable> {
    /// Discovery against the real OS process table.
    pub fn system(process_name: impl Into<String>, region_policy: RegionPolicy) -> Self {
        Self::new(SystemProcessTable, process_name, region_policy)
    }
}

impl<T: ProcessTable> ProcessDiscovery<T> {
    /// Discovery over an arbitrary process table.
    pub fn new(table: T, process_name: impl Into<String>, region_policy: RegionPolicy) -> Self {
        Self {
            table,
            process_name: process_name.into(),
            region_policy,
        }
    }
}

impl<T: ProcessTable> DiscoverCredentials for ProcessDiscovery<T> {
    fn discover(&self) -> Result<Credentials> {
        let command_line = self
            .table
            .command_line(&self.process_name)?
            .ok_or_else(|| Error::missing(CredentialField::Process))?;
        debug!(
            "read {} bytes of launch arguments for {}",
            command_line.len(),
            self.process_name
        );

        let credentials = parse_credentials(&command_line, self.region_policy)?;
        info!(
            "detected client on port {} (token length {}, region {})",
            credentials.port,
            credentials.token.len(),
            credentials.region.as_deref().unwrap_or("-")
        );
        Ok(credentials)
    }
}

/// Credentials supplied up front, e.g. from configuration overrides.
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Credentials);

impl DiscoverCredentials for StaticCredentials {
    fn discover(&self) -> Result<Credentials> {
        Ok(self.0.clone())
    }
}

/// Parse port, token and region out of a launch-argument dump.
pub fn parse_credentials(text: &str, region_policy: RegionPolicy) -> Result<Credentials> {
    let text = normalize_line_endings(text);

    let port = extract_port(&text)?;
    let token = extract_token(&text)?;
    let region = match extract_region(&text) {
        Ok(region) => Some(region),
        Err(_) if region_policy == RegionPolicy::Optional => None,
        Err(err) => return Err(err),
    };

    Ok(Credentials {
        port,
        token,
        region,
    })
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Port after `--app-port`. Zero or out-of-range values count as missing.
pub fn extract_port(text: &str) -> Result<u16> {
    capture(&PORT_RE, text)
        .and_then(|raw| raw.parse::<u16>().ok())
        .filter(|port| *port > 0)
        .ok_or_else(|| Error::missing(CredentialField::Port))
}

/// Token after `--remoting-auth-token`.
pub fn extract_token(text: &str) -> Result<String> {
    capture(&TOKEN_RE, text)
        .map(str::to_string)
        .ok_or_else(|| Error::missing(CredentialField::Token))
}

/// Platform id after `--rso_platform_id`.
pub fn extract_region(text: &str) -> Result<String> {
    capture(&REGION_RE, text)
        .map(str::to_string)
        .ok_or_else(|| Error::missing(CredentialField::Region))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_field(result: Result<Credentials>) -> CredentialField {
        match result {
            Err(Error::CredentialNotFound { field }) => field,
            other => panic!("expected CredentialNotFound, got {other:?}"),
        }
    }

    #[test]
    fn extracts_all_fields_in_any_order_and_case() {
        let samples = [
            r#""C:/Riot Games/LeagueClientUx.exe" --app-port=56737 --remoting-auth-token=abc-1 --rso_platform_id=HN1"#,
            "--RSO_PLATFORM_ID HN1 --Remoting-Auth-Token abc-1 --APP-PORT 56737",
            "--remoting-auth-token=abc-1\r\n--rso_platform_id=HN1\r--app-port 56737",
        ];

        for sample in samples {
            let creds = parse_credentials(sample, RegionPolicy::Required).unwrap();
            assert_eq!(creds.port, 56737, "sample: {sample}");
            assert_eq!(creds.token, "abc-1", "sample: {sample}");
            assert_eq!(creds.region.as_deref(), Some("HN1"), "sample: {sample}");
        }
    }

    #[test]
    fn token_keeps_word_characters_and_hyphens_verbatim() {
        let creds = parse_credentials(
            "--app-port=1 --remoting-auth-token=Zx_9-kQ-- --other",
            RegionPolicy::Optional,
        )
        .unwrap();
        assert_eq!(creds.token, "Zx_9-kQ--");
    }

    #[test]
    fn missing_fields_are_reported_individually() {
        assert_eq!(
            missing_field(parse_credentials(
                "--remoting-auth-token=t --rso_platform_id=NA1",
                RegionPolicy::Required
            )),
            CredentialField::Port
        );
        assert_eq!(
            missing_field(parse_credentials(
                "--app-port=1234 --rso_platform_id=NA1",
                RegionPolicy::Required
            )),
            CredentialField::Token
        );
        assert_eq!(
            missing_field(parse_credentials(
                "--app-port=1234 --remoting-auth-token=t",
                RegionPolicy::Required
            )),
            CredentialField::Region
        );

        // Each extractor is independent of the others.
        assert!(extract_token("--remoting-auth-token=t").is_ok());
        assert!(extract_region("--rso_platform_id=KR").is_ok());
    }

    #[test]
    fn optional_region_policy_tolerates_missing_region() {
        let creds =
            parse_credentials("--app-port 4000 --remoting-auth-token tok", RegionPolicy::Optional)
                .unwrap();
        assert_eq!(creds.port, 4000);
        assert_eq!(creds.region, None);
    }

    #[test]
    fn rejects_zero_and_out_of_range_ports() {
        assert!(extract_port("--app-port=0").is_err());
        assert!(extract_port("--app-port=70000").is_err());
    }

    struct FixedTable(Option<&'static str>);

    impl ProcessTable for FixedTable {
        fn command_line(&self, _process_name: &str) -> Result<Option<String>> {
            Ok(self.0.map(str::to_string))
        }
    }

    #[test]
    fn absent_process_is_reported() {
        let discovery =
            ProcessDiscovery::new(FixedTable(None), DEFAULT_PROCESS_NAME, RegionPolicy::Optional);
        assert_eq!(missing_field(discovery.discover()), CredentialField::Process);
    }

    #[test]
    fn discovers_through_process_table() {
        let discovery = ProcessDiscovery::new(
            FixedTable(Some("LeagueClientUx --app-port=56737 --remoting-auth-token=abc-1")),
            DEFAULT_PROCESS_NAME,
            RegionPolicy::Optional,
        );
        let creds = discovery.discover().unwrap();
        assert_eq!(creds.port, 56737);
        assert_eq!(creds.token, "abc-1");
        assert!(!format!("{creds:?}").contains("abc-1"));
    }
}
