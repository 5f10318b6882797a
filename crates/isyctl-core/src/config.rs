// ── Runtime connection configuration ──
//
// These types describe *how* to reach the controller and which devices to
// start with. They carry credential data but never touch disk; the CLI
// builds a `ConnectionDescriptor` once and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use isyctl_api::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default for local controllers.
    #[default]
    DangerAcceptInvalid,
}

/// Base address and credentials for the controller.
///
/// Set once at startup and read by every request.
#[derive(Debug, Clone)]
pub struct ConnectionDescriptor {
    /// Controller URL (e.g., `http://192.168.1.20`).
    pub base_url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Upper bound on every REST round trip.
    pub timeout: Duration,
}

impl ConnectionDescriptor {
    pub fn new(base_url: Url, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            base_url,
            username: username.into(),
            password,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

/// One pre-configured `(name pattern, address, dimmable)` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub dimmable: bool,
}

impl SeedRecord {
    pub fn new(name: impl Into<String>, address: impl Into<String>, dimmable: bool) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            dimmable,
        }
    }
}
