// HTTP transport settings shared by every client this crate builds.
//
// The panel API is stateless bearer-token HTTP, so this is only TLS trust
// and timeouts. No cookies are involved.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

/// How server certificates are checked.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Trust whatever the system store trusts.
    System,
    /// Trust one extra CA, read from a PEM file at client build time.
    CustomCa(PathBuf),
    /// Skip verification entirely (self-signed lab panels).
    DangerAcceptInvalid,
}

/// Settings applied to every `reqwest::Client` this crate builds.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` honoring these settings.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("panelops/", env!("CARGO_PKG_VERSION")));

        self.apply_tls(builder)?
            .build()
            .map_err(|e| Error::Tls(format!("building HTTP client: {e}")))
    }

    fn apply_tls(&self, builder: reqwest::ClientBuilder) -> Result<reqwest::ClientBuilder, Error> {
        match &self.tls {
            TlsMode::System => Ok(builder),
            TlsMode::CustomCa(path) => {
                let pem = std::fs::read(path).map_err(|e| {
                    Error::Tls(format!("reading CA certificate {}: {e}", path.display()))
                })?;
                let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                    Error::Tls(format!("parsing CA certificate {}: {e}", path.display()))
                })?;
                Ok(builder.add_root_certificate(cert))
            }
            TlsMode::DangerAcceptInvalid => Ok(builder.danger_accept_invalid_certs(true)),
        }
    }
}
