// src/ledger/config.rs
//! Gateway connection settings.

use crate::error::{Error, Result};

/// Where ledger calls are routed: a gateway endpoint plus the channel and
/// chaincode every call in this deployment targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the ledger gateway, e.g. `http://localhost:7050`.
    pub endpoint: String,
    pub channel: String,
    pub chaincode: String,
}

impl GatewayConfig {
    pub fn new(
        endpoint: impl Into<String>,
        channel: impl Into<String>,
        chaincode: impl Into<String>,
    ) -> Self {
        GatewayConfig {
            endpoint: endpoint.into(),
            channel: channel.into(),
            chaincode: chaincode.into(),
        }
    }

    /// Loads the configuration from `LEDGER_ENDPOINT`, `LEDGER_CHANNEL` and
    /// `LEDGER_CHAINCODE`.
    ///
    /// # Errors
    /// `Error::MissingConfig` naming the first unset variable.
    pub fn from_env() -> Result<Self> {
        Ok(GatewayConfig {
            endpoint: require_env("LEDGER_ENDPOINT")?,
            channel: require_env("LEDGER_CHANNEL")?,
            chaincode: require_env("LEDGER_CHAINCODE")?,
        })
    }

    /// URL for one gateway action (`submit` or `evaluate`).
    pub(crate) fn action_url(&self, action: &str) -> String {
        format!(
            "{}/channels/{}/chaincodes/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.channel,
            self.chaincode,
            action
        )
    }
}

fn require_env(name: &'static str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::MissingConfig(name))
}
