// src/ledger/client.rs
//! Identity-scoped ledger client.
//!
//! Every call follows the same lifecycle: resolve the calling principal in
//! the wallet, open a fresh gateway connection, execute exactly one
//! transaction, disconnect. There is no pooling and no retry; a failed call
//! surfaces immediately and the caller decides what to do. Mutating calls go
//! through the `submit` path and wait for ledger-side ordering; read-only
//! calls go through `evaluate` and commit nothing.

use crate::error::{Error, Result};
use crate::ledger::config::GatewayConfig;
use crate::wallet::FileWallet;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Chaincode argument lists are always ordered strings; structured data must
/// be serialized by the caller before it reaches this boundary.
#[derive(Serialize)]
struct CallRequest<'a> {
    function: &'a str,
    args: &'a [String],
    principal: &'a str,
}

#[derive(Deserialize)]
struct CallResponse {
    payload: String,
}

#[derive(Deserialize)]
struct GatewayError {
    error: String,
}

enum CallKind {
    Submit,
    Evaluate,
}

impl CallKind {
    fn action(&self) -> &'static str {
        match self {
            CallKind::Submit => "submit",
            CallKind::Evaluate => "evaluate",
        }
    }
}

/// Client for invoking chaincode under a principal's wallet identity.
pub struct LedgerClient {
    config: GatewayConfig,
    wallet: Arc<FileWallet>,
}

impl LedgerClient {
    pub fn new(config: GatewayConfig, wallet: Arc<FileWallet>) -> Self {
        LedgerClient { config, wallet }
    }

    /// Submits a state-changing transaction and returns the ledger payload.
    ///
    /// # Errors
    /// * `Error::IdentityNotFound` - `principal` has no wallet entry
    /// * `Error::Connection` - the gateway was unreachable
    /// * `Error::Transaction` - the ledger executed and rejected the call
    pub async fn invoke(&self, principal: &str, function: &str, args: &[String]) -> Result<String> {
        self.call(principal, function, args, CallKind::Submit).await
    }

    /// Evaluates a read-only transaction and returns the ledger payload.
    ///
    /// Same lifecycle and failure modes as [`invoke`](Self::invoke), but the
    /// call commits no state.
    pub async fn query(&self, principal: &str, function: &str, args: &[String]) -> Result<String> {
        self.call(principal, function, args, CallKind::Evaluate).await
    }

    async fn call(
        &self,
        principal: &str,
        function: &str,
        args: &[String],
        kind: CallKind,
    ) -> Result<String> {
        debug!(
            "ledger {} `{}` for {} with {} arg(s)",
            kind.action(),
            function,
            principal,
            args.len()
        );

        let connection = self.connect(principal)?;
        let result = connection.execute(kind.action(), function, args, principal).await;
        connection.disconnect();

        match &result {
            Ok(_) => info!("ledger {} `{}` completed for {}", kind.action(), function, principal),
            Err(e) => error!("ledger {} `{}` failed for {}: {}", kind.action(), function, principal, e),
        }
        result
    }

    /// Opens a connection scoped to `principal`'s identity.
    ///
    /// The principal must already hold a wallet entry; the gateway resolves
    /// the matching credential on its side.
    fn connect(&self, principal: &str) -> Result<GatewayConnection> {
        if self.wallet.get(principal)?.is_none() {
            return Err(Error::IdentityNotFound(principal.to_string()));
        }
        // One fresh client per call: connections are never shared or pooled.
        Ok(GatewayConnection {
            http: reqwest::Client::new(),
            config: self.config.clone(),
        })
    }
}

/// A single-use gateway connection.
struct GatewayConnection {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayConnection {
    async fn execute(
        &self,
        action: &str,
        function: &str,
        args: &[String],
        principal: &str,
    ) -> Result<String> {
        let url = self.config.action_url(action);
        let request = CallRequest {
            function,
            args,
            principal,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(Error::Connection)?;

        let status = response.status();
        if status.is_success() {
            let body: CallResponse = response.json().await.map_err(|e| Error::Malformed {
                what: "gateway response",
                detail: e.to_string(),
            })?;
            return Ok(body.payload);
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GatewayError>(&raw)
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("{status}: {raw}"));
        Err(Error::Transaction {
            function: function.to_string(),
            message,
        })
    }

    fn disconnect(self) {
        debug!("gateway connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(channel: &str) -> (tempfile::TempDir, LedgerClient) {
        let dir = tempfile::tempdir().unwrap();
        let wallet = Arc::new(FileWallet::open(dir.path()).unwrap());
        wallet.enroll("admin@hust.edu.vn").unwrap();
        let config = GatewayConfig::new(mockito::server_url(), channel, "certcc");
        (dir, LedgerClient::new(config, wallet))
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn invoke_routes_through_the_submit_path() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (_dir, client) = client_for("chan-invoke");
        let mock = mockito::mock("POST", "/channels/chan-invoke/chaincodes/certcc/submit")
            .match_body(Matcher::Json(json!({
                "function": "revokeCertificate",
                "args": ["HUST-2025-0001"],
                "principal": "admin@hust.edu.vn",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"payload":"committed"}"#)
            .create();

        let payload = client
            .invoke("admin@hust.edu.vn", "revokeCertificate", &args(&["HUST-2025-0001"]))
            .await
            .unwrap();

        assert_eq!(payload, "committed");
        mock.assert();
    }

    #[tokio::test]
    async fn query_routes_through_the_evaluate_path() {
        let (_dir, client) = client_for("chan-query");
        let mock = mockito::mock("POST", "/channels/chan-query/chaincodes/certcc/evaluate")
            .match_body(Matcher::Json(json!({
                "function": "getAllCertificateByUniversity",
                "args": ["04aa"],
                "principal": "admin@hust.edu.vn",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"payload":"[]"}"#)
            .create();

        let payload = client
            .query("admin@hust.edu.vn", "getAllCertificateByUniversity", &args(&["04aa"]))
            .await
            .unwrap();

        assert_eq!(payload, "[]");
        mock.assert();
    }

    #[tokio::test]
    async fn same_call_shape_still_takes_distinct_paths() {
        // Identical function and args must hit submit for invoke and
        // evaluate for query; each mock only matches its own path.
        let (_dir, client) = client_for("chan-shape");
        let submit = mockito::mock("POST", "/channels/chan-shape/chaincodes/certcc/submit")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"payload":"mutated"}"#)
            .create();
        let evaluate = mockito::mock("POST", "/channels/chan-shape/chaincodes/certcc/evaluate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"payload":"read"}"#)
            .create();

        let shared_args = args(&["x"]);
        let mutated = client.invoke("admin@hust.edu.vn", "ping", &shared_args).await.unwrap();
        let read = client.query("admin@hust.edu.vn", "ping", &shared_args).await.unwrap();

        assert_eq!(mutated, "mutated");
        assert_eq!(read, "read");
        submit.assert();
        evaluate.assert();
    }

    #[tokio::test]
    async fn unknown_principal_fails_before_any_network_traffic() {
        let (_dir, client) = client_for("chan-noident");
        let result = client.invoke("ghost@example.com", "ping", &args(&[])).await;
        assert!(matches!(result, Err(Error::IdentityNotFound(p)) if p == "ghost@example.com"));
    }

    #[tokio::test]
    async fn remote_rejection_surfaces_as_a_transaction_error() {
        let (_dir, client) = client_for("chan-reject");
        let _mock = mockito::mock("POST", "/channels/chan-reject/chaincodes/certcc/submit")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"certificate already exists"}"#)
            .create();

        let result = client
            .invoke("admin@hust.edu.vn", "issueCertificate", &args(&["dup"]))
            .await;

        match result {
            Err(Error::Transaction { function, message }) => {
                assert_eq!(function, "issueCertificate");
                assert_eq!(message, "certificate already exists");
            }
            other => panic!("expected transaction error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_gateway_is_a_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = Arc::new(FileWallet::open(dir.path()).unwrap());
        wallet.enroll("admin@hust.edu.vn").unwrap();
        // Port 9 (discard) is not listening; the send itself fails.
        let config = GatewayConfig::new("http://127.0.0.1:9", "certchannel", "certcc");
        let client = LedgerClient::new(config, wallet);

        let result = client.query("admin@hust.edu.vn", "ping", &args(&[])).await;
        assert!(matches!(result, Err(Error::Connection(_))));
    }
}
