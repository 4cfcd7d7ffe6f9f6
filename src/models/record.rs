// src/models/record.rs
//! Ledger-side record shapes.

use crate::models::certificate::Certificate;
use serde::{Deserialize, Serialize};

/// The durable tuple the ledger stores per issued certificate.
///
/// Records are append-only: revocation is written as a linked follow-up
/// fact, never as an edit, so pre-revocation records simply lack the flag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRecord {
    pub certificate_id: String,
    /// Commitment root over the full ordered attribute set at issuance.
    pub commitment: String,
    pub issuer_signature: String,
    pub subject_signature: String,
    pub issue_date: String,
    pub issuer_public_key: String,
    pub subject_public_key: String,
    #[serde(default)]
    pub revoked: bool,
}

/// One row of a dashboard view, merged from the external certificate store
/// and the ledger.
///
/// The external store is authoritative for display fields, the ledger for
/// the commitment and the revocation flag. `commitment` is `None` when the
/// ledger holds no record for the certificate.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry {
    #[serde(flatten)]
    pub certificate: Certificate,
    pub commitment: Option<String>,
}
