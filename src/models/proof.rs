// src/models/proof.rs
//! Selective-disclosure proof package.

use serde::{Deserialize, Serialize};

/// Status carried by every freshly generated proof.
pub const PROOF_STATUS_VALID: &str = "valid";

/// A self-contained, ephemeral disclosure package.
///
/// Generated per disclosure request and handed to the counterpart together
/// with the disclosed attribute values (out of band). Never persisted by the
/// core; its validity is defined entirely by whether the disclosed values
/// still reduce to `subset_root`.
///
/// `subset_root` commits only to the disclosed subset, not to the
/// full-certificate commitment recorded at issuance. A verifier therefore
/// learns that the disclosed values match what the proof generator packaged,
/// nothing stronger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisclosureProof {
    pub certificate_id: String,
    /// Attribute names in the order their values were reduced.
    pub selected_attributes: Vec<String>,
    /// Commitment root over the disclosed values, in selection order.
    pub subset_root: String,
    /// Digest over the whole package contents at generation time.
    #[serde(default)]
    pub proof_hash: String,
    #[serde(default)]
    pub nonce: String,
    /// Generation time, epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub status: String,
}

impl DisclosureProof {
    /// Serializes the package for transport to an external verifier.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
