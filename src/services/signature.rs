// src/services/signature.rs
//! Asymmetric signing over commitment digests.
//!
//! Signing resolves the signer's private key through the wallet at use
//! time; the key never lives anywhere else. Verification needs no wallet at
//! all, only the counterpart's public key. The scheme is ECDSA over
//! secp256k1 with SHA-256 digest binding, matching the wallet's key
//! generation parameters.

use crate::error::{Error, Result};
use crate::wallet::FileWallet;
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use std::sync::Arc;

/// Signs and verifies commitment digests with wallet-held keys.
pub struct SignatureService {
    wallet: Arc<FileWallet>,
}

impl SignatureService {
    pub fn new(wallet: Arc<FileWallet>) -> Self {
        SignatureService { wallet }
    }

    /// Signs `digest` with `signer_id`'s private key.
    ///
    /// # Arguments
    /// * `digest` - Hex commitment root; its text bytes are what get signed
    /// * `signer_id` - Principal whose wallet key signs
    ///
    /// # Returns
    /// 64-byte compact ECDSA signature (R || S), hex-encoded.
    ///
    /// # Errors
    /// * `Error::IdentityNotFound` - no wallet entry for `signer_id`
    /// * `Error::Malformed` - the stored private key does not decode
    pub fn sign(&self, digest: &str, signer_id: &str) -> Result<String> {
        let identity = self
            .wallet
            .get(signer_id)?
            .ok_or_else(|| Error::IdentityNotFound(signer_id.to_string()))?;

        let key_bytes = hex::decode(&identity.private_key).map_err(|e| Error::Malformed {
            what: "private key",
            detail: e.to_string(),
        })?;
        let signing_key = SigningKey::from_slice(&key_bytes).map_err(|e| Error::Malformed {
            what: "private key",
            detail: e.to_string(),
        })?;

        let signature: Signature = signing_key.sign(digest.as_bytes());
        Ok(hex::encode(signature.to_bytes()))
    }

    /// Checks `signature_hex` over `digest` against `public_key_hex`.
    ///
    /// # Returns
    /// `Ok(false)` for a well-formed signature that simply does not verify;
    /// a wrong signature is an expected outcome, not a fault.
    ///
    /// # Errors
    /// `Error::Malformed` when the key or signature bytes cannot be parsed
    /// into the corresponding objects at all.
    pub fn verify(digest: &str, signature_hex: &str, public_key_hex: &str) -> Result<bool> {
        let key_bytes = hex::decode(public_key_hex).map_err(|e| Error::Malformed {
            what: "public key",
            detail: e.to_string(),
        })?;
        let verifying_key = VerifyingKey::from_sec1_bytes(&key_bytes).map_err(|e| Error::Malformed {
            what: "public key",
            detail: e.to_string(),
        })?;

        let signature_bytes = hex::decode(signature_hex).map_err(|e| Error::Malformed {
            what: "signature",
            detail: e.to_string(),
        })?;
        let signature = Signature::from_slice(&signature_bytes).map_err(|e| Error::Malformed {
            what: "signature",
            detail: e.to_string(),
        })?;

        Ok(verifying_key.verify(digest.as_bytes(), &signature).is_ok())
    }
}
