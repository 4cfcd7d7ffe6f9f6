// src/services/proof.rs
//! Selective-disclosure proof generation and verification.
//!
//! A holder picks a subset of certificate attributes to reveal; `generate`
//! packages a commitment over exactly those values, in the holder's chosen
//! order. The counterpart receives the package plus the disclosed values out
//! of band and calls `verify`, which recomputes the subset root and compares.
//! Verification is pure and fails closed: structural problems and mismatches
//! alike come back as `false`, never as an error or a panic.

use crate::commitment;
use crate::error::{Error, Result};
use crate::models::certificate::Certificate;
use crate::models::proof::{DisclosureProof, PROOF_STATUS_VALID};
use crate::utils::crypto::sha256_hex;
use chrono::Utc;
use rand::RngCore;
use serde::Serialize;
use std::collections::HashMap;

/// Canonical input for the package digest. Field order is fixed here so the
/// digest is reproducible from the package contents.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProofDigest<'a> {
    certificate_id: &'a str,
    subset_root: &'a str,
    selected_attributes: &'a [String],
    timestamp: i64,
    nonce: &'a str,
}

/// Builds a disclosure package for a subset of `certificate`'s attributes.
///
/// # Arguments
/// * `certificate` - The full certificate being partially disclosed
/// * `selected_attributes` - Attribute names to reveal, in disclosure order
///
/// # Errors
/// * `Error::NoAttributesSelected` - empty selection
/// * `Error::UnknownAttribute` - a name not on the certificate schema
pub fn generate(
    certificate: &Certificate,
    selected_attributes: &[String],
) -> Result<DisclosureProof> {
    if selected_attributes.is_empty() {
        return Err(Error::NoAttributesSelected);
    }

    let mut values = Vec::with_capacity(selected_attributes.len());
    for name in selected_attributes {
        let value = certificate
            .attribute(name)
            .ok_or_else(|| Error::UnknownAttribute(name.clone()))?;
        values.push(value.to_string());
    }

    let subset_root = commitment::build_root(&values)?;

    let mut nonce_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = hex::encode(nonce_bytes);
    let timestamp = Utc::now().timestamp_millis();

    let digest_input = serde_json::to_string(&ProofDigest {
        certificate_id: &certificate.certificate_id,
        subset_root: &subset_root,
        selected_attributes,
        timestamp,
        nonce: &nonce,
    })?;

    Ok(DisclosureProof {
        certificate_id: certificate.certificate_id.clone(),
        selected_attributes: selected_attributes.to_vec(),
        subset_root,
        proof_hash: sha256_hex(digest_input.as_bytes()),
        nonce,
        timestamp,
        status: PROOF_STATUS_VALID.to_string(),
    })
}

/// Checks a disclosure package against the values the holder revealed.
///
/// Returns `false` when the package is structurally incomplete, when any
/// selected attribute is missing from `disclosed`, or when the recomputed
/// root differs from the packaged one. Never errors; safe to call any number
/// of times.
pub fn verify(proof: &DisclosureProof, disclosed: &HashMap<String, String>) -> bool {
    if proof.certificate_id.is_empty()
        || proof.subset_root.is_empty()
        || proof.selected_attributes.is_empty()
    {
        return false;
    }
    if disclosed.is_empty() {
        return false;
    }

    let mut values = Vec::with_capacity(proof.selected_attributes.len());
    for name in &proof.selected_attributes {
        match disclosed.get(name) {
            Some(value) => values.push(value.clone()),
            None => return false,
        }
    }

    match commitment::build_root(&values) {
        Ok(recomputed) => recomputed == proof.subset_root,
        Err(_) => false,
    }
}

/// Parses a proof package off the wire and verifies it.
///
/// A document that does not parse as a proof fails closed, the same as any
/// other mismatch.
pub fn verify_json(proof_json: &str, disclosed: &HashMap<String, String>) -> bool {
    match serde_json::from_str::<DisclosureProof>(proof_json) {
        Ok(proof) => verify(&proof, disclosed),
        Err(_) => false,
    }
}
