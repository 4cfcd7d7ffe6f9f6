// src/services/mod.rs
//! Business logic built on the wallet, commitment, and ledger layers.

pub mod issuance;
pub mod proof;
pub mod signature;

pub use issuance::{merge_records, CertificateIssuer, IssueReceipt};
pub use signature::SignatureService;
