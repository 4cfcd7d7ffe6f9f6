// src/lib.rs

//! # Certificate Ledger Core
//!
//! Protocol core of a certificate-issuance portal backed by a distributed
//! ledger. The crate covers commitment, dual-party signing, selective
//! disclosure, and the identity-scoped ledger client; storage of certificate
//! records, HTTP routing, and the ledger runtime itself live outside and
//! talk to this crate through its public surface.
//!
//! ## Architecture Overview
//! 1. **Wallet layer**: [`wallet::FileWallet`] holds each principal's key
//!    pair in a durable per-principal record
//! 2. **Commitment layer**: [`commitment::build_root`] reduces an ordered
//!    attribute list to a single tamper-evident digest
//! 3. **Ledger layer**: [`ledger::LedgerClient`] submits or evaluates
//!    chaincode calls under a principal's identity, one connection per call
//! 4. **Services layer**: signing ([`services::SignatureService`]),
//!    selective disclosure ([`services::proof`]), and the issuance
//!    orchestrator ([`services::CertificateIssuer`])
//!
//! ## Issuance Flow
//! Commit over the full ordered attribute set, sign the root as issuer and
//! as subject, then record `(root, signatures, metadata, public keys)` on
//! the ledger. Revocation appends a linked fact; nothing is ever edited in
//! place.

pub mod commitment;
pub mod error;
pub mod ledger;
pub mod models;
pub mod services;
pub mod utils;
pub mod wallet;

pub use error::{Error, Result};
pub use ledger::{GatewayConfig, LedgerClient};
pub use models::certificate::{Certificate, CertificateState};
pub use models::proof::DisclosureProof;
pub use models::record::{DashboardEntry, LedgerRecord};
pub use services::{CertificateIssuer, IssueReceipt, SignatureService};
pub use wallet::{FileWallet, Identity};
