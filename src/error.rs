// src/error.rs
//! Error taxonomy for the certificate core.
//!
//! Failures fall into four families: input validation, identity resolution,
//! ledger connectivity, and remote transaction rejection. A proof or signature
//! that merely fails to check is not an error anywhere in this crate; those
//! operations return `false` and reserve `Error` for broken input or a broken
//! environment.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for wallet, commitment, signing, and ledger operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A commitment was requested over an empty value list.
    #[error("cannot build a commitment over an empty value list")]
    EmptyInput,

    /// A disclosure was requested with no attributes selected.
    #[error("at least one attribute must be selected")]
    NoAttributesSelected,

    /// A selected attribute name does not exist on the certificate schema.
    #[error("certificate has no attribute named `{0}`")]
    UnknownAttribute(String),

    /// A required certificate attribute is absent or blank at issuance time.
    #[error("certificate attribute `{0}` is missing or blank")]
    MissingAttribute(&'static str),

    /// The principal has no entry in the identity wallet.
    #[error("no identity found in wallet for {0}")]
    IdentityNotFound(String),

    /// Enrollment was attempted for a principal that already has an identity.
    #[error("an identity for {0} already exists in the wallet")]
    AlreadyEnrolled(String),

    /// Input bytes could not be decoded into the expected object at all.
    /// Distinct from "well-formed but does not verify", which is a `false`
    /// result rather than an error.
    #[error("malformed {what}: {detail}")]
    Malformed { what: &'static str, detail: String },

    /// A required gateway configuration variable is unset.
    #[error("missing required configuration variable {0}")]
    MissingConfig(&'static str),

    /// The ledger gateway could not be reached.
    #[error("could not reach the ledger gateway: {0}")]
    Connection(#[source] reqwest::Error),

    /// The ledger executed the call and rejected it.
    #[error("ledger rejected `{function}`: {message}")]
    Transaction { function: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
