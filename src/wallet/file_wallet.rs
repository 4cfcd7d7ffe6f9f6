// src/wallet/file_wallet.rs
//! File-backed identity wallet.
//!
//! One JSON file per principal under the wallet directory, named
//! `<principalId>.json` and holding the hex key pair. The wallet is an
//! explicit handle passed into whatever needs key material; nothing in the
//! crate holds a process-wide instance, so tests can point each component at
//! their own directory.

use crate::error::{Error, Result};
use crate::wallet::keys;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// A principal's stored identity: the key pair plus the id it is filed
/// under. The private key never leaves the wallet boundary except into the
/// signature service at signing time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub principal_id: String,
    pub public_key: String,
    pub private_key: String,
}

/// Durable wallet mapping principal ids (emails) to identities.
///
/// Writes are serialized through an internal mutex; two concurrent `put`
/// calls for the same principal still resolve last-writer-wins, which is the
/// stored contract for overwrites.
pub struct FileWallet {
    dir: PathBuf,
    write_guard: Mutex<()>,
}

impl FileWallet {
    /// Opens a wallet rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileWallet {
            dir,
            write_guard: Mutex::new(()),
        })
    }

    fn entry_path(&self, principal_id: &str) -> PathBuf {
        self.dir.join(format!("{principal_id}.json"))
    }

    /// Stores or overwrites the entry for a principal.
    pub fn put(&self, identity: &Identity) -> Result<()> {
        let serialized = serde_json::to_string_pretty(identity)?;
        let _guard = self.write_guard.lock().unwrap();
        fs::write(self.entry_path(&identity.principal_id), serialized)?;
        Ok(())
    }

    /// Looks up a principal's identity.
    ///
    /// Returns `Ok(None)` when no entry exists. An entry that exists but no
    /// longer parses is surfaced as `Error::Malformed` so corruption is
    /// distinguishable from absence.
    pub fn get(&self, principal_id: &str) -> Result<Option<Identity>> {
        let path = self.entry_path(principal_id);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        let identity = serde_json::from_str(&raw).map_err(|e| Error::Malformed {
            what: "wallet entry",
            detail: e.to_string(),
        })?;
        Ok(Some(identity))
    }

    /// Whether an entry exists for the principal.
    pub fn contains(&self, principal_id: &str) -> bool {
        self.entry_path(principal_id).exists()
    }

    /// Generates a key pair and files it under `principal_id`.
    ///
    /// # Errors
    /// `Error::AlreadyEnrolled` when the principal already has an entry;
    /// enrollment never silently rotates existing keys.
    pub fn enroll(&self, principal_id: &str) -> Result<Identity> {
        if self.contains(principal_id) {
            return Err(Error::AlreadyEnrolled(principal_id.to_string()));
        }
        let pair = keys::generate_key_pair();
        let identity = Identity {
            principal_id: principal_id.to_string(),
            public_key: pair.public_key,
            private_key: pair.private_key,
        };
        self.put(&identity)?;
        Ok(identity)
    }
}
