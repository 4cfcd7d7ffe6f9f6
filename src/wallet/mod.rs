// src/wallet/mod.rs
//! Identity wallet: key generation and durable per-principal storage.

pub mod file_wallet;
pub mod keys;

pub use file_wallet::{FileWallet, Identity};
pub use keys::{generate_key_pair, KeyPair};
