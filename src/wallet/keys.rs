// src/wallet/keys.rs
//! Key pair generation for wallet identities.
//!
//! Every principal gets a secp256k1 key pair with the same parameters, so
//! any identity's signature verifies against any other identity's public
//! key material under one scheme. Keys travel as hex: the public key is the
//! uncompressed SEC1 point (the familiar `04...` form), the private key the
//! raw 32-byte scalar.

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;

/// A freshly generated key pair, hex-encoded for storage.
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// Uncompressed SEC1 public key, hex.
    pub public_key: String,
    /// 32-byte private scalar, hex. Confidential.
    pub private_key: String,
}

/// Generates a new secp256k1 key pair from the system RNG.
pub fn generate_key_pair() -> KeyPair {
    let signing_key = SigningKey::random(&mut OsRng);
    let public_point = signing_key.verifying_key().to_encoded_point(false);
    KeyPair {
        public_key: hex::encode(public_point.as_bytes()),
        private_key: hex::encode(signing_key.to_bytes()),
    }
}
