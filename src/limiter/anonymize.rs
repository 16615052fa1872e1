//! One-way anonymization of client keys.

use std::fmt;

use sha2::{Digest, Sha256};

/// Anonymized client identifier.
///
/// The SHA-256 digest of a client key. Deterministic, so two requests from
/// the same client land on the same stored state, but one-way: the raw
/// address cannot be recovered from stored or logged values.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId([u8; 32]);

/// Digest a raw client key into its anonymized form.
pub fn anonymize(key: &str) -> ClientId {
    ClientId(Sha256::digest(key.as_bytes()).into())
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientId({})", hex::encode(self.0))
    }
}
