//! Document fingerprints for log correlation
//!
//! Nothing is stored under these digests; they only let operators match a
//! failed request in the logs to the file a client uploaded.

use sha2::{Digest, Sha256};

/// Full SHA-256 of the document bytes, lowercase hex
pub fn document_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
