use sha2::{Digest, Sha256};

/// Compute SHA-256 of an in-memory byte slice.
pub fn sha256_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode a raw 32-byte hash as a lowercase hex string (64 chars).
pub fn to_hex(hash: &[u8; 32]) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

/// Stable identifier for a scan: the same image always maps to the same id,
/// so a re-uploaded prescription can be recognized downstream.
pub fn scan_id(data: &[u8]) -> String {
    to_hex(&sha256_bytes(data))
}
