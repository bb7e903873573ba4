use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

/// Hashes the password and encodes the result as standard (padded) Base64.
///
/// Total and deterministic. The Base64 alphabet contains no spaces, which the
/// record store's `"<id> <digest>"` line format relies on.
pub fn digest(password: &str) -> String {
    let hash = Sha256::digest(password.as_bytes());
    STANDARD.encode(hash)
}
