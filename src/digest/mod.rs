//! Digest Module
//!
//! The leaf of the system: deciding whether a password is acceptable and turning an
//! accepted password into its printable digest.
//!
//! ## Submodules
//! - **`password`**: Submission-time checks (non-empty, length cap, no quote characters).
//! - **`hasher`**: SHA-256 over the UTF-8 bytes, encoded with standard padded Base64.

pub mod hasher;
pub mod password;

pub use hasher::digest;
pub use password::validate_password;
