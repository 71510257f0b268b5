//! Content fingerprints for hash-named build targets.
//!
//! The digest covers the ordered source paths, not file contents, so a
//! target's name is known before any build has run.
//!
//! ```ignore
//! let fp = fingerprint(&["reset.css", "layout.css"]); // -> 32 hex chars
//! ```

/// Separator between source paths in the hashed input.
const SEPARATOR: &str = "_";

/// Hex chars kept from the blake3 digest.
pub const FINGERPRINT_LEN: usize = 32;

/// Compute the fingerprint of an ordered file list.
pub fn fingerprint<S: AsRef<str>>(files: &[S]) -> String {
    let mut hasher = blake3::Hasher::new();
    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            hasher.update(SEPARATOR.as_bytes());
        }
        hasher.update(file.as_ref().as_bytes());
    }
    let mut hex = hex::encode(hasher.finalize().as_bytes());
    hex.truncate(FINGERPRINT_LEN);
    hex
}
