//! Asset naming: kinds, target names, fingerprints and versioned builds.

mod fingerprint;
mod kind;
mod name;
pub mod versioned;

pub use fingerprint::{FINGERPRINT_LEN, fingerprint};
pub use kind::AssetKind;
pub use name::{DEFAULT_LABEL, HASH_TOKEN, TargetName};
pub use versioned::VersionedName;
