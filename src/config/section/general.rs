//! `[general]` section configuration.
//!
//! ```toml
//! [general]
//! concatenate = false   # debugging: one tag per source file
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Join a target's files into one build. When off, every include
    /// emits the original source files individually.
    pub concatenate: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { concatenate: true }
    }
}
