//! Name derivation for matched targets.

use serde::{Deserialize, Serialize};

/// Default substring removed from source names
pub const DEFAULT_STRIP: &str = "_high";
/// Default substring appended to derived names
pub const DEFAULT_APPEND: &str = "_low";

/// How a target's new name is derived from its matched source's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    /// Removed from the source name wherever it occurs
    pub strip: String,
    /// Appended after stripping
    pub append: String,
}

impl Default for RenameRule {
    fn default() -> Self {
        Self::new(DEFAULT_STRIP, DEFAULT_APPEND)
    }
}

impl RenameRule {
    pub fn new(strip: impl Into<String>, append: impl Into<String>) -> Self {
        Self {
            strip: strip.into(),
            append: append.into(),
        }
    }

    /// Remove every occurrence of `strip` from `name`, then append `append`.
    ///
    /// An empty `strip` leaves the name as is.
    pub fn derive(&self, name: &str) -> String {
        let mut base = if self.strip.is_empty() {
            name.to_string()
        } else {
            name.replace(&self.strip, "")
        };
        base.push_str(&self.append);
        base
    }
}
