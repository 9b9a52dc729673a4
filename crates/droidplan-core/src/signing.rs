//! Signing configurations and resolved profiles.

use serde::{Deserialize, Serialize};

/// A named signing configuration as declared in the descriptor.
///
/// Field values typically hold `${...}` property references rather than
/// literal credentials; the descriptor itself never carries secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    pub name: String,
    /// Path to the keystore.
    pub store_file: String,
    pub store_password: String,
    pub key_alias: String,
    pub key_password: String,
}

/// Fully resolved signing credentials for one build.
///
/// Invariant: every field is non-empty. Constructed only by the resolver,
/// which rejects configurations that would violate this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningProfile {
    pub store_file: String,
    pub store_password: String,
    pub key_alias: String,
    pub key_password: String,
}

impl SigningProfile {
    /// Values that must never appear in human-oriented output.
    pub fn secret_values(&self) -> [&str; 2] {
        [&self.store_password, &self.key_password]
    }
}
