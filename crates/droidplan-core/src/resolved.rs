//! The resolved descriptor handed to the emitter.

use serde::{Deserialize, Serialize};

use crate::descriptor::Dependency;
use crate::signing::SigningProfile;

/// A descriptor with every property reference substituted, numeric fields
/// parsed, and a single build type selected.
///
/// Obtained only through resolution; downstream consumers can rely on the
/// invariants checked there (integer SDK levels with `min <= target`, a
/// complete signing profile whenever one is present).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDescriptor {
    pub plugins: Vec<String>,
    pub application_id: String,
    pub namespace: String,
    pub compile_sdk: u32,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub ndk_version: Option<String>,
    pub version_code: u32,
    pub version_name: String,
    pub java_source_compatibility: String,
    pub java_target_compatibility: String,
    pub desugaring: bool,
    pub kotlin_jvm_target: Option<String>,
    /// Name of the selected build type.
    pub build_type: String,
    pub minify: bool,
    pub shrink_resources: bool,
    /// Present iff the selected build type references a signing config.
    pub signing: Option<SigningProfile>,
    pub dependencies: Vec<Dependency>,
}
