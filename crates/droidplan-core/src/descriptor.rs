//! Packaging descriptor definitions.

use serde::{Deserialize, Serialize};

use crate::DependencyCoordinate;
use crate::signing::SigningConfig;

/// A declarative packaging descriptor, as loaded.
///
/// String-typed fields may still contain `${...}` property references;
/// resolution substitutes them and produces a
/// [`ResolvedDescriptor`](crate::ResolvedDescriptor). Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Descriptor {
    /// Build-tool plugin ids, in declaration order.
    pub plugins: Vec<String>,
    /// Application id (e.g. "com.habitzone.tracker").
    pub application_id: String,
    /// Resource namespace; defaults to the application id when absent.
    pub namespace: Option<String>,
    /// SDK levels, raw (may be property references).
    pub sdk: SdkLevels,
    /// Version identity, raw.
    pub version: VersionInfo,
    /// Java toolchain options.
    pub java: JavaOptions,
    /// Kotlin JVM target, when the descriptor declares one.
    pub kotlin_jvm_target: Option<String>,
    /// Named signing configurations.
    pub signing_configs: Vec<SigningConfig>,
    /// Named build types.
    pub build_types: Vec<BuildType>,
    /// Declared dependencies, in declaration order.
    pub dependencies: Vec<Dependency>,
}

/// SDK levels as declared. Kept as strings until resolution because the
/// embedding tool may supply them as properties rather than literals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkLevels {
    pub compile: String,
    pub min: String,
    pub target: String,
    /// NDK version, when native code is packaged.
    pub ndk: Option<String>,
}

/// Version identity as declared (code is parsed to an integer at resolution).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub code: String,
    pub name: String,
}

/// Java toolchain options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JavaOptions {
    /// Source compatibility level (e.g. "1.8").
    pub source_compatibility: String,
    /// Target compatibility level.
    pub target_compatibility: String,
    /// Whether core-library desugaring is enabled.
    pub desugaring: bool,
}

impl Default for JavaOptions {
    fn default() -> Self {
        Self {
            source_compatibility: "1.8".to_string(),
            target_compatibility: "1.8".to_string(),
            desugaring: false,
        }
    }
}

/// A named build type (e.g. "release", "debug").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildType {
    pub name: String,
    /// Name of the signing configuration this build type uses, if any.
    /// A build type with a signing reference cannot resolve unless all
    /// four signing fields resolve non-empty.
    pub signing: Option<String>,
    /// Whether code minification is enabled.
    pub minify: bool,
    /// Whether unused resources are stripped.
    pub shrink_resources: bool,
}

/// A declared dependency: a coordinate plus the scope it is wired into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub coordinate: DependencyCoordinate,
    pub scope: DependencyScope,
}

/// How a dependency participates in the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyScope {
    /// Regular implementation dependency.
    Implementation,
    /// Core-library desugaring support artifact.
    Desugaring,
}

impl DependencyScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyScope::Implementation => "implementation",
            DependencyScope::Desugaring => "desugaring",
        }
    }
}

impl Descriptor {
    /// Look up a build type by name.
    pub fn build_type(&self, name: &str) -> Option<&BuildType> {
        self.build_types.iter().find(|bt| bt.name == name)
    }

    /// Look up a signing configuration by name.
    pub fn signing_config(&self, name: &str) -> Option<&SigningConfig> {
        self.signing_configs.iter().find(|sc| sc.name == name)
    }
}
