//! Core domain types for the droidplan build-configuration resolver.
//!
//! This crate contains:
//! - The raw packaging descriptor model
//! - Dependency coordinates
//! - Signing configurations and resolved signing profiles
//! - The resolved descriptor handed to the emitter
//! - The emitted build-parameter model

pub mod coordinate;
pub mod descriptor;
pub mod param;
pub mod resolved;
pub mod signing;

pub use coordinate::{CoordinateError, DependencyCoordinate};
pub use descriptor::{
    BuildType, Dependency, DependencyScope, Descriptor, JavaOptions, SdkLevels, VersionInfo,
};
pub use param::{BuildParameter, ParameterList};
pub use resolved::ResolvedDescriptor;
pub use signing::{SigningConfig, SigningProfile};
