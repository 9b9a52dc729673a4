//! KDL descriptor parsing and property resolution for droidplan.
//!
//! This crate handles:
//! - Descriptor loading (droidplan.kdl)
//! - Project properties (key=value files, explicit overrides, environment)
//! - Fail-closed resolution of property references into a resolved descriptor

pub mod descriptor;
pub mod error;
pub mod properties;
pub mod resolve;

pub use descriptor::parse_descriptor;
pub use error::{ConfigError, ConfigResult};
pub use properties::{PropertySet, PropertySetBuilder, declared_references, parse_properties};
pub use resolve::resolve;
