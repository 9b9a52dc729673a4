//! Dependency coordinates.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `group:artifact:version` triple identifying an external library.
///
/// Coordinates are declared, validated, and handed through to the external
/// build tool; droidplan never fetches them. `Display` round-trips the
/// declared form losslessly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{group}:{artifact}:{version}")]
pub struct DependencyCoordinate {
    /// Group identifier (e.g. "com.google.android.material").
    pub group: String,
    /// Artifact name within the group.
    pub artifact: String,
    /// Declared version string.
    pub version: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("expected group:artifact:version, got '{0}'")]
    Malformed(String),

    #[error("empty {segment} segment in coordinate '{coordinate}'")]
    EmptySegment {
        segment: &'static str,
        coordinate: String,
    },
}

impl std::str::FromStr for DependencyCoordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (Some(group), Some(artifact), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CoordinateError::Malformed(s.to_string()));
        };

        for (segment, value) in [("group", group), ("artifact", artifact), ("version", version)] {
            if value.is_empty() {
                return Err(CoordinateError::EmptySegment {
                    segment,
                    coordinate: s.to_string(),
                });
            }
        }

        Ok(Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: version.to_string(),
        })
    }
}
