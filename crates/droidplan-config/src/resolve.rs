//! Descriptor resolution.
//!
//! Resolution is the only way to turn a raw [`Descriptor`] into a
//! [`ResolvedDescriptor`]: it substitutes every property reference, parses
//! numeric fields, selects the requested build type, and enforces the signing
//! invariant. Any failure aborts the whole resolution; no partial output.

use crate::{ConfigError, ConfigResult, PropertySet};
use droidplan_core::{
    Dependency, DependencyCoordinate, Descriptor, ResolvedDescriptor, SigningConfig,
    SigningProfile,
};

/// Resolve a descriptor against a property set for one build type.
pub fn resolve(
    descriptor: &Descriptor,
    properties: &PropertySet,
    build_type: &str,
) -> ConfigResult<ResolvedDescriptor> {
    let selected = descriptor.build_type(build_type).ok_or_else(|| {
        ConfigError::InvalidReference(format!("unknown build type '{}'", build_type))
    })?;

    let plugins = descriptor
        .plugins
        .iter()
        .map(|p| properties.substitute(p))
        .collect::<ConfigResult<Vec<_>>>()?;

    let application_id = properties.substitute(&descriptor.application_id)?;
    if application_id.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "application id".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    let namespace = match &descriptor.namespace {
        Some(namespace) => properties.substitute(namespace)?,
        None => application_id.clone(),
    };

    let compile_sdk = sdk_level("sdk compile", &descriptor.sdk.compile, properties)?;
    let min_sdk = sdk_level("sdk min", &descriptor.sdk.min, properties)?;
    let target_sdk = sdk_level("sdk target", &descriptor.sdk.target, properties)?;
    if min_sdk > target_sdk {
        return Err(ConfigError::InvalidValue {
            field: "sdk min".to_string(),
            message: format!("min SDK {} exceeds target SDK {}", min_sdk, target_sdk),
        });
    }
    if target_sdk > compile_sdk {
        tracing::warn!(target_sdk, compile_sdk, "target SDK exceeds compile SDK");
    }

    let ndk_version = descriptor
        .sdk
        .ndk
        .as_ref()
        .map(|ndk| properties.substitute(ndk))
        .transpose()?;

    let version_code = parse_u32("version code", &properties.substitute(&descriptor.version.code)?)?;
    let version_name = properties.substitute(&descriptor.version.name)?;

    let java_source_compatibility = properties.substitute(&descriptor.java.source_compatibility)?;
    let java_target_compatibility = properties.substitute(&descriptor.java.target_compatibility)?;
    let kotlin_jvm_target = descriptor
        .kotlin_jvm_target
        .as_ref()
        .map(|jvm| properties.substitute(jvm))
        .transpose()?;

    let signing = match &selected.signing {
        Some(name) => {
            let config = descriptor.signing_config(name).ok_or_else(|| {
                ConfigError::InvalidReference(format!("unknown signing config '{}'", name))
            })?;
            Some(resolve_signing(config, properties)?)
        }
        None => None,
    };

    let dependencies = descriptor
        .dependencies
        .iter()
        .map(|dependency| resolve_dependency(dependency, properties))
        .collect::<ConfigResult<Vec<_>>>()?;

    tracing::debug!(
        build_type = %selected.name,
        dependencies = dependencies.len(),
        signed = signing.is_some(),
        "resolved descriptor"
    );

    Ok(ResolvedDescriptor {
        plugins,
        application_id,
        namespace,
        compile_sdk,
        min_sdk,
        target_sdk,
        ndk_version,
        version_code,
        version_name,
        java_source_compatibility,
        java_target_compatibility,
        desugaring: descriptor.java.desugaring,
        kotlin_jvm_target,
        build_type: selected.name.clone(),
        minify: selected.minify,
        shrink_resources: selected.shrink_resources,
        signing,
        dependencies,
    })
}

fn sdk_level(field: &str, raw: &str, properties: &PropertySet) -> ConfigResult<u32> {
    parse_u32(field, &properties.substitute(raw)?)
}

fn parse_u32(field: &str, value: &str) -> ConfigResult<u32> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("expected an integer, got '{}'", value),
    })
}

fn resolve_signing(config: &SigningConfig, properties: &PropertySet) -> ConfigResult<SigningProfile> {
    let field = |which: &str, raw: &str| -> ConfigResult<String> {
        let value = properties.substitute(raw)?;
        if value.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("{} for signing '{}'", which, config.name),
                message: "must not be empty".to_string(),
            });
        }
        Ok(value)
    };

    Ok(SigningProfile {
        store_file: field("store-file", &config.store_file)?,
        store_password: field("store-password", &config.store_password)?,
        key_alias: field("key-alias", &config.key_alias)?,
        key_password: field("key-password", &config.key_password)?,
    })
}

fn resolve_dependency(dependency: &Dependency, properties: &PropertySet) -> ConfigResult<Dependency> {
    let group = properties.substitute(&dependency.coordinate.group)?;
    let artifact = properties.substitute(&dependency.coordinate.artifact)?;
    let version = properties.substitute(&dependency.coordinate.version)?;

    // Re-validate after substitution; a property could smuggle in a colon or
    // resolve to nothing.
    let coordinate: DependencyCoordinate =
        format!("{}:{}:{}", group, artifact, version).parse()?;

    Ok(Dependency {
        coordinate,
        scope: dependency.scope,
    })
}
