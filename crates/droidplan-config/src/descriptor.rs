//! Descriptor parsing.

use crate::{ConfigError, ConfigResult};
use droidplan_core::{
    BuildType, Dependency, DependencyCoordinate, DependencyScope, Descriptor, JavaOptions,
    SdkLevels, SigningConfig, VersionInfo,
};
use kdl::{KdlDocument, KdlNode, KdlValue};

/// Parse a packaging descriptor from KDL text.
pub fn parse_descriptor(kdl: &str) -> ConfigResult<Descriptor> {
    let doc: KdlDocument = kdl.parse()?;

    let mut plugins = Vec::new();
    let mut application_id = String::new();
    let mut namespace = None;
    let mut sdk = None;
    let mut version = None;
    let mut java = JavaOptions::default();
    let mut kotlin_jvm_target = None;
    let mut signing_configs: Vec<SigningConfig> = Vec::new();
    let mut build_types: Vec<BuildType> = Vec::new();
    let mut dependencies = Vec::new();

    for node in doc.nodes() {
        match node.name().value() {
            "plugin" => {
                let id = first_string_arg(node)
                    .ok_or_else(|| ConfigError::MissingField("plugin id".to_string()))?;
                plugins.push(id);
            }
            "application" => {
                application_id = first_string_arg(node)
                    .ok_or_else(|| ConfigError::MissingField("application id".to_string()))?;
                namespace = string_prop(node, "namespace");
            }
            "sdk" => {
                sdk = Some(parse_sdk(node)?);
            }
            "version" => {
                version = Some(parse_version(node)?);
            }
            "java" => {
                java = parse_java(node);
            }
            "kotlin" => {
                kotlin_jvm_target = string_prop(node, "jvm-target");
            }
            "signing" => {
                let config = parse_signing(node)?;
                if signing_configs.iter().any(|sc| sc.name == config.name) {
                    return Err(ConfigError::Duplicate(format!(
                        "signing config '{}'",
                        config.name
                    )));
                }
                signing_configs.push(config);
            }
            "build-type" => {
                let build_type = parse_build_type(node)?;
                if build_types.iter().any(|bt| bt.name == build_type.name) {
                    return Err(ConfigError::Duplicate(format!(
                        "build type '{}'",
                        build_type.name
                    )));
                }
                build_types.push(build_type);
            }
            "dependency" => {
                dependencies.push(parse_dependency(node)?);
            }
            _ => {} // Ignore unknown nodes
        }
    }

    if application_id.is_empty() {
        return Err(ConfigError::MissingField("application id".to_string()));
    }
    let sdk = sdk.ok_or_else(|| ConfigError::MissingField("sdk block".to_string()))?;
    let version = version.ok_or_else(|| ConfigError::MissingField("version".to_string()))?;

    // Validate build type -> signing config edges
    for build_type in &build_types {
        if let Some(signing) = &build_type.signing {
            if !signing_configs.iter().any(|sc| &sc.name == signing) {
                return Err(ConfigError::InvalidReference(format!(
                    "build type '{}' references unknown signing config '{}'",
                    build_type.name, signing
                )));
            }
        }
    }

    Ok(Descriptor {
        plugins,
        application_id,
        namespace,
        sdk,
        version,
        java,
        kotlin_jvm_target,
        signing_configs,
        build_types,
        dependencies,
    })
}

fn parse_sdk(node: &KdlNode) -> ConfigResult<SdkLevels> {
    let mut compile = None;
    let mut min = None;
    let mut target = None;
    let mut ndk = None;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "compile" => compile = first_scalar_arg(child),
                "min" => min = first_scalar_arg(child),
                "target" => target = first_scalar_arg(child),
                "ndk" => ndk = first_string_arg(child),
                _ => {}
            }
        }
    }

    Ok(SdkLevels {
        compile: compile.ok_or_else(|| ConfigError::MissingField("sdk compile".to_string()))?,
        min: min.ok_or_else(|| ConfigError::MissingField("sdk min".to_string()))?,
        target: target.ok_or_else(|| ConfigError::MissingField("sdk target".to_string()))?,
        ndk,
    })
}

fn parse_version(node: &KdlNode) -> ConfigResult<VersionInfo> {
    let code = scalar_prop(node, "code")
        .ok_or_else(|| ConfigError::MissingField("version code".to_string()))?;
    let name = string_prop(node, "name")
        .ok_or_else(|| ConfigError::MissingField("version name".to_string()))?;
    Ok(VersionInfo { code, name })
}

fn parse_java(node: &KdlNode) -> JavaOptions {
    let mut java = JavaOptions::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "source" => {
                    if let Some(level) = first_scalar_arg(child) {
                        java.source_compatibility = level;
                    }
                }
                "target" => {
                    if let Some(level) = first_scalar_arg(child) {
                        java.target_compatibility = level;
                    }
                }
                "desugaring" => {
                    java.desugaring = first_bool_arg(child).unwrap_or(false);
                }
                _ => {}
            }
        }
    }

    java
}

fn parse_signing(node: &KdlNode) -> ConfigResult<SigningConfig> {
    let name = first_string_arg(node)
        .ok_or_else(|| ConfigError::MissingField("signing config name".to_string()))?;

    let mut store_file = None;
    let mut store_password = None;
    let mut key_alias = None;
    let mut key_password = None;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "store-file" => store_file = first_string_arg(child),
                "store-password" => store_password = first_string_arg(child),
                "key-alias" => key_alias = first_string_arg(child),
                "key-password" => key_password = first_string_arg(child),
                _ => {}
            }
        }
    }

    let field = |value: Option<String>, which: &str| {
        value.ok_or_else(|| ConfigError::MissingField(format!("{which} for signing '{name}'")))
    };

    Ok(SigningConfig {
        store_file: field(store_file, "store-file")?,
        store_password: field(store_password, "store-password")?,
        key_alias: field(key_alias, "key-alias")?,
        key_password: field(key_password, "key-password")?,
        name,
    })
}

fn parse_build_type(node: &KdlNode) -> ConfigResult<BuildType> {
    let name = first_string_arg(node)
        .ok_or_else(|| ConfigError::MissingField("build type name".to_string()))?;

    let signing = string_prop(node, "signing");
    let mut minify = false;
    let mut shrink_resources = false;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "minify" => minify = first_bool_arg(child).unwrap_or(false),
                "shrink-resources" => shrink_resources = first_bool_arg(child).unwrap_or(false),
                _ => {}
            }
        }
    }

    Ok(BuildType {
        name,
        signing,
        minify,
        shrink_resources,
    })
}

fn parse_dependency(node: &KdlNode) -> ConfigResult<Dependency> {
    let coordinate = first_string_arg(node)
        .ok_or_else(|| ConfigError::MissingField("dependency coordinate".to_string()))?;
    let coordinate: DependencyCoordinate = coordinate.parse()?;

    let scope = match string_prop(node, "scope").as_deref() {
        None | Some("implementation") => DependencyScope::Implementation,
        Some("desugaring") => DependencyScope::Desugaring,
        Some(other) => {
            return Err(ConfigError::InvalidValue {
                field: "dependency scope".to_string(),
                message: format!("unknown scope: {}", other),
            });
        }
    };

    Ok(Dependency { coordinate, scope })
}

// Helper functions for extracting values from KDL nodes

fn first_string_arg(node: &KdlNode) -> Option<String> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

/// First positional argument, accepting both strings and integers. SDK levels
/// and version codes may be declared either way.
fn first_scalar_arg(node: &KdlNode) -> Option<String> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| scalar_to_string(e.value()))
}

fn first_bool_arg(node: &KdlNode) -> Option<bool> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_bool())
}

fn string_prop(node: &KdlNode, name: &str) -> Option<String> {
    node.get(name)
        .and_then(|v| v.as_string())
        .map(|s| s.to_string())
}

fn scalar_prop(node: &KdlNode, name: &str) -> Option<String> {
    node.get(name).and_then(scalar_to_string)
}

fn scalar_to_string(value: &KdlValue) -> Option<String> {
    value
        .as_string()
        .map(|s| s.to_string())
        .or_else(|| value.as_integer().map(|i| i.to_string()))
}
