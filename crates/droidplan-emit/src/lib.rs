//! Build parameter emission.
//!
//! The emitter is a pure transform: a fully resolved descriptor in, an
//! ordered parameter list out. Identical inputs produce identical output;
//! key order is fixed and part of the contract.

pub mod render;

use droidplan_core::{DependencyScope, ParameterList, ResolvedDescriptor};

pub use render::{render_args, render_json, render_text};

/// Emit the ordered parameter list for the external build tool.
pub fn emit(resolved: &ResolvedDescriptor) -> ParameterList {
    let mut params = ParameterList::new();

    for plugin in &resolved.plugins {
        params.push("plugin", plugin);
    }

    params.push("applicationId", &resolved.application_id);
    params.push("namespace", &resolved.namespace);
    params.push("compileSdk", resolved.compile_sdk.to_string());
    params.push("minSdk", resolved.min_sdk.to_string());
    params.push("targetSdk", resolved.target_sdk.to_string());
    if let Some(ndk) = &resolved.ndk_version {
        params.push("ndkVersion", ndk);
    }
    params.push("versionCode", resolved.version_code.to_string());
    params.push("versionName", &resolved.version_name);

    params.push("javaSourceCompatibility", &resolved.java_source_compatibility);
    params.push("javaTargetCompatibility", &resolved.java_target_compatibility);
    params.push("coreLibraryDesugaring", resolved.desugaring.to_string());
    if let Some(jvm_target) = &resolved.kotlin_jvm_target {
        params.push("kotlinJvmTarget", jvm_target);
    }

    params.push("buildType", &resolved.build_type);
    params.push("minifyEnabled", resolved.minify.to_string());
    params.push("shrinkResources", resolved.shrink_resources.to_string());

    if let Some(signing) = &resolved.signing {
        params.push("signingStoreFile", &signing.store_file);
        params.push_secret("signingStorePassword", &signing.store_password);
        params.push("signingKeyAlias", &signing.key_alias);
        params.push_secret("signingKeyPassword", &signing.key_password);
    }

    for dependency in &resolved.dependencies {
        let key = match dependency.scope {
            DependencyScope::Implementation => "dependency",
            DependencyScope::Desugaring => "desugaringDependency",
        };
        params.push(key, dependency.coordinate.to_string());
    }

    tracing::trace!(count = params.len(), "emitted build parameters");
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidplan_config::{PropertySetBuilder, parse_descriptor, resolve};

    const DESCRIPTOR: &str = r#"
        plugin "com.android.application"

        application "com.example.app"

        sdk {
            compile 35
            min 21
            target 34
        }

        version code=12 name="1.4.2"

        signing "release" {
            store-file "${storeFile}"
            store-password "${storePassword}"
            key-alias "${keyAlias}"
            key-password "${keyPassword}"
        }

        build-type "release" signing="release" {
            minify #false
            shrink-resources #false
        }

        dependency "com.google.android.material:material:1.12.0"
    "#;

    fn emit_release() -> ParameterList {
        let descriptor = parse_descriptor(DESCRIPTOR).unwrap();
        let properties = PropertySetBuilder::new()
            .with_property("storeFile", "upload.keystore")
            .with_property("storePassword", "hunter2")
            .with_property("keyAlias", "upload")
            .with_property("keyPassword", "hunter3")
            .build();
        emit(&resolve(&descriptor, &properties, "release").unwrap())
    }

    #[test]
    fn test_scenario_values_pass_through_unchanged() {
        let params = emit_release();

        assert_eq!(params.get("applicationId"), Some("com.example.app"));
        assert_eq!(params.get("minSdk"), Some("21"));
        assert_eq!(params.get("targetSdk"), Some("34"));
        assert_eq!(params.get("signingStoreFile"), Some("upload.keystore"));
        assert_eq!(params.get("signingStorePassword"), Some("hunter2"));
        assert_eq!(params.get("signingKeyAlias"), Some("upload"));
        assert_eq!(params.get("signingKeyPassword"), Some("hunter3"));
    }

    #[test]
    fn test_emission_is_deterministic() {
        assert_eq!(emit_release(), emit_release());
    }

    #[test]
    fn test_coordinate_round_trips_through_emission() {
        let params = emit_release();
        assert_eq!(
            params.get("dependency"),
            Some("com.google.android.material:material:1.12.0")
        );
    }

    #[test]
    fn test_key_order_is_fixed() {
        let params = emit_release();
        let keys: Vec<&str> = params.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "plugin",
                "applicationId",
                "namespace",
                "compileSdk",
                "minSdk",
                "targetSdk",
                "versionCode",
                "versionName",
                "javaSourceCompatibility",
                "javaTargetCompatibility",
                "coreLibraryDesugaring",
                "buildType",
                "minifyEnabled",
                "shrinkResources",
                "signingStoreFile",
                "signingStorePassword",
                "signingKeyAlias",
                "signingKeyPassword",
                "dependency",
            ]
        );
    }

    #[test]
    fn test_passwords_are_flagged_secret() {
        let params = emit_release();
        let secrets = params.secret_values();
        assert_eq!(secrets, vec!["hunter2", "hunter3"]);
    }
}
