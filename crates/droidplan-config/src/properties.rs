//! External project properties and reference substitution.
//!
//! Descriptor fields may reference properties:
//! - `${NAME}` - project property (properties file or explicit override)
//! - `${env.NAME}` - captured process environment
//!
//! Lookup fails closed: an unresolved reference is an error naming the key,
//! never a silent default.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::{ConfigError, ConfigResult};
use droidplan_core::Descriptor;

// Regex for matching ${...} references
static REF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)\}").unwrap()
});

/// The external property source a descriptor is resolved against.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    /// Project properties (file contents plus explicit overrides).
    project: HashMap<String, String>,
    /// Captured environment, addressed as `${env.NAME}`.
    env: HashMap<String, String>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a project property, overriding any earlier value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.project.insert(name.into(), value.into());
    }

    /// Capture the current process environment for `${env.NAME}` references.
    pub fn capture_env(&mut self) {
        for (key, value) in std::env::vars() {
            self.env.insert(key, value);
        }
    }

    /// Resolve a reference name to its value.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        match name.split_once('.') {
            Some(("env", rest)) => self.env.get(rest).map(|s| s.as_str()),
            _ => self.project.get(name).map(|s| s.as_str()),
        }
    }

    /// Substitute every `${...}` reference in `input`.
    ///
    /// Errors with the first unresolved key; no partial substitution escapes.
    pub fn substitute(&self, input: &str) -> ConfigResult<String> {
        for caps in REF_REGEX.captures_iter(input) {
            let name = &caps[1];
            if self.resolve(name).is_none() {
                return Err(ConfigError::MissingProperty(name.to_string()));
            }
        }

        Ok(REF_REGEX
            .replace_all(input, |caps: &regex::Captures| {
                self.resolve(&caps[1]).unwrap_or_default().to_string()
            })
            .to_string())
    }
}

/// Builder for assembling a [`PropertySet`] from its sources.
#[derive(Debug, Default)]
pub struct PropertySetBuilder {
    set: PropertySet,
}

impl PropertySetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set.set(name, value);
        self
    }

    pub fn with_properties(mut self, properties: HashMap<String, String>) -> Self {
        self.set.project.extend(properties);
        self
    }

    pub fn with_env_capture(mut self) -> Self {
        self.set.capture_env();
        self
    }

    pub fn build(self) -> PropertySet {
        self.set
    }
}

/// Parse `key=value` properties text (the format project property files use).
///
/// `#` and `!` start comment lines; blank lines are skipped; later duplicates
/// override earlier ones.
pub fn parse_properties(text: &str) -> ConfigResult<HashMap<String, String>> {
    let mut properties = HashMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::MalformedLine {
                line: idx + 1,
                message: format!("expected key=value, got '{}'", line),
            });
        };
        properties.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(properties)
}

/// Every property reference a descriptor declares, sorted and deduplicated.
pub fn declared_references(descriptor: &Descriptor) -> Vec<String> {
    let mut refs = Vec::new();

    let mut scan = |input: &str| {
        for caps in REF_REGEX.captures_iter(input) {
            refs.push(caps[1].to_string());
        }
    };

    for plugin in &descriptor.plugins {
        scan(plugin);
    }
    scan(&descriptor.application_id);
    if let Some(namespace) = &descriptor.namespace {
        scan(namespace);
    }
    scan(&descriptor.sdk.compile);
    scan(&descriptor.sdk.min);
    scan(&descriptor.sdk.target);
    if let Some(ndk) = &descriptor.sdk.ndk {
        scan(ndk);
    }
    scan(&descriptor.version.code);
    scan(&descriptor.version.name);
    scan(&descriptor.java.source_compatibility);
    scan(&descriptor.java.target_compatibility);
    if let Some(jvm) = &descriptor.kotlin_jvm_target {
        scan(jvm);
    }
    for signing in &descriptor.signing_configs {
        scan(&signing.store_file);
        scan(&signing.store_password);
        scan(&signing.key_alias);
        scan(&signing.key_password);
    }
    for dependency in &descriptor.dependencies {
        scan(&dependency.coordinate.group);
        scan(&dependency.coordinate.artifact);
        scan(&dependency.coordinate.version);
    }

    refs.sort();
    refs.dedup();
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_substitution() {
        let properties = PropertySetBuilder::new()
            .with_property("storeFile", "upload.keystore")
            .build();

        let result = properties.substitute("${storeFile}").unwrap();
        assert_eq!(result, "upload.keystore");
    }

    #[test]
    fn test_substitution_inside_text() {
        let properties = PropertySetBuilder::new()
            .with_property("suffix", "dev")
            .build();

        let result = properties.substitute("com.example.app.${suffix}").unwrap();
        assert_eq!(result, "com.example.app.dev");
    }

    #[test]
    fn test_unresolved_reference_fails_closed() {
        let properties = PropertySet::new();
        let err = properties.substitute("${storePassword}").unwrap_err();
        assert!(matches!(err, ConfigError::MissingProperty(key) if key == "storePassword"));
    }

    #[test]
    fn test_env_namespace() {
        let mut properties = PropertySet::new();
        properties.env.insert("HOME".to_string(), "/home/ci".to_string());

        let result = properties.substitute("${env.HOME}/keys").unwrap();
        assert_eq!(result, "/home/ci/keys");
    }

    #[test]
    fn test_env_not_consulted_for_project_names() {
        let mut properties = PropertySet::new();
        properties
            .env
            .insert("storePassword".to_string(), "leaked".to_string());

        let err = properties.substitute("${storePassword}").unwrap_err();
        assert!(matches!(err, ConfigError::MissingProperty(_)));
    }

    #[test]
    fn test_literal_text_untouched() {
        let properties = PropertySet::new();
        let result = properties.substitute("com.example.app").unwrap();
        assert_eq!(result, "com.example.app");
    }

    #[test]
    fn test_parse_properties_file() {
        let text = r#"
            # upload signing
            MYAPP_UPLOAD_STORE_FILE=upload.keystore
            MYAPP_UPLOAD_STORE_PASSWORD = hunter2
            ! legacy comment style
            MYAPP_UPLOAD_KEY_ALIAS=upload
        "#;

        let properties = parse_properties(text).unwrap();
        assert_eq!(properties.len(), 3);
        assert_eq!(
            properties.get("MYAPP_UPLOAD_STORE_PASSWORD").map(String::as_str),
            Some("hunter2")
        );
    }

    #[test]
    fn test_parse_properties_malformed_line() {
        let err = parse_properties("valid=1\nnot a property\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_parse_properties_duplicates_override() {
        let properties = parse_properties("key=first\nkey=second\n").unwrap();
        assert_eq!(properties.get("key").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_declared_references() {
        let descriptor = crate::parse_descriptor(
            r#"
            application "com.example.app"
            sdk { compile "${sdk.compile}"; min 21; target 34 }
            version code="${build.number}" name="1.0"
            signing "release" {
                store-file "${storeFile}"
                store-password "${storePassword}"
                key-alias "${keyAlias}"
                key-password "${keyPassword}"
            }
            "#,
        )
        .unwrap();

        let refs = declared_references(&descriptor);
        assert_eq!(
            refs,
            vec![
                "build.number",
                "keyAlias",
                "keyPassword",
                "sdk.compile",
                "storeFile",
                "storePassword",
            ]
        );
    }
}
