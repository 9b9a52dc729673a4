//! The emitted build-parameter model.

use serde::{Deserialize, Serialize};

/// A single parameter for the external build tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildParameter {
    pub key: String,
    pub value: String,
    /// Masked in human-oriented renderings.
    pub secret: bool,
}

/// An ordered parameter sequence. Order is part of the emitter contract:
/// identical resolved descriptors produce identical sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterList(Vec<BuildParameter>);

impl ParameterList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(BuildParameter {
            key: key.into(),
            value: value.into(),
            secret: false,
        });
    }

    pub fn push_secret(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(BuildParameter {
            key: key.into(),
            value: value.into(),
            secret: true,
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BuildParameter> {
        self.0.iter()
    }

    /// Value of the first parameter with this key, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// All values of parameters with this key, in emission order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|p| p.key == key)
            .map(|p| p.value.as_str())
            .collect()
    }

    /// Secret values that should be masked in logs and console output.
    pub fn secret_values(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|p| p.secret)
            .map(|p| p.value.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a BuildParameter;
    type IntoIter = std::slice::Iter<'a, BuildParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let mut params = ParameterList::new();
        params.push("applicationId", "com.example.app");
        params.push("minSdk", "21");
        params.push("dependency", "a:b:1");
        params.push("dependency", "c:d:2");

        let keys: Vec<&str> = params.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["applicationId", "minSdk", "dependency", "dependency"]);
        assert_eq!(params.get_all("dependency"), vec!["a:b:1", "c:d:2"]);
    }

    #[test]
    fn test_secret_values() {
        let mut params = ParameterList::new();
        params.push("signingStoreFile", "upload.keystore");
        params.push_secret("signingStorePassword", "hunter2");

        assert_eq!(params.secret_values(), vec!["hunter2"]);
        assert_eq!(params.get("signingStorePassword"), Some("hunter2"));
    }
}
