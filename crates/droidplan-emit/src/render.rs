//! Parameter list renderings.
//!
//! Text output is for humans and masks secret values. JSON and argv output
//! are the machine handoff to the external build tool and carry real values.

use droidplan_core::ParameterList;

const MASK: &str = "********";

/// One `key=value` line per parameter, secrets masked.
pub fn render_text(params: &ParameterList) -> String {
    let mut out = String::new();
    for param in params {
        let value = if param.secret { MASK } else { &param.value };
        out.push_str(&param.key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// JSON array of `{key, value, secret}` objects, in emission order.
pub fn render_json(params: &ParameterList) -> serde_json::Result<String> {
    let entries: Vec<_> = params.iter().collect();
    serde_json::to_string_pretty(&entries)
}

/// Argv form for spawning the external tool: `--kebab-case-key value` pairs.
pub fn render_args(params: &ParameterList) -> Vec<String> {
    let mut args = Vec::with_capacity(params.len() * 2);
    for param in params {
        args.push(format!("--{}", kebab(&param.key)));
        args.push(param.value.clone());
    }
    args
}

fn kebab(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParameterList {
        let mut params = ParameterList::new();
        params.push("applicationId", "com.example.app");
        params.push("minSdk", "21");
        params.push_secret("signingStorePassword", "hunter2");
        params
    }

    #[test]
    fn test_text_masks_secrets() {
        let text = render_text(&sample());
        assert_eq!(
            text,
            "applicationId=com.example.app\nminSdk=21\nsigningStorePassword=********\n"
        );
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_json_carries_real_values() {
        let json = render_json(&sample()).unwrap();
        assert!(json.contains("hunter2"));
        assert!(json.contains("\"secret\": true"));
    }

    #[test]
    fn test_args_form() {
        let args = render_args(&sample());
        assert_eq!(
            args,
            vec![
                "--application-id",
                "com.example.app",
                "--min-sdk",
                "21",
                "--signing-store-password",
                "hunter2",
            ]
        );
    }
}
