//! CLI command implementations.

use anyhow::{Context, Result};
use droidplan_config::{PropertySetBuilder, declared_references, parse_descriptor, parse_properties};

use crate::OutputFormat;

pub fn emit(
    path: &str,
    build_type: &str,
    properties_file: Option<&str>,
    overrides: &[String],
    allow_env: bool,
    format: OutputFormat,
) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor: {}", path))?;
    let descriptor = parse_descriptor(&content)
        .with_context(|| format!("Failed to parse descriptor: {}", path))?;

    let mut builder = PropertySetBuilder::new();
    if let Some(file) = properties_file {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read properties file: {}", file))?;
        let properties =
            parse_properties(&text).with_context(|| format!("Failed to parse {}", file))?;
        builder = builder.with_properties(properties);
    }
    for spec in overrides {
        let (key, value) = spec
            .split_once('=')
            .with_context(|| format!("expected KEY=VALUE, got '{}'", spec))?;
        builder = builder.with_property(key, value);
    }
    if allow_env {
        builder = builder.with_env_capture();
    }
    let properties = builder.build();

    let resolved = droidplan_config::resolve(&descriptor, &properties, build_type)?;
    let params = droidplan_emit::emit(&resolved);

    match format {
        OutputFormat::Text => print!("{}", droidplan_emit::render_text(&params)),
        OutputFormat::Json => println!("{}", droidplan_emit::render_json(&params)?),
        OutputFormat::Args => println!("{}", droidplan_emit::render_args(&params).join(" ")),
    }

    Ok(())
}

pub fn validate(path: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor: {}", path))?;
    match parse_descriptor(&content) {
        Ok(_descriptor) => {
            println!("Configuration is valid");
            Ok(())
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}

pub fn inspect(path: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor: {}", path))?;
    let descriptor = parse_descriptor(&content)
        .with_context(|| format!("Failed to parse descriptor: {}", path))?;

    println!("Application: {}", descriptor.application_id);
    if let Some(namespace) = &descriptor.namespace {
        println!("Namespace:   {}", namespace);
    }
    println!(
        "SDK:         compile={} min={} target={}",
        descriptor.sdk.compile, descriptor.sdk.min, descriptor.sdk.target
    );
    println!(
        "Version:     {} ({})",
        descriptor.version.name, descriptor.version.code
    );

    if !descriptor.plugins.is_empty() {
        println!("\nPlugins:");
        for plugin in &descriptor.plugins {
            println!("  {}", plugin);
        }
    }

    println!("\nBuild types:");
    for build_type in &descriptor.build_types {
        let signing = build_type
            .signing
            .as_deref()
            .map(|s| format!(" (signing: {})", s))
            .unwrap_or_default();
        println!("  {}{}", build_type.name, signing);
    }

    if !descriptor.dependencies.is_empty() {
        println!("\nDependencies:");
        for dependency in &descriptor.dependencies {
            println!(
                "  {} [{}]",
                dependency.coordinate,
                dependency.scope.as_str()
            );
        }
    }

    let references = declared_references(&descriptor);
    if !references.is_empty() {
        println!("\nReferenced properties:");
        for reference in references {
            println!("  ${{{}}}", reference);
        }
    }

    Ok(())
}
