//! droidplan CLI tool.

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "droidplan")]
#[command(about = "Android build-configuration resolver", long_about = None)]
struct Cli {
    /// Log filter (e.g. "droidplan_config=debug")
    #[arg(long, env = "DROIDPLAN_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a descriptor and emit the build parameter list
    Emit {
        /// Path to the descriptor file
        #[arg(default_value = "droidplan.kdl")]
        path: String,
        /// Build type to resolve
        #[arg(long, default_value = "release")]
        build_type: String,
        /// Properties file (key=value lines)
        #[arg(long)]
        properties_file: Option<String>,
        /// Explicit property override, repeatable
        #[arg(long = "property", value_name = "KEY=VALUE")]
        properties: Vec<String>,
        /// Let ${env.NAME} references read the process environment
        #[arg(long)]
        allow_env: bool,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Validate a descriptor without resolving properties
    Validate {
        /// Path to the descriptor file
        #[arg(default_value = "droidplan.kdl")]
        path: String,
    },
    /// Summarize a descriptor and the properties it references
    Inspect {
        /// Path to the descriptor file
        #[arg(default_value = "droidplan.kdl")]
        path: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// key=value lines, secrets masked
    Text,
    /// JSON array for machine handoff
    Json,
    /// argv form for spawning the build tool
    Args,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&cli.log)?)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Emit {
            path,
            build_type,
            properties_file,
            properties,
            allow_env,
            format,
        } => {
            commands::emit(
                &path,
                &build_type,
                properties_file.as_deref(),
                &properties,
                allow_env,
                format,
            )?;
        }
        Commands::Validate { path } => {
            commands::validate(&path)?;
        }
        Commands::Inspect { path } => {
            commands::inspect(&path)?;
        }
    }

    Ok(())
}
