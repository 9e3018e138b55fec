//! Fieldmark command-line renderer.
//!
//! Usage:
//!   fieldmark render --type markdown notes.md
//!   echo '**hi**' | fieldmark render --type raw_markdown --html4
//!   fieldmark types --json

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fieldmark_kernel::{Config, FieldTypeRegistry, Formatter, OutputMode};

/// Render stored text fields to HTML.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a field value read from FILE (or stdin) to HTML.
    Render {
        /// Field type name.
        #[arg(long = "type", default_value = "markdown")]
        type_name: String,

        /// Write HTML4 void elements instead of XHTML self-closing tags.
        #[arg(long)]
        html4: bool,

        /// Input file. Reads stdin when omitted.
        file: Option<PathBuf>,
    },

    /// List registered field types.
    Types {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    debug!(?config, "configuration loaded");

    let registry = FieldTypeRegistry::with_standard_types();

    match args.command {
        Command::Render {
            type_name,
            html4,
            file,
        } => {
            let formatter = config.formatter()?;
            let mode = if html4 {
                OutputMode::Html4
            } else {
                config.output_mode
            };
            let html = render(&registry, &formatter, &config, &type_name, mode, file)?;
            io::stdout()
                .write_all(html.as_bytes())
                .context("failed to write output")?;
        }
        Command::Types { json } => print_types(&registry, json)?,
    }

    Ok(())
}

fn render(
    registry: &FieldTypeRegistry,
    formatter: &Formatter,
    config: &Config,
    type_name: &str,
    mode: OutputMode,
    file: Option<PathBuf>,
) -> Result<String> {
    let bytes = read_input(file.as_ref())?;
    let field = config
        .hydrate(registry, type_name, bytes)
        .context("failed to read field")?;

    info!(
        type_name,
        kind = %field.kind(),
        %mode,
        blank = field.is_blank(),
        "rendering"
    );
    Ok(field.render_with(formatter, mode))
}

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_types(registry: &FieldTypeRegistry, json: bool) -> Result<()> {
    let definitions = registry.definitions();
    if json {
        let out = serde_json::to_string_pretty(&definitions).context("serialize field types")?;
        println!("{out}");
        return Ok(());
    }

    println!("{:<16} {:<14} {:<10} LABEL", "TYPE", "KIND", "SANITIZED");
    println!("{}", "-".repeat(58));
    for def in definitions {
        let sanitized = if def.kind.is_sanitized() { "yes" } else { "no" };
        println!(
            "{:<16} {:<14} {:<10} {}",
            def.type_name, def.kind, sanitized, def.label
        );
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
