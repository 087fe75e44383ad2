//! # edi-cli
//!
//! Command-line front end for the Brazilian logistics EDI decoder.
//!
//! Decodes NOTFIS/OCOREN/PROCEDA interchange files into tabular summaries
//! or a full JSON view, and manages the layout-override document the
//! fixed-width decoder reads its field positions from.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use edi_layouts::store::OVERRIDE_FILE_NAME;
use edi_layouts::{JsonFileStore, LayoutRegistry, LayoutSet};
use edi_pipeline::{detect, detect_with_format, record_name};
use edi_result::ParseResult;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "edibr")]
#[command(about = "Brazilian logistics EDI decoder (NOTFIS/OCOREN/PROCEDA)")]
#[command(version)]
struct Cli {
    /// Path of the layout-override document
    #[arg(short, long, default_value = OVERRIDE_FILE_NAME)]
    layouts: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an EDI file
    Parse {
        /// Input file path
        input: PathBuf,

        /// Format hint (e.g. NOTFIS.5.0), bypasses auto-detection
        #[arg(short, long)]
        format: Option<String>,

        /// Emit the full parse result as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Manage layout overrides
    Layouts {
        #[command(subcommand)]
        action: LayoutsAction,
    },
}

#[derive(Subcommand)]
enum LayoutsAction {
    /// Print the merged layout set as JSON
    Show,

    /// Save a layout document as the override set
    Import {
        /// JSON file shaped like the output of `layouts show`
        file: PathBuf,
    },

    /// Erase the override set and return to the built-in defaults
    Restore,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let registry = LayoutRegistry::new(JsonFileStore::new(&cli.layouts));

    match cli.command {
        Commands::Parse { input, format, json } => {
            run_parse(&registry, &input, format.as_deref(), json)
        }
        Commands::Layouts { action } => match action {
            LayoutsAction::Show => {
                println!("{}", serde_json::to_string_pretty(&registry.layouts())?);
                Ok(())
            }
            LayoutsAction::Import { file } => {
                let document = fs::read_to_string(&file)
                    .with_context(|| format!("reading layout document {}", file.display()))?;
                let overrides: LayoutSet = serde_json::from_str(&document)
                    .with_context(|| format!("parsing layout document {}", file.display()))?;
                registry.save(&overrides)?;
                println!("layout overrides saved ({} layouts)", overrides.len());
                Ok(())
            }
            LayoutsAction::Restore => {
                registry.restore_defaults()?;
                println!("default layouts restored");
                Ok(())
            }
        },
    }
}

fn run_parse(
    registry: &LayoutRegistry<JsonFileStore>,
    input: &Path,
    format: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let bytes =
        fs::read(input).with_context(|| format!("reading EDI file {}", input.display()))?;
    let content = decode_text(&bytes);
    let layouts = registry.layouts();
    tracing::debug!(path = %input.display(), bytes = bytes.len(), "decoding EDI file");

    let result = match format {
        Some(format) => detect_with_format(&content, format, &layouts)?,
        None => detect(&content, &layouts)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_summary(&result, &layouts);
    Ok(())
}

/// Interchange files predate UTF-8; fall back to Latin-1 when the bytes do
/// not decode.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn print_summary(result: &ParseResult, layouts: &LayoutSet) {
    println!("model:    {}", result.model);
    println!("version:  {}", result.version);
    println!("lines:    {}", result.total_lines);
    println!("status:   {}", if result.is_clean() { "ok" } else { "with errors" });

    for (identifier, lines) in &result.records {
        println!(
            "  {identifier} - {} ({})",
            record_name(identifier, &result.model, layouts),
            lines.len()
        );
    }

    for warning in &result.warnings {
        println!("warning: {warning}");
    }
    for error in &result.errors {
        eprintln!("error: {error}");
    }
}
