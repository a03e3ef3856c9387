//! `anyv` CLI: inspect and convert JSON/YAML documents through `AnyValue`.
//!
//! ## Usage
//!
//! ```sh
//! # Print the kind of the root value
//! echo '["1", true]' | anyv kind
//!
//! # Outline every nested value with its kind
//! anyv tree -i data.yaml
//!
//! # Convert YAML to pretty JSON
//! anyv convert -i data.yaml --to json --pretty
//!
//! # Fail unless the root is a string map
//! anyv check -i data.json --expect stringMap
//! ```

use anyhow::{Context, Result};
use anyvalue_core::{json, yaml, AnyValue, Kind};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "anyv",
    version,
    about = "Inspect and convert JSON/YAML documents as schema-less values"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the kind of the document's root value
    Kind {
        #[command(flatten)]
        source: Source,
    },
    /// Print an indented outline of every value and its kind
    Tree {
        #[command(flatten)]
        source: Source,
    },
    /// Decode a document and re-encode it in the target format
    Convert {
        #[command(flatten)]
        source: Source,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Target format
        #[arg(long, value_enum)]
        to: Format,
        /// Indent JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Exit non-zero unless the root value has the expected kind
    Check {
        #[command(flatten)]
        source: Source,
        /// Expected kind: null, int, string, bool, stringMap or array
        #[arg(long)]
        expect: Kind,
    },
}

#[derive(clap::Args)]
struct Source {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Input format (inferred from the file extension, JSON otherwise)
    #[arg(long, value_enum)]
    from: Option<Format>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Kind { source } => {
            let value = load(&source)?;
            println!("{}", value.kind());
        }
        Commands::Tree { source } => {
            let value = load(&source)?;
            let mut out = String::new();
            render_tree(&value, None, 0, &mut out);
            print!("{}", out);
        }
        Commands::Convert {
            source,
            output,
            to,
            pretty,
        } => {
            let value = load(&source)?;
            let text = match to {
                Format::Json if pretty => json::encode_pretty(&value)? + "\n",
                Format::Json => json::encode_string(&value)? + "\n",
                // serde_yaml already ends the document with a newline
                Format::Yaml => yaml::encode(&value)?,
            };
            write_output(output.as_deref(), &text)?;
        }
        Commands::Check { source, expect } => {
            let value = load(&source)?;
            let found = value.kind();
            if found != expect {
                eprintln!("Kind mismatch: expected {}, found {}", expect, found);
                process::exit(1);
            }
            println!("ok: {}", found);
        }
    }

    Ok(())
}

/// Route `tracing` output to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read and decode the input document in the selected format.
fn load(source: &Source) -> Result<AnyValue> {
    let text = read_input(source.input.as_deref())?;
    let format = source
        .from
        .or_else(|| source.input.as_deref().and_then(format_from_path))
        .unwrap_or(Format::Json);
    tracing::debug!(?format, bytes = text.len(), "decoding input");

    match format {
        Format::Json => json::decode_str(&text).context("Failed to decode JSON input"),
        Format::Yaml => yaml::decode(&text).context("Failed to decode YAML input"),
    }
}

fn format_from_path(path: &str) -> Option<Format> {
    let ext = Path::new(path).extension()?.to_str()?;
    match ext.to_ascii_lowercase().as_str() {
        "json" => Some(Format::Json),
        "yaml" | "yml" => Some(Format::Yaml),
        _ => None,
    }
}

/// One line per value: `<indent><label: >kind <payload>`. Maps show their
/// entry count as `{N}` and arrays their length as `[N]`.
fn render_tree(value: &AnyValue, label: Option<&str>, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    if let Some(label) = label {
        out.push_str(label);
        out.push_str(": ");
    }
    out.push_str(value.kind().name());

    match value {
        AnyValue::Null => {}
        AnyValue::Int(n) => out.push_str(&format!(" {}", n)),
        AnyValue::String(s) => out.push_str(&format!(" {:?}", s)),
        AnyValue::Bool(b) => out.push_str(&format!(" {}", b)),
        AnyValue::StringMap(map) => {
            out.push_str(&format!("{{{}}}", map.len()));
            out.push('\n');
            for (key, child) in map {
                render_tree(child, Some(key), depth + 1, out);
            }
            return;
        }
        AnyValue::Array(items) => {
            out.push_str(&format!("[{}]", items.len()));
            out.push('\n');
            for (i, child) in items.iter().enumerate() {
                render_tree(child, Some(&i.to_string()), depth + 1, out);
            }
            return;
        }
    }
    out.push('\n');
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
