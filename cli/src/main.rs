use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use tl_serde_gen::{load_schema, render, schema_to_json, GenError, GenOptions, LineEnding};
use tl_serde_gen_compiler::writer::{is_up_to_date, write_if_changed, WriteOutcome};
use tracing::{debug, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "tlgen")]
#[command(about = "Generate serde-annotated Rust types from TL schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust code from a `.tl` schema
    GenRust {
        /// Input `.tl` schema file
        #[arg(short, long)]
        input: PathBuf,

        /// Output `.rs` file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file with generation options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Path of the deserializer used for string fields
        #[arg(long)]
        string_deserializer: Option<String>,

        /// Externally defined union over every constructor and function, e.g. `crate::Any<'a>`
        #[arg(long)]
        maximal_union: Option<String>,

        /// Write CRLF line endings
        #[arg(long)]
        crlf: bool,

        /// Fail instead of writing when the output is out of date
        #[arg(long, requires = "output")]
        check: bool,
    },

    /// Print a `.tl` schema as JSON (to stdout)
    Dump {
        /// Input `.tl` schema file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn load_options(
    config: Option<&Path>,
    string_deserializer: Option<&String>,
    maximal_union: Option<&String>,
    crlf: bool,
) -> Result<GenOptions, GenError> {
    let mut options = match config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            GenOptions::from_json(&text)?
        }
        None => GenOptions::default(),
    };

    // Flags take precedence over the config file.
    if let Some(path) = string_deserializer {
        options.string_deserializer = path.clone();
    }
    if let Some(union) = maximal_union {
        options.maximal_union = Some(union.clone());
    }
    if crlf {
        options.line_ending = LineEnding::CrLf;
    }
    options.validate()?;
    debug!(?options, "resolved options");
    Ok(options)
}

fn main() -> Result<(), GenError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::GenRust {
            input,
            output,
            config,
            string_deserializer,
            maximal_union,
            crlf,
            check,
        } => {
            let options = load_options(
                config.as_deref(),
                string_deserializer.as_ref(),
                maximal_union.as_ref(),
                *crlf,
            )?;

            let text = fs::read_to_string(input)?;
            let schema = load_schema(&text)?;
            let rust_code = render(&schema, &options)?;

            match output {
                Some(out_path) if *check => {
                    if !is_up_to_date(out_path, &rust_code) {
                        return Err(GenError::OutOfDate(out_path.clone()));
                    }
                    info!(path = %out_path.display(), "output is up to date");
                }
                Some(out_path) => match write_if_changed(out_path, &rust_code)? {
                    WriteOutcome::Written { path, .. } => {
                        println!("Generated Rust code written to {}", path.display());
                    }
                    WriteOutcome::Unchanged { path } => {
                        println!("{} is already up to date", path.display());
                    }
                },
                None => print!("{}", rust_code),
            }
            Ok(())
        }

        Commands::Dump { input } => {
            let text = fs::read_to_string(input)?;
            let schema = load_schema(&text)?;
            println!("{}", schema_to_json(&schema)?);
            Ok(())
        }
    }
}
