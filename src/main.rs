//! @ai:module:intent CLI entry point for checking and browsing kata content
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on store, check, output, config

use clap::{Parser, Subcommand, ValueEnum};
use kata_store::{
    check, output, ContentStore, Error, OutputFormat, StoreConfig,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "katas")]
#[command(author, version, about = "Check and browse fill-in-the-blank koan content")]
struct Cli {
    /// Path to a katas.toml configuration file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check content documents for schema and authoring problems
    Check {
        /// Path to a document or a directory of documents
        #[arg(default_value = "content")]
        path: PathBuf,

        /// Fail on warnings as well as errors
        #[arg(long, default_value = "false")]
        deny_warnings: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Show the loaded modules, one module, or one kata
    Show {
        /// Path to a document or a directory of documents
        #[arg(default_value = "content")]
        path: PathBuf,

        /// Module index
        #[arg(long, short)]
        module: Option<usize>,

        /// Kata index within the module (requires --module)
        #[arg(long, short, requires = "module")]
        kata: Option<usize>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Print a kata's code with its blanks filled in
    Fill {
        /// Path to a document or a directory of documents
        path: PathBuf,

        /// Module index
        #[arg(long, short)]
        module: usize,

        /// Kata index within the module
        #[arg(long, short)]
        kata: usize,

        /// Answer for the next blank; defaults to the kata's own solutions
        #[arg(long = "answer", short)]
        answers: Vec<String>,
    },

    /// Re-serialize loaded content to the document format
    Export {
        /// Path to a document or a directory of documents
        path: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Write compact JSON
        #[arg(long, default_value = "false")]
        compact: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "kata_store=debug" } else { "kata_store=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> kata_store::Result<StoreConfig> {
    match path {
        Some(path) => StoreConfig::load(path),
        None => Ok(StoreConfig::default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Commands::Check {
            path,
            deny_warnings,
            format,
        } => {
            let mut config = config;
            config.check.deny_warnings |= deny_warnings;

            match check::check_path(&path, &config) {
                Ok(report) => {
                    println!("{}", output::format_check_report(&report, format.into()));

                    if report.first_failure(config.check.deny_warnings).is_none() {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::from(1)
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }

        Commands::Show {
            path,
            module,
            kata,
            format,
        } => report(show(&path, &config, module, kata, format.into())),

        Commands::Fill {
            path,
            module,
            kata,
            answers,
        } => report(fill(&path, &config, module, kata, &answers)),

        Commands::Export {
            path,
            output,
            compact,
        } => report(export(&path, &config, output.as_deref(), compact)),
    }
}

fn report(result: kata_store::Result<String>) -> ExitCode {
    match result {
        Ok(text) => {
            if !text.is_empty() {
                println!("{}", text);
            }
            ExitCode::SUCCESS
        }
        Err(e @ (Error::Malformed { .. } | Error::NotFound { .. } | Error::AnswerCount { .. })) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn show(
    path: &Path,
    config: &StoreConfig,
    module: Option<usize>,
    kata: Option<usize>,
    format: OutputFormat,
) -> kata_store::Result<String> {
    let store = ContentStore::load_path(path, config)?;
    let marker = store.blank_marker();

    Ok(match (module, kata) {
        (Some(m), Some(k)) => output::format_kata(store.kata(m, k)?, marker, format),
        (Some(m), None) => output::format_module(store.get(m)?, marker, format),
        _ => output::format_store(&store, format),
    })
}

fn fill(
    path: &Path,
    config: &StoreConfig,
    module: usize,
    kata: usize,
    answers: &[String],
) -> kata_store::Result<String> {
    let store = ContentStore::load_path(path, config)?;
    let kata = store.kata(module, kata)?;

    if answers.is_empty() {
        kata.solved_code(store.blank_marker())
    } else {
        store.blank_marker().fill(&kata.code, answers)
    }
}

fn export(
    path: &Path,
    config: &StoreConfig,
    destination: Option<&Path>,
    compact: bool,
) -> kata_store::Result<String> {
    let store = ContentStore::load_path(path, config)?;
    let json = store.to_json(!compact)?;

    match destination {
        Some(dest) => {
            std::fs::write(dest, format!("{}\n", json))?;
            tracing::info!("Exported {} modules to {}", store.len(), dest.display());
            Ok(String::new())
        }
        None => Ok(json),
    }
}
