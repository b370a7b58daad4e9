mod db;

use std::io::{self, Write as _};

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use db::{check_file, source_file};
use salsa::DatabaseImpl;
use strata::{Diagnostic, Language, ParseOptions, Severity};
use strata_errors::Renderer;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "strata", version, about = "Tolerant syntax trees for C family and markup files")]
struct Options {
    /// Log more to stderr. Repeat for more detail; `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the syntax tree of a file.
    Parse {
        path: Utf8PathBuf,
        /// Language name or alias. Inferred from the extension when missing.
        #[arg(short, long)]
        language: Option<String>,
        /// Only pair delimiters and tags.
        #[arg(long)]
        no_analysis: bool,
        #[arg(long, value_enum, default_value_t = Format::Tree)]
        format: Format,
    },
    /// Report what the parser recovered from.
    Check {
        path: Utf8PathBuf,
        /// One `path:line:column: severity: message` line per note.
        #[arg(long)]
        short: bool,
    },
    /// List the supported languages and their file extensions.
    Languages,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Tree,
    Json,
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    init_logging(options.verbose);

    match options.command {
        Command::Parse { path, language, no_analysis, format } => {
            let language = match language {
                Some(name) => name.parse::<Language>()?,
                None => strata::language_for_path(&path)?,
            };
            let options = ParseOptions { syntax_analysis: !no_analysis };
            let document = strata::parse_file_as(&path, language, options)?;

            let mut out = io::stdout().lock();
            match format {
                Format::Tree => out.write_all(document.root().debug_dump().as_bytes())?,
                Format::Json => {
                    serde_json::to_writer_pretty(&mut out, &strata::project(document.root()))?;
                    writeln!(out)?;
                }
            }
        }
        Command::Check { path, short } => {
            strata::language_for_path(&path)?;
            let db = DatabaseImpl::default();
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read `{path}`"))?;

            let file = source_file(&db, path, text)?;
            let diagnostics = check_file::accumulated::<Diagnostic>(&db, file);

            let renderer = Renderer::styled();
            let path = file.path(&db).as_str();
            let text = file.text(&db);

            for diagnostic in diagnostics {
                if short {
                    let location = file.location(&db, diagnostic.range().start());
                    let severity = match diagnostic.severity() {
                        Severity::Error => "error",
                        Severity::Warning => "warning",
                    };
                    println!("{location}: {severity}: {}", diagnostic.message());
                } else {
                    eprintln!("{}", diagnostic.render(&renderer, path, text));
                }
            }
        }
        Command::Languages => {
            for language in Language::ALL {
                println!("{:<16}{}", language.name(), language.extensions().join(", "));
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).without_time().init();
}
