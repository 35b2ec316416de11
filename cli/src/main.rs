//! Bookmarks Converter
//!
//! Converts a bookmarks file from (db, html, json) to (db, html, json),
//! optionally between the generic, chrome and firefox dialects.

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bookmarks_core::{ConvertError, Converter, Dialect, Format};

#[derive(Parser)]
#[command(name = "bookmarks-converter", author, version)]
#[command(about = "Convert your browser bookmarks file from (db, html, json) to (db, html, json).")]
struct Cli {
    /// Format of the input bookmarks file, one of (db, html, json)
    input_format: Format,

    /// Format of the output bookmarks file, one of (db, html, json)
    output_format: Format,

    /// Path to the bookmarks file to convert
    file: PathBuf,

    /// Dialect of the input file, one of (generic, chrome, firefox)
    #[arg(long, default_value = "generic")]
    from: Dialect,

    /// Dialect of the output file, one of (generic, chrome, firefox)
    #[arg(long, default_value = "generic")]
    to: Dialect,

    /// Output file; defaults to a timestamped name next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn describe(err: ConvertError, file: &Path) -> anyhow::Error {
    if err.is_invalid_database() {
        anyhow!(
            "The provided file '{}' is not a valid sqlite3 database file.",
            file.display()
        )
    } else if err.is_invalid_bookmarks() {
        anyhow!(err).context(format!(
            "The provided file '{}' is not a valid bookmarks file.",
            file.display()
        ))
    } else {
        anyhow!(err)
    }
}

fn run(cli: &Cli) -> Result<PathBuf> {
    if !cli.file.is_file() {
        bail!(
            "Could not find a file at the given filepath: '{}'",
            cli.file.display()
        );
    }

    let mut converter = Converter::new(&cli.file)
        .from_dialect(cli.from)
        .to_dialect(cli.to);

    converter
        .run(cli.input_format, cli.output_format, cli.output.as_deref())
        .map_err(|err| describe(err, &cli.file))
}

fn main() -> ExitCode {
    bookmarks_core::init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Conversion finished");
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
