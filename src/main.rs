use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Level;

use mimesniff::{MimeType, SniffOptions, io};

#[derive(Parser)]
#[command(name = "mimesniff")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Identify the media type of files by content and name")]
struct Cli {
    /// Files to identify
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Print one JSON object per file
    #[arg(long)]
    json: bool,

    /// Use the file name only, never read the file
    #[arg(long, conflicts_with_all = ["prefer_name", "no_fallback", "prefix_len"])]
    by_name: bool,

    /// Trust a known file name over the content
    #[arg(long)]
    prefer_name: bool,

    /// Report the content type only, even when nothing matched
    #[arg(long)]
    no_fallback: bool,

    /// Leading bytes to read from each file
    #[arg(long, value_name = "N")]
    prefix_len: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    path: &'a Path,
    mime: MimeType,
    extension: Option<&'static str>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let options = sniff_options(&cli);
    let mut failures = 0usize;

    for path in &cli.paths {
        let mime = if cli.by_name {
            io::by_name(path)
        } else {
            match io::sniff_file(path, &options) {
                Ok(mime) => mime,
                Err(e) => {
                    eprintln!("{e}");
                    failures += 1;
                    continue;
                }
            }
        };
        print_report(path, mime, cli.json)?;
    }

    if failures > 0 {
        bail!("{failures} of {} files could not be read", cli.paths.len());
    }
    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        Level::TRACE
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn sniff_options(cli: &Cli) -> SniffOptions {
    let mut options = SniffOptions::new();
    if let Some(len) = cli.prefix_len {
        options = options.with_prefix_len(len);
    }
    if cli.no_fallback {
        options = options.without_extension_fallback();
    }
    if cli.prefer_name {
        options = options.prefer_extension();
    }
    options
}

fn print_report(path: &Path, mime: MimeType, json: bool) -> Result<()> {
    if json {
        let report = Report {
            path,
            mime,
            extension: mime.extension(),
        };
        let line = serde_json::to_string(&report)
            .with_context(|| format!("Failed to encode report for {}", path.display()))?;
        println!("{line}");
    } else {
        match mime.extension() {
            Some(ext) => println!("{}: {mime} [{ext}]", path.display()),
            None => println!("{}: {mime}", path.display()),
        }
    }
    Ok(())
}
