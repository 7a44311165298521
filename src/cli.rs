//! CLI interface module
//!
//! Provides the command-line interface using clap derive macros. The
//! binary renders a local HTML file or a URL to a PDF path through the
//! same builder API the library exposes.

use clap::Parser;
use std::path::PathBuf;

use crate::options::{Margins, OptionsError, Unit};

/// Render HTML documents to PDF through headless Chromium
#[derive(Parser, Debug)]
#[command(name = "playwright-pdf")]
#[command(version)]
#[command(about = "Render an HTML file or URL to PDF", long_about = None)]
pub struct Cli {
    /// HTML file to render (omit when using --url)
    pub input: Option<PathBuf>,

    /// Render a URL instead of a local file
    #[arg(long, conflicts_with = "input")]
    pub url: Option<String>,

    /// Output PDF path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Paper format (letter, legal, tabloid, ledger, a0-a6)
    #[arg(long)]
    pub format: Option<String>,

    /// Paper width (interpreted in --unit)
    #[arg(long)]
    pub width: Option<f64>,

    /// Paper height (interpreted in --unit)
    #[arg(long)]
    pub height: Option<f64>,

    /// Unit for --width/--height/--margins (px, in, cm, mm)
    #[arg(long, default_value = "mm")]
    pub unit: String,

    /// Margins: one value for all sides, or top,right,bottom,left
    #[arg(long)]
    pub margins: Option<String>,

    /// Landscape orientation
    #[arg(long)]
    pub landscape: bool,

    /// Print background graphics
    #[arg(long)]
    pub print_background: bool,

    /// Generate a tagged (accessible) PDF
    #[arg(long)]
    pub tagged: bool,

    /// Embed the document outline
    #[arg(long)]
    pub outline: bool,

    /// Rendering scale between 0.1 and 2.0
    #[arg(long)]
    pub scale: Option<f64>,

    /// Paper ranges to print, e.g. "1-5, 8, 11-13"
    #[arg(long)]
    pub page_ranges: Option<String>,

    /// HTML file used as the print header template
    #[arg(long)]
    pub header_file: Option<PathBuf>,

    /// HTML file used as the print footer template
    #[arg(long)]
    pub footer_file: Option<PathBuf>,

    /// Explicit Node.js binary path, skipping discovery
    #[arg(long)]
    pub node_binary: Option<PathBuf>,

    /// Alternative renderer entry script
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Renderer timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse the `--unit` flag
    pub fn parse_unit(&self) -> Result<Unit, OptionsError> {
        self.unit.parse()
    }
}

/// Parse the `--margins` value: a single number or four comma-separated
/// numbers, in the given unit
pub fn parse_margins(raw: &str, unit: Unit) -> Result<Margins, String> {
    let values: Vec<f64> = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("Invalid margin value [{}]", part.trim()))
        })
        .collect::<Result<_, _>>()?;

    match values.as_slice() {
        [all] => Ok(Margins::uniform(*all, unit)),
        [top, right, bottom, left] => Ok(Margins::new(*top, *right, *bottom, *left, unit)),
        _ => Err(format!(
            "Expected 1 or 4 margin values, got {}",
            values.len()
        )),
    }
}
