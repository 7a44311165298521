//! playwright-pdf - render HTML files or URLs to PDF
//!
//! CLI entry point

use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use playwright_pdf::{parse_margins, Cli, PdfBuilder, PlaywrightBuilder};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(path) => {
            println!("{path}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    let unit = cli.parse_unit()?;
    let mut builder = PlaywrightBuilder::create().timeout(Duration::from_secs(cli.timeout));

    if let Some(node) = &cli.node_binary {
        builder = builder.set_node_binary_path(node);
    }

    if let Some(script) = &cli.script {
        builder = builder.set_script_path(script);
    }

    builder = match (&cli.input, &cli.url) {
        (Some(input), None) => builder.html(std::fs::read_to_string(input)?),
        (None, Some(url)) => builder.from_url(url)?,
        _ => return Err("Provide either an HTML input file or --url".into()),
    };

    if let Some(format) = &cli.format {
        builder = builder.format(format.parse()?);
    }

    if let Some(width) = cli.width {
        builder = builder.width(width, unit);
    }

    if let Some(height) = cli.height {
        builder = builder.height(height, unit);
    }

    if let Some(margins) = &cli.margins {
        builder = builder.margins(parse_margins(margins, unit)?);
    }

    if cli.landscape {
        builder = builder.landscape();
    }

    if cli.print_background {
        builder = builder.print_background();
    }

    if cli.tagged {
        builder = builder.tagged();
    }

    if cli.outline {
        builder = builder.outline();
    }

    if let Some(scale) = cli.scale {
        builder = builder.scale(scale)?;
    }

    if let Some(ranges) = &cli.page_ranges {
        builder = builder.page_ranges(ranges)?;
    }

    if let Some(header) = &cli.header_file {
        builder = builder.header_template(std::fs::read_to_string(header)?);
    }

    if let Some(footer) = &cli.footer_file {
        builder = builder.footer_template(std::fs::read_to_string(footer)?);
    }

    let saved = builder.save(&cli.output)?;
    Ok(saved.display().to_string())
}
