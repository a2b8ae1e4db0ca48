use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use url::Url;

use selector_schema::{
    generate_sample_product, generate_selector_schema, preview, SampleView, SelectorSchema,
};

#[derive(Parser)]
#[command(
    name = "selector-schema",
    about = "Generate and preview CSS selector schemas from product HTML samples"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the selector schema guessed from an HTML sample
    Generate(InputArgs),
    /// Apply a stored schema and print the sample product (`{}` if nothing matched)
    Extract(ExtractArgs),
    /// Print the generated schema together with its sample product
    Preview(PreviewArgs),
}

#[derive(Args)]
struct InputArgs {
    /// HTML file; stdin when omitted or `-`
    file: Option<PathBuf>,
}

#[derive(Args)]
struct ExtractArgs {
    /// Schema JSON as stored by the crawler configuration
    #[arg(long)]
    schema: PathBuf,
    #[command(flatten)]
    input: InputArgs,
    /// Resolve relative image and product links against this URL
    #[arg(long)]
    base_url: Option<Url>,
}

#[derive(Args)]
struct PreviewArgs {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long)]
    base_url: Option<Url>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let output = match cli.command {
        Commands::Generate(args) => {
            let html = read_html(args.file.as_deref())?;
            generate_selector_schema(&html).to_json_pretty()?
        }
        Commands::Extract(args) => {
            let html = read_html(args.input.file.as_deref())?;
            let schema = SelectorSchema::from_path(&args.schema)
                .with_context(|| format!("Failed to load schema {}", args.schema.display()))?;

            let mut product = generate_sample_product(&html, &schema);
            if let (Some(product), Some(base)) = (product.as_mut(), args.base_url.as_ref()) {
                product.resolve_urls(base);
            }
            if product.is_none() {
                tracing::info!(base = %schema.base_selector, "base selector matched nothing");
            }
            serde_json::to_string_pretty(&SampleView(product.as_ref()))?
        }
        Commands::Preview(args) => {
            let html = read_html(args.input.file.as_deref())?;
            let mut preview = preview(&html);
            if let Some(base) = args.base_url.as_ref() {
                preview.resolve_urls(base);
            }
            tracing::info!(fields = preview.schema.fields.len(), "schema generated");
            preview.to_pretty_json()?
        }
    };

    println!("{output}");
    Ok(())
}

fn read_html(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read HTML from {}", path.display())),
        _ => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read HTML from stdin")?;
            Ok(html)
        }
    }
}

/// Logs go to stderr so stdout stays valid JSON.
/// Honours `RUST_LOG` (default `info`); `SELECTOR_SCHEMA_LOG_FORMAT=json` for JSON logs.
fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(io::stderr);
    let builder = tracing_subscriber::registry().with(filter);

    match std::env::var("SELECTOR_SCHEMA_LOG_FORMAT").as_deref() {
        Ok("json") => {
            let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
        }
        _ => {
            let _ = builder.with(fmt_layer.compact()).try_init();
        }
    }
}
