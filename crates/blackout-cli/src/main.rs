mod cli;
mod commands;

use anyhow::Result;
use blackout_config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        cli::Commands::Suggest { document } => commands::suggest::handle(&document, &config),
        cli::Commands::Redact {
            document,
            terms,
            items,
            out,
        } => commands::redact::handle_terms(&document, terms, items.as_deref(), &out, &config),
        cli::Commands::RedactAuto { document, out } => {
            commands::redact::handle_auto(&document, &out, &config)
        }
        cli::Commands::RedactSpan {
            document,
            start,
            end,
            out,
        } => commands::redact::handle_span(&document, start, end, &out, &config),
        cli::Commands::RedactBox {
            document,
            page,
            x,
            y,
            w,
            h,
            out,
        } => commands::redact::handle_box(&document, page, [x, y, w, h], &out, &config),
        cli::Commands::Dataset {
            original,
            redacted,
            out,
        } => commands::dataset::handle(original, redacted, out, &config).await,
    }
}
