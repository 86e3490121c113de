use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blackout")]
#[command(about = "Find and black out sensitive content in documents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "BLACKOUT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect sensitive spans and print them with page positions
    Suggest {
        /// Text-layer document (JSON)
        document: PathBuf,
    },

    /// Black out every occurrence of the given terms
    Redact {
        /// Text-layer document (JSON)
        document: PathBuf,

        /// Literal text to black out (repeatable)
        #[arg(long = "term")]
        terms: Vec<String>,

        /// JSON array of terms or span records, or a report printed by `suggest`
        #[arg(long)]
        items: Option<PathBuf>,

        /// Where to write the redacted document
        #[arg(long)]
        out: PathBuf,
    },

    /// Detect sensitive spans and black out all of them
    RedactAuto {
        /// Text-layer document (JSON)
        document: PathBuf,

        /// Where to write the redacted document
        #[arg(long)]
        out: PathBuf,
    },

    /// Black out the text at a byte range of the extracted text
    RedactSpan {
        document: PathBuf,

        #[arg(long)]
        start: usize,

        #[arg(long)]
        end: usize,

        #[arg(long)]
        out: PathBuf,
    },

    /// Black out a rectangle given in page fractions
    RedactBox {
        document: PathBuf,

        /// Page number (1-indexed)
        #[arg(long)]
        page: usize,

        #[arg(long)]
        x: f64,

        #[arg(long)]
        y: f64,

        #[arg(long)]
        w: f64,

        #[arg(long)]
        h: f64,

        #[arg(long)]
        out: PathBuf,
    },

    /// Build training examples from original/redacted document pairs
    Dataset {
        /// Directory of original documents
        #[arg(long)]
        original: PathBuf,

        /// Directory of redacted documents, matched by file name
        #[arg(long)]
        redacted: PathBuf,

        /// Output JSON Lines file
        #[arg(long)]
        out: PathBuf,
    },
}
