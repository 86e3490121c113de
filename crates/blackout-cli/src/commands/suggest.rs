//! Suggest command - detected spans with page geometry

use std::path::Path;

use anyhow::Result;
use blackout_config::Config;
use tracing::info;

use super::{build_engine, load_state};

pub fn handle(document: &Path, config: &Config) -> Result<()> {
    let engine = build_engine(config)?;
    let state = load_state(document)?;

    let report = engine.suggest(&state)?;
    let located = report.suggestions.iter().filter(|s| s.is_located()).count();
    info!(total = report.total, located, "Suggestions ready");

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
