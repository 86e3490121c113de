//! Dataset command - build labeled training examples from document pairs

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use blackout_config::Config;
use blackout_training::{
    DocumentPair, ExampleBuilder, TrainingExample, pair_documents, write_jsonl,
};
use tokio::task::JoinSet;
use tracing::{info, warn};

pub async fn handle(
    original_dir: PathBuf,
    redacted_dir: PathBuf,
    out: PathBuf,
    config: &Config,
) -> Result<()> {
    let builder = ExampleBuilder::new(
        config.training.field_keywords.clone(),
        config.training.label.clone(),
    );

    let pairs = pair_documents(&original_dir, &redacted_dir)?;
    if pairs.is_empty() {
        bail!(
            "no document pairs found in {} and {}",
            original_dir.display(),
            redacted_dir.display()
        );
    }
    info!(pairs = pairs.len(), "Building training examples");

    let examples = build_all(&builder, pairs).await?;
    if examples.is_empty() {
        bail!("no pair produced a valid training example");
    }

    write_jsonl(&examples, &out)?;

    let entities: usize = examples.iter().map(|e| e.entities.len()).sum();
    info!(examples = examples.len(), entities, out = %out.display(), "Dataset written");
    println!(
        "Wrote {} examples ({} entities) to {}",
        examples.len(),
        entities,
        out.display()
    );
    Ok(())
}

/// Diff every pair on the blocking pool; output keeps pair order
async fn build_all(
    builder: &ExampleBuilder,
    pairs: Vec<DocumentPair>,
) -> Result<Vec<TrainingExample>> {
    let mut tasks = JoinSet::new();
    for (index, pair) in pairs.into_iter().enumerate() {
        let builder = builder.clone();
        tasks.spawn_blocking(move || (index, pair.name.clone(), builder.build_pair(&pair)));
    }

    let mut built = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, name, result) = joined.context("dataset worker panicked")?;
        match result {
            Ok(Some(example)) => built.push((index, example)),
            Ok(None) => {}
            Err(e) => warn!(name = %name, error = %e, "Skipping unreadable pair"),
        }
    }

    built.sort_by_key(|(index, _)| *index);
    Ok(built.into_iter().map(|(_, example)| example).collect())
}
