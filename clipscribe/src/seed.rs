use std::path::Path;

use anyhow::Context;
use clipscribe_store::{NewPrompt, RecordStore};

/// Insert the prompts listed in `path` unless the store already has some
///
/// Returns how many prompts were inserted.
pub async fn seed_prompts(store: &dyn RecordStore, path: &Path) -> anyhow::Result<usize> {
    if !store.list_prompts().await?.is_empty() {
        tracing::debug!("prompts already present, skipping seed");
        return Ok(0);
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read prompt seed file {}", path.display()))?;

    let prompts: Vec<NewPrompt> =
        serde_json::from_str(&raw).with_context(|| format!("invalid prompt seed file {}", path.display()))?;

    let count = prompts.len();
    for prompt in prompts {
        store.create_prompt(prompt).await?;
    }

    Ok(count)
}
