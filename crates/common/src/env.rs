//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before any page is booted.

use std::path::Path;
use tracing::{debug, warn};

/// Ensure the directory holding the persisted session file exists.
pub async fn ensure_session_dir(session_file: &str) -> anyhow::Result<()> {
    let Some(parent) = Path::new(session_file).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    if tokio::fs::metadata(parent).await.is_err() {
        warn!(dir = %parent.display(), "session directory missing; creating it");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    debug!(dir = %parent.display(), "session directory ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("jd_env_{}", uuid::Uuid::new_v4()));
        let file = dir.join("nested").join("session.json");
        ensure_session_dir(file.to_str().unwrap()).await?;
        assert!(dir.join("nested").is_dir());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn bare_file_name_is_fine() -> anyhow::Result<()> {
        ensure_session_dir("session.json").await
    }
}
