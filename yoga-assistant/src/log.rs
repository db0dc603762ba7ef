//! Interaction logging.
//!
//! Every completed `ask` produces exactly one [`InteractionLog`]. Writing it
//! is best effort: a missing or failing store never affects the answer.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::LogError;

/// Record of one answered or blocked query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionLog {
    pub query: String,
    /// The full reply as shown, including topic header and sources footer.
    pub answer: String,
    /// Rendered source references, e.g. `poses.txt (Page N/A)`.
    pub sources: Vec<String>,
    pub is_unsafe: bool,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

impl InteractionLog {
    /// A log entry stamped with the current time.
    pub fn new(
        query: impl Into<String>,
        answer: impl Into<String>,
        sources: Vec<String>,
        is_unsafe: bool,
        category: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
            sources,
            is_unsafe,
            category: category.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only storage for interaction logs.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Backend name used in diagnostics.
    fn name(&self) -> &str;

    async fn append(&self, entry: &InteractionLog) -> Result<(), LogError>;
}

/// Appends one JSON object per line to a file.
pub struct JsonlInteractionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlInteractionStore {
    /// Log to `path`. The file and its parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl InteractionStore for JsonlInteractionStore {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn append(&self, entry: &InteractionLog) -> Result<(), LogError> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file =
            tokio::fs::OpenOptions::new().create(true).append(true).open(&self.path).await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}

/// Keeps entries in memory. Useful for tests and short-lived sessions.
#[derive(Default)]
pub struct MemoryInteractionStore {
    entries: RwLock<Vec<InteractionLog>>,
}

impl MemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries in append order.
    pub fn entries(&self) -> Vec<InteractionLog> {
        self.entries.read().map(|entries| entries.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl InteractionStore for MemoryInteractionStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn append(&self, entry: &InteractionLog) -> Result<(), LogError> {
        let mut entries = self.entries.write().map_err(|e| LogError::Backend {
            backend: "memory".into(),
            message: format!("lock poisoned: {e}"),
        })?;
        entries.push(entry.clone());
        Ok(())
    }
}

/// Best-effort front for an optional [`InteractionStore`].
#[derive(Clone, Default)]
pub struct InteractionLogger {
    store: Option<Arc<dyn InteractionStore>>,
}

impl InteractionLogger {
    pub fn new(store: Arc<dyn InteractionStore>) -> Self {
        Self { store: Some(store) }
    }

    /// A logger that drops every entry, for when no store is reachable.
    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Write `entry` once. Failures are reported via `tracing` and discarded.
    pub async fn log(&self, entry: InteractionLog) {
        let Some(store) = &self.store else {
            debug!("interaction logging disabled, entry dropped");
            return;
        };
        match store.append(&entry).await {
            Ok(()) => debug!(store = store.name(), is_unsafe = entry.is_unsafe, "interaction logged"),
            Err(e) => warn!(store = store.name(), error = %e, "failed to log interaction"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(query: &str) -> InteractionLog {
        InteractionLog::new(query, "answer", vec!["poses.txt (Page N/A)".into()], false, "Asana")
    }

    #[tokio::test]
    async fn jsonl_appends_one_line_per_entry() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonlInteractionStore::new(temp.path().join("logs").join("queries.jsonl"));

        store.append(&entry("first")).await.unwrap();
        store.append(&entry("second")).await.unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<InteractionLog> =
            contents.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].query, "first");
        assert_eq!(lines[1].sources, vec!["poses.txt (Page N/A)".to_string()]);
    }

    #[tokio::test]
    async fn memory_store_keeps_order() {
        let store = Arc::new(MemoryInteractionStore::new());
        let logger = InteractionLogger::new(store.clone());
        logger.log(entry("a")).await;
        logger.log(entry("b")).await;

        let queries: Vec<String> = store.entries().into_iter().map(|e| e.query).collect();
        assert_eq!(queries, ["a", "b"]);
    }

    #[tokio::test]
    async fn disabled_logger_is_a_no_op() {
        let logger = InteractionLogger::disabled();
        assert!(!logger.is_enabled());
        logger.log(entry("ignored")).await;
    }

    #[tokio::test]
    async fn unwritable_path_does_not_escape() {
        let temp = tempfile::tempdir().unwrap();
        // A directory where the log file should be.
        let store = JsonlInteractionStore::new(temp.path());
        assert!(store.append(&entry("x")).await.is_err());

        InteractionLogger::new(Arc::new(store)).log(entry("x")).await;
    }
}
