//! Identity and ownership index for generated reports.
//!
//! Downloads are resolved through this index only: the report id (or, as a
//! convenience, the exact filename) is looked up and the owner field is
//! checked. Ownership is never inferred from the filename structure.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ReportKind;

/// Matches a report UUID pasted into a message.
static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .expect("uuid pattern is valid")
});

/// Matches a report filename mentioned in a message.
static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+_\d{8}_\d{6}\.txt").expect("filename pattern is valid"));

/// One generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Report identity.
    pub id: Uuid,
    /// Internal id of the employee who generated it.
    pub owner_id: i64,
    /// Report family.
    pub kind: ReportKind,
    /// Human-facing artifact filename.
    pub filename: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
}

/// Outcome of resolving a download request against the index.
#[derive(Debug, Clone)]
pub enum DownloadResolution {
    /// The report exists and belongs to the requester.
    Found(ReportRecord),
    /// The message carried no recognizable report reference.
    NoReference,
    /// The reference matched nothing in the index.
    NotFound,
    /// The report exists but belongs to someone else.
    NotOwner,
}

/// In-memory index of generated reports.
pub struct ReportIndex {
    entries: Arc<RwLock<Vec<ReportRecord>>>,
}

impl ReportIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a generated report.
    pub async fn register(&self, record: ReportRecord) {
        self.entries.write().await.push(record);
    }

    /// Look up a report by id.
    pub async fn find_by_id(&self, id: Uuid) -> Option<ReportRecord> {
        self.entries.read().await.iter().find(|r| r.id == id).cloned()
    }

    /// Look up a report by exact filename. Filename collisions are possible
    /// at second resolution; the newest entry wins.
    pub async fn find_by_filename(&self, filename: &str) -> Option<ReportRecord> {
        self.entries
            .read()
            .await
            .iter()
            .rev()
            .find(|r| r.filename == filename)
            .cloned()
    }

    /// Whether the index has no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Resolve a download request message for the given requester.
    ///
    /// Extracts a report id (preferred) or filename from the message, looks
    /// it up, and checks ownership against `requester_id`.
    pub async fn resolve_download(&self, requester_id: i64, message: &str) -> DownloadResolution {
        let record = if let Some(m) = UUID_RE.find(message) {
            match Uuid::parse_str(m.as_str()) {
                Ok(id) => self.find_by_id(id).await,
                Err(_) => None,
            }
        } else if let Some(m) = FILENAME_RE.find(message) {
            self.find_by_filename(m.as_str()).await
        } else {
            return DownloadResolution::NoReference;
        };

        match record {
            None => DownloadResolution::NotFound,
            Some(r) if r.owner_id == requester_id => DownloadResolution::Found(r),
            Some(_) => DownloadResolution::NotOwner,
        }
    }
}

impl Default for ReportIndex {
    fn default() -> Self {
        Self::new()
    }
}
