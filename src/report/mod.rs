//! Report generation: structured documents, text rendering, and the
//! owner-aware report index.
//!
//! Builders are deterministic given identical input and a caller-supplied
//! generation timestamp; only that timestamp varies between runs. Reports
//! are identified by a generated UUID recorded in the [`index::ReportIndex`]
//! together with an explicit owner — the human-facing filename is kept for
//! operators but carries no authority.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::store::{ArtifactError, ArtifactStore};
use crate::types::Employee;

pub mod index;
pub mod leave;
pub mod workload;

pub use index::{ReportIndex, ReportRecord};

/// The two report families the assistant produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Leave-request analysis.
    Conges,
    /// Workload forecast.
    Charge,
}

impl ReportKind {
    /// Filename slug.
    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::Conges => "conges",
            ReportKind::Charge => "charge",
        }
    }
}

/// Report header block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Report title line.
    pub titre: String,
    /// Generation timestamp (caller-supplied for determinism).
    pub generated_at: DateTime<Utc>,
    /// Scope description (e.g. "Données complètes").
    pub periode: String,
}

/// Report generation failures.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The artifact could not be written; no report exists.
    #[error("échec de génération du rapport: {0}")]
    Write(#[from] ArtifactError),
}

/// Writes rendered reports through the artifact store and records their
/// identity and ownership in the index.
pub struct ReportEngine {
    artifacts: Arc<dyn ArtifactStore>,
    index: ReportIndex,
}

impl ReportEngine {
    /// Create an engine over the given artifact store with an empty index.
    pub fn new(artifacts: Arc<dyn ArtifactStore>) -> Self {
        Self {
            artifacts,
            index: ReportIndex::new(),
        }
    }

    /// The report index, for lookups.
    pub fn index(&self) -> &ReportIndex {
        &self.index
    }

    /// Write a rendered report and register it.
    ///
    /// The filename is `rapport_{kind}_{ownerId}_{timestamp}.txt`; its
    /// second-resolution timestamp can collide, which is why identity and
    /// ownership live in the index entry, not the name. A write failure
    /// leaves no index entry behind.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Write`] when the artifact store rejects the
    /// content; the report is then considered not generated.
    pub async fn store(
        &self,
        owner: &Employee,
        kind: ReportKind,
        content: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportRecord, ReportError> {
        let filename = format!(
            "rapport_{}_{}_{}.txt",
            kind.slug(),
            owner.id,
            generated_at.format("%Y%m%d_%H%M%S")
        );

        self.artifacts.write(&filename, content).await?;

        let record = ReportRecord {
            id: Uuid::new_v4(),
            owner_id: owner.id,
            kind,
            filename,
            generated_at,
        };
        self.index.register(record.clone()).await;

        tracing::info!(
            report_id = %record.id,
            owner_id = owner.id,
            kind = kind.slug(),
            "report generated"
        );

        Ok(record)
    }
}

/// Render the shared report header.
fn render_header(meta: &ReportMeta) -> String {
    let rule = "=".repeat(80);
    format!(
        "{rule}\n{}\n{rule}\n\nDate de génération : {}\nPériode d'analyse : {}\n",
        meta.titre,
        meta.generated_at.format("%d/%m/%Y à %H:%M"),
        meta.periode
    )
}

/// Render the shared report footer.
fn render_footer() -> String {
    let rule = "=".repeat(80);
    format!(
        "\n{rule}\nRapport généré automatiquement par le Système de Gestion RH\nContact : Support RH pour toute question\n{rule}\n"
    )
}

/// Section title with an underline rule.
fn render_section(title: &str) -> String {
    format!("\n{title}\n{}\n", "─".repeat(50))
}
