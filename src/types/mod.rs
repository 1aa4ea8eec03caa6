//! Core domain types shared across the decision core.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An employee record as provided by the directory collaborator.
///
/// `status`, `missions_status` and `current_missions` are free-text fields
/// maintained by HR; the workload analyzer interprets them (see
/// [`Employee::mission_list`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Internal numeric identifier.
    pub id: i64,
    /// External badge identifier ("matricule") used to authenticate turns.
    pub matricule: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Work email address.
    pub email: String,
    /// Job role label.
    pub role: String,
    /// Department name; empty when unassigned.
    pub department: Option<String>,
    /// Activity status free text (e.g. "actif").
    pub status: Option<String>,
    /// Comma-separated list of current missions.
    pub current_missions: Option<String>,
    /// Mission progress free text (e.g. "en cours", "en pause").
    pub missions_status: Option<String>,
    /// Name of the employee's manager, when recorded.
    pub manager: Option<String>,
    /// Remaining paid-leave days.
    pub solde_conges: Option<i32>,
    /// Remaining RTT days.
    pub solde_rtt: Option<i32>,
    /// Contract kind free text (e.g. "CDI", "CDD", "stagiaire").
    pub statut_employe: Option<String>,
    /// Date of the employee's most recent leave.
    pub date_dernier_conge: Option<NaiveDate>,
    /// Date the leave balance was last updated.
    pub date_maj_solde: Option<NaiveDate>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Record update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Full display name ("First Last").
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Department name, or the shared "unassigned" bucket label.
    pub fn department_label(&self) -> &str {
        match self.department.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "Non défini",
        }
    }

    /// Split the free-text mission field on commas, trimming entries.
    pub fn mission_list(&self) -> Vec<String> {
        self.current_missions
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Whether the activity status reads "actif" (case-insensitive).
    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("actif"))
    }

    /// Whether the mission status reads "en cours" (case-insensitive).
    pub fn missions_in_progress(&self) -> bool {
        self.missions_status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("en cours"))
    }

    /// Whether the mission status reads "en pause" (case-insensitive).
    pub fn missions_paused(&self) -> bool {
        self.missions_status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("en pause"))
    }
}

/// Processing state of a leave request. Single canonical field; the legacy
/// `statut` spelling does not exist in this data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Submitted, awaiting an HR decision.
    EnAttente,
    /// Approved by HR.
    Approuve,
    /// Rejected by HR.
    Rejete,
}

impl LeaveStatus {
    /// French display label.
    pub fn label(self) -> &'static str {
        match self {
            LeaveStatus::EnAttente => "en attente",
            LeaveStatus::Approuve => "approuvé",
            LeaveStatus::Rejete => "rejeté",
        }
    }
}

/// A persisted leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Storage identifier assigned by the leave store.
    pub id: i64,
    /// Internal id of the requesting employee.
    pub user_id: i64,
    /// Leave kind as typed by the employee (e.g. "annuel", "maladie").
    pub type_conge: String,
    /// First day of leave.
    pub date_debut: NaiveDate,
    /// Last day of leave.
    pub date_fin: NaiveDate,
    /// Free-text justification.
    pub raison: String,
    /// Reference to the uploaded proof artifact.
    pub preuve: Option<String>,
    /// Processing state.
    pub status: LeaveStatus,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Inclusive duration in days; 0 when the range is inverted.
    pub fn duration_days(&self) -> i64 {
        let days = self
            .date_fin
            .signed_duration_since(self.date_debut)
            .num_days();
        if days < 0 {
            0
        } else {
            days.saturating_add(1)
        }
    }
}

/// A documented leave procedure, as stored by HR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveProcedure {
    /// Procedure title (e.g. "Congés payés").
    pub titre: String,
    /// Procedure body text.
    pub description: String,
    /// Required notice period, when one applies.
    pub delai: Option<String>,
}

/// A proof artifact handed to the core by the upload boundary.
///
/// The core never reads file content; it only records the reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofArtifact {
    /// Storage reference of the uploaded file.
    pub reference: String,
    /// Original file name, for display.
    pub original_name: String,
}

/// Severity of a notification pushed to employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Informational (new request submitted, report ready).
    Info,
    /// Needs attention (overload alert).
    Warning,
}

/// Deterministic acceptance estimate computed when a request is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceEstimate {
    /// Estimated approval odds, in percent.
    pub percentage: u8,
    /// Rationale plus personalized advice, ready for display.
    pub explanation: String,
}

/// Machine-readable extras returned alongside the response text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnPayload {
    /// Structured listing of leave requests (HR view).
    LeaveRequests {
        /// One entry per request, newest first.
        requests: Vec<LeaveRequestView>,
    },
    /// A freshly generated report.
    Report {
        /// Index identity of the report.
        report_id: Uuid,
        /// Human-facing artifact filename.
        filename: String,
    },
    /// A resolved download request.
    Download {
        /// Index identity of the report.
        report_id: Uuid,
        /// Human-facing artifact filename.
        filename: String,
    },
    /// Acceptance odds for a just-submitted request.
    Acceptance {
        /// The computed estimate.
        estimate: AcceptanceEstimate,
    },
    /// The flow needs a proof document before it can finish.
    ProofRequested,
}

/// A leave request joined with its requester, for structured listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestView {
    /// Storage identifier.
    pub id: i64,
    /// Internal id of the requester.
    pub user_id: i64,
    /// Requester given name.
    pub first_name: String,
    /// Requester family name.
    pub last_name: String,
    /// Leave kind.
    pub type_conge: String,
    /// First day, `YYYY-MM-DD`.
    pub date_debut: String,
    /// Last day, `YYYY-MM-DD`.
    pub date_fin: String,
    /// Free-text justification.
    pub raison: String,
    /// Processing state label.
    pub status: String,
    /// Proof reference, when attached.
    pub preuve: Option<String>,
    /// Submission timestamp, `YYYY-MM-DD HH:MM`.
    pub created_at: String,
}

/// A side effect the dispatcher applied while processing a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SideEffect {
    /// A leave request was persisted.
    LeaveRequestPersisted {
        /// Storage id of the new request.
        request_id: i64,
    },
    /// Notifications were pushed to employees.
    NotificationsSent {
        /// Number of recipients.
        recipients: usize,
    },
    /// A report artifact was written and indexed.
    ReportWritten {
        /// Index identity of the report.
        report_id: Uuid,
    },
}

/// Result of one processed turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Human-readable response text.
    pub response: String,
    /// Optional machine-readable extras.
    pub payload: Option<TurnPayload>,
    /// Side effects applied during the turn, in order.
    pub side_effects: Vec<SideEffect>,
}

impl TurnOutcome {
    /// A plain text response with no payload and no side effects.
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            payload: None,
            side_effects: Vec::new(),
        }
    }
}
