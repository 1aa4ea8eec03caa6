//! Collaborator boundary of the decision core.
//!
//! The core never talks to a database, a notification channel, or a
//! filesystem directly; it goes through these traits. Transport and schema
//! concerns live with the implementations. [`memory`] provides in-memory
//! implementations used by tests and the CLI; [`fs`] provides a filesystem
//! artifact store for real report output.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{
    Employee, LeaveProcedure, LeaveRequest, LeaveStatus, NotificationKind,
};

pub mod fs;
pub mod memory;

/// Directory access errors.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No employee matches the given identity.
    #[error("utilisateur non trouvé")]
    NotFound,
    /// Underlying storage failed.
    #[error("directory access error: {0}")]
    Access(String),
}

/// Leave-request storage errors.
#[derive(Debug, Error)]
pub enum LeaveStoreError {
    /// Underlying storage failed.
    #[error("leave store access error: {0}")]
    Access(String),
}

/// Notification delivery errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Underlying channel failed.
    #[error("notification delivery error: {0}")]
    Delivery(String),
}

/// Artifact storage errors.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact could not be written.
    #[error("artifact write error: {0}")]
    Write(String),
}

/// Filter for leave-request listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveFilter {
    /// Restrict to one requester; `None` lists everyone.
    pub user_id: Option<i64>,
}

impl LeaveFilter {
    /// Filter to a single requester.
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

/// Employee directory lookups.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Find an employee by external badge id ("matricule").
    async fn find_by_matricule(&self, matricule: &str) -> Result<Employee, DirectoryError>;

    /// Find an employee by internal id.
    async fn find_by_id(&self, id: i64) -> Result<Employee, DirectoryError>;

    /// Find an employee by given and family name (case-insensitive).
    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Employee, DirectoryError>;

    /// Full roster, in storage order.
    async fn list_employees(&self) -> Result<Vec<Employee>, DirectoryError>;

    /// Capability check: does this employee belong to the HR department?
    fn has_hr_capability(&self, employee: &Employee) -> bool;
}

/// Leave-request persistence and procedure catalog.
#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Persist a new request; returns the storage id.
    async fn persist(&self, request: NewLeaveRequest) -> Result<i64, LeaveStoreError>;

    /// List requests matching the filter, newest first.
    async fn list(&self, filter: LeaveFilter) -> Result<Vec<LeaveRequest>, LeaveStoreError>;

    /// List documented leave procedures.
    async fn list_procedures(&self) -> Result<Vec<LeaveProcedure>, LeaveStoreError>;
}

/// A leave request ready to persist (storage assigns id and timestamp).
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    /// Internal id of the requester.
    pub user_id: i64,
    /// Leave kind as typed by the employee.
    pub type_conge: String,
    /// First day of leave.
    pub date_debut: chrono::NaiveDate,
    /// Last day of leave.
    pub date_fin: chrono::NaiveDate,
    /// Free-text justification.
    pub raison: String,
    /// Reference to the proof artifact.
    pub preuve: Option<String>,
    /// Initial processing state.
    pub status: LeaveStatus,
}

/// Push notifications to employees.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification to each target employee.
    async fn notify(
        &self,
        target_ids: &[i64],
        title: &str,
        body: &str,
        kind: NotificationKind,
    ) -> Result<(), NotifyError>;
}

/// Write-once artifact storage for rendered reports.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write a named artifact. An error means nothing was durably written.
    async fn write(&self, name: &str, content: &str) -> Result<(), ArtifactError>;
}
