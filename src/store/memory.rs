//! In-memory collaborator implementations, used by tests and the CLI.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::types::{
    Employee, LeaveProcedure, LeaveRequest, NotificationKind,
};

use super::{
    ArtifactError, ArtifactStore, Directory, DirectoryError, LeaveFilter, LeaveStore,
    LeaveStoreError, NewLeaveRequest, Notifier, NotifyError,
};

/// In-memory employee directory seeded with a fixed roster.
pub struct MemoryDirectory {
    employees: Vec<Employee>,
}

impl MemoryDirectory {
    /// Build a directory over the given roster.
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn find_by_matricule(&self, matricule: &str) -> Result<Employee, DirectoryError> {
        self.employees
            .iter()
            .find(|e| e.matricule == matricule)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<Employee, DirectoryError> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Employee, DirectoryError> {
        self.employees
            .iter()
            .find(|e| {
                e.first_name.eq_ignore_ascii_case(first_name)
                    && e.last_name.eq_ignore_ascii_case(last_name)
            })
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, DirectoryError> {
        Ok(self.employees.clone())
    }

    fn has_hr_capability(&self, employee: &Employee) -> bool {
        matches!(
            employee.department.as_deref(),
            Some(d) if d.eq_ignore_ascii_case("RH") || d.eq_ignore_ascii_case("HR")
        )
    }
}

/// In-memory leave-request store with an optional procedure catalog.
pub struct MemoryLeaveStore {
    requests: Arc<RwLock<Vec<LeaveRequest>>>,
    procedures: Vec<LeaveProcedure>,
    next_id: Arc<RwLock<i64>>,
}

impl MemoryLeaveStore {
    /// Create an empty store with no documented procedures.
    pub fn new() -> Self {
        Self::with_procedures(Vec::new())
    }

    /// Create an empty store with the given procedure catalog.
    pub fn with_procedures(procedures: Vec<LeaveProcedure>) -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            procedures,
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    /// Snapshot of all stored requests, for assertions in tests.
    pub async fn all(&self) -> Vec<LeaveRequest> {
        self.requests.read().await.clone()
    }

    /// Insert a pre-built request (seeding report tests).
    pub async fn seed(&self, request: LeaveRequest) {
        self.requests.write().await.push(request);
    }
}

impl Default for MemoryLeaveStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeaveStore for MemoryLeaveStore {
    async fn persist(&self, request: NewLeaveRequest) -> Result<i64, LeaveStoreError> {
        let mut next = self.next_id.write().await;
        let id = *next;
        *next = next.saturating_add(1);

        self.requests.write().await.push(LeaveRequest {
            id,
            user_id: request.user_id,
            type_conge: request.type_conge,
            date_debut: request.date_debut,
            date_fin: request.date_fin,
            raison: request.raison,
            preuve: request.preuve,
            status: request.status,
            created_at: Utc::now(),
        });

        Ok(id)
    }

    async fn list(&self, filter: LeaveFilter) -> Result<Vec<LeaveRequest>, LeaveStoreError> {
        let requests = self.requests.read().await;
        let mut matching: Vec<LeaveRequest> = requests
            .iter()
            .filter(|r| filter.user_id.is_none_or(|uid| r.user_id == uid))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn list_procedures(&self) -> Result<Vec<LeaveProcedure>, LeaveStoreError> {
        Ok(self.procedures.clone())
    }
}

/// A notification captured by [`MemoryNotifier`].
#[derive(Debug, Clone)]
pub struct SentNotification {
    /// Recipient employee ids.
    pub target_ids: Vec<i64>,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Severity.
    pub kind: NotificationKind,
}

/// Notifier that records deliveries instead of sending them.
pub struct MemoryNotifier {
    sent: Arc<RwLock<Vec<SentNotification>>>,
}

impl MemoryNotifier {
    /// Create an empty notifier.
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Notifications delivered so far, in order.
    pub async fn sent(&self) -> Vec<SentNotification> {
        self.sent.read().await.clone()
    }
}

impl Default for MemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn notify(
        &self,
        target_ids: &[i64],
        title: &str,
        body: &str,
        kind: NotificationKind,
    ) -> Result<(), NotifyError> {
        self.sent.write().await.push(SentNotification {
            target_ids: target_ids.to_vec(),
            title: title.to_owned(),
            body: body.to_owned(),
            kind,
        });
        Ok(())
    }
}

/// Artifact store keeping rendered content in memory.
pub struct MemoryArtifacts {
    written: Arc<RwLock<HashMap<String, String>>>,
    fail_writes: bool,
}

impl MemoryArtifacts {
    /// Create an empty artifact store.
    pub fn new() -> Self {
        Self {
            written: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: false,
        }
    }

    /// Create a store whose writes always fail, for error-path tests.
    pub fn failing() -> Self {
        Self {
            written: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: true,
        }
    }

    /// Content of a written artifact, if any.
    pub async fn get(&self, name: &str) -> Option<String> {
        self.written.read().await.get(name).cloned()
    }

    /// Number of artifacts written.
    pub async fn len(&self) -> usize {
        self.written.read().await.len()
    }

    /// Whether nothing has been written.
    pub async fn is_empty(&self) -> bool {
        self.written.read().await.is_empty()
    }
}

impl Default for MemoryArtifacts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifacts {
    async fn write(&self, name: &str, content: &str) -> Result<(), ArtifactError> {
        if self.fail_writes {
            return Err(ArtifactError::Write("no storage access".to_owned()));
        }
        self.written
            .write()
            .await
            .insert(name.to_owned(), content.to_owned());
        Ok(())
    }
}
