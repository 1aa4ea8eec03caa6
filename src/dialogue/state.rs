//! Per-user conversation state and its keyed store.
//!
//! Each user maps to one [`ConversationState`] behind its own async mutex.
//! The store hands out the per-user lock via atomic get-or-create; the
//! dispatcher holds it for the whole turn, so two concurrent messages from
//! the same user cannot interleave step transitions while different users
//! proceed in parallel. State is in-memory only and does not survive a
//! restart.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::AcceptanceEstimate;

/// Position of a user inside the leave-request collection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    /// No collection flow in progress.
    Idle,
    /// Waiting for the leave kind.
    CollectType,
    /// Waiting for the start date.
    CollectStartDate,
    /// Waiting for the end date.
    CollectEndDate,
    /// Waiting for the justification.
    CollectReason,
    /// Waiting for the proof document (external upload event).
    UploadProof,
}

/// Field values collected so far, accumulated monotonically as steps
/// advance and cleared atomically on completion.
///
/// Invariant: the current [`FlowStep`] determines which fields are set — a
/// step implies every prior step's field is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveDraft {
    /// Leave kind, set when leaving [`FlowStep::CollectType`].
    pub type_conge: Option<String>,
    /// Start date raw text, set when leaving [`FlowStep::CollectStartDate`].
    pub date_debut: Option<String>,
    /// End date raw text, set when leaving [`FlowStep::CollectEndDate`].
    pub date_fin: Option<String>,
    /// Justification, set when leaving [`FlowStep::CollectReason`].
    pub raison: Option<String>,
}

impl LeaveDraft {
    /// Drop every collected value.
    pub fn clear(&mut self) {
        *self = LeaveDraft::default();
    }
}

/// Who produced a recorded turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The employee.
    User,
    /// The assistant.
    Bot,
}

/// One recorded conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Who spoke.
    pub sender: Sender,
    /// The message text.
    pub message: String,
    /// When the turn was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Sliding-window capacity for per-user turn history.
const HISTORY_CAPACITY: usize = 20;

/// Conversation state for one user.
#[derive(Debug, Clone)]
pub struct ConversationState {
    /// Current flow position.
    pub step: FlowStep,
    /// Values collected so far.
    pub draft: LeaveDraft,
    /// Last acceptance computation, kept to answer the follow-up
    /// "pourquoi ce pourcentage" without recomputing.
    pub last_acceptance: Option<AcceptanceEstimate>,
    history: VecDeque<TurnRecord>,
}

impl ConversationState {
    /// Fresh state: idle flow, empty draft, empty history.
    pub fn new() -> Self {
        Self {
            step: FlowStep::Idle,
            draft: LeaveDraft::default(),
            last_acceptance: None,
            history: VecDeque::new(),
        }
    }

    /// Record a turn, evicting the oldest once at capacity.
    pub fn push_turn(&mut self, sender: Sender, message: impl Into<String>) {
        if self.history.len() >= HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(TurnRecord {
            sender,
            message: message.into(),
            timestamp: Utc::now(),
        });
    }

    /// Recorded turns, oldest first.
    pub fn history(&self) -> &VecDeque<TurnRecord> {
        &self.history
    }

    /// Leave the flow: back to idle with an empty draft. The acceptance
    /// cache and history are kept.
    pub fn reset_flow(&mut self) {
        self.step = FlowStep::Idle;
        self.draft.clear();
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyed store of per-user conversation state.
///
/// Owned by the dispatcher and passed explicitly — no ambient globals.
pub struct ConversationStore {
    sessions: Mutex<HashMap<i64, Arc<tokio::sync::Mutex<ConversationState>>>>,
}

impl ConversationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Atomic get-or-create of the per-user session lock.
    ///
    /// The map lock is held only for the lookup; callers then serialize on
    /// the returned per-user mutex.
    pub fn session(&self, user_id: i64) -> Arc<tokio::sync::Mutex<ConversationState>> {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            sessions
                .entry(user_id)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(ConversationState::new()))),
        )
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
