//! The leave-request collection flow.
//!
//! A finite state machine over [`ConversationState`]: `start` enters the
//! flow, `advance` consumes one text answer per collection step, and
//! `accept_proof` turns the completed draft plus the uploaded proof into a
//! submission ready to persist. The dispatcher consults `advance` *before*
//! intent classification, so arbitrary text at a collection step is stored
//! as the answer to the pending question rather than re-classified.

use chrono::NaiveDate;

use crate::types::{AcceptanceEstimate, Employee, ProofArtifact};

use super::state::{ConversationState, FlowStep};

/// Date format collected from the user.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of offering a text message to the flow.
#[derive(Debug)]
pub enum FlowReply {
    /// The flow consumed the message.
    Consumed {
        /// Response text to send back.
        response: String,
        /// Whether the turn should ask the boundary for a proof upload.
        request_proof: bool,
    },
    /// No flow in progress — proceed with intent classification.
    NotConsumed,
}

/// Result of offering a proof artifact to the flow.
#[derive(Debug)]
pub enum ProofOutcome {
    /// No leave request is pending a proof for this user.
    NoFlow,
    /// A collection-step date failed to parse at finalization; the flow
    /// rewound to [`FlowStep::CollectStartDate`] with both dates cleared.
    MalformedDate {
        /// Re-prompt text to send back.
        response: String,
    },
    /// The draft is complete; persist this submission.
    Submission(LeaveSubmission),
}

/// A completed draft, parsed and ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveSubmission {
    /// Leave kind as typed by the employee.
    pub type_conge: String,
    /// Parsed start date.
    pub date_debut: NaiveDate,
    /// Parsed end date.
    pub date_fin: NaiveDate,
    /// Free-text justification.
    pub raison: String,
    /// Reference of the uploaded proof.
    pub proof_reference: String,
}

/// Enter the flow: initialize the draft and ask for the leave kind.
pub fn start(state: &mut ConversationState) -> String {
    state.step = FlowStep::CollectType;
    state.draft.clear();
    "Quel est le type de congé souhaité ? (ex : annuel, maladie, exceptionnel)".to_owned()
}

/// Offer a text message to the flow.
///
/// At every collection step the message is stored verbatim as that step's
/// answer — validation happens at finalization. At [`FlowStep::UploadProof`]
/// text is answered with an upload reminder. Returns
/// [`FlowReply::NotConsumed`] when the flow is idle.
pub fn advance(state: &mut ConversationState, message: &str) -> FlowReply {
    match state.step {
        FlowStep::Idle => FlowReply::NotConsumed,
        FlowStep::CollectType => {
            state.draft.type_conge = Some(message.to_owned());
            state.step = FlowStep::CollectStartDate;
            FlowReply::Consumed {
                response: "Merci. Quelle est la date de début du congé ? (format : AAAA-MM-JJ)"
                    .to_owned(),
                request_proof: false,
            }
        }
        FlowStep::CollectStartDate => {
            state.draft.date_debut = Some(message.to_owned());
            state.step = FlowStep::CollectEndDate;
            FlowReply::Consumed {
                response: "Merci. Quelle est la date de fin du congé ? (format : AAAA-MM-JJ)"
                    .to_owned(),
                request_proof: false,
            }
        }
        FlowStep::CollectEndDate => {
            state.draft.date_fin = Some(message.to_owned());
            state.step = FlowStep::CollectReason;
            FlowReply::Consumed {
                response: "Merci. Quelle est la raison de votre congé ?".to_owned(),
                request_proof: false,
            }
        }
        FlowStep::CollectReason => {
            state.draft.raison = Some(message.to_owned());
            state.step = FlowStep::UploadProof;
            FlowReply::Consumed {
                response:
                    "Merci. Veuillez joindre un document justificatif pour votre demande de congé."
                        .to_owned(),
                request_proof: true,
            }
        }
        FlowStep::UploadProof => FlowReply::Consumed {
            response:
                "Veuillez utiliser le formulaire d'upload pour envoyer votre fichier justificatif."
                    .to_owned(),
            request_proof: true,
        },
    }
}

/// Offer a proof artifact to the flow.
///
/// Rejected unless the user is exactly at [`FlowStep::UploadProof`] —
/// out-of-order uploads get [`ProofOutcome::NoFlow`]. Dates collected as
/// raw text are parsed here; a failure rewinds to the start-date step
/// without touching the stored kind and reason.
pub fn accept_proof(state: &mut ConversationState, proof: &ProofArtifact) -> ProofOutcome {
    if state.step != FlowStep::UploadProof {
        return ProofOutcome::NoFlow;
    }

    let (Some(type_conge), Some(raw_debut), Some(raw_fin), Some(raison)) = (
        state.draft.type_conge.clone(),
        state.draft.date_debut.clone(),
        state.draft.date_fin.clone(),
        state.draft.raison.clone(),
    ) else {
        // Unreachable when the step invariant holds; treat as no flow.
        state.reset_flow();
        return ProofOutcome::NoFlow;
    };

    let parsed = NaiveDate::parse_from_str(raw_debut.trim(), DATE_FORMAT).and_then(|debut| {
        NaiveDate::parse_from_str(raw_fin.trim(), DATE_FORMAT).map(|fin| (debut, fin))
    });

    match parsed {
        Err(_) => {
            state.draft.date_debut = None;
            state.draft.date_fin = None;
            state.step = FlowStep::CollectStartDate;
            ProofOutcome::MalformedDate {
                response: "Je n'ai pas pu lire les dates de votre demande. Reprenons : \
                           quelle est la date de début du congé ? (format : AAAA-MM-JJ)"
                    .to_owned(),
            }
        }
        Ok((date_debut, date_fin)) => ProofOutcome::Submission(LeaveSubmission {
            type_conge,
            date_debut,
            date_fin,
            raison,
            proof_reference: proof.reference.clone(),
        }),
    }
}

/// Deterministic acceptance estimate for a just-submitted request.
///
/// Active with paused missions scores 90, active with in-progress missions
/// 60, anything else 30. Personalized advice appends one delegation
/// suggestion per active mission plus a manager-notification reminder.
pub fn acceptance_estimate(employee: &Employee) -> AcceptanceEstimate {
    let missions = employee.mission_list();
    let advice = personalized_advice(&missions, employee.manager.as_deref());
    let missions_text = if missions.is_empty() {
        "non spécifiées".to_owned()
    } else {
        missions.join(", ")
    };

    if employee.is_active() && employee.missions_paused() {
        AcceptanceEstimate {
            percentage: 90,
            explanation: format!(
                "Votre statut est actif et toutes vos missions sont actuellement en pause. \
                 Cela signifie que vous n'avez pas de tâches urgentes en attente, ce qui \
                 augmente fortement vos chances d'obtenir un congé. {advice}"
            ),
        }
    } else if employee.is_active() && employee.missions_in_progress() {
        AcceptanceEstimate {
            percentage: 60,
            explanation: format!(
                "Votre statut est actif et vous avez des missions en cours. \
                 Missions en cours : {missions_text}. Cela signifie que certaines de vos \
                 tâches ne sont pas encore terminées, ce qui peut réduire la probabilité \
                 d'acceptation de votre congé. Il est conseillé de finaliser ou de déléguer \
                 vos missions avant de faire une demande de congé pour augmenter vos \
                 chances. {advice}"
            ),
        }
    } else {
        let status = employee.status.as_deref().unwrap_or("non spécifié");
        let missions_status = employee.missions_status.as_deref().unwrap_or("non spécifié");
        AcceptanceEstimate {
            percentage: 30,
            explanation: format!(
                "Votre statut actuel est : '{status}' et l'état de vos missions est : \
                 '{missions_status}'. Missions en cours : {missions_text}. Dans cette \
                 situation, il est probable que vos missions ne soient pas terminées ou que \
                 votre statut ne soit pas optimal pour une demande de congé. Merci de \
                 vérifier l'état de vos missions ou de contacter votre responsable pour \
                 plus d'informations. {advice}"
            ),
        }
    }
}

/// One delegation suggestion per mission, then the manager reminder.
fn personalized_advice(missions: &[String], manager: Option<&str>) -> String {
    let mut parts: Vec<String> = missions
        .iter()
        .map(|m| format!("Vous pouvez déléguer la mission '{m}' à un collègue de confiance."))
        .collect();

    match manager {
        Some(name) => parts.push(format!(
            "Pensez à prévenir votre manager ({name}) de votre demande de congé."
        )),
        None => {
            parts.push("Pensez à prévenir votre manager de votre demande de congé.".to_owned());
        }
    }

    parts.join(" ")
}
