//! The top-level turn dispatcher.
//!
//! Owns no business logic beyond ordering: resolve the user, lock their
//! session, offer the turn to the leave flow, then normalize, classify and
//! dispatch to a handler. Permission checks for HR-restricted intents
//! happen here, before any data is fetched.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::HrDeskConfig;
use crate::intent::{classify, Intent};
use crate::report::{
    index::DownloadResolution, leave, workload as workload_report, ReportEngine, ReportError,
    ReportKind,
};
use crate::store::{
    ArtifactStore, Directory, DirectoryError, LeaveFilter, LeaveStore, LeaveStoreError,
    NewLeaveRequest, Notifier, NotifyError,
};
use crate::text::normalize;
use crate::types::{
    Employee, LeaveRequestView, LeaveStatus, NotificationKind, ProofArtifact, SideEffect,
    TurnOutcome, TurnPayload,
};
use crate::workload::analyze;

use super::flow::{self, FlowReply, ProofOutcome};
use super::handlers;
use super::state::{ConversationState, ConversationStore, Sender};

/// Terminal failures for a turn. Everything else is surfaced as an
/// ordinary response payload.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The authenticated identity matches no employee.
    #[error("utilisateur non trouvé")]
    UserNotFound,
    /// The directory failed.
    #[error("directory error: {0}")]
    Directory(String),
    /// Leave-request persistence failed.
    #[error(transparent)]
    LeaveStore(#[from] LeaveStoreError),
    /// Notification delivery failed.
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

impl From<DirectoryError> for TurnError {
    fn from(error: DirectoryError) -> Self {
        match error {
            DirectoryError::NotFound => TurnError::UserNotFound,
            DirectoryError::Access(e) => TurnError::Directory(e),
        }
    }
}

/// The assistant's decision core, one instance per process.
pub struct Dispatcher {
    directory: Arc<dyn Directory>,
    leave_store: Arc<dyn LeaveStore>,
    notifier: Arc<dyn Notifier>,
    reports: ReportEngine,
    conversations: ConversationStore,
    hr_desk: HrDeskConfig,
}

impl Dispatcher {
    /// Wire the dispatcher to its collaborators.
    pub fn new(
        directory: Arc<dyn Directory>,
        leave_store: Arc<dyn LeaveStore>,
        notifier: Arc<dyn Notifier>,
        artifacts: Arc<dyn ArtifactStore>,
        hr_desk: HrDeskConfig,
    ) -> Self {
        Self {
            directory,
            leave_store,
            notifier,
            reports: ReportEngine::new(artifacts),
            conversations: ConversationStore::new(),
            hr_desk,
        }
    }

    /// Process one turn for the employee identified by `matricule`.
    ///
    /// A present `proof` is handled before the text: it either finalizes a
    /// flow waiting at the upload step or is rejected as out of order. The
    /// per-user session lock is held for the whole turn, so concurrent
    /// messages from one user are serialized while other users proceed in
    /// parallel.
    ///
    /// # Errors
    ///
    /// [`TurnError::UserNotFound`] for an unknown identity; storage and
    /// delivery failures propagate as terminal errors for the turn.
    pub async fn process_turn(
        &self,
        matricule: &str,
        raw_message: &str,
        proof: Option<ProofArtifact>,
    ) -> Result<TurnOutcome, TurnError> {
        let employee = self.directory.find_by_matricule(matricule).await?;

        let session = self.conversations.session(employee.id);
        let mut state = session.lock().await;

        if !raw_message.trim().is_empty() {
            state.push_turn(Sender::User, raw_message.trim());
        }

        let outcome = if let Some(proof) = proof {
            self.handle_proof(&employee, &mut state, &proof).await?
        } else {
            self.handle_text(&employee, &mut state, raw_message).await?
        };

        state.push_turn(Sender::Bot, outcome.response.clone());
        Ok(outcome)
    }

    /// Proof path: finalize the flow or reject an out-of-order upload.
    async fn handle_proof(
        &self,
        employee: &Employee,
        state: &mut ConversationState,
        proof: &ProofArtifact,
    ) -> Result<TurnOutcome, TurnError> {
        match flow::accept_proof(state, proof) {
            ProofOutcome::NoFlow => Ok(TurnOutcome::text(
                "Aucune demande de congé en attente de preuve.",
            )),
            ProofOutcome::MalformedDate { response } => Ok(TurnOutcome::text(response)),
            ProofOutcome::Submission(submission) => {
                let mut side_effects = Vec::new();

                let request_id = self
                    .leave_store
                    .persist(NewLeaveRequest {
                        user_id: employee.id,
                        type_conge: submission.type_conge.clone(),
                        date_debut: submission.date_debut,
                        date_fin: submission.date_fin,
                        raison: submission.raison.clone(),
                        preuve: Some(submission.proof_reference.clone()),
                        status: LeaveStatus::EnAttente,
                    })
                    .await?;
                side_effects.push(SideEffect::LeaveRequestPersisted { request_id });
                info!(user_id = employee.id, request_id, "leave request persisted");

                let roster = self
                    .directory
                    .list_employees()
                    .await
                    .map_err(|e| TurnError::Directory(e.to_string()))?;
                let hr_ids: Vec<i64> = roster
                    .iter()
                    .filter(|e| self.directory.has_hr_capability(e))
                    .map(|e| e.id)
                    .collect();

                if !hr_ids.is_empty() {
                    let body = format!(
                        "Nouvelle demande de congé\n\
                         Employé : {}\n\
                         Type : {}\n\
                         Période : {} → {}\n\
                         Tapez 'liste des congés' pour vérifier.",
                        employee.full_name(),
                        submission.type_conge,
                        submission.date_debut.format("%Y-%m-%d"),
                        submission.date_fin.format("%Y-%m-%d"),
                    );
                    self.notifier
                        .notify(
                            &hr_ids,
                            "Nouvelle demande de congé",
                            &body,
                            NotificationKind::Info,
                        )
                        .await?;
                    side_effects.push(SideEffect::NotificationsSent {
                        recipients: hr_ids.len(),
                    });
                }

                // Automatic overload check on every submission.
                let analysis = analyze(&roster);
                if !analysis.overloaded.is_empty() && !hr_ids.is_empty() {
                    let mut body = format!(
                        "Alerte surcharge détectée\n{} employé(s) en surcharge :\n",
                        analysis.overloaded.len()
                    );
                    for overloaded in &analysis.overloaded {
                        body.push_str(&format!(
                            "• {} ({}) - {} missions\n",
                            overloaded.name, overloaded.department, overloaded.mission_count
                        ));
                    }
                    body.push_str("Tapez 'explication surcharge' pour plus de détails.");
                    self.notifier
                        .notify(
                            &hr_ids,
                            "Alerte Surcharge Équipe",
                            &body,
                            NotificationKind::Warning,
                        )
                        .await?;
                    side_effects.push(SideEffect::NotificationsSent {
                        recipients: hr_ids.len(),
                    });
                }

                let estimate = flow::acceptance_estimate(employee);
                state.last_acceptance = Some(estimate.clone());
                state.reset_flow();

                Ok(TurnOutcome {
                    response: handlers::submission_confirmed(&estimate),
                    payload: Some(TurnPayload::Acceptance { estimate }),
                    side_effects,
                })
            }
        }
    }

    /// Text path: flow interception first, then classification.
    async fn handle_text(
        &self,
        employee: &Employee,
        state: &mut ConversationState,
        raw_message: &str,
    ) -> Result<TurnOutcome, TurnError> {
        // Empty message: identity handshake from the boundary.
        if raw_message.trim().is_empty() {
            return Ok(TurnOutcome::text(format!(
                "Votre prénom est : {}\nVotre nom est : {}",
                employee.first_name, employee.last_name
            )));
        }

        // State first: mid-flow text answers the pending question instead
        // of being re-classified.
        if let FlowReply::Consumed {
            response,
            request_proof,
        } = flow::advance(state, raw_message)
        {
            return Ok(TurnOutcome {
                response,
                payload: request_proof.then_some(TurnPayload::ProofRequested),
                side_effects: Vec::new(),
            });
        }

        let normalized = normalize(raw_message);
        let intent = classify(&normalized);
        debug!(user_id = employee.id, intent = intent.tag(), "classified message");

        if intent.requires_hr() && !self.directory.has_hr_capability(employee) {
            warn!(user_id = employee.id, intent = intent.tag(), "hr intent denied");
            let response = if intent == Intent::ListeCongesRh {
                handlers::denied_leave_list()
            } else {
                handlers::denied_hr()
            };
            return Ok(TurnOutcome::text(response));
        }

        match intent {
            Intent::DemandeConge => Ok(TurnOutcome::text(flow::start(state))),

            Intent::Greeting => Ok(TurnOutcome::text(handlers::greeting())),
            Intent::Politeness => Ok(TurnOutcome::text(handlers::politeness())),
            Intent::RoleQuery => Ok(TurnOutcome::text(handlers::role_query())),
            Intent::StatusQuery => Ok(TurnOutcome::text(handlers::status_query())),

            Intent::EvolutionRh => Ok(TurnOutcome::text(handlers::evolution_rh())),
            Intent::ResponsableRh => {
                Ok(TurnOutcome::text(handlers::responsable_rh(&self.hr_desk)))
            }
            Intent::HorairesRh => Ok(TurnOutcome::text(handlers::horaires_rh(&self.hr_desk))),
            Intent::ContacterRhBasic => {
                Ok(TurnOutcome::text(handlers::contacter_rh_basic(&self.hr_desk)))
            }
            Intent::RoleRh => Ok(TurnOutcome::text(handlers::role_rh())),
            Intent::AideRhQuotidien => Ok(TurnOutcome::text(handlers::aide_rh_quotidien())),
            Intent::ContactRh => Ok(TurnOutcome::text(handlers::contact_rh(&self.hr_desk))),
            Intent::InfosRh => Ok(TurnOutcome::text(handlers::infos_rh(&self.hr_desk))),

            Intent::ProfilEmail => Ok(TurnOutcome::text(handlers::profil_email(employee))),
            Intent::ProfilPrenom => Ok(TurnOutcome::text(handlers::profil_prenom(employee))),
            Intent::ProfilNom => Ok(TurnOutcome::text(handlers::profil_nom(employee))),
            Intent::ProfilRole => Ok(TurnOutcome::text(handlers::profil_role(employee))),
            Intent::ProfilDepartement => {
                Ok(TurnOutcome::text(handlers::profil_departement(employee)))
            }
            Intent::ProfilMaj => Ok(TurnOutcome::text(handlers::profil_maj(employee))),
            Intent::SoldeConges => Ok(TurnOutcome::text(handlers::solde_conges(employee))),
            Intent::SoldeRtt => Ok(TurnOutcome::text(handlers::solde_rtt(employee))),
            Intent::StatutEmploye => Ok(TurnOutcome::text(handlers::statut_employe(employee))),
            Intent::DernierConge => Ok(TurnOutcome::text(handlers::dernier_conge(employee))),
            Intent::DateMajSolde => Ok(TurnOutcome::text(handlers::date_maj_solde(employee))),

            Intent::ChatHistory => Ok(TurnOutcome::text(handlers::chat_history(state))),

            Intent::SuiviMesConges => {
                let requests = self
                    .leave_store
                    .list(LeaveFilter::for_user(employee.id))
                    .await?;
                Ok(TurnOutcome::text(handlers::suivi_mes_conges(&requests)))
            }

            Intent::ListeCongesRh => self.handle_leave_list().await,

            Intent::ProcedureConge => {
                let procedures = self.leave_store.list_procedures().await?;
                Ok(TurnOutcome::text(handlers::procedures(&procedures)))
            }

            Intent::ExplainPercentage => Ok(TurnOutcome::text(handlers::explain_percentage(
                state.last_acceptance.as_ref(),
            ))),

            Intent::WorkloadForecast => {
                let roster = self.roster().await?;
                Ok(TurnOutcome::text(handlers::workload_forecast(&analyze(
                    &roster,
                ))))
            }
            Intent::OverloadAlert => {
                let roster = self.roster().await?;
                Ok(TurnOutcome::text(handlers::overload_alert(&analyze(&roster))))
            }

            Intent::GenerateLeaveReport => self.handle_leave_report(employee).await,
            Intent::GenerateWorkloadReport => self.handle_workload_report(employee).await,
            Intent::DownloadReport => self.handle_download(employee, &normalized).await,

            Intent::InfosEmploye => self.handle_employee_lookup(raw_message).await,

            Intent::Aide => Ok(TurnOutcome::text(handlers::aide(
                self.directory.has_hr_capability(employee),
            ))),

            Intent::Unknown => Ok(TurnOutcome::text(handlers::not_understood())),
        }
    }

    /// Roster fetch with error mapping.
    async fn roster(&self) -> Result<Vec<Employee>, TurnError> {
        self.directory
            .list_employees()
            .await
            .map_err(|e| TurnError::Directory(e.to_string()))
    }

    /// Structured HR listing of every leave request.
    async fn handle_leave_list(&self) -> Result<TurnOutcome, TurnError> {
        let requests = self.leave_store.list(LeaveFilter::default()).await?;
        let roster = self.roster().await?;

        let views: Vec<LeaveRequestView> = requests
            .iter()
            .map(|request| {
                let requester = roster.iter().find(|e| e.id == request.user_id);
                LeaveRequestView {
                    id: request.id,
                    user_id: request.user_id,
                    first_name: requester.map(|e| e.first_name.clone()).unwrap_or_default(),
                    last_name: requester.map(|e| e.last_name.clone()).unwrap_or_default(),
                    type_conge: request.type_conge.clone(),
                    date_debut: request.date_debut.format("%Y-%m-%d").to_string(),
                    date_fin: request.date_fin.format("%Y-%m-%d").to_string(),
                    raison: request.raison.clone(),
                    status: request.status.label().to_owned(),
                    preuve: request.preuve.clone(),
                    created_at: request.created_at.format("%Y-%m-%d %H:%M").to_string(),
                }
            })
            .collect();

        Ok(TurnOutcome {
            response: handlers::liste_conges_rh(views.len()),
            payload: Some(TurnPayload::LeaveRequests { requests: views }),
            side_effects: Vec::new(),
        })
    }

    /// Generate, render and store the leave report.
    async fn handle_leave_report(&self, employee: &Employee) -> Result<TurnOutcome, TurnError> {
        let requests = self.leave_store.list(LeaveFilter::default()).await?;
        let roster = self.roster().await?;

        let generated_at = Utc::now();
        let report = leave::build_leave_report(&requests, &roster, generated_at);
        let rendered = leave::render_leave_report(&report);

        match self
            .reports
            .store(employee, ReportKind::Conges, &rendered, generated_at)
            .await
        {
            Err(ReportError::Write(e)) => {
                warn!(error = %e, "leave report generation failed");
                Ok(TurnOutcome::text(
                    "Erreur lors de la génération du rapport. Veuillez réessayer.",
                ))
            }
            Ok(record) => Ok(TurnOutcome {
                response: handlers::report_ready(
                    "RAPPORT D'ANALYSE DES CONGÉS GÉNÉRÉ",
                    &record,
                ),
                payload: Some(TurnPayload::Report {
                    report_id: record.id,
                    filename: record.filename.clone(),
                }),
                side_effects: vec![SideEffect::ReportWritten {
                    report_id: record.id,
                }],
            }),
        }
    }

    /// Generate, render and store the workload report.
    async fn handle_workload_report(
        &self,
        employee: &Employee,
    ) -> Result<TurnOutcome, TurnError> {
        let roster = self.roster().await?;
        let analysis = analyze(&roster);

        let generated_at = Utc::now();
        let report = workload_report::build_workload_report(&analysis, &roster, generated_at);
        let rendered = workload_report::render_workload_report(&report);

        match self
            .reports
            .store(employee, ReportKind::Charge, &rendered, generated_at)
            .await
        {
            Err(ReportError::Write(e)) => {
                warn!(error = %e, "workload report generation failed");
                Ok(TurnOutcome::text(
                    "Erreur lors de la génération du rapport. Veuillez réessayer.",
                ))
            }
            Ok(record) => Ok(TurnOutcome {
                response: handlers::report_ready(
                    "RAPPORT DE CHARGE DE TRAVAIL GÉNÉRÉ",
                    &record,
                ),
                payload: Some(TurnPayload::Report {
                    report_id: record.id,
                    filename: record.filename.clone(),
                }),
                side_effects: vec![SideEffect::ReportWritten {
                    report_id: record.id,
                }],
            }),
        }
    }

    /// Resolve a download request through the report index.
    async fn handle_download(
        &self,
        employee: &Employee,
        normalized: &str,
    ) -> Result<TurnOutcome, TurnError> {
        match self
            .reports
            .index()
            .resolve_download(employee.id, normalized)
            .await
        {
            DownloadResolution::NoReference => Ok(TurnOutcome::text(
                "Précisez le rapport à télécharger : 'télécharger <identifiant>' ou \
                 'télécharger <nom de fichier>'.",
            )),
            DownloadResolution::NotFound => Ok(TurnOutcome::text(
                "Fichier introuvable. Le rapport a peut-être expiré.",
            )),
            DownloadResolution::NotOwner => Ok(TurnOutcome::text(
                "Vous ne pouvez télécharger que vos propres rapports.",
            )),
            DownloadResolution::Found(record) => Ok(TurnOutcome {
                response: handlers::download_ready(&record),
                payload: Some(TurnPayload::Download {
                    report_id: record.id,
                    filename: record.filename.clone(),
                }),
                side_effects: Vec::new(),
            }),
        }
    }

    /// HR lookup of another employee by "first last".
    async fn handle_employee_lookup(&self, raw_message: &str) -> Result<TurnOutcome, TurnError> {
        let Some((first, last)) = handlers::extract_target_name(raw_message) else {
            return Ok(TurnOutcome::text(handlers::infos_employe_missing_name()));
        };

        match self.directory.find_by_name(&first, &last).await {
            Ok(target) => Ok(TurnOutcome::text(handlers::infos_employe(&target))),
            Err(DirectoryError::NotFound) => Ok(TurnOutcome::text(
                handlers::infos_employe_not_found(&first, &last),
            )),
            Err(DirectoryError::Access(e)) => Err(TurnError::Directory(e)),
        }
    }
}
