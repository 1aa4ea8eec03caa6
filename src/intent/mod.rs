//! Rule-based intent classification.
//!
//! Classification is an ordered scan of [`rules::RULES`]: groups are
//! evaluated top to bottom, phrases within a group in listed order, and the
//! first phrase found anywhere in the normalized message wins. Matching is
//! plain substring containment — embedded-keyword false positives are
//! accepted behavior. The group order is a design contract (see the table
//! comments), not an implementation detail.

use serde::{Deserialize, Serialize};

pub mod rules;

/// Classified purpose of a user message. Closed set; free text that matches
/// no rule group maps to [`Intent::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)] // variant names mirror their wire tags below
pub enum Intent {
    EvolutionRh,
    ResponsableRh,
    HorairesRh,
    ContacterRhBasic,
    RoleRh,
    AideRhQuotidien,
    Greeting,
    Politeness,
    RoleQuery,
    StatusQuery,
    ContactRh,
    InfosRh,
    ChatHistory,
    ListeCongesRh,
    SoldeConges,
    SoldeRtt,
    DernierConge,
    DateMajSolde,
    SuiviMesConges,
    StatutEmploye,
    ProcedureConge,
    ExplainPercentage,
    WorkloadForecast,
    OverloadAlert,
    GenerateLeaveReport,
    GenerateWorkloadReport,
    DownloadReport,
    DemandeConge,
    ProfilEmail,
    ProfilPrenom,
    ProfilNom,
    ProfilRole,
    ProfilDepartement,
    ProfilMaj,
    InfosEmploye,
    Aide,
    Unknown,
}

impl Intent {
    /// Stable snake_case tag, used in logs and structured payloads.
    pub fn tag(self) -> &'static str {
        match self {
            Intent::EvolutionRh => "evolution_rh",
            Intent::ResponsableRh => "responsable_rh",
            Intent::HorairesRh => "horaires_rh",
            Intent::ContacterRhBasic => "contacter_rh_basic",
            Intent::RoleRh => "role_rh",
            Intent::AideRhQuotidien => "aide_rh_quotidien",
            Intent::Greeting => "greeting",
            Intent::Politeness => "politeness",
            Intent::RoleQuery => "role_query",
            Intent::StatusQuery => "status_query",
            Intent::ContactRh => "contact_rh",
            Intent::InfosRh => "infos_rh",
            Intent::ChatHistory => "chat_history",
            Intent::ListeCongesRh => "liste_conges_rh",
            Intent::SoldeConges => "solde_conges",
            Intent::SoldeRtt => "solde_rtt",
            Intent::DernierConge => "dernier_conge",
            Intent::DateMajSolde => "date_maj_solde",
            Intent::SuiviMesConges => "suivi_mes_conges",
            Intent::StatutEmploye => "statut_employe",
            Intent::ProcedureConge => "procedure_conge",
            Intent::ExplainPercentage => "explain_percentage",
            Intent::WorkloadForecast => "workload_forecast",
            Intent::OverloadAlert => "overload_alert",
            Intent::GenerateLeaveReport => "generate_leave_report",
            Intent::GenerateWorkloadReport => "generate_workload_report",
            Intent::DownloadReport => "download_report",
            Intent::DemandeConge => "demande_conge",
            Intent::ProfilEmail => "profil_email",
            Intent::ProfilPrenom => "profil_prenom",
            Intent::ProfilNom => "profil_nom",
            Intent::ProfilRole => "profil_role",
            Intent::ProfilDepartement => "profil_departement",
            Intent::ProfilMaj => "profil_maj",
            Intent::InfosEmploye => "infos_employe",
            Intent::Aide => "aide",
            Intent::Unknown => "unknown",
        }
    }

    /// Whether this intent is restricted to HR-capable employees.
    pub fn requires_hr(self) -> bool {
        matches!(
            self,
            Intent::ListeCongesRh
                | Intent::WorkloadForecast
                | Intent::OverloadAlert
                | Intent::GenerateLeaveReport
                | Intent::GenerateWorkloadReport
                | Intent::DownloadReport
                | Intent::InfosEmploye
        )
    }
}

/// Classify a normalized message by first-match-wins scan of the rule table.
///
/// The message must already be normalized (see [`crate::text::normalize`]);
/// phrases in the table are stored in normalized form. An empty message
/// matches nothing and returns [`Intent::Unknown`].
pub fn classify(normalized: &str) -> Intent {
    if normalized.is_empty() {
        return Intent::Unknown;
    }

    rules::RULES
        .iter()
        .find(|rule| rule.phrases.iter().any(|p| normalized.contains(p)))
        .map_or(Intent::Unknown, |rule| rule.intent)
}
