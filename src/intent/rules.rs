//! The ordered intent rule table.
//!
//! Order is load-bearing: groups are scanned top to bottom and the first
//! phrase match wins, so specific multi-word groups must precede general
//! single-word groups whose keywords they embed. Phrases are stored in
//! normalized form (lowercase, accent-free, single-spaced) — asserted by
//! the `all_rule_phrases_are_pre_normalized` test.

use super::Intent;

/// One rule group: a set of trigger phrases mapping to an intent.
#[derive(Debug)]
pub struct IntentRule {
    /// Intent returned when any phrase matches.
    pub intent: Intent,
    /// Trigger phrases, evaluated in listed order.
    pub phrases: &'static [&'static str],
}

/// The classification table, scanned first-match-wins.
///
/// Ordering constraints to preserve when editing:
/// - every group whose phrases embed the bare word "conge" (balances,
///   history, procedures, report generation) comes before the general
///   `DemandeConge` group;
/// - `ListeCongesRh` comes before `SuiviMesConges` ("mes demandes de conge"
///   embeds "demandes de conge");
/// - `ProfilPrenom` comes before `ProfilNom` ("prenom" embeds "nom");
/// - the `Aide` fallback group stays last.
pub const RULES: &[IntentRule] = &[
    // HR knowledge answers — long, specific question forms first.
    IntentRule {
        intent: Intent::EvolutionRh,
        phrases: &[
            "comment le service rh peut il accompagner les employes dans leur evolution professionnelle",
            "comment le service rh peut-il accompagner les employes dans leur evolution professionnelle",
            "comment le service rh accompagne les employes dans leur evolution professionnelle",
            "accompagnement rh evolution professionnelle",
            "comment rh aide a evoluer",
            "comment rh aide a la promotion",
            "aide rh pour changer de poste",
            "aide rh pour formation",
        ],
    },
    IntentRule {
        intent: Intent::ResponsableRh,
        phrases: &[
            "qui est le responsable du service rh",
            "responsable rh",
            "nom du responsable rh",
            "chef du service rh",
        ],
    },
    IntentRule {
        intent: Intent::HorairesRh,
        phrases: &[
            "horaires du service rh",
            "quels sont les horaires du service rh",
            "heures d'ouverture rh",
            "quand puis-je contacter le service rh",
            "disponibilite rh",
        ],
    },
    IntentRule {
        intent: Intent::ContacterRhBasic,
        phrases: &[
            "comment contacter le service rh",
            "comment joindre le service rh",
            "contacter rh",
            "joindre rh",
        ],
    },
    IntentRule {
        intent: Intent::RoleRh,
        phrases: &[
            "a quoi sert le service des ressources humaines",
            "quel est le role du service rh",
            "role du service rh",
            "utilite du service rh",
            "pourquoi le service rh",
            "fonction du service rh",
        ],
    },
    IntentRule {
        intent: Intent::AideRhQuotidien,
        phrases: &[
            "comment le service rh peut il aider les employes",
            "comment le service rh peut-il aider les employes",
            "aide rh quotidien",
            "aide du service rh",
            "comment rh aide employes",
            "comment les rh aident les employes",
        ],
    },
    // Small talk.
    IntentRule {
        intent: Intent::Greeting,
        phrases: &["bonjour", "salut", "coucou", "hello"],
    },
    IntentRule {
        intent: Intent::Politeness,
        phrases: &["merci", "thanks", "thank you"],
    },
    IntentRule {
        intent: Intent::RoleQuery,
        phrases: &[
            "ton role",
            "qui es-tu",
            "qui est tu",
            "tu fais quoi",
            "t qui",
            "tfq",
            "ta mission",
        ],
    },
    IntentRule {
        intent: Intent::StatusQuery,
        phrases: &[
            "comment ca va",
            "ca va",
            "comment vas-tu",
            "comment vas tu",
            "comment allez vous",
            "comment allez-vous",
        ],
    },
    // HR-desk contact details.
    IntentRule {
        intent: Intent::ContactRh,
        phrases: &[
            "comment contacter un rh",
            "comment je peux contacter un rh",
            "prendre contact rh",
            "contact rh",
            "parler a un rh",
            "parler rh",
            "appeler rh",
            "email rh",
            "mail rh",
            "telephoner rh",
            "numero rh",
            "adresse rh",
        ],
    },
    IntentRule {
        intent: Intent::InfosRh,
        phrases: &[
            "info rh",
            "infos rh",
            "information rh",
            "informations rh",
            "coordonnees rh",
            "contacts rh",
            "fournissez les info des rh",
            "fournir infos rh",
            "qui contacter rh",
            "service rh",
            "personne rh",
            "telephone rh",
            "tel rh",
        ],
    },
    IntentRule {
        intent: Intent::ChatHistory,
        phrases: &["logs", "historique de chat"],
    },
    // Leave — specific lookups before the general request trigger.
    IntentRule {
        intent: Intent::ListeCongesRh,
        phrases: &[
            "liste des cong",
            "liste de conges",
            "liste conges",
            "liste conge",
            "demandes de conge",
            "demandes conges",
            "demandes conge",
            "historique des conges",
            "historique conges",
            "suivi des conges",
            "suivi conges",
        ],
    },
    IntentRule {
        intent: Intent::SoldeConges,
        phrases: &[
            "solde de conges",
            "solde conge",
            "solde conges",
            "solde_conges",
            "combien de conges",
            "combien de jours de conge",
            "mon solde de conge",
            "mes conges restants",
        ],
    },
    IntentRule {
        intent: Intent::SoldeRtt,
        phrases: &[
            "solde rtt",
            "solde de rtt",
            "combien de rtt",
            "mes rtt",
            "mon solde rtt",
            "solde_rtt",
        ],
    },
    IntentRule {
        intent: Intent::DernierConge,
        phrases: &[
            "date dernier conge",
            "dernier conge",
            "date_dernier_conge",
            "quand mon dernier conge",
            "date de mon dernier conge",
        ],
    },
    IntentRule {
        intent: Intent::DateMajSolde,
        phrases: &[
            "date maj solde",
            "date mise a jour solde",
            "date_maj_solde",
            "quand solde mis a jour",
            "date de mise a jour du solde",
        ],
    },
    IntentRule {
        intent: Intent::SuiviMesConges,
        phrases: &[
            "suivi de mes conges",
            "mes conges",
            "mes demandes de conge",
            "historique de mes conges",
            "statut de mes conges",
            "suivi mes conges",
            "mes demandes",
            "statut de ma demande",
            "ma derniere demande",
        ],
    },
    IntentRule {
        intent: Intent::StatutEmploye,
        phrases: &[
            "mon statut",
            "statut d'employe",
            "statut_employe",
            "type de contrat",
            "cdi",
            "cdd",
            "stagiaire",
            "alternant",
            "quel est mon statut",
        ],
    },
    IntentRule {
        intent: Intent::ProcedureConge,
        phrases: &[
            "procedure pour les cong",
            "procedure pour poser un cong",
            "comment poser un cong",
            "delai cong",
            "delai pour poser un cong",
            "delai de traitement cong",
            "documents cong",
            "justificatif cong",
            "procedure conge",
            "procedure conges",
            "comment faire une demande",
            "etapes pour conge",
            "marche a suivre",
            "que faut-il faire",
            "comment proceder",
            "demarches conge",
        ],
    },
    IntentRule {
        intent: Intent::ExplainPercentage,
        phrases: &[
            "pourquoi ce pourcentage",
            "pourquoi ce taux",
            "detail du calcul",
            "explication du pourcentage",
            "pourcentage d'acceptation",
            "comment ce pourcentage",
        ],
    },
    // Workload analytics.
    IntentRule {
        intent: Intent::WorkloadForecast,
        phrases: &[
            "prevision charge",
            "previsions charge",
            "charge de travail",
            "prevision travail",
            "analyse charge",
            "prevision equipe",
            "charge equipe",
            "workload",
            "missions en cours",
            "analyse missions",
            "prevision missions",
        ],
    },
    IntentRule {
        intent: Intent::OverloadAlert,
        phrases: &[
            "surcharge equipe",
            "alerte surcharge",
            "equipe surchargee",
            "trop de travail",
            "explication surcharge",
            "pourquoi surcharge",
            "detail surcharge",
        ],
    },
    // Report generation and download.
    IntentRule {
        intent: Intent::GenerateLeaveReport,
        phrases: &[
            "rapport analyse conge",
            "rapport demandes conges",
            "rapport detaille conge",
            "generez un rapport analyse",
            "generer rapport conge",
            "rapport conges detaille",
            "analyse detaillee conges",
            "rapport sur les conges",
        ],
    },
    IntentRule {
        intent: Intent::GenerateWorkloadReport,
        phrases: &[
            "rapport charge travail",
            "rapport prevision charge",
            "rapport detaille charge",
            "generez rapport charge",
            "generer rapport workload",
            "rapport charge detaille",
            "analyse detaillee charge",
            "rapport sur la charge",
        ],
    },
    IntentRule {
        intent: Intent::DownloadReport,
        phrases: &["telecharger", "telecharge", "download"],
    },
    // The general leave-request trigger, after everything that embeds it.
    IntentRule {
        intent: Intent::DemandeConge,
        phrases: &[
            "conge",
            "demande de conge",
            "demande conge",
            "vacances",
            "absence",
        ],
    },
    // Own-profile lookups.
    IntentRule {
        intent: Intent::ProfilEmail,
        phrases: &["email", "adresse mail", "mail"],
    },
    IntentRule {
        intent: Intent::ProfilPrenom,
        phrases: &["prenom", "first name"],
    },
    IntentRule {
        intent: Intent::ProfilNom,
        phrases: &["nom", "last name"],
    },
    IntentRule {
        intent: Intent::ProfilRole,
        phrases: &["mon role"],
    },
    IntentRule {
        intent: Intent::ProfilDepartement,
        phrases: &["mon department", "mon departement"],
    },
    IntentRule {
        intent: Intent::ProfilMaj,
        phrases: &["date de mise a jour", "date mise a jour", "updated at"],
    },
    // Cross-employee lookup (HR only, checked at dispatch).
    IntentRule {
        intent: Intent::InfosEmploye,
        phrases: &[
            "informations de l'utilisateur",
            "informations de l'user",
            "info user",
        ],
    },
    // Catch-all help group, deliberately last.
    IntentRule {
        intent: Intent::Aide,
        phrases: &["aide", "help", "que", "comment", "pourquoi", "quoi", "?"],
    },
];
