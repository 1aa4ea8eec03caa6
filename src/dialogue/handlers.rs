//! Response builders for classified intents.
//!
//! Pure formatting: the dispatcher fetches whatever data a handler needs
//! and passes it in, so everything here is directly testable.

use crate::config::HrDeskConfig;
use crate::report::ReportRecord;
use crate::types::{AcceptanceEstimate, Employee, LeaveProcedure, LeaveRequest};
use crate::workload::WorkloadAnalysis;

use super::state::{ConversationState, Sender};

// -- Small talk --

/// Greeting reply.
pub fn greeting() -> String {
    "Bonjour ! Comment puis-je vous aider aujourd'hui ?".to_owned()
}

/// Thanks reply.
pub fn politeness() -> String {
    "Avec plaisir ! Comment puis-je vous aider ?".to_owned()
}

/// "Who are you" reply.
pub fn role_query() -> String {
    "Je suis l'assistant RH interne. Je peux répondre à vos questions, suivre vos demandes \
     de congé et renseigner le service RH."
        .to_owned()
}

/// "How are you" reply.
pub fn status_query() -> String {
    "Je vais bien, merci de demander ! Et vous ?".to_owned()
}

/// Fallback when no rule matched.
pub fn not_understood() -> String {
    "Je n'ai pas bien compris votre demande. Pouvez-vous reformuler ou demander de l'aide \
     pour voir ce que je peux faire pour vous ?"
        .to_owned()
}

// -- Access denial --

/// Denial for the HR leave listing.
pub fn denied_leave_list() -> String {
    "Désolé, vous n'avez pas l'accès à la liste des congés.".to_owned()
}

/// Denial for HR-restricted analytics and reports.
pub fn denied_hr() -> String {
    "Accès réservé aux ressources humaines.".to_owned()
}

// -- HR knowledge answers --

/// How HR supports career growth.
pub fn evolution_rh() -> String {
    "Le service RH aide les employés à évoluer dans leur carrière en proposant des \
     formations, en conseillant sur les possibilités de promotion et en aidant à \
     identifier les compétences à développer. Il soutient aussi les employés qui \
     souhaitent changer de poste ou améliorer leurs qualifications."
        .to_owned()
}

/// Who leads the HR desk.
pub fn responsable_rh(desk: &HrDeskConfig) -> String {
    format!(
        "Le responsable du service RH est {}. Vous pouvez la contacter pour toute question \
         spécifique liée aux ressources humaines.",
        desk.responsable
    )
}

/// HR desk opening hours.
pub fn horaires_rh(desk: &HrDeskConfig) -> String {
    format!(
        "Le service RH est disponible {}. N'hésitez pas à les contacter pendant ces \
         horaires pour toute demande.",
        desk.horaires
    )
}

/// How to reach the HR desk (short form).
pub fn contacter_rh_basic(desk: &HrDeskConfig) -> String {
    format!(
        "Pour contacter le service RH, vous pouvez envoyer un email à {}, appeler le {}, \
         ou vous rendre au bureau situé au {}.",
        desk.email, desk.telephone, desk.bureau
    )
}

/// What the HR department is for.
pub fn role_rh() -> String {
    "Le service des ressources humaines est essentiel au bon fonctionnement d'une \
     entreprise. Il s'occupe de la gestion des employés, du recrutement, de la formation, \
     du suivi des carrières et du bien-être au travail. Les RH veillent à l'application \
     des règles, accompagnent les collaborateurs dans leurs démarches et favorisent un \
     climat de confiance et d'épanouissement professionnel."
        .to_owned()
}

/// How HR helps day to day.
pub fn aide_rh_quotidien() -> String {
    "Le service des ressources humaines joue un rôle essentiel dans la vie quotidienne \
     des employés. Il accompagne chacun dans ses démarches administratives, répond aux \
     questions sur la paie, les congés ou la formation, et veille au bien-être au \
     travail. N'hésitez pas à le solliciter pour toute demande ou besoin d'information."
        .to_owned()
}

/// How to reach the HR desk (detailed form).
pub fn contact_rh(desk: &HrDeskConfig) -> String {
    format!(
        "Pour contacter le service RH :\n\
         • Email : {}\n\
         • Téléphone : {}\n\
         • Bureau : {}\n\
         N'hésitez pas à les contacter pour toute question liée aux ressources humaines.",
        desk.email, desk.telephone, desk.bureau
    )
}

/// Full HR desk contact card.
pub fn infos_rh(desk: &HrDeskConfig) -> String {
    format!(
        "Voici les informations de contact du service RH :\n\
         • Responsable RH : {}\n\
         • Email : {}\n\
         • Téléphone : {}\n\
         • Horaires : {}\n\
         • Bureau : {}\n\
         Pour toute demande, privilégiez l'email ou le téléphone.",
        desk.responsable, desk.email, desk.telephone, desk.horaires, desk.bureau
    )
}

// -- Own-profile lookups --

/// The requester's email.
pub fn profil_email(employee: &Employee) -> String {
    format!("Votre email est : {}", employee.email)
}

/// The requester's given name.
pub fn profil_prenom(employee: &Employee) -> String {
    format!("Votre prénom est : {}", employee.first_name)
}

/// The requester's family name.
pub fn profil_nom(employee: &Employee) -> String {
    format!("Votre nom est : {}", employee.last_name)
}

/// The requester's role.
pub fn profil_role(employee: &Employee) -> String {
    format!("Votre rôle est : {}", employee.role)
}

/// The requester's department.
pub fn profil_departement(employee: &Employee) -> String {
    format!("Votre département est : {}", employee.department_label())
}

/// The requester's last profile update.
pub fn profil_maj(employee: &Employee) -> String {
    format!(
        "Votre dernier update est : {}",
        employee.updated_at.format("%Y-%m-%d %H:%M")
    )
}

/// The requester's paid-leave balance.
pub fn solde_conges(employee: &Employee) -> String {
    match employee.solde_conges {
        Some(days) => format!("Votre solde de congés payés est : {days} jours."),
        None => "Votre solde de congés payés est : Non renseigné.".to_owned(),
    }
}

/// The requester's RTT balance.
pub fn solde_rtt(employee: &Employee) -> String {
    match employee.solde_rtt {
        Some(days) => format!("Votre solde de RTT est : {days} jours."),
        None => "Votre solde de RTT est : Non renseigné.".to_owned(),
    }
}

/// The requester's contract kind.
pub fn statut_employe(employee: &Employee) -> String {
    format!(
        "Votre statut d'employé est : {}",
        employee.statut_employe.as_deref().unwrap_or("Non renseigné")
    )
}

/// The requester's last leave date.
pub fn dernier_conge(employee: &Employee) -> String {
    match employee.date_dernier_conge {
        Some(date) => format!(
            "La date de votre dernier congé est : {}",
            date.format("%d/%m/%Y")
        ),
        None => "La date de votre dernier congé est : Non renseignée.".to_owned(),
    }
}

/// The requester's balance update date.
pub fn date_maj_solde(employee: &Employee) -> String {
    match employee.date_maj_solde {
        Some(date) => format!(
            "La date de mise à jour de votre solde est : {}",
            date.format("%d/%m/%Y")
        ),
        None => "La date de mise à jour de votre solde est : Non renseignée.".to_owned(),
    }
}

// -- Histories and listings --

/// Render the session's sliding-window turn history as a table.
pub fn chat_history(state: &ConversationState) -> String {
    if state.history().is_empty() {
        return "Aucun historique de chat trouvé.".to_owned();
    }

    let mut out = String::from("HISTORIQUE DE VOS CONVERSATIONS\n\n");
    let header = format!("{:<18} {:<10} {:<50}", "Date", "Auteur", "Message");
    let separator = "-".repeat(80);
    out.push_str(&format!("{header}\n{separator}\n"));

    for turn in state.history() {
        let date = turn.timestamp.format("%d/%m/%Y %H:%M").to_string();
        let author = match turn.sender {
            Sender::User => "Vous",
            Sender::Bot => "Bot",
        };
        let mut message = turn.message.replace(['\n', '\r'], " ");
        if message.chars().count() > 47 {
            message = message.chars().take(44).collect::<String>();
            message.push_str("...");
        }
        out.push_str(&format!("{date:<18} {author:<10} {message:<50}\n"));
    }

    out.push_str(&format!(
        "{separator}\n\nTotal : {} message(s) dans votre historique",
        state.history().len()
    ));
    out
}

/// Render the requester's own leave requests with quick stats.
pub fn suivi_mes_conges(requests: &[LeaveRequest]) -> String {
    if requests.is_empty() {
        return "Aucune demande de congé trouvée.\n\
                Vous n'avez encore soumis aucune demande de congé.\n\
                Tapez 'demande de congé' pour en créer une nouvelle."
            .to_owned();
    }

    let mut out = format!("MES DEMANDES DE CONGÉ ({} au total)\n", requests.len());
    for (i, request) in requests.iter().enumerate() {
        out.push_str(&format!(
            "\nDemande #{:02}\n\
             • Type : {}\n\
             • Période : {} → {} ({} jour(s))\n\
             • Raison : {}\n\
             • Statut : {}\n\
             • Justificatif : {}\n\
             • Soumise : {}\n",
            i.saturating_add(1),
            request.type_conge,
            request.date_debut.format("%d/%m/%Y"),
            request.date_fin.format("%d/%m/%Y"),
            request.duration_days(),
            request.raison,
            request.status.label(),
            if request.preuve.is_some() { "Fourni" } else { "Manquant" },
            request.created_at.format("%d/%m/%Y %H:%M"),
        ));
    }

    let pending = requests
        .iter()
        .filter(|r| r.status == crate::types::LeaveStatus::EnAttente)
        .count();
    let approved = requests
        .iter()
        .filter(|r| r.status == crate::types::LeaveStatus::Approuve)
        .count();
    out.push_str(&format!(
        "\nStatistiques :\n\
         • En attente : {pending}\n\
         • Approuvées : {approved}\n\
         • Total : {}\n\
         Tapez 'demande de congé' pour créer une nouvelle demande.",
        requests.len()
    ));
    out
}

/// Short text accompanying the structured HR leave listing.
pub fn liste_conges_rh(count: usize) -> String {
    if count == 0 {
        "Aucune demande de congé enregistrée pour le moment.".to_owned()
    } else {
        format!("{count} demande(s) de congé enregistrée(s). Détail en pièce jointe structurée.")
    }
}

/// Render the stored procedures, or the built-in general guide.
pub fn procedures(procedures: &[LeaveProcedure]) -> String {
    if procedures.is_empty() {
        return "Aucune procédure de congé n'est enregistrée dans le système.\n\
                Voici les informations générales sur les procédures de congés :\n\n\
                CONGÉS PAYÉS\n\
                • Demande à effectuer : 1 mois à l'avance minimum\n\
                • Documents requis : Aucun justificatif\n\
                • Traitement : Validation par le manager\n\n\
                CONGÉ MALADIE\n\
                • Délai : Certificat médical sous 48h\n\
                • Documents requis : Arrêt de travail médical\n\
                • Traitement : Envoi immédiat aux RH\n\n\
                RTT\n\
                • Préavis : 2 semaines minimum\n\
                • Documents requis : Aucun justificatif\n\
                • Traitement : Validation par le manager\n\n\
                CONGÉ EXCEPTIONNEL\n\
                • Préavis : Variable selon la situation\n\
                • Documents requis : Justificatifs obligatoires\n\
                • Traitement : Étude au cas par cas\n\n\
                Besoin d'aide ? Contactez les RH ou votre manager pour plus de détails."
            .to_owned();
    }

    let mut out = String::from("GUIDE DES PROCÉDURES DE CONGÉ\n");
    for (i, procedure) in procedures.iter().enumerate() {
        out.push_str(&format!(
            "\nProcédure #{:02} : {}\n• Description : {}\n",
            i.saturating_add(1),
            procedure.titre,
            procedure.description
        ));
        if let Some(delai) = &procedure.delai {
            out.push_str(&format!("• Délai requis : {delai}\n"));
        }
    }
    out.push_str(
        "\nTapez 'demande de congé' pour démarrer une demande, ou contactez l'équipe RH \
         pour toute assistance.",
    );
    out
}

// -- Workload analytics --

/// Chat rendering of a workload analysis pass.
pub fn workload_forecast(analysis: &WorkloadAnalysis) -> String {
    let stats = &analysis.global;
    let mut out = String::from("ANALYSE DE CHARGE DE TRAVAIL\n\n");
    out.push_str(&format!(
        "Statistiques globales :\n\
         • Total employés : {}\n\
         • Employés actifs : {}\n\
         • Missions en cours : {}\n\
         • Taux d'activité : {}%\n",
        stats.total_employees,
        stats.active_employees,
        stats.missions_in_progress,
        stats.activity_rate,
    ));

    out.push_str("\nAnalyse par département :\n");
    for (dept, load) in &analysis.departments {
        out.push_str(&format!(
            "• {dept} : {}% ({})\n  {} employés | {} en mission\n",
            load.load_rate(),
            load.risk_tier().label(),
            load.total,
            load.in_progress,
        ));
        let frequent: Vec<String> = load.distinct_missions().into_iter().take(3).collect();
        if !frequent.is_empty() {
            out.push_str(&format!("  Missions fréquentes : {}\n", frequent.join(", ")));
        }
    }

    if analysis.overloaded.is_empty() {
        out.push_str("\nAucune surcharge détectée.\n");
    } else {
        out.push_str("\nAlertes surcharge :\n");
        for overloaded in &analysis.overloaded {
            out.push_str(&format!(
                "• {} ({}) — {} missions actives\n",
                overloaded.name, overloaded.department, overloaded.mission_count
            ));
        }
    }

    out.push_str("\nTapez 'explication surcharge' pour plus de détails.");
    out
}

/// Chat rendering of the overload explanation.
pub fn overload_alert(analysis: &WorkloadAnalysis) -> String {
    if analysis.overloaded.is_empty() {
        return "Aucune surcharge actuelle.\n\
                Tous les employés ont une charge de travail normale (3 missions actives ou \
                moins).\n\
                Tapez 'prévision charge' pour voir l'analyse complète."
            .to_owned();
    }

    let mut out = format!(
        "EXPLICATION SURCHARGE ÉQUIPE\n\n{} employé(s) en situation de surcharge détecté(s)\n",
        analysis.overloaded.len()
    );

    for (i, overloaded) in analysis.overloaded.iter().enumerate() {
        let (niveau, action) = if overloaded.mission_count >= 6 {
            ("CRITIQUE", "Action immédiate requise")
        } else if overloaded.mission_count >= 5 {
            ("ÉLEVÉ", "Surveillance rapprochée")
        } else {
            ("MODÉRÉ", "Rééquilibrage recommandé")
        };

        out.push_str(&format!(
            "\nEmployé #{}\n\
             • Nom : {}\n\
             • Département : {}\n\
             • Nombre de missions : {}\n\
             • Missions : {}\n\
             • Niveau de risque : {niveau}\n\
             • Action : {action}\n",
            i.saturating_add(1),
            overloaded.name,
            overloaded.department,
            overloaded.mission_count,
            overloaded.missions.join(", "),
        ));
    }

    out.push_str(
        "\nActions recommandées :\n\
         • Contacter les employés surchargés\n\
         • Redistribuer les missions moins urgentes\n\
         • Envisager du renfort temporaire\n\
         • Planifier des congés échelonnés\n\n\
         Ces alertes sont générées pour tout employé ayant plus de 3 missions actives.",
    );
    out
}

// -- Reports --

/// Chat confirmation for a generated report.
pub fn report_ready(title: &str, record: &ReportRecord) -> String {
    format!(
        "{title}\n\n\
         • Fichier généré : {}\n\
         • Identifiant : {}\n\
         Tapez 'télécharger {}' pour récupérer le rapport complet.",
        record.filename, record.id, record.id
    )
}

/// Chat confirmation for a resolved download.
pub fn download_ready(record: &ReportRecord) -> String {
    format!(
        "TÉLÉCHARGEMENT DU RAPPORT\n\
         • Fichier : {}\n\
         • Identifiant : {}\n\
         Le téléchargement démarrera automatiquement.",
        record.filename, record.id
    )
}

// -- Acceptance follow-up --

/// Answer the "pourquoi ce pourcentage" follow-up from the cached estimate.
pub fn explain_percentage(estimate: Option<&AcceptanceEstimate>) -> String {
    match estimate {
        Some(estimate) => format!(
            "Votre dernier pourcentage d'acceptation est {}%.\n{}",
            estimate.percentage, estimate.explanation
        ),
        None => "Aucun calcul d'acceptation récent. Soumettez d'abord une demande de congé \
                 complète pour obtenir une estimation."
            .to_owned(),
    }
}

/// Confirmation after a request is persisted.
pub fn submission_confirmed(estimate: &AcceptanceEstimate) -> String {
    format!(
        "Votre demande de congé a été enregistrée avec succès, avec le fichier \
         justificatif.\n\
         Probabilité d'acceptation estimée : {}%.\n{}",
        estimate.percentage, estimate.explanation
    )
}

// -- Cross-employee lookup --

/// Filler words ignored when extracting a target name from a message.
const NAME_IGNORE_WORDS: &[&str] = &[
    "info",
    "infos",
    "user",
    "informations",
    "de",
    "l'utilisateur",
    "l'user",
    "les",
    "donnees",
    "données",
    "details",
    "détails",
];

/// Extract "first last" from the tail of a lookup message.
///
/// Filler words are dropped; the last two remaining words are taken as the
/// given and family name, in that order.
pub fn extract_target_name(message: &str) -> Option<(String, String)> {
    let words: Vec<&str> = message
        .split_whitespace()
        .filter(|w| {
            let lower = w.to_lowercase();
            !NAME_IGNORE_WORDS.contains(&lower.as_str())
        })
        .collect();

    if words.len() < 2 {
        return None;
    }
    let last = words[words.len().saturating_sub(1)];
    let first = words[words.len().saturating_sub(2)];
    Some((first.to_owned(), last.to_owned()))
}

/// Prompt when the lookup message carries no usable name.
pub fn infos_employe_missing_name() -> String {
    "Fournissez le prénom en premier, puis le nom de l'utilisateur.".to_owned()
}

/// Reply when the target employee does not exist.
pub fn infos_employe_not_found(first: &str, last: &str) -> String {
    format!(
        "Aucun utilisateur trouvé avec le prénom '{first}' et le nom '{last}'. \
         Fournissez le prénom en premier, puis le nom."
    )
}

/// Field table for a looked-up employee.
pub fn infos_employe(target: &Employee) -> String {
    let header = format!("{:<20} {:<40}", "Champ", "Valeur");
    let separator = "-".repeat(62);
    let rows = [
        format!("{:<20} {:<40}", "Matricule", target.matricule),
        format!("{:<20} {:<40}", "Prénom", target.first_name),
        format!("{:<20} {:<40}", "Nom", target.last_name),
        format!("{:<20} {:<40}", "Email", target.email),
        format!("{:<20} {:<40}", "Rôle", target.role),
        format!("{:<20} {:<40}", "Département", target.department_label()),
        format!(
            "{:<20} {:<40}",
            "Date création",
            target.created_at.format("%Y-%m-%d %H:%M").to_string()
        ),
        format!(
            "{:<20} {:<40}",
            "Dernière maj",
            target.updated_at.format("%Y-%m-%d %H:%M").to_string()
        ),
    ];
    format!(
        "Informations de l'utilisateur {} :\n{header}\n{separator}\n{}",
        target.full_name(),
        rows.join("\n")
    )
}

// -- Help --

/// Role-sensitive help menu.
pub fn aide(is_hr: bool) -> String {
    if is_hr {
        "Fonctionnalités disponibles (RH) :\n\n\
         Gestion des congés :\n\
         • Tapez 'liste des congés' pour voir toutes les demandes\n\
         • Tapez 'procédure congé' pour les procédures\n\n\
         Analyse de charge :\n\
         • Tapez 'prévision charge' pour l'analyse complète\n\
         • Tapez 'charge de travail' pour les statistiques\n\n\
         Alertes :\n\
         • Tapez 'explication surcharge' pour les détails\n\n\
         Rapports :\n\
         • Tapez 'générer rapport congé' ou 'rapport sur la charge'\n\
         • Tapez 'télécharger <identifiant>' pour récupérer un rapport\n\n\
         Que souhaitez-vous consulter ?"
            .to_owned()
    } else {
        "Je peux vous aider avec :\n\
         - Vos informations personnelles (email, nom, prénom, etc.)\n\
         - Vos demandes de congé\n\
         - Votre solde de congés et RTT\n\
         - L'historique de vos demandes\n\
         - Les procédures de congé\n\n\
         Que souhaitez-vous savoir ?"
            .to_owned()
    }
}
