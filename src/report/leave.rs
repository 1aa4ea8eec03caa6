//! Leave-request analysis report.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Employee, LeaveRequest, LeaveStatus};
use crate::workload::round1;

use super::{render_footer, render_header, render_section, ReportMeta};

/// Global statistics over the analyzed requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveStats {
    /// Number of requests analyzed.
    pub total: usize,
    /// Share of approved requests, in percent (one decimal).
    pub taux_validation: f64,
    /// Mean leave duration in days (one decimal).
    pub duree_moyenne: f64,
    /// Requests with an attached proof.
    pub avec_justificatif: usize,
    /// Department with the most requests; "N/A" when there are none.
    pub departement_plus_actif: String,
}

/// One request line in the detailed section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveLine {
    /// Requester display name, "Inconnu" when not in the roster.
    pub employe: String,
    /// Requester badge id, "N/A" when unknown.
    pub matricule: String,
    /// Requester department label.
    pub department: String,
    /// Leave kind.
    pub type_conge: String,
    /// First day, `DD/MM/YYYY`.
    pub date_debut: String,
    /// Last day, `DD/MM/YYYY`.
    pub date_fin: String,
    /// Inclusive duration in days.
    pub duree_jours: i64,
    /// Free-text justification.
    pub raison: String,
    /// Status label.
    pub status: String,
    /// Whether a proof is attached.
    pub preuve_fournie: bool,
}

/// The structured leave report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveReport {
    /// Header block.
    pub meta: ReportMeta,
    /// Global statistics.
    pub stats: LeaveStats,
    /// Request counts per leave kind.
    pub par_type: BTreeMap<String, usize>,
    /// Request counts per department.
    pub par_departement: BTreeMap<String, usize>,
    /// Request counts per `YYYY-MM` month.
    pub par_mois: BTreeMap<String, usize>,
    /// Detailed request lines, newest first.
    pub demandes: Vec<LeaveLine>,
    /// Threshold-rule recommendations.
    pub recommandations: Vec<String>,
}

/// Build the leave report over the given requests.
///
/// `roster` resolves requester names and departments; unknown requesters
/// render as "Inconnu". Deterministic apart from `generated_at`.
pub fn build_leave_report(
    requests: &[LeaveRequest],
    roster: &[Employee],
    generated_at: DateTime<Utc>,
) -> LeaveReport {
    let mut report = LeaveReport {
        meta: ReportMeta {
            titre: "RAPPORT D'ANALYSE DÉTAILLÉ - DEMANDES DE CONGÉS".to_owned(),
            generated_at,
            periode: "Données complètes".to_owned(),
        },
        stats: LeaveStats {
            departement_plus_actif: "N/A".to_owned(),
            ..LeaveStats::default()
        },
        par_type: BTreeMap::new(),
        par_departement: BTreeMap::new(),
        par_mois: BTreeMap::new(),
        demandes: Vec::new(),
        recommandations: Vec::new(),
    };

    if requests.is_empty() {
        return report;
    }

    let mut approved: usize = 0;
    let mut pending: usize = 0;
    let mut total_days: i64 = 0;

    for request in requests {
        let requester = roster.iter().find(|e| e.id == request.user_id);
        let department = requester
            .map(|e| e.department_label().to_owned())
            .unwrap_or_else(|| "Non défini".to_owned());

        let by_type = report.par_type.entry(request.type_conge.clone()).or_insert(0);
        *by_type = by_type.saturating_add(1);

        let by_dept = report.par_departement.entry(department.clone()).or_insert(0);
        *by_dept = by_dept.saturating_add(1);

        let month = request.created_at.format("%Y-%m").to_string();
        let by_month = report.par_mois.entry(month).or_insert(0);
        *by_month = by_month.saturating_add(1);

        match request.status {
            LeaveStatus::Approuve => approved = approved.saturating_add(1),
            LeaveStatus::EnAttente => pending = pending.saturating_add(1),
            LeaveStatus::Rejete => {}
        }

        let duration = request.duration_days();
        total_days = total_days.saturating_add(duration);
        if request.preuve.is_some() {
            report.stats.avec_justificatif = report.stats.avec_justificatif.saturating_add(1);
        }

        report.demandes.push(LeaveLine {
            employe: requester
                .map(Employee::full_name)
                .unwrap_or_else(|| "Inconnu".to_owned()),
            matricule: requester
                .map(|e| e.matricule.clone())
                .unwrap_or_else(|| "N/A".to_owned()),
            department,
            type_conge: request.type_conge.clone(),
            date_debut: request.date_debut.format("%d/%m/%Y").to_string(),
            date_fin: request.date_fin.format("%d/%m/%Y").to_string(),
            duree_jours: duration,
            raison: request.raison.clone(),
            status: request.status.label().to_owned(),
            preuve_fournie: request.preuve.is_some(),
        });
    }

    let total = requests.len();
    report.stats.total = total;
    #[allow(clippy::cast_precision_loss)]
    {
        report.stats.taux_validation = round1(approved as f64 / total as f64 * 100.0);
        report.stats.duree_moyenne = round1(total_days as f64 / total as f64);
    }
    if let Some((dept, _)) = report
        .par_departement
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
    {
        report.stats.departement_plus_actif = dept.clone();
    }

    report.recommandations = recommendations(report.stats.duree_moyenne, total, pending, &report);

    report
}

/// Fixed threshold rules producing the recommendation list.
fn recommendations(
    mean_duration: f64,
    total: usize,
    pending: usize,
    report: &LeaveReport,
) -> Vec<String> {
    let mut out = Vec::new();

    #[allow(clippy::cast_precision_loss)]
    let total_f = total as f64;

    #[allow(clippy::cast_precision_loss)]
    if pending as f64 > total_f * 0.3 {
        out.push(
            "Traitement des demandes en attente à prioriser (>30% en attente)".to_owned(),
        );
    }

    let sick = report.par_type.get("maladie").copied().unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    if sick as f64 > total_f * 0.4 {
        out.push(
            "Taux élevé de congés maladie détecté - Enquête de bien-être recommandée".to_owned(),
        );
    }

    if mean_duration > 7.0 {
        out.push("Durée moyenne des congés élevée - Vérifier la planification".to_owned());
    }

    if let Some(max_dept) = report.par_departement.values().max() {
        #[allow(clippy::cast_precision_loss)]
        if *max_dept as f64 > total_f * 0.5 {
            out.push(
                "Concentration des demandes dans un département - Redistribution à considérer"
                    .to_owned(),
            );
        }
    }

    out
}

/// Render the report into the fixed text template.
pub fn render_leave_report(report: &LeaveReport) -> String {
    let mut out = render_header(&report.meta);

    out.push_str(&render_section("RÉSUMÉ EXÉCUTIF"));
    out.push_str(&format!(
        "• Total des demandes analysées : {}\n\
         • Taux de validation : {}%\n\
         • Durée moyenne des congés : {} jours\n\
         • Demandes avec justificatif : {}\n\
         • Département le plus actif : {}\n",
        report.stats.total,
        report.stats.taux_validation,
        report.stats.duree_moyenne,
        report.stats.avec_justificatif,
        report.stats.departement_plus_actif,
    ));

    out.push_str(&render_section("ANALYSE PAR TYPE DE CONGÉ"));
    for (type_conge, count) in &report.par_type {
        out.push_str(&format!(
            "• {type_conge:20} : {count:3} demandes ({:5.1}%)\n",
            share(*count, report.stats.total)
        ));
    }

    out.push_str(&render_section("ANALYSE PAR DÉPARTEMENT"));
    for (dept, count) in &report.par_departement {
        out.push_str(&format!(
            "• {dept:20} : {count:3} demandes ({:5.1}%)\n",
            share(*count, report.stats.total)
        ));
    }

    if !report.par_mois.is_empty() {
        out.push_str(&render_section("ANALYSE TEMPORELLE"));
        for (month, count) in &report.par_mois {
            out.push_str(&format!("• {month} : {count} demandes\n"));
        }
    }

    if !report.demandes.is_empty() {
        out.push_str(&render_section("DEMANDES DÉTAILLÉES"));
        for line in &report.demandes {
            out.push_str(&format!(
                "• {} ({}) — {} — {} du {} au {} ({} jour(s)) — statut : {} — justificatif : {}\n",
                line.employe,
                line.matricule,
                line.department,
                line.type_conge,
                line.date_debut,
                line.date_fin,
                line.duree_jours,
                line.status,
                if line.preuve_fournie { "Oui" } else { "Non" },
            ));
        }
    }

    if !report.recommandations.is_empty() {
        out.push_str(&render_section("RECOMMANDATIONS"));
        for (i, rec) in report.recommandations.iter().enumerate() {
            out.push_str(&format!("{}. {rec}\n", i.saturating_add(1)));
        }
    }

    out.push_str(&render_footer());
    out
}

/// Percentage share of `count` in `total`, one decimal.
fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = count as f64 / total as f64 * 100.0;
    round1(rate)
}
