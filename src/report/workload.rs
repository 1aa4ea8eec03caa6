//! Workload forecast report.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Employee;
use crate::workload::{round1, RiskTier, WorkloadAnalysis};

use super::{render_footer, render_header, render_section, ReportMeta};

/// Individual load level, from the active mission count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadLevel {
    /// Fewer than 4 missions.
    Normal,
    /// 4 or 5 missions.
    Eleve,
    /// 6 missions or more.
    Critique,
}

impl LoadLevel {
    /// Bucket a mission count.
    pub fn from_count(count: usize) -> Self {
        if count >= 6 {
            LoadLevel::Critique
        } else if count >= 4 {
            LoadLevel::Eleve
        } else {
            LoadLevel::Normal
        }
    }

    /// Uppercase French display label.
    pub fn label(self) -> &'static str {
        match self {
            LoadLevel::Normal => "NORMAL",
            LoadLevel::Eleve => "ÉLEVÉ",
            LoadLevel::Critique => "CRITIQUE",
        }
    }
}

/// Executive summary block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    /// Roster-wide activity rate, percent.
    pub taux_activite_global: f64,
    /// Active employees.
    pub employes_actifs: usize,
    /// Roster size.
    pub total_employes: usize,
    /// Employees with missions in progress.
    pub missions_en_cours: usize,
    /// Qualitative mean load label.
    pub niveau_charge_moyen: String,
    /// Overloaded employee count.
    pub employes_surcharges: usize,
    /// Number of departments analyzed.
    pub departements_analyses: usize,
}

/// Per-department block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentReport {
    /// Employees in the department.
    pub total_employes: usize,
    /// Active employees.
    pub employes_actifs: usize,
    /// Employees with missions in progress.
    pub missions_en_cours: usize,
    /// Load rate, percent (one decimal).
    pub taux_charge: f64,
    /// Risk tier at the fixed cut points.
    pub niveau_risque: RiskTier,
    /// Up to 10 distinct missions, first-seen order.
    pub missions_types: Vec<String>,
    /// Total distinct missions.
    pub nb_missions_differentes: usize,
    /// `100 - taux_charge`.
    pub capacite_restante: f64,
}

/// Per-employee block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndividualLoad {
    /// Full display name.
    pub nom_complet: String,
    /// Badge id.
    pub matricule: String,
    /// Department label.
    pub department: String,
    /// Activity status, "Non défini" when unset.
    pub statut: String,
    /// Active mission count.
    pub nb_missions_actives: usize,
    /// Mission progress label, "Non défini" when unset.
    pub missions_status: String,
    /// Load level bucket.
    pub niveau_charge: LoadLevel,
    /// The missions themselves.
    pub missions_detaillees: Vec<String>,
    /// Availability label.
    pub disponibilite: String,
}

/// Forward-looking block derived from current totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Predictions {
    /// "Croissante" above 75% activity, else "Stable".
    pub charge_globale_prevue: String,
    /// Recruitment need label.
    pub besoin_recrutement: String,
    /// Burnout risk label.
    pub risque_burnout: String,
    /// Mean active missions per employee (one decimal).
    pub missions_moyenne_par_employe: f64,
    /// Departments at Élevé or Critique tier.
    pub departements_a_surveiller: Vec<String>,
}

/// The structured workload report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadReport {
    /// Header block.
    pub meta: ReportMeta,
    /// Executive summary.
    pub resume_executif: ExecutiveSummary,
    /// Per-department analysis.
    pub analyse_departementale: BTreeMap<String, DepartmentReport>,
    /// Per-employee analysis, roster order.
    pub analyse_individuelle: Vec<IndividualLoad>,
    /// Forward-looking block.
    pub predictions: Predictions,
    /// Critical alert lines.
    pub alertes_critiques: Vec<String>,
    /// Strategic recommendations.
    pub recommandations_strategiques: Vec<String>,
}

/// Build the workload report from an analysis pass and the roster.
///
/// Deterministic apart from `generated_at`.
pub fn build_workload_report(
    analysis: &WorkloadAnalysis,
    roster: &[Employee],
    generated_at: DateTime<Utc>,
) -> WorkloadReport {
    let stats = &analysis.global;

    let niveau_charge_moyen = if stats.activity_rate > 80.0 {
        "Élevé"
    } else if stats.activity_rate > 60.0 {
        "Modéré"
    } else {
        "Normal"
    };

    let resume_executif = ExecutiveSummary {
        taux_activite_global: stats.activity_rate,
        employes_actifs: stats.active_employees,
        total_employes: stats.total_employees,
        missions_en_cours: stats.missions_in_progress,
        niveau_charge_moyen: niveau_charge_moyen.to_owned(),
        employes_surcharges: analysis.overloaded.len(),
        departements_analyses: analysis.departments.len(),
    };

    let mut analyse_departementale = BTreeMap::new();
    for (dept, load) in &analysis.departments {
        let taux_charge = load.load_rate();
        let distinct = load.distinct_missions();
        analyse_departementale.insert(
            dept.clone(),
            DepartmentReport {
                total_employes: load.total,
                employes_actifs: load.active,
                missions_en_cours: load.in_progress,
                taux_charge,
                niveau_risque: load.risk_tier(),
                missions_types: distinct.iter().take(10).cloned().collect(),
                nb_missions_differentes: distinct.len(),
                capacite_restante: round1(100.0 - taux_charge),
            },
        );
    }

    let mut total_missions: usize = 0;
    let mut analyse_individuelle = Vec::with_capacity(roster.len());
    for employee in roster {
        let missions = employee.mission_list();
        total_missions = total_missions.saturating_add(missions.len());

        let disponibilite = if missions.len() >= 4 {
            "Limitée"
        } else if missions.len() <= 2 {
            "Bonne"
        } else {
            "Moyenne"
        };

        analyse_individuelle.push(IndividualLoad {
            nom_complet: employee.full_name(),
            matricule: employee.matricule.clone(),
            department: employee.department_label().to_owned(),
            statut: employee
                .status
                .clone()
                .unwrap_or_else(|| "Non défini".to_owned()),
            nb_missions_actives: missions.len(),
            missions_status: employee
                .missions_status
                .clone()
                .unwrap_or_else(|| "Non défini".to_owned()),
            niveau_charge: LoadLevel::from_count(missions.len()),
            missions_detaillees: missions,
            disponibilite: disponibilite.to_owned(),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let overload_share_urgent =
        analysis.overloaded.len() as f64 > stats.total_employees as f64 * 0.2;

    let besoin_recrutement = if !analysis.overloaded.is_empty() && overload_share_urgent {
        "Urgent"
    } else if !analysis.overloaded.is_empty() {
        "À prévoir"
    } else {
        "Non nécessaire"
    };

    let risque_burnout = if analysis.overloaded.len() > 3 {
        "Élevé"
    } else if !analysis.overloaded.is_empty() {
        "Modéré"
    } else {
        "Faible"
    };

    #[allow(clippy::cast_precision_loss)]
    let missions_moyenne = if roster.is_empty() {
        0.0
    } else {
        round1(total_missions as f64 / roster.len() as f64)
    };

    let departements_a_surveiller: Vec<String> = analyse_departementale
        .iter()
        .filter(|(_, d)| matches!(d.niveau_risque, RiskTier::Critique | RiskTier::Eleve))
        .map(|(name, _)| name.clone())
        .collect();

    let predictions = Predictions {
        charge_globale_prevue: if stats.activity_rate > 75.0 {
            "Croissante".to_owned()
        } else {
            "Stable".to_owned()
        },
        besoin_recrutement: besoin_recrutement.to_owned(),
        risque_burnout: risque_burnout.to_owned(),
        missions_moyenne_par_employe: missions_moyenne,
        departements_a_surveiller: departements_a_surveiller.clone(),
    };

    let mut alertes_critiques = Vec::new();
    for overloaded in &analysis.overloaded {
        if overloaded.mission_count >= 6 {
            alertes_critiques.push(format!(
                "URGENCE: {} ({} missions) - Intervention immédiate requise",
                overloaded.name, overloaded.mission_count
            ));
        } else if overloaded.mission_count >= 5 {
            alertes_critiques.push(format!(
                "ATTENTION: {} ({} missions) - Surveillance nécessaire",
                overloaded.name, overloaded.mission_count
            ));
        }
    }
    for (dept, data) in &analyse_departementale {
        if data.niveau_risque == RiskTier::Critique {
            alertes_critiques.push(format!(
                "DÉPARTEMENT CRITIQUE: {dept} ({}% de charge)",
                data.taux_charge
            ));
        }
    }

    let mut recommandations = Vec::new();
    if !analysis.overloaded.is_empty() {
        recommandations
            .push("Redistribution urgente des missions pour les employés surchargés".to_owned());
        recommandations.push("Mise en place d'un système de délégation formalisé".to_owned());
    }
    if stats.activity_rate > 85.0 {
        recommandations.push("Recrutement ou renfort temporaire à envisager".to_owned());
        recommandations.push("Révision des processus pour optimiser l'efficacité".to_owned());
    }
    if !departements_a_surveiller.is_empty() {
        recommandations.push("Audit approfondi des départements à risque".to_owned());
        recommandations.push("Formation en gestion du temps et priorisation".to_owned());
    }
    recommandations.push("Mise en place d'indicateurs de suivi hebdomadaires".to_owned());
    recommandations
        .push("Planification proactive des congés pour équilibrer la charge".to_owned());

    WorkloadReport {
        meta: ReportMeta {
            titre: "RAPPORT D'ANALYSE DÉTAILLÉ - PRÉVISION DE CHARGE DE TRAVAIL".to_owned(),
            generated_at,
            periode: "État actuel".to_owned(),
        },
        resume_executif,
        analyse_departementale,
        analyse_individuelle,
        predictions,
        alertes_critiques,
        recommandations_strategiques: recommandations,
    }
}

/// Render the report into the fixed text template.
pub fn render_workload_report(report: &WorkloadReport) -> String {
    let mut out = render_header(&report.meta);

    let resume = &report.resume_executif;
    out.push_str(&render_section("RÉSUMÉ EXÉCUTIF"));
    out.push_str(&format!(
        "• Taux d'activité global : {}%\n\
         • Employés actifs : {}/{}\n\
         • Missions en cours : {}\n\
         • Niveau de charge moyen : {}\n\
         • Employés en surcharge : {}\n",
        resume.taux_activite_global,
        resume.employes_actifs,
        resume.total_employes,
        resume.missions_en_cours,
        resume.niveau_charge_moyen,
        resume.employes_surcharges,
    ));

    out.push_str(&render_section("ANALYSE DÉPARTEMENTALE"));
    for (dept, data) in &report.analyse_departementale {
        out.push_str(&format!(
            "\nDépartement : {dept}\n\
             • Employés : {}/{} actifs\n\
             • Taux de charge : {}%\n\
             • Niveau de risque : {}\n\
             • Types de missions : {} différentes\n\
             • Capacité restante : {}%\n",
            data.employes_actifs,
            data.total_employes,
            data.taux_charge,
            data.niveau_risque.label(),
            data.nb_missions_differentes,
            data.capacite_restante,
        ));
    }

    if !report.alertes_critiques.is_empty() {
        out.push_str(&render_section("ALERTES CRITIQUES"));
        for alerte in &report.alertes_critiques {
            out.push_str(&format!("! {alerte}\n"));
        }
    }

    out.push_str(&render_section("PRÉDICTIONS ET TENDANCES"));
    out.push_str(&format!(
        "• Charge globale prévue : {}\n\
         • Besoin de recrutement : {}\n\
         • Risque de burnout : {}\n\
         • Missions moyenne/employé : {}\n",
        report.predictions.charge_globale_prevue,
        report.predictions.besoin_recrutement,
        report.predictions.risque_burnout,
        report.predictions.missions_moyenne_par_employe,
    ));

    out.push_str(&render_section("RECOMMANDATIONS STRATÉGIQUES"));
    for (i, rec) in report.recommandations_strategiques.iter().enumerate() {
        out.push_str(&format!("{}. {rec}\n", i.saturating_add(1)));
    }

    out.push_str(&render_footer());
    out
}
