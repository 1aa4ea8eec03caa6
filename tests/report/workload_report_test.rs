//! Workload report: summary, tiers, predictions, rendering determinism.

use ariane::report::workload::{build_workload_report, render_workload_report, LoadLevel};
use ariane::types::Employee;
use ariane::workload::{analyze, RiskTier};
use chrono::{DateTime, TimeZone, Utc};

fn employee(id: i64, department: &str, missions_status: &str, missions: &str) -> Employee {
    Employee {
        id,
        matricule: format!("EMP{id:03}"),
        first_name: format!("Prenom{id}"),
        last_name: format!("Nom{id}"),
        email: format!("emp{id}@entreprise.com"),
        role: "employe".to_owned(),
        department: Some(department.to_owned()),
        status: Some("actif".to_owned()),
        current_missions: Some(missions.to_owned()),
        missions_status: Some(missions_status.to_owned()),
        manager: None,
        solde_conges: None,
        solde_rtt: None,
        statut_employe: None,
        date_dernier_conge: None,
        date_maj_solde: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid")
}

#[test]
fn individual_blocks_follow_the_mission_count() {
    let roster = vec![
        employee(1, "IT", "en cours", "a"),
        employee(2, "IT", "en cours", "a, b, c, d"),
        employee(3, "IT", "en cours", "a, b, c, d, e, f"),
    ];
    let report = build_workload_report(&analyze(&roster), &roster, at());

    assert_eq!(report.analyse_individuelle[0].niveau_charge, LoadLevel::Normal);
    assert_eq!(report.analyse_individuelle[0].disponibilite, "Bonne");
    assert_eq!(report.analyse_individuelle[1].niveau_charge, LoadLevel::Eleve);
    assert_eq!(report.analyse_individuelle[1].disponibilite, "Limitée");
    assert_eq!(report.analyse_individuelle[2].niveau_charge, LoadLevel::Critique);
}

#[test]
fn predictions_scale_with_overload() {
    // No overload: calm labels.
    let calm = vec![employee(1, "IT", "en pause", "a")];
    let calm_report = build_workload_report(&analyze(&calm), &calm, at());
    assert_eq!(calm_report.predictions.besoin_recrutement, "Non nécessaire");
    assert_eq!(calm_report.predictions.risque_burnout, "Faible");

    // Four overloaded employees out of five: urgent, high burnout risk.
    let strained: Vec<Employee> = (1..=5)
        .map(|id| {
            if id == 5 {
                employee(id, "IT", "en pause", "a")
            } else {
                employee(id, "IT", "en cours", "a, b, c, d")
            }
        })
        .collect();
    let strained_report = build_workload_report(&analyze(&strained), &strained, at());
    assert_eq!(strained_report.resume_executif.employes_surcharges, 4);
    assert_eq!(strained_report.predictions.besoin_recrutement, "Urgent");
    assert_eq!(strained_report.predictions.risque_burnout, "Élevé");
}

#[test]
fn departments_to_watch_are_the_high_tiers() {
    let roster = vec![
        // IT: 100% in progress => Critique.
        employee(1, "IT", "en cours", "a"),
        // Ventes: 0% => Faible.
        employee(2, "Ventes", "en pause", "b"),
    ];
    let report = build_workload_report(&analyze(&roster), &roster, at());

    assert_eq!(
        report.analyse_departementale.get("IT").expect("IT").niveau_risque,
        RiskTier::Critique
    );
    assert_eq!(
        report.analyse_departementale.get("Ventes").expect("Ventes").niveau_risque,
        RiskTier::Faible
    );
    assert_eq!(report.predictions.departements_a_surveiller, vec!["IT"]);
}

#[test]
fn rendering_varies_only_with_the_timestamp() {
    let roster = vec![
        employee(1, "IT", "en cours", "a, b"),
        employee(2, "Ventes", "en pause", "c"),
    ];
    let analysis = analyze(&roster);

    let first = render_workload_report(&build_workload_report(&analysis, &roster, at()));
    let second = render_workload_report(&build_workload_report(&analysis, &roster, at()));
    assert_eq!(first, second);

    let later = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).single().expect("valid");
    let third = render_workload_report(&build_workload_report(&analysis, &roster, later));
    let diff: Vec<(&str, &str)> = first
        .lines()
        .zip(third.lines())
        .filter(|(a, b)| a != b)
        .collect();
    assert_eq!(diff.len(), 1);
    assert!(diff[0].0.starts_with("Date de génération"));
}
