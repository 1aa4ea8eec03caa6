//! Analyzer contract: overload boundary, tiers, aggregation.

use ariane::types::Employee;
use ariane::workload::{analyze, RiskTier, OVERLOAD_THRESHOLD};
use chrono::Utc;

fn employee(id: i64, department: &str, status: &str, missions_status: &str, missions: &str) -> Employee {
    Employee {
        id,
        matricule: format!("EMP{id:03}"),
        first_name: format!("Prenom{id}"),
        last_name: format!("Nom{id}"),
        email: format!("emp{id}@entreprise.com"),
        role: "employe".to_owned(),
        department: Some(department.to_owned()),
        status: Some(status.to_owned()),
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

#[test]
fn overload_boundary_is_strictly_more_than_three() {
    assert_eq!(OVERLOAD_THRESHOLD, 3);

    let at_threshold = [employee(1, "IT", "actif", "en cours", "a, b, c")];
    assert!(analyze(&at_threshold).overloaded.is_empty());

    let above = [employee(1, "IT", "actif", "en cours", "a, b, c, d")];
    let analysis = analyze(&above);
    assert_eq!(analysis.overloaded.len(), 1);
    assert_eq!(analysis.overloaded[0].missions, vec!["a", "b", "c", "d"]);
}

#[test]
fn mission_field_is_split_on_commas_and_trimmed() {
    let roster = [employee(1, "IT", "actif", "en cours", " a ,, b ,c , d ")];
    let analysis = analyze(&roster);
    assert_eq!(analysis.overloaded.len(), 1);
    assert_eq!(analysis.overloaded[0].mission_count, 4);
}

#[test]
fn status_comparison_ignores_case() {
    let roster = [employee(1, "IT", "Actif", "En Cours", "a, b, c, d")];
    let analysis = analyze(&roster);
    assert_eq!(analysis.global.active_employees, 1);
    assert_eq!(analysis.global.missions_in_progress, 1);
    assert_eq!(analysis.overloaded.len(), 1);
}

#[test]
fn department_tiers_track_their_in_progress_ratio() {
    // 4 employees, 3 in progress: 75% => Élevé.
    let roster = [
        employee(1, "IT", "actif", "en cours", "a"),
        employee(2, "IT", "actif", "en cours", "b"),
        employee(3, "IT", "actif", "en cours", "c"),
        employee(4, "IT", "actif", "en pause", "d"),
    ];
    let analysis = analyze(&roster);
    let it = analysis.departments.get("IT").expect("bucket");
    assert!((it.load_rate() - 75.0).abs() < f64::EPSILON);
    assert_eq!(it.risk_tier(), RiskTier::Eleve);
}

#[test]
fn analysis_is_recomputed_fresh_each_call() {
    let roster_a = [employee(1, "IT", "actif", "en cours", "a, b, c, d")];
    let roster_b = [employee(1, "IT", "actif", "en pause", "a, b, c, d")];
    assert_eq!(analyze(&roster_a).overloaded.len(), 1);
    // Same analyzer function, different input, no carried-over state.
    assert!(analyze(&roster_b).overloaded.is_empty());
    assert_eq!(analyze(&roster_a).overloaded.len(), 1);
}
