//! Leave report: statistics, thresholds, rendering determinism.

use ariane::report::leave::{build_leave_report, render_leave_report};
use ariane::types::{Employee, LeaveRequest, LeaveStatus};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn employee(id: i64, department: &str) -> Employee {
    Employee {
        id,
        matricule: format!("EMP{id:03}"),
        first_name: format!("Prenom{id}"),
        last_name: format!("Nom{id}"),
        email: format!("emp{id}@entreprise.com"),
        role: "employe".to_owned(),
        department: Some(department.to_owned()),
        status: Some("actif".to_owned()),
        current_missions: None,
        missions_status: None,
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

fn request(
    id: i64,
    user_id: i64,
    type_conge: &str,
    status: LeaveStatus,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    with_proof: bool,
) -> LeaveRequest {
    LeaveRequest {
        id,
        user_id,
        type_conge: type_conge.to_owned(),
        date_debut: NaiveDate::from_ymd_opt(start.0, start.1, start.2).expect("valid"),
        date_fin: NaiveDate::from_ymd_opt(end.0, end.1, end.2).expect("valid"),
        raison: "repos".to_owned(),
        preuve: with_proof.then(|| format!("preuve_{id}.pdf")),
        status,
        created_at: Utc
            .with_ymd_and_hms(start.0, start.1, start.2, 8, 0, 0)
            .single()
            .expect("valid"),
    }
}

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid")
}

#[test]
fn approval_rate_duration_and_proof_rate() {
    let roster = vec![employee(1, "IT"), employee(2, "RH")];
    let requests = vec![
        request(1, 1, "annuel", LeaveStatus::Approuve, (2025, 1, 1), (2025, 1, 5), true),
        request(2, 1, "annuel", LeaveStatus::Approuve, (2025, 2, 1), (2025, 2, 2), true),
        request(3, 2, "maladie", LeaveStatus::EnAttente, (2025, 3, 1), (2025, 3, 3), false),
        request(4, 2, "rtt", LeaveStatus::Rejete, (2025, 3, 10), (2025, 3, 10), false),
    ];

    let report = build_leave_report(&requests, &roster, at());

    assert_eq!(report.stats.total, 4);
    assert!((report.stats.taux_validation - 50.0).abs() < f64::EPSILON);
    // Durations: 5 + 2 + 3 + 1 = 11 days over 4 requests.
    assert!((report.stats.duree_moyenne - 2.8).abs() < 1e-9);
    assert_eq!(report.stats.avec_justificatif, 2);
    assert_eq!(report.par_departement.get("IT"), Some(&2));
    assert_eq!(report.par_mois.get("2025-03"), Some(&2));
}

#[test]
fn department_concentration_rule() {
    let roster = vec![employee(1, "IT"), employee(2, "RH")];
    let requests = vec![
        request(1, 1, "annuel", LeaveStatus::Approuve, (2025, 1, 1), (2025, 1, 1), true),
        request(2, 1, "annuel", LeaveStatus::Approuve, (2025, 1, 2), (2025, 1, 2), true),
        request(3, 1, "annuel", LeaveStatus::Approuve, (2025, 1, 3), (2025, 1, 3), true),
        request(4, 2, "annuel", LeaveStatus::Approuve, (2025, 1, 4), (2025, 1, 4), true),
    ];
    let report = build_leave_report(&requests, &roster, at());
    assert!(report
        .recommandations
        .iter()
        .any(|r| r.contains("Concentration des demandes")));
}

#[test]
fn long_mean_duration_rule() {
    let roster = vec![employee(1, "IT")];
    let requests = vec![request(
        1, 1, "annuel", LeaveStatus::Approuve, (2025, 1, 1), (2025, 1, 10), true,
    )];
    let report = build_leave_report(&requests, &roster, at());
    assert!((report.stats.duree_moyenne - 10.0).abs() < f64::EPSILON);
    assert!(report
        .recommandations
        .iter()
        .any(|r| r.contains("Durée moyenne")));
}

#[test]
fn rendering_varies_only_with_the_timestamp() {
    let roster = vec![employee(1, "IT")];
    let requests = vec![request(
        1, 1, "annuel", LeaveStatus::Approuve, (2025, 1, 1), (2025, 1, 5), true,
    )];

    let first = render_leave_report(&build_leave_report(&requests, &roster, at()));
    let second = render_leave_report(&build_leave_report(&requests, &roster, at()));
    assert_eq!(first, second);

    let later = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).single().expect("valid");
    let third = render_leave_report(&build_leave_report(&requests, &roster, later));
    assert_ne!(first, third);
    // Everything but the generation date is identical.
    let diff: Vec<(&str, &str)> = first
        .lines()
        .zip(third.lines())
        .filter(|(a, b)| a != b)
        .collect();
    assert_eq!(diff.len(), 1);
    assert!(diff[0].0.starts_with("Date de génération"));
}
