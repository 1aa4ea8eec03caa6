//! Dispatcher behavior: permissions, flow interception, reports, downloads.

use std::sync::Arc;

use ariane::config::HrDeskConfig;
use ariane::dialogue::Dispatcher;
use ariane::store::memory::{MemoryArtifacts, MemoryDirectory, MemoryLeaveStore, MemoryNotifier};
use ariane::types::{Employee, NotificationKind, ProofArtifact, SideEffect, TurnPayload};
use chrono::Utc;

fn employee(id: i64, matricule: &str, department: &str) -> Employee {
    Employee {
        id,
        matricule: matricule.to_owned(),
        first_name: format!("Prenom{id}"),
        last_name: format!("Nom{id}"),
        email: format!("emp{id}@entreprise.com"),
        role: "employe".to_owned(),
        department: Some(department.to_owned()),
        status: Some("actif".to_owned()),
        current_missions: Some("audit".to_owned()),
        missions_status: Some("en pause".to_owned()),
        manager: Some("Omar Senhaji".to_owned()),
        solde_conges: Some(15),
        solde_rtt: Some(5),
        statut_employe: Some("CDI".to_owned()),
        date_dernier_conge: None,
        date_maj_solde: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

struct Harness {
    dispatcher: Dispatcher,
    leave_store: Arc<MemoryLeaveStore>,
    notifier: Arc<MemoryNotifier>,
    artifacts: Arc<MemoryArtifacts>,
}

fn harness(roster: Vec<Employee>) -> Harness {
    let leave_store = Arc::new(MemoryLeaveStore::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let artifacts = Arc::new(MemoryArtifacts::new());
    let dispatcher = Dispatcher::new(
        Arc::new(MemoryDirectory::new(roster)),
        Arc::clone(&leave_store) as Arc<dyn ariane::store::LeaveStore>,
        Arc::clone(&notifier) as Arc<dyn ariane::store::Notifier>,
        Arc::clone(&artifacts) as Arc<dyn ariane::store::ArtifactStore>,
        HrDeskConfig::default(),
    );
    Harness {
        dispatcher,
        leave_store,
        notifier,
        artifacts,
    }
}

fn proof() -> ProofArtifact {
    ProofArtifact {
        reference: "uploads/preuve_1.pdf".to_owned(),
        original_name: "certificat.pdf".to_owned(),
    }
}

async fn complete_flow(h: &Harness, matricule: &str) {
    for message in ["demande de congé", "annuel", "2025-01-01", "2025-01-10", "repos"] {
        h.dispatcher
            .process_turn(matricule, message, None)
            .await
            .expect("flow turn");
    }
    h.dispatcher
        .process_turn(matricule, "", Some(proof()))
        .await
        .expect("proof turn");
}

#[tokio::test]
async fn every_hr_intent_is_denied_to_regular_employees() {
    let h = harness(vec![employee(1, "EMP001", "IT")]);
    for message in [
        "prévision charge",
        "alerte surcharge",
        "générer rapport congé",
        "rapport sur la charge",
        "télécharger abc",
        "info user Jane Smith",
    ] {
        let outcome = h
            .dispatcher
            .process_turn("EMP001", message, None)
            .await
            .expect("turn");
        assert!(
            outcome.response.contains("Accès réservé aux ressources humaines"),
            "expected denial for {message:?}, got {:?}",
            outcome.response
        );
        assert!(outcome.payload.is_none());
    }
}

#[tokio::test]
async fn submission_notifies_hr_and_caches_the_estimate() {
    let h = harness(vec![
        employee(1, "EMP001", "IT"),
        employee(2, "RH001", "RH"),
    ]);

    complete_flow(&h, "EMP001").await;

    // Exactly one persisted request, pending, with the proof attached.
    let stored = h.leave_store.all().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].preuve.as_deref(), Some("uploads/preuve_1.pdf"));

    // HR got the new-request notification.
    let sent = h.notifier.sent().await;
    assert!(!sent.is_empty());
    assert_eq!(sent[0].title, "Nouvelle demande de congé");
    assert_eq!(sent[0].target_ids, vec![2]);
    assert_eq!(sent[0].kind, NotificationKind::Info);
    assert!(sent[0].body.contains("Prenom1 Nom1"));

    // The follow-up question answers from the cached estimate.
    let outcome = h
        .dispatcher
        .process_turn("EMP001", "pourquoi ce pourcentage", None)
        .await
        .expect("turn");
    assert!(outcome.response.contains("90%"), "active+paused scores 90");
}

#[tokio::test]
async fn overloaded_roster_triggers_a_warning_notification() {
    let mut busy = employee(1, "EMP001", "IT");
    busy.current_missions = Some("a, b, c, d, e".to_owned());
    busy.missions_status = Some("en cours".to_owned());
    let h = harness(vec![busy, employee(2, "RH001", "RH")]);

    complete_flow(&h, "EMP001").await;

    let sent = h.notifier.sent().await;
    assert!(
        sent.iter()
            .any(|n| n.kind == NotificationKind::Warning
                && n.title == "Alerte Surcharge Équipe"
                && n.body.contains("Prenom1 Nom1")),
        "expected an overload warning, got {sent:?}"
    );
}

#[tokio::test]
async fn generated_report_can_be_downloaded_by_its_owner_only() {
    let h = harness(vec![
        employee(1, "RH001", "RH"),
        employee(2, "RH002", "RH"),
    ]);

    let outcome = h
        .dispatcher
        .process_turn("RH001", "générer rapport congé", None)
        .await
        .expect("generate");
    let Some(TurnPayload::Report { report_id, filename }) = outcome.payload else {
        panic!("expected a report payload, got {:?}", outcome.payload);
    };
    assert!(h.artifacts.get(&filename).await.is_some(), "artifact written");
    assert_eq!(
        outcome.side_effects,
        vec![SideEffect::ReportWritten { report_id }]
    );

    // Owner downloads by id.
    let download = h
        .dispatcher
        .process_turn("RH001", &format!("télécharger {report_id}"), None)
        .await
        .expect("download");
    assert!(matches!(
        download.payload,
        Some(TurnPayload::Download { .. })
    ));

    // Another HR user owns nothing with that id.
    let other = h
        .dispatcher
        .process_turn("RH002", &format!("télécharger {report_id}"), None)
        .await
        .expect("download");
    assert!(other.response.contains("vos propres rapports"));
    assert!(other.payload.is_none());
}

#[tokio::test]
async fn report_write_failure_is_surfaced_not_fatal() {
    let leave_store = Arc::new(MemoryLeaveStore::new());
    let dispatcher = Dispatcher::new(
        Arc::new(MemoryDirectory::new(vec![employee(1, "RH001", "RH")])),
        leave_store,
        Arc::new(MemoryNotifier::new()),
        Arc::new(MemoryArtifacts::failing()),
        HrDeskConfig::default(),
    );

    let outcome = dispatcher
        .process_turn("RH001", "rapport sur la charge", None)
        .await
        .expect("turn must not be fatal");
    assert!(outcome.response.contains("Erreur lors de la génération"));
    assert!(outcome.payload.is_none());
    assert!(outcome.side_effects.is_empty());
}

#[tokio::test]
async fn workload_forecast_renders_for_hr() {
    let mut busy = employee(1, "EMP001", "IT");
    busy.current_missions = Some("a, b, c, d".to_owned());
    busy.missions_status = Some("en cours".to_owned());
    let h = harness(vec![busy, employee(2, "RH001", "RH")]);

    let outcome = h
        .dispatcher
        .process_turn("RH001", "prévision charge", None)
        .await
        .expect("turn");
    assert!(outcome.response.contains("ANALYSE DE CHARGE DE TRAVAIL"));
    assert!(outcome.response.contains("Prenom1 Nom1"));
}

#[tokio::test]
async fn employee_lookup_resolves_or_reports_missing_target() {
    let h = harness(vec![
        employee(1, "RH001", "RH"),
        employee(2, "EMP002", "IT"),
    ]);

    let found = h
        .dispatcher
        .process_turn("RH001", "info user Prenom2 Nom2", None)
        .await
        .expect("turn");
    assert!(found.response.contains("Informations de l'utilisateur Prenom2 Nom2"));
    assert!(found.response.contains("EMP002"));

    let missing = h
        .dispatcher
        .process_turn("RH001", "info user Jean Dupont", None)
        .await
        .expect("turn");
    assert!(missing.response.contains("Aucun utilisateur trouvé"));
}

#[tokio::test]
async fn chat_history_reflects_recorded_turns() {
    let h = harness(vec![employee(1, "EMP001", "IT")]);
    h.dispatcher
        .process_turn("EMP001", "bonjour", None)
        .await
        .expect("turn");

    let outcome = h
        .dispatcher
        .process_turn("EMP001", "logs", None)
        .await
        .expect("turn");
    assert!(outcome.response.contains("HISTORIQUE DE VOS CONVERSATIONS"));
    assert!(outcome.response.contains("bonjour"));
}

#[tokio::test]
async fn suivi_after_submission_lists_the_pending_request() {
    let h = harness(vec![
        employee(1, "EMP001", "IT"),
        employee(2, "RH001", "RH"),
    ]);
    complete_flow(&h, "EMP001").await;

    let outcome = h
        .dispatcher
        .process_turn("EMP001", "suivi de mes congés", None)
        .await
        .expect("turn");
    assert!(outcome.response.contains("MES DEMANDES DE CONGÉ (1 au total)"));
    assert!(outcome.response.contains("en attente"));
    assert!(outcome.response.contains("Fourni"));
}
