//! Report engine and index: identity, ownership, write failures.

use std::sync::Arc;

use ariane::report::index::DownloadResolution;
use ariane::report::{ReportEngine, ReportKind};
use ariane::store::memory::MemoryArtifacts;
use ariane::store::ArtifactStore;
use ariane::types::Employee;
use chrono::{TimeZone, Utc};

fn employee(id: i64) -> Employee {
    Employee {
        id,
        matricule: format!("RH{id:03}"),
        first_name: format!("Prenom{id}"),
        last_name: format!("Nom{id}"),
        email: format!("rh{id}@entreprise.com"),
        role: "rh".to_owned(),
        department: Some("RH".to_owned()),
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

#[tokio::test]
async fn filename_embeds_kind_owner_and_timestamp() {
    let engine = ReportEngine::new(Arc::new(MemoryArtifacts::new()) as Arc<dyn ArtifactStore>);
    let at = Utc.with_ymd_and_hms(2025, 3, 15, 14, 30, 45).single().expect("valid");

    let record = engine
        .store(&employee(12), ReportKind::Charge, "contenu", at)
        .await
        .expect("store");
    assert_eq!(record.filename, "rapport_charge_12_20250315_143045.txt");
}

#[tokio::test]
async fn ownership_lives_in_the_index_not_the_filename() {
    let engine = ReportEngine::new(Arc::new(MemoryArtifacts::new()) as Arc<dyn ArtifactStore>);
    let at = Utc.with_ymd_and_hms(2025, 3, 15, 14, 30, 45).single().expect("valid");
    let record = engine
        .store(&employee(12), ReportKind::Conges, "contenu", at)
        .await
        .expect("store");

    // A crafted filename mentioning another user id resolves through the
    // index entry, where the true owner is recorded.
    let resolution = engine
        .index()
        .resolve_download(99, &format!("télécharger {}", record.filename))
        .await;
    assert!(matches!(resolution, DownloadResolution::NotOwner));

    let owner_resolution = engine
        .index()
        .resolve_download(12, &format!("télécharger {}", record.id))
        .await;
    assert!(matches!(owner_resolution, DownloadResolution::Found(_)));
}

#[tokio::test]
async fn failed_write_produces_no_artifact_and_no_entry() {
    let artifacts = Arc::new(MemoryArtifacts::failing());
    let engine = ReportEngine::new(Arc::clone(&artifacts) as Arc<dyn ArtifactStore>);
    let at = Utc.with_ymd_and_hms(2025, 3, 15, 14, 30, 45).single().expect("valid");

    assert!(engine
        .store(&employee(12), ReportKind::Conges, "contenu", at)
        .await
        .is_err());
    assert!(artifacts.is_empty().await);
    assert!(engine.index().is_empty().await);
}
