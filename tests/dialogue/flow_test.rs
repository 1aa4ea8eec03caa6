//! Flow controller behavior observed through the public dialogue API.

use ariane::dialogue::flow::{accept_proof, advance, start, FlowReply, ProofOutcome};
use ariane::dialogue::{ConversationState, FlowStep};
use ariane::types::ProofArtifact;

fn proof() -> ProofArtifact {
    ProofArtifact {
        reference: "uploads/preuve_1.pdf".to_owned(),
        original_name: "certificat.pdf".to_owned(),
    }
}

#[test]
fn full_collection_sequence_reaches_upload_proof() {
    let mut state = ConversationState::new();
    start(&mut state);

    for (answer, expected_step) in [
        ("annuel", FlowStep::CollectStartDate),
        ("2025-01-01", FlowStep::CollectEndDate),
        ("2025-01-10", FlowStep::CollectReason),
        ("repos", FlowStep::UploadProof),
    ] {
        match advance(&mut state, answer) {
            FlowReply::Consumed { .. } => {}
            FlowReply::NotConsumed => panic!("answer {answer:?} must be consumed"),
        }
        assert_eq!(state.step, expected_step);
    }

    // Draft accumulated monotonically.
    assert_eq!(state.draft.type_conge.as_deref(), Some("annuel"));
    assert_eq!(state.draft.date_debut.as_deref(), Some("2025-01-01"));
    assert_eq!(state.draft.date_fin.as_deref(), Some("2025-01-10"));
    assert_eq!(state.draft.raison.as_deref(), Some("repos"));
}

#[test]
fn non_upload_steps_reject_proof() {
    for answers in [
        &[][..],
        &["annuel"][..],
        &["annuel", "2025-01-01"][..],
        &["annuel", "2025-01-01", "2025-01-10"][..],
    ] {
        let mut state = ConversationState::new();
        start(&mut state);
        for answer in answers {
            advance(&mut state, answer);
        }
        assert!(
            matches!(accept_proof(&mut state, &proof()), ProofOutcome::NoFlow),
            "proof must be rejected after answers {answers:?}"
        );
    }
}

#[test]
fn submission_carries_the_collected_draft() {
    let mut state = ConversationState::new();
    start(&mut state);
    advance(&mut state, "maladie");
    advance(&mut state, "2025-02-03");
    advance(&mut state, "2025-02-05");
    advance(&mut state, "grippe");

    let ProofOutcome::Submission(submission) = accept_proof(&mut state, &proof()) else {
        panic!("expected a submission");
    };
    assert_eq!(submission.type_conge, "maladie");
    assert_eq!(submission.raison, "grippe");
    assert_eq!(submission.proof_reference, "uploads/preuve_1.pdf");
    assert_eq!(submission.date_fin.format("%Y-%m-%d").to_string(), "2025-02-05");
}

#[test]
fn date_with_wrong_format_rewinds_to_start_date() {
    let mut state = ConversationState::new();
    start(&mut state);
    advance(&mut state, "annuel");
    advance(&mut state, "01/01/2025"); // wrong format, stored verbatim
    advance(&mut state, "2025-01-10");
    advance(&mut state, "repos");

    assert!(matches!(
        accept_proof(&mut state, &proof()),
        ProofOutcome::MalformedDate { .. }
    ));
    assert_eq!(state.step, FlowStep::CollectStartDate);

    // Re-answering the dates completes the flow.
    advance(&mut state, "2025-01-01");
    advance(&mut state, "2025-01-10");
    assert_eq!(state.step, FlowStep::CollectReason);
    advance(&mut state, "repos");
    assert!(matches!(
        accept_proof(&mut state, &proof()),
        ProofOutcome::Submission(_)
    ));
}
