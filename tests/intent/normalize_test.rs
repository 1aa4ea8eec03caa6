//! Normalizer contract: idempotence, accent folding, substitutions.

use ariane::text::normalize;

#[test]
fn normalization_is_idempotent_over_varied_input() {
    let samples = [
        "",
        "Bonjour",
        "  DEMANDE   de Congé  ",
        "bjr cv",
        "Prévision chargée, très élevée ?",
        "déjà normalisé",
    ];
    for raw in samples {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
    }
}

#[test]
fn accents_fold_to_ascii() {
    assert_eq!(normalize("évènement à l'hôpital"), "evenement a l'hopital");
    assert_eq!(normalize("ça c'est sûr"), "ca c'est sur");
}

#[test]
fn shorthand_expands_before_classification() {
    assert_eq!(normalize("bjr"), "bonjour");
    assert_eq!(normalize("CV"), "ca va");
    assert_eq!(normalize("mon NM"), "mon nom");
}

#[test]
fn whitespace_runs_collapse() {
    assert_eq!(normalize("a\t\tb \n c"), "a b c");
}

#[test]
fn empty_and_blank_input_yield_empty() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize(" \t\n"), "");
}
