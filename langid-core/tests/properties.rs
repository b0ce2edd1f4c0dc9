//! Property tests for classification, ranking and subsets

mod common;

use common::{arb_parts, arb_text};
use langid_core::model::{encode_binary, encode_literal};
use langid_core::{LangIdError, LanguageIdentifier, Model, ModelParts};
use proptest::prelude::*;

fn identifier(parts: &ModelParts) -> LanguageIdentifier {
    LanguageIdentifier::new(Model::from_parts(parts.clone()).unwrap())
}

proptest! {
    #[test]
    fn classify_matches_rank_head(parts in arb_parts(), text in arb_text()) {
        let mut identifier = identifier(&parts);
        let best = identifier.classify(&text);
        let ranking = identifier.rank(&text);
        prop_assert_eq!(&ranking[0], &best);
    }

    #[test]
    fn classify_matches_rank_head_raw(parts in arb_parts(), text in arb_text()) {
        let mut identifier = identifier(&parts);
        identifier.set_norm_probs(false);
        let best = identifier.classify(&text);
        prop_assert_eq!(&identifier.rank(&text)[0], &best);
    }

    #[test]
    fn rank_probabilities_sum_to_one(parts in arb_parts(), text in arb_text()) {
        let mut identifier = identifier(&parts);
        let ranking = identifier.rank(&text);
        let total: f64 = ranking.iter().map(|p| p.score).sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "sum was {}", total);
        prop_assert!(ranking.iter().all(|p| (0.0..=1.0).contains(&p.score)));
        prop_assert!(ranking.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn clearing_subset_restores_all_classes(
        parts in arb_parts(),
        text in arb_text(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut identifier = identifier(&parts);
        let label = pick.get(&parts.nb_classes).clone();
        identifier.set_languages(&[label.as_str()]).unwrap();
        let restricted = identifier.rank(&text);
        prop_assert_eq!(restricted.len(), 1);
        prop_assert_eq!(&restricted[0].language, &label);
        prop_assert!((restricted[0].score - 1.0).abs() < 1e-12);

        let none: [&str; 0] = [];
        identifier.set_languages(&none).unwrap();
        let mut labels: Vec<String> = identifier.rank(&text).into_iter().map(|p| p.language).collect();
        labels.sort();
        let mut expected = identifier.nb_classes().to_vec();
        expected.sort();
        prop_assert_eq!(labels, expected);
    }

    #[test]
    fn unknown_language_leaves_subset(
        parts in arb_parts(),
        text in arb_text(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut identifier = identifier(&parts);
        let label = pick.get(&parts.nb_classes).clone();
        identifier.set_languages(&[label.as_str()]).unwrap();
        let before = identifier.rank(&text);

        let err = identifier.set_languages(&[label.as_str(), "zz-unknown"]).unwrap_err();
        let is_unknown = matches!(err, LangIdError::UnknownLanguage { ref label } if label == "zz-unknown");
        prop_assert!(is_unknown);
        prop_assert_eq!(identifier.active_languages(), vec![label.as_str()]);
        prop_assert_eq!(identifier.rank(&text), before);
    }

    #[test]
    fn loading_twice_gives_identical_results(parts in arb_parts(), text in arb_text()) {
        let bytes = encode_binary(&parts).unwrap();
        let mut first = LanguageIdentifier::new(Model::from_bytes(&bytes).unwrap());
        let mut second = LanguageIdentifier::new(Model::from_bytes(&bytes).unwrap());
        prop_assert_eq!(first.classify(&text), second.classify(&text));
        prop_assert_eq!(first.rank(&text), second.rank(&text));
    }

    #[test]
    fn empty_input_picks_highest_prior(parts in arb_parts()) {
        let mut identifier = identifier(&parts);
        let mut best = 0;
        for (i, &prior) in parts.nb_pc.iter().enumerate() {
            if prior > parts.nb_pc[best] {
                best = i;
            }
        }
        prop_assert_eq!(&identifier.classify(b"").language, &parts.nb_classes[best]);
    }

    #[test]
    fn repeated_calls_are_bit_identical(parts in arb_parts(), text in arb_text(), other in arb_text()) {
        let mut identifier = identifier(&parts);
        let first = identifier.rank(&text);
        identifier.rank(&other);
        let second = identifier.rank(&text);
        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(&a.language, &b.language);
            prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }

    #[test]
    fn literal_and_binary_forms_agree(parts in arb_parts(), text in arb_text()) {
        let from_binary = Model::from_bytes(&encode_binary(&parts).unwrap()).unwrap();
        let from_literal = Model::from_bytes(encode_literal(&parts).as_bytes()).unwrap();
        prop_assert_eq!(from_binary.to_parts(), from_literal.to_parts());

        let mut a = LanguageIdentifier::new(from_binary);
        let mut b = LanguageIdentifier::new(from_literal);
        prop_assert_eq!(a.rank(&text), b.rank(&text));
    }

    #[test]
    fn subset_scores_are_renormalized_full_scores(
        parts in arb_parts(),
        text in arb_text(),
        keep in prop::collection::vec(any::<bool>(), 5),
    ) {
        let labels: Vec<&str> = parts
            .nb_classes
            .iter()
            .zip(&keep)
            .filter_map(|(label, &on)| on.then_some(label.as_str()))
            .collect();
        prop_assume!(!labels.is_empty());

        let mut full = identifier(&parts);
        full.set_norm_probs(false);
        let full_scores = full.rank(&text);

        let mut restricted = identifier(&parts);
        restricted.set_norm_probs(false);
        restricted.set_languages(&labels).unwrap();
        let restricted_scores = restricted.rank(&text);

        prop_assert_eq!(restricted_scores.len(), labels.len());
        for prediction in &restricted_scores {
            let same = full_scores.iter().find(|p| p.language == prediction.language).unwrap();
            prop_assert_eq!(same.score.to_bits(), prediction.score.to_bits());
        }
    }
}
