//! Property tests for normalization, scoring and the match cascade

mod helpers;

use explore_chat::normalize::normalize;
use explore_chat::similarity::fuzzy_ratio;
use explore_chat::{ChatEngine, MatchMethod};
use helpers::{fixture_store, HELLO_PATTERN};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_normalize_idempotent(s in "[ \\tA-Za-z0-9éšŠ?!]{0,40}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert_eq!(once.trim(), once.as_str());
    }

    #[test]
    fn prop_ratio_bounded(a in "[a-z ]{0,30}", b in "[a-z ]{0,30}") {
        prop_assert!(fuzzy_ratio(&a, &b) <= 100);
        prop_assert_eq!(fuzzy_ratio(&a, &a), 100);
    }

    #[test]
    fn prop_substring_of_pattern_scores_its_share(start in 0usize..29, len in 1usize..29) {
        let chars: Vec<char> = HELLO_PATTERN.chars().collect();
        let end = (start + len).min(chars.len());
        prop_assume!(start < end);
        let part: String = chars[start..end].iter().collect();

        // the whole input is one block, so M is its length
        let expected = (2.0 * part.len() as f64 / (chars.len() + part.len()) as f64 * 100.0) as u8;
        prop_assert_eq!(fuzzy_ratio(HELLO_PATTERN, &part), expected);
    }

    #[test]
    fn prop_threshold_monotonic(input in "[a-z ]{0,35}", threshold in 0u8..=100) {
        let (store, _) = fixture_store();
        let engine = ChatEngine::new(store);
        let at = engine.find_rule(&input, threshold).unwrap();
        if let Some(found) = at.filter(|m| m.method == MatchMethod::Fuzzy) {
            for lower in 0..threshold {
                let again = engine.find_rule(&input, lower).unwrap().unwrap();
                prop_assert_eq!(again.method, MatchMethod::Fuzzy);
                prop_assert_eq!(again.rule.id, found.rule.id);
            }
        }
    }

    #[test]
    fn prop_typo_of_exact_pattern_matches(pos in 0usize..HELLO_PATTERN.len(), c in "[a-z]") {
        let mut chars: Vec<char> = HELLO_PATTERN.chars().collect();
        chars[pos] = c.chars().next().unwrap();
        let input: String = chars.into_iter().collect();

        let (store, ids) = fixture_store();
        let engine = ChatEngine::new(store);
        let found = engine.find_rule(&input, 70).unwrap().unwrap();
        prop_assert_eq!(found.rule.id, ids.hello);
        prop_assert!(matches!(found.method, MatchMethod::Exact | MatchMethod::Fuzzy));
    }

    #[test]
    fn prop_resolution_repeatable(input in "[a-z ]{0,35}") {
        let (store, _) = fixture_store();
        let engine = ChatEngine::new(store);
        let first = engine.find_rule(&input, 70).unwrap();
        let second = engine.find_rule(&input, 70).unwrap();
        prop_assert_eq!(first, second);
    }
}
