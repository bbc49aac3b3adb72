//! Property-based tests for option normalization.
//!
//! These tests use proptest to generate random flag names and values and
//! verify that the normalizer's invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::options::{camelize, normalize, OptionValue, RawOption, RawOptions};
    use proptest::prelude::*;

    // ============================================================================
    // camelize property tests
    // ============================================================================

    proptest! {
        /// Property: hyphens between words are all consumed
        #[test]
        fn camelize_consumes_inner_hyphens(input in "[a-z]+(-[a-z0-9]+)*") {
            prop_assert!(!camelize(&input).contains('-'));
        }

        /// Property: a hyphen not followed by a word character survives
        #[test]
        fn camelize_keeps_hyphens_without_word_char(
            word in "[a-z]*",
            tail in "-[-. /]*",
        ) {
            let input = format!("{}{}", word, tail);
            prop_assert_eq!(camelize(&input), input.clone());
        }

        /// Property: names without hyphens are returned unchanged
        #[test]
        fn camelize_is_identity_without_hyphens(input in "[a-zA-Z0-9]*") {
            prop_assert_eq!(camelize(&input), input);
        }

        /// Property: camelize is idempotent
        #[test]
        fn camelize_is_idempotent(input in "[a-z]+(-[a-z]+)*") {
            let once = camelize(&input);
            prop_assert_eq!(camelize(&once), once.clone());
        }
    }

    // ============================================================================
    // normalize property tests
    // ============================================================================

    proptest! {
        /// Property: a declared option with a value lands under its camel-case key
        #[test]
        fn normalize_keeps_declared_values(
            flag in "[a-z]+(-[a-z]+)?",
            value in "[ -~]*",
        ) {
            let key = camelize(&flag);
            let mut raw = RawOptions::new();
            raw.insert(key.clone(), RawOption::Value(OptionValue::Str(value.clone())));

            let options = normalize(&[flag.as_str()], &raw);

            prop_assert_eq!(options.get_str(&key), Some(value.as_str()));
            prop_assert_eq!(options.len(), 1);
        }

        /// Property: methods never reach the normalized map
        #[test]
        fn normalize_never_copies_methods(flags in prop::collection::vec("[a-z]+(-[a-z]+)?", 0..6)) {
            let mut raw = RawOptions::new();
            for flag in &flags {
                raw.insert(camelize(flag), RawOption::Method);
            }
            let declared: Vec<&str> = flags.iter().map(String::as_str).collect();

            prop_assert!(normalize(&declared, &raw).is_empty());
        }

        /// Property: every output key comes from a declared flag
        #[test]
        fn normalize_output_is_allow_listed(
            declared in prop::collection::vec("[a-z]{1,8}", 0..4),
            extra in prop::collection::vec("[A-Z]{1,8}", 0..4),
        ) {
            let mut raw = RawOptions::new();
            for name in declared.iter().chain(extra.iter()) {
                raw.insert(name.clone(), RawOption::Value(OptionValue::Bool(true)));
            }
            let declared_refs: Vec<&str> = declared.iter().map(String::as_str).collect();

            let options = normalize(&declared_refs, &raw);

            for key in options.keys() {
                prop_assert!(declared.iter().any(|d| d == key));
            }
        }
    }
}
