//! Property-based tests for path handling.
//!
//! The resolver module carries its own root-containment properties; this
//! module focuses on the lexical helpers and the alias table.

use super::{clean_path, make_path, AliasTable};
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just(".".to_string()),
        Just("..".to_string()),
        "[a-z0-9_-]{1,12}",
    ]
}

fn raw_path_strategy() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        prop::collection::vec(segment_strategy(), 0..10),
        any::<bool>(),
    )
        .prop_map(|(absolute, parts, trailing)| {
            let mut path = parts.join("/");
            if absolute {
                path.insert(0, '/');
            }
            if trailing {
                path.push('/');
            }
            path
        })
}

fn chain_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        max_shrink_iters: 5000,
        .. ProptestConfig::default()
    })]

    // clean(clean(p)) == clean(p)
    #[test]
    fn clean_path_idempotent(p in raw_path_strategy()) {
        let once = clean_path(&p);
        prop_assert_eq!(clean_path(&once), once);
    }

    // Only the bare root keeps a trailing separator
    #[test]
    fn clean_path_no_trailing_separator(p in raw_path_strategy()) {
        let cleaned = clean_path(&p);
        prop_assert!(cleaned == "/" || !cleaned.ends_with('/'));
    }

    // Cleaned paths never contain dot segments
    #[test]
    fn clean_path_no_dot_segments(p in raw_path_strategy()) {
        let cleaned = clean_path(&p);
        if cleaned != "." {
            for segment in cleaned.split('/') {
                prop_assert!(segment != "." && segment != "..");
            }
        }
    }

    // Absoluteness survives cleaning
    #[test]
    fn clean_path_preserves_absoluteness(p in raw_path_strategy()) {
        prop_assert_eq!(clean_path(&p).starts_with('/'), p.starts_with('/'));
    }

    // make_path never produces a doubled separator from trailing slashes
    #[test]
    fn make_path_joins_cleanly(parts in prop::collection::vec("[a-z]{1,6}/{0,3}", 1..6)) {
        let joined = make_path(&parts);
        prop_assert!(!joined.contains("//"));
    }

    // Expansion of a linear alias chain lands on the final target
    #[test]
    fn alias_chain_resolves(names in chain_strategy(), leaf in "[a-z]{1,6}") {
        let mut table = AliasTable::new();
        let mut keys: Vec<String> = names.iter().enumerate().map(|(i, n)| format!("{n}{i}")).collect();
        keys.push("final".to_string());
        for pair in keys.windows(2) {
            table.insert(&pair[0], &pair[1]);
        }
        let expanded = table.expand(&format!("{}/{leaf}", keys[0]));
        prop_assert_eq!(expanded, format!("final/{leaf}"));
    }

    // Expansion terminates on arbitrary, possibly cyclic, tables
    #[test]
    fn alias_expand_terminates(
        pairs in prop::collection::vec(("[a-c]{1,2}", "[a-c]{1,2}(/[a-c]{1,2})?"), 0..6),
        p in "[a-c]{1,2}(/[a-c]{1,2}){0,3}",
    ) {
        let mut table = AliasTable::new();
        for (key, target) in &pairs {
            table.insert(key, target);
        }
        let _ = table.expand(&p);
        let _ = table.reduce(&p);
    }
}
