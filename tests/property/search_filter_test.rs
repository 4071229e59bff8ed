//! Property and example tests for the search filter.
//!
//! The filter is a pure view: it never reorders, never duplicates, and an
//! empty query is the identity.

use proptest::prelude::*;

use smartmarks::managers::search;
use smartmarks::types::bookmark::Bookmark;

fn bookmark(title: &str, url: &str) -> Bookmark {
    Bookmark {
        id: format!("{}-{}", title, url),
        user_id: "user-1".to_string(),
        title: title.to_string(),
        url: url.to_string(),
        created_at: 0,
    }
}

/// The exact example from the feature contract: query "go" matches only the
/// Go entry, case-insensitively on the title; the empty query returns both
/// in original order.
#[test]
fn test_query_example() {
    let entries = vec![
        bookmark("Go Docs", "https://go.dev"),
        bookmark("Rust Book", "https://doc.rust-lang.org"),
    ];

    let hits = search::filter(&entries, "go");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Go Docs");

    let all = search::filter(&entries, "");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "Go Docs");
    assert_eq!(all[1].title, "Rust Book");
}

/// Matching is case-insensitive over both title and url.
#[test]
fn test_match_is_case_insensitive() {
    let entry = bookmark("Rust Book", "https://doc.rust-lang.org");
    assert!(search::matches(&entry, "RUST"));
    assert!(search::matches(&entry, "rust-LANG"));
    assert!(!search::matches(&entry, "python"));
}

fn arb_entries() -> impl Strategy<Value = Vec<Bookmark>> {
    proptest::collection::vec(
        ("[a-zA-Z ]{1,12}", "[a-z0-9.]{1,12}")
            .prop_map(|(title, host)| bookmark(&title, &format!("https://{}", host))),
        0..12,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// An empty query is the identity: every entry, original order.
    #[test]
    fn empty_query_is_identity(entries in arb_entries()) {
        let filtered = search::filter(&entries, "");
        prop_assert_eq!(filtered.len(), entries.len());
        for (got, want) in filtered.iter().zip(entries.iter()) {
            prop_assert_eq!(*got, want);
        }
    }

    /// Every returned entry actually matches, and the result preserves the
    /// store's relative order.
    #[test]
    fn filter_is_sound_and_order_preserving(
        entries in arb_entries(),
        query in "[a-zA-Z]{1,4}",
    ) {
        let filtered = search::filter(&entries, &query);

        for hit in &filtered {
            prop_assert!(search::matches(hit, &query));
        }

        // Relative order matches a manual scan of the input.
        let expected: Vec<&Bookmark> = entries
            .iter()
            .filter(|b| search::matches(b, &query))
            .collect();
        prop_assert_eq!(filtered, expected);
    }

    /// Searching for an entry's full title always finds that entry.
    #[test]
    fn full_title_always_hits(entries in arb_entries()) {
        for entry in &entries {
            let hits = search::filter(&entries, &entry.title);
            prop_assert!(hits.iter().any(|b| b.id == entry.id));
        }
    }
}
