//! Domain-specific assertion macros for actor-search harnesses.
//!
//! These wrap `pretty_assertions` and say which pipeline invariant failed.

/// Assert that a collected sequence (anything with `.names()`) holds exactly
/// `expected`, in order.
///
/// ```rust
/// assert_names!(seq, ["Ada", "Grace"]);
/// ```
#[macro_export]
macro_rules! assert_names {
    ($seq:expr, [$($name:expr),* $(,)?]) => {{
        let expected: Vec<String> = vec![$($name.to_string()),*];
        pretty_assertions::assert_eq!(
            $seq.names(),
            expected,
            "collected sequence differs from expected names (order matters)"
        );
    }};
}

/// Assert that records appear in strictly increasing source-line order.
#[macro_export]
macro_rules! assert_source_order {
    ($records:expr) => {{
        let records: &[actor_core::Record] = &$records;
        for pair in records.windows(2) {
            assert!(
                pair[0].line() < pair[1].line(),
                "assert_source_order! failed: line {} ({:?}) delivered before line {} ({:?})",
                pair[0].line(),
                pair[0].name(),
                pair[1].line(),
                pair[1].name()
            );
        }
    }};
}

/// Assert that no two records share an identifier.
#[macro_export]
macro_rules! assert_unique_ids {
    ($records:expr) => {{
        let records: &[actor_core::Record] = &$records;
        let ids: std::collections::HashSet<actor_core::RecordId> =
            records.iter().map(|r| r.id()).collect();
        assert_eq!(
            ids.len(),
            records.len(),
            "assert_unique_ids! failed: {} records but only {} distinct ids",
            records.len(),
            ids.len()
        );
    }};
}
