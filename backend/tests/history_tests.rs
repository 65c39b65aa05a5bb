//! Transaction history ordering and pagination tests
//!
//! The history endpoint returns entries newest first, tie-broken by
//! insertion order, restartable via page/per_page.

use proptest::prelude::*;
use shared::types::{Pagination, PaginationMeta};

/// Minimal stand-in for a ledger entry: (created_at, seq)
type Entry = (i64, i64);

/// The ordering the history query applies: created_at DESC, seq ASC
fn sort_history(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
}

fn page_slice(entries: &[Entry], pagination: &Pagination) -> Vec<Entry> {
    entries
        .iter()
        .skip(pagination.offset() as usize)
        .take(pagination.per_page as usize)
        .copied()
        .collect()
}

mod unit_tests {
    use super::*;

    #[test]
    fn test_newest_first_with_insertion_tie_break() {
        let mut entries = vec![(10, 1), (20, 2), (20, 3), (5, 4)];
        sort_history(&mut entries);
        assert_eq!(entries, vec![(20, 2), (20, 3), (10, 1), (5, 4)]);
    }

    #[test]
    fn test_pages_partition_the_sequence() {
        let mut entries: Vec<Entry> = (0..45).map(|i| (100 - i, i)).collect();
        sort_history(&mut entries);

        let per_page = 20;
        let mut seen = Vec::new();
        for page in 1..=3 {
            let p = Pagination { page, per_page };
            seen.extend(page_slice(&entries, &p));
        }
        assert_eq!(seen, entries);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let entries: Vec<Entry> = (0..5).map(|i| (i, i)).collect();
        let p = Pagination {
            page: 3,
            per_page: 5,
        };
        assert!(page_slice(&entries, &p).is_empty());
    }

    #[test]
    fn test_meta_reports_totals() {
        let p = Pagination {
            page: 2,
            per_page: 20,
        };
        let meta = PaginationMeta::new(&p, 45);
        assert_eq!(meta.total_items, 45);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.page, 2);
    }
}

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Walking all pages visits every entry exactly once, in order
        #[test]
        fn prop_pagination_is_restartable_and_complete(
            timestamps in prop::collection::vec(0i64..100, 0..120),
            per_page in 1u32..30
        ) {
            let mut entries: Vec<Entry> = timestamps
                .into_iter()
                .enumerate()
                .map(|(seq, ts)| (ts, seq as i64))
                .collect();
            sort_history(&mut entries);

            let mut walked = Vec::new();
            let mut page = 1;
            loop {
                let p = Pagination { page, per_page };
                let slice = page_slice(&entries, &p);
                if slice.is_empty() {
                    break;
                }
                walked.extend(slice);
                page += 1;
            }

            prop_assert_eq!(walked, entries);
        }

        /// Sorting is stable under re-sorting (idempotent ordering)
        #[test]
        fn prop_ordering_is_deterministic(
            timestamps in prop::collection::vec(0i64..10, 1..60)
        ) {
            let mut a: Vec<Entry> = timestamps
                .iter()
                .enumerate()
                .map(|(seq, ts)| (*ts, seq as i64))
                .collect();
            let mut b = a.clone();
            sort_history(&mut a);
            sort_history(&mut b);
            sort_history(&mut a);
            prop_assert_eq!(a, b);

        }

        /// Every adjacent pair respects the ordering contract
        #[test]
        fn prop_sorted_pairs_respect_contract(
            timestamps in prop::collection::vec(0i64..20, 2..80)
        ) {
            let mut entries: Vec<Entry> = timestamps
                .into_iter()
                .enumerate()
                .map(|(seq, ts)| (ts, seq as i64))
                .collect();
            sort_history(&mut entries);

            for pair in entries.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!(a.0 > b.0 || (a.0 == b.0 && a.1 < b.1));
            }
        }
    }
}
