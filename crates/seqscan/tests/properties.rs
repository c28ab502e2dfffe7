//! Property-based checks over grouping, rendering and diffing.

use std::collections::BTreeSet;

use proptest::prelude::*;
use seqscan::domain::item::Item;
use seqscan::{Sequence, diff, group, uncompress};

/// Distinct frames that fit a fixed padding width.
fn padded_frames() -> impl Strategy<Value = (usize, BTreeSet<u64>)> {
    (2usize..=5).prop_flat_map(|width| {
        let ceiling = 10u64.pow(width as u32);
        (
            Just(width),
            prop::collection::btree_set(0..ceiling, 2..20),
        )
    })
}

/// Two names sharing a literal skeleton, with equal-width digit fields.
fn aligned_names() -> impl Strategy<Value = (String, String)> {
    prop::collection::vec(("[a-z._]{1,3}", 1usize..=4, any::<u32>(), any::<u32>()), 1..4).prop_map(
        |fields| {
            let mut a = String::new();
            let mut b = String::new();
            for (literal, width, x, y) in fields {
                let modulus = 10u32.pow(width as u32);
                a.push_str(&format!("{literal}{:0width$}", x % modulus));
                b.push_str(&format!("{literal}{:0width$}", y % modulus));
            }
            (a, b)
        },
    )
}

proptest! {
    #[test]
    fn listing_notation_round_trips(
        head in "[a-z]{1,4}[0-9]{0,3}[._]",
        tail in "\\.[a-z]{3}",
        (width, frames) in padded_frames(),
    ) {
        let names: Vec<String> = frames
            .iter()
            .map(|frame| format!("{head}{frame:0width$}{tail}"))
            .collect();
        let sequence = Sequence::new(names.clone()).unwrap();
        prop_assert_eq!(sequence.len(), frames.len());

        let notation = sequence.format("%h%p%t %r (%R)").unwrap();
        let restored = uncompress(&notation, "%h%p%t %r (%R)").unwrap();
        let restored_names: Vec<&str> = restored.iter().map(Item::path).collect();
        prop_assert_eq!(restored_names, names.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(restored.format("%h%p%t %r (%R)").unwrap(), notation);
    }

    #[test]
    fn notation_round_trips_under_other_templates(
        head in "[a-z]{1,4}[0-9]{0,3}[._]",
        tail in "\\.[a-z]{3}",
        width in 2usize..=5,
        start in 0u64..50,
        len in 2u64..30,
        template in prop::sample::select(vec![
            "%h%p%t %R %d",
            "%h%p%t %s-%e",
            "%h%p%t %s/%e",
            "[%l] %h%p%t %r %M %D",
        ]),
    ) {
        let names: Vec<String> = (start..start + len)
            .map(|frame| format!("/renders/{head}{frame:0width$}{tail}"))
            .collect();
        let sequence = Sequence::new(names).unwrap();

        let notation = sequence.format(template).unwrap();
        let restored = uncompress(&notation, template).unwrap();
        prop_assert_eq!(restored.frames(), sequence.frames());
        prop_assert_eq!(restored.format(template).unwrap(), notation);
    }

    #[test]
    fn default_notation_round_trips(
        head in "[a-z]{1,4}[0-9]{0,3}[._]",
        tail in "\\.[a-z]{3}",
        frames in prop::collection::btree_set(0u64..200, 2..20),
    ) {
        let names: Vec<String> = frames.iter().map(|frame| format!("{head}{frame}{tail}")).collect();
        let sequence = Sequence::new(names).unwrap();

        let notation = sequence.to_string();
        let restored = uncompress(&notation, seqscan::DEFAULT_TEMPLATE).unwrap();
        prop_assert_eq!(restored.start(), sequence.start());
        prop_assert_eq!(restored.end(), sequence.end());
        prop_assert_eq!(restored.to_string(), notation);
    }

    #[test]
    fn grouping_partitions_and_is_idempotent(
        names in prop::collection::vec("(shot|plate)_[12]\\.[0-9]{1,3}\\.(exr|dpx)", 1..40),
    ) {
        let sequences = group(names.clone()).unwrap();
        let distinct: BTreeSet<&String> = names.iter().collect();
        let total: usize = sequences.iter().map(Sequence::len).sum();
        prop_assert_eq!(total, distinct.len());

        let flattened: Vec<String> = sequences
            .iter()
            .flat_map(|seq| seq.iter().map(|item| item.path().to_owned()))
            .collect();
        let regrouped = group(flattened).unwrap();
        prop_assert_eq!(regrouped, sequences);
    }

    #[test]
    fn missing_frames_complement_present(frames in prop::collection::btree_set(0u64..500, 1..30)) {
        let names: Vec<String> = frames.iter().map(|f| format!("f.{f:04}.exr")).collect();
        let sequence = Sequence::new(names).unwrap();
        if frames.len() < 2 {
            return Ok(());
        }
        let present: BTreeSet<u64> = sequence.frames().into_iter().collect();
        let missing: BTreeSet<u64> = sequence.missing().into_iter().collect();
        prop_assert!(present.is_disjoint(&missing));

        let start = sequence.start().unwrap();
        let end = sequence.end().unwrap();
        let union: BTreeSet<u64> = present.union(&missing).copied().collect();
        prop_assert_eq!(union, (start..=end).collect::<BTreeSet<u64>>());
    }

    #[test]
    fn diff_is_symmetric_for_aligned_names((a, b) in aligned_names()) {
        let forward = diff(&a, &b);
        let backward = diff(&b, &a);
        prop_assert_eq!(forward.len(), backward.len());
        for (f, r) in forward.iter().zip(&backward) {
            prop_assert_eq!((f.start, f.end), (r.start, r.end));
            prop_assert_eq!(&f.frames.0, &r.frames.1);
            prop_assert_eq!(&f.frames.1, &r.frames.0);
        }
    }

    #[test]
    fn diff_is_symmetric_without_digits(
        pairs in prop::collection::vec((0u8..4, 0u8..4), 1..12),
    ) {
        let a: String = pairs.iter().map(|(x, _)| char::from(b'a' + x)).collect();
        let b: String = pairs.iter().map(|(_, y)| char::from(b'a' + y)).collect();
        let forward = diff(&a, &b);
        let backward = diff(&b, &a);
        prop_assert_eq!(forward.len(), backward.len());
        for (f, r) in forward.iter().zip(&backward) {
            prop_assert_eq!((f.start, f.end), (r.start, r.end));
            prop_assert_eq!(&f.frames.0, &r.frames.1);
        }
        prop_assert_eq!(a == b, forward.is_empty());
    }

    #[test]
    fn sibling_relation_is_symmetric(
        a in "[ab]_[0-9]{1,2}\\.(exr|png)",
        b in "[ab]_[0-9]{1,2}\\.(exr|png)",
    ) {
        let (a, b) = (Item::new(a), Item::new(b));
        prop_assert_eq!(a.is_sibling(&b), b.is_sibling(&a));
    }
}
