//! Randomized invariants

use proptest::prelude::*;

use offsetlog::{LogEngine, Offset};

use crate::common::*;

#[derive(Debug, Clone)]
enum Op {
    Append(u8, i64),
    Commit(u8, i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..4, any::<i64>()).prop_map(|(k, p)| Op::Append(k, p)),
        1 => (0u8..4, -3i64..40).prop_map(|(k, o)| Op::Commit(k, o)),
    ]
}

fn key(k: u8) -> String {
    format!("k{}", k)
}

proptest! {
    #[test]
    fn offsets_are_dense_and_payloads_preserved(payloads in prop::collection::vec(any::<i64>(), 0..64)) {
        let log = LogEngine::new();
        let offsets = append_all(&log, "k", &payloads);

        let expected: Vec<Offset> = (1..=payloads.len() as Offset).collect();
        prop_assert_eq!(offsets, expected);
        if !payloads.is_empty() {
            prop_assert_eq!(log.poll("k", 0).unwrap(), expected_from(&payloads, 0));
        }
    }

    #[test]
    fn poll_returns_suffix(payloads in prop::collection::vec(any::<i64>(), 1..64), from in -5i64..80) {
        let log = LogEngine::new();
        append_all(&log, "k", &payloads);

        let polled = log.poll("k", from).unwrap();
        prop_assert_eq!(polled, expected_from(&payloads, from.max(0) as Offset));
    }

    #[test]
    fn watermark_matches_model(ops in prop::collection::vec(op_strategy(), 1..100)) {
        let log = LogEngine::new();
        // key -> (records appended, watermark)
        let mut model = std::collections::HashMap::<String, (u64, u64)>::new();

        for op in ops {
            match op {
                Op::Append(k, payload) => {
                    let entry = model.entry(key(k)).or_insert((0, 0));
                    entry.0 += 1;
                    prop_assert_eq!(log.append(&key(k), payload), entry.0);
                }
                Op::Commit(k, upto) => match model.get_mut(&key(k)) {
                    Some(entry) => {
                        log.commit_offsets(&key(k), upto).unwrap();
                        let target = (upto.max(0) as u64).min(entry.0);
                        entry.1 = entry.1.max(target);
                    }
                    None => {
                        prop_assert!(log.commit_offsets(&key(k), upto).unwrap_err().is_not_found());
                    }
                },
            }
        }

        for (k, (len, watermark)) in model {
            prop_assert_eq!(log.len(&k).unwrap() as u64, len);
            prop_assert_eq!(log.last_committed_offset(&k).unwrap(), watermark);
        }
    }
}
