//! Multi-key operations

use std::collections::BTreeMap;

use offsetlog::prelude::*;

use crate::common::*;

#[test]
fn test_poll_batch_reads_each_key_from_its_offset() {
    let log = LogEngine::new();
    append_all(&log, "a", &[1, 2, 3]);
    append_all(&log, "b", &[10, 20]);

    let polled = log.poll_batch(batch(&[("a", 3), ("b", 0)])).unwrap();

    let mut expected = BTreeMap::new();
    expected.insert("a".to_string(), vec![(3, 3)]);
    expected.insert("b".to_string(), vec![(1, 10), (2, 20)]);
    assert_eq!(polled, expected);
}

#[test]
fn test_poll_batch_with_unknown_key_fails() {
    let log = LogEngine::new();
    append_all(&log, "a", &[1]);

    let err = log.poll_batch(batch(&[("a", 0), ("missing", 0)])).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.key(), Some("missing"));
}

#[test]
fn test_commit_batch_is_all_or_nothing() {
    let log = LogEngine::new();
    append_all(&log, "a", &[1, 2]);
    append_all(&log, "b", &[1, 2]);

    let err = log
        .commit_batch(batch(&[("a", 2), ("b", 2), ("ghost", 1)]))
        .unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(log.last_committed_offset("a").unwrap(), 0);
    assert_eq!(log.last_committed_offset("b").unwrap(), 0);
    assert!(!log.contains("ghost"));
}

#[test]
fn test_commit_batch_applies_every_key() {
    let log = LogEngine::new();
    append_all(&log, "a", &[1, 2, 3]);
    append_all(&log, "b", &[1, 2, 3]);

    log.commit_batch(batch(&[("a", 1), ("b", 3)])).unwrap();

    let listed = log.list_committed_offsets(["a", "b"]).unwrap();
    assert_eq!(listed["a"], 1);
    assert_eq!(listed["b"], 3);
}

#[test]
fn test_list_committed_offsets_unknown_key_fails() {
    let log = LogEngine::new();
    append_all(&log, "a", &[1]);

    let err = log.list_committed_offsets(["a", "nope"]).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_empty_batches() {
    let log = LogEngine::new();

    assert!(log.poll_batch(Vec::<(String, i64)>::new()).unwrap().is_empty());
    log.commit_batch(Vec::<(String, i64)>::new()).unwrap();
    assert!(log
        .list_committed_offsets(Vec::<String>::new())
        .unwrap()
        .is_empty());
}
