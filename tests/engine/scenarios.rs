//! Single-key walkthroughs

use offsetlog::prelude::*;

use crate::common::*;

#[test]
fn test_append_poll_commit_walkthrough() {
    let log = LogEngine::new();

    assert_eq!(log.append("k1", 10), 1);
    assert_eq!(log.append("k1", 20), 2);
    assert_eq!(log.append("k1", 30), 3);

    assert_eq!(log.poll("k1", 2).unwrap(), vec![(2, 20), (3, 30)]);

    log.commit_offsets("k1", 2).unwrap();
    assert_eq!(log.last_committed_offset("k1").unwrap(), 2);

    assert_eq!(log.poll("k1", 0).unwrap(), vec![(1, 10), (2, 20), (3, 30)]);
}

#[test]
fn test_late_commit_lower_than_watermark_is_ignored() {
    let log = LogEngine::new();
    append_all(&log, "k1", &[10, 20, 30]);

    log.commit_offsets("k1", 2).unwrap();
    assert_eq!(log.append("k1", 40), 4);

    log.commit_offsets("k1", 1).unwrap();
    assert_eq!(log.last_committed_offset("k1").unwrap(), 2);

    log.commit_offsets("k1", 4).unwrap();
    assert_eq!(log.last_committed_offset("k1").unwrap(), 4);
}

#[test]
fn test_unknown_key_errors_everywhere_but_append() {
    let log = LogEngine::new();

    let err = log.poll("unknown", 0).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.key(), Some("unknown"));

    assert!(log.commit_offsets("unknown", 1).unwrap_err().is_not_found());
    assert!(log.last_committed_offset("unknown").unwrap_err().is_not_found());

    // The failed calls must not have created the key
    assert!(!log.contains("unknown"));

    assert_eq!(log.append("unknown", 5), 1);
    assert_eq!(log.poll("unknown", 0).unwrap(), vec![(1, 5)]);
}

#[test]
fn test_keys_are_independent() {
    let log = LogEngine::new();

    append_all(&log, "a", &[1, 2, 3]);
    assert_eq!(log.append("b", 100), 1);

    log.commit_offsets("a", 3).unwrap();
    assert_eq!(log.last_committed_offset("a").unwrap(), 3);
    assert_eq!(log.last_committed_offset("b").unwrap(), 0);
    assert_eq!(log.poll("b", 0).unwrap(), vec![(1, 100)]);
}

#[test]
fn test_poll_past_end_is_empty() {
    let log = LogEngine::new();
    append_all(&log, "k", &[1, 2]);

    assert!(log.poll("k", 3).unwrap().is_empty());
    assert!(log.poll("k", 1_000).unwrap().is_empty());
}

#[test]
fn test_negative_offsets_behave_like_zero() {
    let log = LogEngine::new();
    let payloads = [7, -7, 0];
    append_all(&log, "k", &payloads);

    assert_eq!(log.poll("k", -5).unwrap(), expected_from(&payloads, 0));

    log.commit_offsets("k", -1).unwrap();
    assert_eq!(log.last_committed_offset("k").unwrap(), 0);
}

#[test]
fn test_commit_never_moves_backwards() {
    let log = LogEngine::new();
    append_all(&log, "k", &[1, 2, 3, 4]);

    log.commit_offsets("k", 3).unwrap();
    log.commit_offsets("k", 1).unwrap();
    assert_eq!(log.last_committed_offset("k").unwrap(), 3);
}

#[test]
fn test_commit_past_end_stops_at_last_record() {
    let log = LogEngine::new();
    append_all(&log, "k", &[1, 2]);

    log.commit_offsets("k", 99).unwrap();
    assert_eq!(log.last_committed_offset("k").unwrap(), 2);

    // Later records start out uncommitted
    assert_eq!(log.append("k", 3), 3);
    assert_eq!(log.last_committed_offset("k").unwrap(), 2);
}

#[test]
fn test_commit_does_not_hide_records_from_poll() {
    let log = LogEngine::new();
    let payloads = [5, 6, 7];
    append_all(&log, "k", &payloads);

    log.commit_offsets("k", 3).unwrap();
    assert_eq!(log.poll("k", 1).unwrap(), expected_from(&payloads, 1));
}

#[test]
fn test_stats_track_appends_and_commits() {
    let log = LogEngine::with_config(&EngineConfig::small()).unwrap();
    append_all(&log, "a", &[1, 2, 3]);
    append_all(&log, "b", &[4]);
    log.commit_offsets("a", 2).unwrap();

    let stats = log.stats();
    assert_eq!(stats.queues, 2);
    assert_eq!(stats.records, 4);
    assert_eq!(stats.committed, 2);
    assert_eq!(log.keys(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(log.len("a").unwrap(), 3);
}
