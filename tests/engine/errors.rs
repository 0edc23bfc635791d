//! Unified error conversions

use offsetlog::{Error, LogEngine, LogError};

#[test]
fn test_missing_key_converts_to_not_found() {
    let log = LogEngine::new();
    let err: Error = log.poll("missing", 0).unwrap_err().into();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_invalid_argument_conversion() {
    let err: Error = LogError::invalid_argument("shard_amount must be a power of two").into();
    assert!(err.is_invalid_argument());
    assert!(!err.is_serious());
}

#[test]
fn test_wire_error_conversion() {
    let wire_err = offsetlog::wire::decode_line("{not json").unwrap_err();
    let err: Error = wire_err.into();
    assert!(matches!(err, Error::Serialization(_)));
}

#[test]
fn test_question_mark_propagation() -> offsetlog::Result<()> {
    let log = LogEngine::new();
    log.append("k", 1);
    log.commit_offsets("k", 1)?;
    assert_eq!(log.last_committed_offset("k")?, 1);
    Ok(())
}
