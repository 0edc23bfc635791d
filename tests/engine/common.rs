//! Shared helpers for engine integration tests

#![allow(dead_code)]

use std::sync::Arc;

use offsetlog::{LogEngine, Offset, Payload};

/// A fresh engine behind an `Arc` for sharing across threads
pub fn shared_engine() -> Arc<LogEngine> {
    Arc::new(LogEngine::new())
}

/// Append every payload to `key`, returning the assigned offsets
pub fn append_all(engine: &LogEngine, key: &str, payloads: &[Payload]) -> Vec<Offset> {
    payloads.iter().map(|p| engine.append(key, *p)).collect()
}

/// Expected poll result for `payloads` appended to an empty key, read from `from`
pub fn expected_from(payloads: &[Payload], from: Offset) -> Vec<(Offset, Payload)> {
    payloads
        .iter()
        .enumerate()
        .map(|(i, p)| (i as Offset + 1, *p))
        .filter(|(offset, _)| *offset >= from)
        .collect()
}

/// Build a batch argument from string-keyed pairs
pub fn batch(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
    pairs.iter().map(|(k, o)| (k.to_string(), *o)).collect()
}
