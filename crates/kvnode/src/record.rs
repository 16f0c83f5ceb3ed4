//! The value a storage node keeps per key.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

/// A stored value plus the bookkeeping the original kept alongside it.
///
/// Grounded on `original_source/kv_node.py`'s
/// `self.data[key] = {'value': ..., 'timestamp': ..., 'version': ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub value: Value,
    pub timestamp: f64,
    pub version: u64,
}

impl Record {
    /// Builds the next version of a record for `key`, given whatever was
    /// previously stored (or `None` on first write).
    pub fn next(value: Value, previous: Option<&Record>) -> Self {
        Self {
            value,
            timestamp: now_unix(),
            version: previous.map(|r| r.version).unwrap_or(0) + 1,
        }
    }
}

fn now_unix() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
