//! Readers for `metrics-util`'s debugging recorder.

use metrics_util::{
    CompositeKey,
    debugging::{DebugValue, DebuggingRecorder, Snapshotter},
};

/// Creates a debugging recorder and snapshotter for metrics testing.
pub fn debugging_recorder_setup() -> (Snapshotter, DebuggingRecorder) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    (snapshotter, recorder)
}

/// Value of counter `name` carrying every label in `labels` within a single
/// snapshot.
///
/// Taking a snapshot drains the recorder's counters, so callers snapshot once
/// and look every counter up in the same `Vec`. Returns `None` when no such
/// counter was recorded.
pub fn counter_value<U, D>(
    snapshot: &[(CompositeKey, U, D, DebugValue)],
    name: &str,
    labels: &[(&str, &str)],
) -> Option<u64> {
    snapshot.iter().find_map(|(key, _, _, value)| {
        let key = key.key();
        let matches = key.name() == name
            && labels.iter().all(|(label, expected)| {
                key.labels()
                    .any(|l| l.key() == *label && l.value() == *expected)
            });
        match value {
            DebugValue::Counter(count) if matches => Some(*count),
            _ => None,
        }
    })
}
