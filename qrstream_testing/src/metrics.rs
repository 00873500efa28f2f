//! Reading counters recorded by `qrstream` under a debugging recorder.

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};

/// Creates a debugging recorder and snapshotter for metrics testing.
#[must_use]
pub fn debugging_recorder_setup() -> (Snapshotter, DebuggingRecorder) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    (snapshotter, recorder)
}

#[derive(Debug)]
struct Counter {
    name: String,
    labels: Vec<(String, String)>,
    value: u64,
}

/// Counter values captured at one point in time.
#[derive(Debug)]
pub struct CounterSnapshot(Vec<Counter>);

impl CounterSnapshot {
    /// Capture every counter currently held by the recorder.
    #[must_use]
    pub fn take(snapshotter: &Snapshotter) -> Self {
        let counters = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(key, _, _, value)| match value {
                DebugValue::Counter(value) => Some(Counter {
                    name: key.key().name().to_owned(),
                    labels: key
                        .key()
                        .labels()
                        .map(|l| (l.key().to_owned(), l.value().to_owned()))
                        .collect(),
                    value,
                }),
                _ => None,
            })
            .collect();
        Self(counters)
    }

    /// Sum of the counters named `name`, limited to those carrying `label`
    /// when one is given.
    #[must_use]
    pub fn value(&self, name: &str, label: Option<(&str, &str)>) -> u64 {
        self.0
            .iter()
            .filter(|counter| counter.name == name)
            .filter(|counter| {
                label.is_none_or(|(key, value)| {
                    counter.labels.iter().any(|(k, v)| k == key && v == value)
                })
            })
            .map(|counter| counter.value)
            .sum()
    }
}
