use super::{Record, RecordStorage, RecordValue, Recorder};
use log::info;

/// A recorder that emits aggregated records through the `log` facade.
///
/// Every [`Recorder::flush`] writes one `info`-level line with the aggregated
/// key-value pairs, keys sorted for stable output.
#[derive(Default)]
pub struct LogRecorder {
    storage: RecordStorage,
}

impl LogRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self {
            storage: RecordStorage::new(),
        }
    }

    fn format(record: &Record) -> String {
        let mut items: Vec<String> = record
            .iter()
            .map(|(k, v)| match v {
                RecordValue::Scalar(v) => format!("{}: {:.5}", k, v),
                RecordValue::DateTime(t) => format!("{}: {}", k, t),
                RecordValue::String(s) => format!("{}: {}", k, s),
            })
            .collect();
        items.sort();
        items.join(", ")
    }
}

impl Recorder for LogRecorder {
    fn write(&mut self, record: Record) {
        info!("{}", Self::format(&record));
    }

    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        let record = self.storage.aggregate();
        info!("episode: {}, {}", step, Self::format(&record));
    }
}
