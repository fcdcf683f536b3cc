use super::{Record, RecordStorage, Recorder};

/// Buffered recorder.
///
/// Stored records are aggregated on [`Recorder::flush`] and the aggregates
/// are kept in memory, which is useful for inspecting training runs in tests.
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
    storage: RecordStorage,
}

impl BufferedRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self {
            buf: Vec::default(),
            storage: RecordStorage::new(),
        }
    }

    /// Returns an iterator over the flushed records.
    pub fn iter(&self) -> std::slice::Iter<Record> {
        self.buf.iter()
    }

    /// The number of flushed records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been flushed.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Recorder for BufferedRecorder {
    /// Write a [`Record`] to the buffer.
    fn write(&mut self, record: Record) {
        self.buf.push(record);
    }

    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        let mut record = self.storage.aggregate();
        record.insert("episode", super::RecordValue::Scalar(step as _));
        self.buf.push(record);
    }
}
