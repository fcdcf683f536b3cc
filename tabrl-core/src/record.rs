//! Types and traits for recording training diagnostics.
//!
//! * [`Record`] - a container for key-value pairs of various data types
//! * [`RecordValue`] - the types of values that can be stored
//! * [`Recorder`] - the interface for recording and storing data
//! * [`RecordStorage`] - storage with aggregation of scalar values
//! * [`BufferedRecorder`] - a recorder keeping flushed records in memory
//! * [`LogRecorder`] - a recorder emitting aggregates through the `log` facade
//! * [`NullRecorder`] - a recorder that discards all records
//!
//! The [`Trainer`](crate::Trainer) stores a record per optimization step and
//! per episode, and flushes aggregates at a configurable interval.
mod base;
mod buffered_recorder;
mod log_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use log_recorder::LogRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
pub use storage::RecordStorage;
