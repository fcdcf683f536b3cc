use super::Record;

/// Writes records to an output destination.
///
/// Records can either be written directly with [`Recorder::write`] or stored
/// with [`Recorder::store`] and written in aggregated form by
/// [`Recorder::flush`].
pub trait Recorder {
    /// Write a record to the [`Recorder`].
    fn write(&mut self, record: Record);

    /// Store the record for later aggregation.
    fn store(&mut self, record: Record);

    /// Writes values aggregated from the stored records.
    ///
    /// `step` is the training progress (here, completed episodes) the
    /// aggregate belongs to.
    fn flush(&mut self, step: i64);
}
