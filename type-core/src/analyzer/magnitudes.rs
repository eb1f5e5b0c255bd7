//! Magnitude Handoff
//!
//! The audio side overwrites its magnitude buffer every frame.  Instead of sharing that
//! array, the producer publishes copies through a triple buffer and the engine takes a
//! snapshot at the start of each tick.  The reader never blocks and always sees the
//! latest complete buffer; if nothing new was published it sees the previous one again.

/// A single frequency-domain magnitude, `0..=255`
pub type Magnitude = u8;

/// Largest value a `Magnitude` can take, as used for scaling
pub const MAGNITUDE_MAX: f32 = 255.0;

/// Create a connected writer/reader pair for buffers of `length` magnitudes
///
/// # Example
/// ```
/// # use type_core::analyzer;
/// let (mut writer, mut reader) = analyzer::magnitude_channel(4);
///
/// writer.publish(&[1, 2, 3, 4]);
/// assert_eq!(reader.read(), &[1, 2, 3, 4]);
/// ```
pub fn magnitude_channel(length: usize) -> (MagnitudeWriter, MagnitudeReader) {
    let (input, output) = triple_buffer::TripleBuffer::new(vec![0; length]).split();

    (
        MagnitudeWriter { input, length },
        MagnitudeReader { output, length },
    )
}

/// Producer half of the magnitude handoff
pub struct MagnitudeWriter {
    input: triple_buffer::Input<Vec<Magnitude>>,
    length: usize,
}

impl std::fmt::Debug for MagnitudeWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "MagnitudeWriter {{ length: {:?} }}", self.length)
    }
}

impl MagnitudeWriter {
    /// Length of the buffers this writer publishes
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Publish a new buffer
    ///
    /// Data beyond the buffer length is dropped, a short buffer is padded with zeros.
    pub fn publish(&mut self, data: &[Magnitude]) {
        let length = self.length;
        let buf = self.input.raw_input_buffer();

        // The back buffer still holds an older frame, overwrite all of it
        buf.clear();
        buf.extend_from_slice(&data[..data.len().min(length)]);
        buf.resize(length, 0);

        self.input.raw_publish();
    }

    /// Fill the back buffer in place and publish it
    ///
    /// The closure sees whatever the back buffer held before, not the last published frame.
    pub fn publish_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut [Magnitude]),
    {
        let length = self.length;
        let buf = self.input.raw_input_buffer();
        buf.resize(length, 0);

        f(&mut buf[..]);

        self.input.raw_publish();
    }
}

/// Consumer half of the magnitude handoff
pub struct MagnitudeReader {
    output: triple_buffer::Output<Vec<Magnitude>>,
    length: usize,
}

impl std::fmt::Debug for MagnitudeReader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "MagnitudeReader {{ length: {:?} }}", self.length)
    }
}

impl MagnitudeReader {
    /// Length of the buffers this reader receives
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Borrow the latest published buffer
    pub fn read(&mut self) -> &[Magnitude] {
        &self.output.read()[..]
    }

    /// Copy the latest published buffer into `snapshot`
    ///
    /// `snapshot` is resized to the reader's length.
    pub fn snapshot_into(&mut self, snapshot: &mut Vec<Magnitude>) {
        let latest = self.output.read();

        snapshot.clear();
        snapshot.extend_from_slice(latest);
    }
}
