use crate::analyzer;
use crate::channel;
use crate::error::Result;

/// A source that never publishes anything
///
/// Every buffer reads as all zeros.  Handy when there is no audio to analyze but the
/// waveform and title should still be up.
#[derive(Debug, Default)]
pub struct SilentSource {
    writer: Option<analyzer::MagnitudeWriter>,
}

impl SilentSource {
    pub fn new() -> SilentSource {
        Default::default()
    }
}

impl super::Source for SilentSource {
    fn load(
        &mut self,
        channel: &channel::Channel,
        length: usize,
    ) -> Result<analyzer::MagnitudeReader> {
        log::debug!("SilentSource: {:?}", channel.title);

        let (writer, reader) = analyzer::magnitude_channel(length);
        self.writer = Some(writer);

        Ok(reader)
    }

    fn stop(&mut self) {
        self.writer = None;
    }
}
