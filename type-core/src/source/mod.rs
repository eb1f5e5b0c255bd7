pub mod silent;
pub mod synthetic;

use crate::analyzer;
use crate::channel;
use crate::error::{Error, Result};

/// Playback side of a channel
///
/// A source plays a channel and publishes its magnitude buffers.  The engine never
/// talks to the audio graph directly, it only reads what the source hands out.
pub trait Source: std::fmt::Debug {
    /// Stop whatever is playing and start `channel`
    ///
    /// Returns the reader for the new channel's magnitudes.  Buffers read from it must be
    /// `length` magnitudes long.
    fn load(
        &mut self,
        channel: &channel::Channel,
        length: usize,
    ) -> Result<analyzer::MagnitudeReader>;

    /// Stop playback
    ///
    /// Readers handed out earlier stay valid but will not see new data.
    fn stop(&mut self);

    /// Synchronize with frame time `_time`
    ///
    /// Returns true as long as new magnitudes are available
    ///
    /// Async sources will always return true and ignore this call otherwise
    fn sync(&mut self, _time: f32) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceBuilder {
    pub kind: Option<String>,
    pub fps: Option<u32>,
}

impl SourceBuilder {
    pub fn new() -> SourceBuilder {
        Default::default()
    }

    /// Select the source implementation by name
    ///
    /// Can also be set from config as `"source.kind"`.
    pub fn kind<S: Into<String>>(&mut self, kind: S) -> &mut SourceBuilder {
        self.kind = Some(kind.into());
        self
    }

    /// Set the rate at which new magnitude buffers get published
    ///
    /// Can also be set from config as `"source.fps"`.
    pub fn fps(&mut self, fps: u32) -> &mut SourceBuilder {
        self.fps = Some(fps);
        self
    }

    pub fn build(&mut self) -> Result<Box<dyn Source>> {
        let kind = self
            .kind
            .clone()
            .unwrap_or_else(|| crate::CONFIG.get_or("source.kind", "synthetic".to_string()));
        let fps = self
            .fps
            .unwrap_or_else(|| crate::CONFIG.get_or("source.fps", 60));

        log::debug!("Source: {} @ {} fps", kind, fps);

        match &*kind {
            "synthetic" => Ok(Box::new(
                synthetic::SyntheticBuilder {
                    fps: Some(fps),
                    ..Default::default()
                }
                .build(),
            )),

            "silent" => Ok(Box::new(silent::SilentSource::new())),

            _ => Err(Error::UnknownSource(kind.clone())),
        }
    }
}
