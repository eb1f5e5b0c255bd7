//! Errors
use crate::analyzer;

/// Errors raised while setting up the engine or switching channels
///
/// Nothing in here is raised from inside a frame; per-frame work is total.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("band table is empty")]
    EmptyBandTable,

    #[error("band {index} is inverted ({start} > {end})")]
    InvertedBand {
        index: usize,
        start: usize,
        end: usize,
    },

    #[error("band {index} ends at {end}, outside a buffer of {length} magnitudes")]
    BandOutOfRange {
        index: usize,
        end: usize,
        length: usize,
    },

    #[error("band {index} overlaps or precedes band {previous}")]
    UnorderedBand { index: usize, previous: usize },

    #[error("italic band {index} is not in a table of {bands} bands")]
    UnknownItalicBand { index: usize, bands: usize },

    #[error("channel list is empty")]
    NoChannels,

    #[error("channel {index} does not exist ({channels} channels)")]
    UnknownChannel { index: usize, channels: usize },

    #[error("source kind {0:?} does not exist")]
    UnknownSource(String),

    #[error("source failed to load {title:?}: {message}")]
    Source { title: String, message: String },

    #[error("history needs room for at least one value")]
    ZeroHistory,

    #[error("style interval must be longer than zero")]
    ZeroInterval,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn source_failed(title: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Source {
            title: title.into(),
            message: message.into(),
        }
    }

    pub(crate) fn band_out_of_range(index: usize, band: &analyzer::Band, length: usize) -> Self {
        Error::BandOutOfRange {
            index,
            end: band.end,
            length,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
