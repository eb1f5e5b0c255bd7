//! Band analysis of magnitude buffers
pub mod bands;
pub mod delta;
pub mod history;
pub mod magnitudes;

/// Type Alias for band amplitudes (averaged magnitudes)
pub type Amplitude = f32;

pub use self::bands::{Band, BandAggregator, BandTable, Weight, DEFAULT_BANDS};
pub use self::delta::{max_index, Deltas};
pub use self::history::{BandHistory, Statistics};
pub use self::magnitudes::{
    magnitude_channel, Magnitude, MagnitudeReader, MagnitudeWriter, MAGNITUDE_MAX,
};
