//! Band Table and Aggregation
use crate::analyzer::{Amplitude, Magnitude};
use crate::error::{Error, Result};

/// Font weight associated with a band, CSS style (`100..=900`)
pub type Weight = u32;

/// A contiguous range of magnitude indices, tagged with a font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Band {
    /// First index, inclusive
    pub start: usize,
    /// Last index, inclusive
    pub end: usize,
    pub weight: Weight,
}

impl Band {
    pub const fn new(start: usize, end: usize, weight: Weight) -> Band {
        Band { start, end, weight }
    }

    /// Divisor used for the band average
    ///
    /// This is `end - start`, **not** the number of indices in the band.
    #[inline]
    pub fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Average the magnitudes covered by this band
    ///
    /// Returns `None` if there is no sensible value, ie. for a zero-width band or a band
    /// reaching past the end of `buf`.
    ///
    /// # Example
    /// ```
    /// # use type_core::analyzer::Band;
    /// let band = Band::new(0, 31, 900);
    /// let avg = band.aggregate(&[10; 64]).unwrap();
    /// assert!((avg - 320.0 / 31.0).abs() < 1e-5);
    /// ```
    pub fn aggregate(&self, buf: &[Magnitude]) -> Option<Amplitude> {
        let slice = buf.get(self.start..=self.end)?;
        let sum = slice.iter().map(|m| *m as u32).sum::<u32>();

        let amplitude = sum as Amplitude / self.width() as Amplitude;

        if amplitude.is_finite() {
            Some(amplitude)
        } else {
            None
        }
    }
}

/// The default band layout for 1024 magnitudes, heavy weights on the low end
pub const DEFAULT_BANDS: [Band; 9] = [
    Band::new(0, 31, 900),
    Band::new(32, 63, 800),
    Band::new(64, 95, 700),
    Band::new(96, 127, 600),
    Band::new(128, 159, 500),
    Band::new(160, 191, 400),
    Band::new(192, 255, 300),
    Band::new(256, 511, 200),
    Band::new(512, 1023, 100),
];

/// Ordered, non-overlapping set of bands over a magnitude buffer
#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    bands: Vec<Band>,
}

impl BandTable {
    /// Validate `bands` against a buffer of `length` magnitudes
    pub fn new(bands: Vec<Band>, length: usize) -> Result<BandTable> {
        if bands.is_empty() {
            return Err(Error::EmptyBandTable);
        }

        for (index, band) in bands.iter().enumerate() {
            if band.start > band.end {
                return Err(Error::InvertedBand {
                    index,
                    start: band.start,
                    end: band.end,
                });
            }

            if band.end >= length {
                return Err(Error::band_out_of_range(index, band, length));
            }
        }

        for (previous, pair) in bands.windows(2).enumerate() {
            if pair[1].start <= pair[0].end {
                return Err(Error::UnorderedBand {
                    index: previous + 1,
                    previous,
                });
            }
        }

        Ok(BandTable { bands })
    }

    /// The default table, see [`DEFAULT_BANDS`](constant.DEFAULT_BANDS.html)
    pub fn default_table() -> BandTable {
        BandTable {
            bands: DEFAULT_BANDS.to_vec(),
        }
    }

    /// Return the number of bands
    #[inline]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn iter<'a>(&'a self) -> std::slice::Iter<'a, Band> {
        self.bands.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Band> {
        self.bands.get(index)
    }
}

impl std::ops::Index<usize> for BandTable {
    type Output = Band;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bands[index]
    }
}

/// Reduces a magnitude buffer to one amplitude per band
///
/// Keeps its output buffer around so aggregating does not allocate per frame.
#[derive(Debug, Clone)]
pub struct BandAggregator {
    amplitudes: Vec<Amplitude>,
    invalid: u64,
}

impl BandAggregator {
    pub fn new(bands: usize) -> BandAggregator {
        BandAggregator {
            amplitudes: vec![0.0; bands],
            invalid: 0,
        }
    }

    /// Aggregate `buf` over all bands of `table`
    ///
    /// Bands without a sensible average read as `0.0` and are counted in
    /// [`invalid()`](#method.invalid).
    pub fn aggregate(&mut self, table: &BandTable, buf: &[Magnitude]) -> &[Amplitude] {
        self.amplitudes.resize(table.len(), 0.0);

        for (i, (amp, band)) in self.amplitudes.iter_mut().zip(table.iter()).enumerate() {
            *amp = match band.aggregate(buf) {
                Some(a) => a,
                None => {
                    self.invalid += 1;
                    log::trace!(
                        "Band {} ({}..={}) has no valid average, using 0",
                        i,
                        band.start,
                        band.end
                    );
                    0.0
                }
            };
        }

        &self.amplitudes
    }

    /// Amplitudes from the last call to `aggregate`
    pub fn amplitudes(&self) -> &[Amplitude] {
        &self.amplitudes
    }

    /// Number of band averages that were replaced by `0.0` so far
    pub fn invalid(&self) -> u64 {
        self.invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aggregate_width_quirk() {
        let band = Band::new(0, 31, 900);

        assert_eq!(band.width(), 31);
        assert_relative_eq!(band.aggregate(&[10; 1024]).unwrap(), 320.0 / 31.0);
    }

    #[test]
    fn test_zero_width() {
        let band = Band::new(5, 5, 100);

        assert_eq!(band.aggregate(&[200; 16]), None);
        assert_eq!(band.aggregate(&[0; 16]), None);

        let table = BandTable::new(vec![band], 16).unwrap();
        let mut aggregator = BandAggregator::new(table.len());
        let amps = aggregator.aggregate(&table, &[200; 16]).to_vec();

        assert_eq!(amps, vec![0.0]);
        assert_eq!(aggregator.invalid(), 1);
    }

    #[test]
    fn test_short_buffer() {
        let band = Band::new(8, 15, 100);

        assert_eq!(band.aggregate(&[1; 10]), None);
    }

    #[test]
    fn test_default_table() {
        let table = BandTable::new(DEFAULT_BANDS.to_vec(), 1024).unwrap();

        assert_eq!(table, BandTable::default_table());
        assert_eq!(table.len(), 9);
        assert_eq!(table[0].weight, 900);
        assert_eq!(table[8].end, 1023);
    }

    #[test]
    fn test_table_validation() {
        match BandTable::new(vec![], 16) {
            Err(Error::EmptyBandTable) => (),
            r => panic!("unexpected: {:?}", r),
        }

        match BandTable::new(vec![Band::new(4, 2, 100)], 16) {
            Err(Error::InvertedBand { index: 0, .. }) => (),
            r => panic!("unexpected: {:?}", r),
        }

        match BandTable::new(vec![Band::new(0, 7, 100), Band::new(8, 16, 200)], 16) {
            Err(Error::BandOutOfRange { index: 1, end: 16, length: 16 }) => (),
            r => panic!("unexpected: {:?}", r),
        }

        match BandTable::new(vec![Band::new(0, 7, 100), Band::new(7, 9, 200)], 16) {
            Err(Error::UnorderedBand { index: 1, previous: 0 }) => (),
            r => panic!("unexpected: {:?}", r),
        }
    }

    #[test]
    fn test_aggregate_default() {
        let table = BandTable::default_table();
        let mut aggregator = BandAggregator::new(table.len());

        let buf = (0..1024).map(|i| (i / 4) as Magnitude).collect::<Vec<_>>();
        let amps = aggregator.aggregate(&table, &buf).to_vec();

        assert_eq!(amps.len(), 9);
        for (amp, band) in amps.iter().zip(table.iter()) {
            let sum = buf[band.start..=band.end].iter().map(|m| *m as f32).sum::<f32>();
            assert_relative_eq!(*amp, sum / band.width() as f32);
        }
        assert_eq!(aggregator.invalid(), 0);
    }
}
