//! Band Deltas
use crate::analyzer::{self, Amplitude};

/// Per-band difference between the rolling mean and the current amplitude
///
/// A positive delta means the band is quieter than it usually is.
#[derive(Debug, Clone, Default)]
pub struct Deltas {
    means: Vec<Amplitude>,
    deltas: Vec<Amplitude>,
}

impl Deltas {
    pub fn new(bands: usize) -> Deltas {
        Deltas {
            means: vec![0.0; bands],
            deltas: vec![0.0; bands],
        }
    }

    /// Recompute means and deltas from `stats` and this frame's `amplitudes`
    pub fn update(&mut self, stats: &analyzer::Statistics, amplitudes: &[Amplitude]) {
        debug_assert_eq!(stats.len(), amplitudes.len(), "Band counts differ!");

        self.means.clear();
        self.deltas.clear();

        for (band, amp) in amplitudes.iter().enumerate() {
            let mean = stats.mean(band);

            self.means.push(mean);
            self.deltas.push(mean - amp);
        }
    }

    pub fn means(&self) -> &[Amplitude] {
        &self.means
    }

    pub fn deltas(&self) -> &[Amplitude] {
        &self.deltas
    }

    pub fn delta(&self, band: usize) -> Option<Amplitude> {
        self.deltas.get(band).cloned()
    }

    /// Index of the band with the largest delta
    ///
    /// On ties the *last* band wins.  Returns `None` if there are no bands.
    pub fn max_band(&self) -> Option<usize> {
        max_index(&self.deltas)
    }
}

/// Index of the largest value, preferring later indices on ties
///
/// Scans with `>=` so ties go to the last band.  A `>` scan would give them to the first
/// one and pick a different weight.
pub fn max_index(values: &[Amplitude]) -> Option<usize> {
    let mut best = None;
    let mut max = 0.0;

    for (i, v) in values.iter().cloned().enumerate() {
        if best.is_none() || v >= max {
            best = Some(i);
            max = v;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_index() {
        assert_eq!(max_index(&[]), None);
        assert_eq!(max_index(&[1.0]), Some(0));
        assert_eq!(max_index(&[1.0, 3.0, 2.0]), Some(1));
        assert_eq!(max_index(&[-4.0, -2.0, -3.0]), Some(1));
    }

    #[test]
    fn test_tie_last_wins() {
        assert_eq!(max_index(&[5.0, 1.0, 5.0, 2.0]), Some(2));
        assert_eq!(max_index(&[0.0; 9]), Some(8));
    }

    #[test]
    fn test_update() {
        let mut stats = analyzer::Statistics::new(3, 128);
        for _ in 0..10 {
            stats.push(0, 5.0);
            stats.push(1, 2.0);
        }

        let mut deltas = Deltas::new(3);
        deltas.update(&stats, &[2.0, 2.0, 1.0]);

        assert_eq!(deltas.means(), &[5.0, 2.0, 0.0]);
        assert_eq!(deltas.deltas(), &[3.0, 0.0, -1.0]);
        assert_eq!(deltas.delta(2), Some(-1.0));
        assert_eq!(deltas.delta(3), None);
        assert_eq!(deltas.max_band(), Some(0));
    }
}
