//! Rolling Band Statistics
use crate::analyzer::Amplitude;
use std::collections;

/// Bounded FIFO of recent non-zero amplitudes of one band
///
/// A fresh history holds a single `0.0` seed so the mean is defined before any audio
/// arrived.  The first admitted value replaces the seed.
#[derive(Debug, Clone)]
pub struct BandHistory {
    values: collections::VecDeque<Amplitude>,
    capacity: usize,
    seeded: bool,
}

impl BandHistory {
    pub fn new(capacity: usize) -> BandHistory {
        assert!(capacity > 0, "History needs room for at least one value!");

        let mut h = BandHistory {
            values: collections::VecDeque::with_capacity(capacity + 1),
            capacity,
            seeded: false,
        };
        h.clear();
        h
    }

    /// Reset to the single seed value
    pub fn clear(&mut self) {
        self.values.clear();
        self.values.push_back(0.0);
        self.seeded = true;
    }

    /// Admit `value` unless it is zero or not finite
    ///
    /// Returns whether the value was admitted.
    pub fn push(&mut self, value: Amplitude) -> bool {
        if value == 0.0 || !value.is_finite() {
            return false;
        }

        if self.seeded {
            self.values.clear();
            self.seeded = false;
        }

        self.values.push_back(value);
        if self.values.len() > self.capacity {
            self.values.pop_front();
        }

        true
    }

    /// Arithmetic mean of the retained values
    pub fn mean(&self) -> Amplitude {
        self.values.iter().sum::<Amplitude>() / self.values.len() as Amplitude
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether only the seed is held
    #[inline]
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Iterate over the retained values, oldest first
    pub fn iter<'a>(&'a self) -> collections::vec_deque::Iter<'a, Amplitude> {
        self.values.iter()
    }
}

/// One [`BandHistory`](struct.BandHistory.html) per band
#[derive(Debug, Clone)]
pub struct Statistics {
    histories: Vec<BandHistory>,
}

impl Statistics {
    pub fn new(bands: usize, capacity: usize) -> Statistics {
        Statistics {
            histories: vec![BandHistory::new(capacity); bands],
        }
    }

    /// Add an amplitude to a band's history
    ///
    /// Zero and non-finite amplitudes are ignored.
    ///
    /// # Panics
    /// If `band` is out of range.
    pub fn push(&mut self, band: usize, value: Amplitude) -> bool {
        self.histories[band].push(value)
    }

    /// Push one amplitude per band
    pub fn push_all(&mut self, amplitudes: &[Amplitude]) {
        for (h, a) in self.histories.iter_mut().zip(amplitudes.iter()) {
            h.push(*a);
        }
    }

    /// Mean of a band's history
    ///
    /// # Panics
    /// If `band` is out of range.
    pub fn mean(&self, band: usize) -> Amplitude {
        self.histories[band].mean()
    }

    /// Reset every band to the seed value
    ///
    /// Call this whenever the audio source changes so the previous source's levels do not
    /// leak into the new baseline.
    pub fn clear(&mut self) {
        for h in self.histories.iter_mut() {
            h.clear();
        }
    }

    /// Return the number of bands
    #[inline]
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn history(&self, band: usize) -> &BandHistory {
        &self.histories[band]
    }
}

impl std::ops::Index<usize> for Statistics {
    type Output = BandHistory;

    fn index(&self, index: usize) -> &Self::Output {
        &self.histories[index]
    }
}
