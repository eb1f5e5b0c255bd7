//! Font Style Selection
use crate::analyzer::{self, Weight};
use crate::error::{Error, Result};

/// Font style variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Normal,
    Italic,
}

impl Variant {
    /// One-letter code used in glyph keys
    pub fn prefix(self) -> char {
        match self {
            Variant::Normal => 'n',
            Variant::Italic => 'i',
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Normal
    }
}

/// Current title style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleState {
    pub weight: Weight,
    pub variant: Variant,
}

impl Default for StyleState {
    fn default() -> Self {
        StyleState {
            weight: 300,
            variant: Variant::Normal,
        }
    }
}

impl StyleState {
    /// Glyph key for rendering `title` in this style
    pub fn key(&self, title: &str) -> GlyphKey {
        GlyphKey {
            title: title.to_string(),
            prefix: self.variant.prefix(),
            weight_code: self.weight / 100,
        }
    }
}

/// Lookup key for a pre-rendered title glyph
///
/// Formats as `{title}{prefix}{weight / 100}`, eg. `Dublini7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    pub title: String,
    pub prefix: char,
    pub weight_code: u32,
}

impl std::fmt::Display for GlyphKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}{}", self.title, self.prefix, self.weight_code)
    }
}

/// Receiver of title style updates
///
/// Implementations resolve the key to something displayable.  A key without a matching
/// glyph must result in an empty title, not an error.
pub trait Typesetter: std::fmt::Debug {
    fn typeset(&mut self, key: &GlyphKey);
}

/// Typesetter that only logs
#[derive(Debug, Default)]
pub struct LogTypesetter;

impl Typesetter for LogTypesetter {
    fn typeset(&mut self, key: &GlyphKey) {
        log::debug!("Title: {}", key);
    }
}

/// Picks the title style from band deltas
#[derive(Debug, Clone)]
pub struct StyleSelector {
    italic_band: usize,
    state: StyleState,
}

impl StyleSelector {
    /// Create a selector which switches to italic when band `italic_band` gets louder
    /// than its average
    pub fn new(italic_band: usize, table: &analyzer::BandTable) -> Result<StyleSelector> {
        if italic_band >= table.len() {
            return Err(Error::UnknownItalicBand {
                index: italic_band,
                bands: table.len(),
            });
        }

        Ok(StyleSelector {
            italic_band,
            state: StyleState::default(),
        })
    }

    pub fn state(&self) -> StyleState {
        self.state
    }

    pub fn italic_band(&self) -> usize {
        self.italic_band
    }

    /// Update the style from the latest deltas
    ///
    /// The weight follows the band with the largest delta (last one on ties), the variant
    /// turns italic while the italic band's delta is negative.  Without any bands the weight
    /// is kept.
    pub fn select(&mut self, table: &analyzer::BandTable, deltas: &analyzer::Deltas) -> StyleState {
        if let Some(band) = deltas.max_band().and_then(|i| table.get(i)) {
            self.state.weight = band.weight;
        }

        self.state.variant = match deltas.delta(self.italic_band) {
            Some(d) if d < 0.0 => Variant::Italic,
            _ => Variant::Normal,
        };

        log::trace!("Style: {:?}", self.state);

        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Band, BandTable, Deltas, Statistics};

    fn three_bands() -> BandTable {
        BandTable::new(
            vec![
                Band::new(0, 3, 900),
                Band::new(4, 7, 500),
                Band::new(8, 11, 100),
            ],
            12,
        )
        .unwrap()
    }

    fn deltas_for(means: &[f32], amplitudes: &[f32]) -> Deltas {
        let mut stats = Statistics::new(means.len(), 128);
        for (b, m) in means.iter().enumerate() {
            stats.push(b, *m);
        }

        let mut deltas = Deltas::new(means.len());
        deltas.update(&stats, amplitudes);
        deltas
    }

    #[test]
    fn test_key() {
        let state = StyleState {
            weight: 700,
            variant: Variant::Italic,
        };

        assert_eq!(state.key("Dublin").to_string(), "Dublini7");
        assert_eq!(StyleState::default().key("New York").to_string(), "New Yorkn3");
    }

    #[test]
    fn test_weight_follows_max() {
        let table = three_bands();
        let mut selector = StyleSelector::new(2, &table).unwrap();

        let state = selector.select(&table, &deltas_for(&[4.0, 4.0, 4.0], &[4.0, 1.0, 4.0]));
        assert_eq!(state.weight, 500);
    }

    #[test]
    fn test_tie_last_wins() {
        let table = three_bands();
        let mut selector = StyleSelector::new(2, &table).unwrap();

        let state = selector.select(&table, &deltas_for(&[6.0, 6.0, 1.0], &[2.0, 2.0, 1.0]));
        assert_eq!(state.weight, 500);
    }

    #[test]
    fn test_variant() {
        let table = three_bands();
        let mut selector = StyleSelector::new(2, &table).unwrap();

        let state = selector.select(&table, &deltas_for(&[1.0, 1.0, 3.0], &[1.0, 1.0, 4.0]));
        assert_eq!(state.variant, Variant::Italic);

        // Exactly zero stays normal
        let state = selector.select(&table, &deltas_for(&[1.0, 1.0, 3.0], &[1.0, 1.0, 3.0]));
        assert_eq!(state.variant, Variant::Normal);

        let state = selector.select(&table, &deltas_for(&[1.0, 1.0, 3.0], &[1.0, 1.0, 2.0]));
        assert_eq!(state.variant, Variant::Normal);
    }

    #[test]
    fn test_unknown_italic_band() {
        match StyleSelector::new(3, &three_bands()) {
            Err(Error::UnknownItalicBand { index: 3, bands: 3 }) => (),
            r => panic!("unexpected: {:?}", r),
        }
    }
}
