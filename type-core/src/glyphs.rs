//! Pre-rendered Title Glyphs
//!
//! Titles are not typeset from a font at runtime.  Instead every combination of title,
//! variant and weight is rendered ahead of time and stored in a JSON object mapping
//! [`GlyphKey`](../style/struct.GlyphKey.html) strings to markup.
use crate::error::Result;
use crate::style;
use std::collections;

#[derive(Debug, Clone, Default)]
pub struct GlyphDictionary {
    glyphs: collections::HashMap<String, String>,
}

impl GlyphDictionary {
    pub fn new(glyphs: collections::HashMap<String, String>) -> GlyphDictionary {
        GlyphDictionary { glyphs }
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<GlyphDictionary> {
        let glyphs = serde_json::from_reader(reader)?;

        Ok(GlyphDictionary { glyphs })
    }

    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<GlyphDictionary> {
        let file = std::fs::File::open(path)?;

        GlyphDictionary::from_reader(std::io::BufReader::new(file))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Markup for `key`, or an empty string if there is none
    pub fn resolve(&self, key: &style::GlyphKey) -> &str {
        match self.glyphs.get(&key.to_string()) {
            Some(g) => g.as_str(),
            None => {
                log::debug!("No glyph for {:?}", key.to_string());
                ""
            }
        }
    }
}

/// Typesetter resolving keys against a `GlyphDictionary`
#[derive(Debug, Clone, Default)]
pub struct GlyphTitle {
    dictionary: GlyphDictionary,
    key: Option<style::GlyphKey>,
    text: String,
}

impl GlyphTitle {
    pub fn new(dictionary: GlyphDictionary) -> GlyphTitle {
        GlyphTitle {
            dictionary,
            key: None,
            text: String::new(),
        }
    }

    /// Markup currently shown, empty if the last key had no glyph
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn key(&self) -> Option<&style::GlyphKey> {
        self.key.as_ref()
    }
}

impl style::Typesetter for GlyphTitle {
    fn typeset(&mut self, key: &style::GlyphKey) {
        self.text.clear();
        self.text.push_str(self.dictionary.resolve(key));
        self.key = Some(key.clone());
    }
}
