//! Font descriptor for text rasterization.

/// Font configuration for committed text.
///
/// `weight` and `slant` are raw variable-font axis values (`wght`, `slnt`);
/// they are handed to Pango untouched, so the rasterized glyph matches the
/// axis values rather than any rounded CSS weight.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Arial")
    pub family: String,

    /// Raw `wght` axis value
    pub weight: f64,

    /// Raw `slnt` axis value in degrees; positive values also select oblique style
    pub slant: f64,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, weight: f64, slant: f64) -> Self {
        Self {
            family: family.into(),
            weight,
            slant,
        }
    }

    /// Builds the Pango description for a pixel font size.
    pub fn to_pango(&self, size_px: f64) -> pango::FontDescription {
        let mut desc = pango::FontDescription::new();
        desc.set_family(&self.family);
        desc.set_absolute_size(size_px.max(1.0) * pango::SCALE as f64);
        if self.slant > 0.0 {
            desc.set_style(pango::Style::Oblique);
        }
        desc.set_variations(Some(&self.variations()));
        desc
    }

    /// Font variation string, e.g. `wght=60,slnt=0`.
    pub fn variations(&self) -> String {
        format!("wght={},slnt={}", self.weight, self.slant)
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: 60.0,
            slant: 0.0,
        }
    }
}
