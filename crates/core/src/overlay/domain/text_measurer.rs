/// Measures rendered text width for label sizing.
pub trait TextMeasurer: Send + Sync {
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// Average advance of a sans-serif glyph relative to the font size.
pub const DEFAULT_EM_RATIO: f64 = 0.6;

/// Font-free estimate: every character advances `em_ratio * font_size`.
pub struct ApproximateTextMeasurer {
    em_ratio: f64,
}

impl ApproximateTextMeasurer {
    pub fn new(em_ratio: f64) -> Self {
        Self { em_ratio }
    }
}

impl Default for ApproximateTextMeasurer {
    fn default() -> Self {
        Self::new(DEFAULT_EM_RATIO)
    }
}

impl TextMeasurer for ApproximateTextMeasurer {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * self.em_ratio * font_size
    }
}
