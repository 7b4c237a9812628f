/// Axis-aligned rectangle in display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Where a label ended up relative to its box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPlacement {
    Above,
    /// Flipped because the box touches the top of the display.
    Below,
    /// No room above or below; drawn along the inside of the top edge.
    Inside,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLabel {
    pub text: String,
    pub background: Rect,
    pub text_x: f64,
    /// Baseline of the text, as used by canvas `fillText`.
    pub text_baseline: f64,
    pub placement: LabelPlacement,
}

/// Drawing instruction for one detection in display coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayInstruction {
    pub rect: Rect,
    pub label: OverlayLabel,
    pub score: f64,
}
