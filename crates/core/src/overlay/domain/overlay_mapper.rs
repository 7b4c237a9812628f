use crate::shared::constants::{LABEL_FONT_SIZE, LABEL_PADDING};
use crate::shared::detection::Detection;

use super::display_geometry::{DisplayGeometry, OverlayError};
use super::overlay_instruction::{LabelPlacement, OverlayInstruction, OverlayLabel, Rect};
use super::text_measurer::{ApproximateTextMeasurer, TextMeasurer};

/// Label font size and padding, in display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    pub font_size: f64,
    pub padding: f64,
}

impl LabelStyle {
    pub fn label_height(&self) -> f64 {
        self.font_size + self.padding * 2.0
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: LABEL_FONT_SIZE,
            padding: LABEL_PADDING,
        }
    }
}

/// Translates detections from source-image pixels into display-space
/// drawing instructions.
///
/// Output order always matches input order. Labels sit above their box
/// unless that would clip at the top of the display, in which case they
/// flip below the box (or inside it when there is no room below either).
pub struct OverlayMapper {
    style: LabelStyle,
    measurer: Box<dyn TextMeasurer>,
}

impl OverlayMapper {
    pub fn new(style: LabelStyle, measurer: Box<dyn TextMeasurer>) -> Self {
        Self { style, measurer }
    }

    pub fn style(&self) -> LabelStyle {
        self.style
    }

    pub fn map(
        &self,
        detections: &[Detection],
        geometry: &DisplayGeometry,
    ) -> Result<Vec<OverlayInstruction>, OverlayError> {
        let (scale_x, scale_y) = geometry.scale()?;

        Ok(detections
            .iter()
            .filter(|d| {
                let finite = d.has_finite_box();
                if !finite {
                    log::warn!("Skipping detection '{}' with non-finite box {:?}", d.name, d.bbox);
                }
                finite
            })
            .map(|d| {
                let [x1, y1, x2, y2] = d.normalized_box();
                let rect = Rect::from_corners(x1 * scale_x, y1 * scale_y, x2 * scale_x, y2 * scale_y);
                OverlayInstruction {
                    rect,
                    label: self.place_label(&d.name, &rect, geometry),
                    score: d.score,
                }
            })
            .collect())
    }

    fn place_label(&self, text: &str, rect: &Rect, geometry: &DisplayGeometry) -> OverlayLabel {
        let padding = self.style.padding;
        let height = self.style.label_height();
        let width = self.measurer.text_width(text, self.style.font_size) + padding * 2.0;

        let (top, placement) = if rect.y >= height {
            (rect.y - height, LabelPlacement::Above)
        } else if rect.bottom() + height <= geometry.displayed_height {
            (rect.bottom(), LabelPlacement::Below)
        } else {
            (rect.y, LabelPlacement::Inside)
        };

        // Keep the label inside the right edge without pushing it past x = 0.
        let max_x = (geometry.displayed_width - width).max(0.0);
        let x = rect.x.min(max_x).max(0.0);

        OverlayLabel {
            text: text.to_string(),
            background: Rect {
                x,
                y: top,
                width,
                height,
            },
            text_x: x + padding,
            text_baseline: top + height - padding,
            placement,
        }
    }
}

impl Default for OverlayMapper {
    fn default() -> Self {
        Self::new(
            LabelStyle::default(),
            Box::new(ApproximateTextMeasurer::default()),
        )
    }
}

/// Maps detections with the default label style and text measurer.
pub fn compute_overlay(
    detections: &[Detection],
    geometry: &DisplayGeometry,
) -> Result<Vec<OverlayInstruction>, OverlayError> {
    OverlayMapper::default().map(detections, geometry)
}
