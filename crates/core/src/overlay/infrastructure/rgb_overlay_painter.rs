use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect as PixelRect;

use crate::overlay::domain::overlay_instruction::{OverlayInstruction, Rect};
use crate::overlay::domain::overlay_painter::OverlayPainter;
use crate::shared::constants::LABEL_FONT_SIZE;
use crate::shared::photo::Photo;

/// Dashboard primary blue (`#3b82f6`).
pub const DEFAULT_BOX_COLOR: [u8; 3] = [0x3b, 0x82, 0xf6];
pub const DEFAULT_TEXT_COLOR: [u8; 3] = [0xff, 0xff, 0xff];
pub const DEFAULT_STROKE_WIDTH: u32 = 3;

const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// CPU painter that strokes each box, fills its label tag and writes the
/// student's name on the tag.
///
/// Without a font the tags are painted blank.
pub struct RgbOverlayPainter {
    color: [u8; 3],
    text_color: [u8; 3],
    stroke_width: u32,
    font: Option<FontArc>,
    font_size: f32,
}

impl RgbOverlayPainter {
    pub fn new(color: [u8; 3], stroke_width: u32) -> Self {
        Self {
            color,
            text_color: DEFAULT_TEXT_COLOR,
            stroke_width: stroke_width.max(1),
            font: None,
            font_size: LABEL_FONT_SIZE as f32,
        }
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn load_font(path: &Path) -> Result<FontArc, Box<dyn std::error::Error>> {
        let bytes = std::fs::read(path)?;
        Ok(FontArc::try_from_vec(bytes)?)
    }

    /// First readable sans-serif font from the usual system locations.
    pub fn system_font() -> Option<FontArc> {
        SYSTEM_FONT_PATHS.iter().find_map(|candidate| {
            let path = Path::new(candidate);
            if !path.exists() {
                return None;
            }
            match Self::load_font(path) {
                Ok(font) => {
                    log::debug!("Using label font {}", path.display());
                    Some(font)
                }
                Err(e) => {
                    log::warn!("Skipping label font {}: {e}", path.display());
                    None
                }
            }
        })
    }
}

impl Default for RgbOverlayPainter {
    /// Box colour and stroke from the dashboard, with a system font if one
    /// can be found.
    fn default() -> Self {
        let painter = Self::new(DEFAULT_BOX_COLOR, DEFAULT_STROKE_WIDTH);
        match Self::system_font() {
            Some(font) => painter.with_font(font),
            None => {
                log::warn!("No system font found; label tags will be drawn without names");
                painter
            }
        }
    }
}

/// Rounds a display-space rect and clips it to the image.
fn pixel_rect(rect: &Rect, img: &RgbImage) -> Option<PixelRect> {
    let clamp = |v: f64, max: u32| v.round().clamp(0.0, max as f64) as u32;
    let x0 = clamp(rect.x, img.width());
    let y0 = clamp(rect.y, img.height());
    let x1 = clamp(rect.right(), img.width());
    let y1 = clamp(rect.bottom(), img.height());
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(PixelRect::at(x0 as i32, y0 as i32).of_size(x1 - x0, y1 - y0))
}

impl RgbOverlayPainter {
    /// Draws `stroke_width` nested outlines, growing inwards.
    fn stroke(&self, img: &mut RgbImage, rect: PixelRect) {
        for inset in 0..self.stroke_width {
            let (Some(width), Some(height)) = (
                rect.width().checked_sub(2 * inset),
                rect.height().checked_sub(2 * inset),
            ) else {
                break;
            };
            if width == 0 || height == 0 {
                break;
            }
            let ring = PixelRect::at(rect.left() + inset as i32, rect.top() + inset as i32)
                .of_size(width, height);
            draw_hollow_rect_mut(img, ring, Rgb(self.color));
        }
    }

    fn label(&self, img: &mut RgbImage, instruction: &OverlayInstruction) {
        let label = &instruction.label;
        let Some(background) = pixel_rect(&label.background, img) else {
            return;
        };
        draw_filled_rect_mut(img, background, Rgb(self.color));

        let Some(font) = &self.font else {
            return;
        };
        if label.text.is_empty() {
            return;
        }
        // draw_text_mut positions the top of the line box, canvas positions the baseline.
        let x = label.text_x.round() as i32;
        let y = (label.text_baseline - self.font_size as f64).round() as i32;
        draw_text_mut(
            img,
            Rgb(self.text_color),
            x,
            y,
            PxScale::from(self.font_size),
            font,
            &label.text,
        );
    }
}

impl OverlayPainter for RgbOverlayPainter {
    fn paint(
        &self,
        photo: &mut Photo,
        instructions: &[OverlayInstruction],
    ) -> Result<(), Box<dyn std::error::Error>> {
        if instructions.is_empty() {
            return Ok(());
        }

        let (width, height) = (photo.width(), photo.height());
        let mut img = RgbImage::from_raw(width, height, photo.data().to_vec())
            .ok_or("Failed to create image from photo data")?;

        for instruction in instructions {
            if let Some(rect) = pixel_rect(&instruction.rect, &img) {
                self.stroke(&mut img, rect);
            }
            self.label(&mut img, instruction);
        }

        *photo = Photo::new(img.into_raw(), width, height);
        Ok(())
    }
}
