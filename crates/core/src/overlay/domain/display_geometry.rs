use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverlayError {
    #[error(
        "invalid display geometry: natural {natural_width}x{natural_height}, \
         displayed {displayed_width}x{displayed_height}"
    )]
    InvalidGeometry {
        natural_width: f64,
        natural_height: f64,
        displayed_width: f64,
        displayed_height: f64,
    },
}

/// Natural (decoded) and displayed (on-screen) size of a photo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayGeometry {
    pub natural_width: f64,
    pub natural_height: f64,
    pub displayed_width: f64,
    pub displayed_height: f64,
}

impl DisplayGeometry {
    pub fn new(
        natural_width: f64,
        natural_height: f64,
        displayed_width: f64,
        displayed_height: f64,
    ) -> Self {
        Self {
            natural_width,
            natural_height,
            displayed_width,
            displayed_height,
        }
    }

    /// Geometry for a photo shown `displayed_width` wide with its aspect ratio kept.
    pub fn fit_width(natural_width: u32, natural_height: u32, displayed_width: u32) -> Self {
        let displayed_height = if natural_width == 0 {
            0.0
        } else {
            (natural_height as f64 * displayed_width as f64 / natural_width as f64).round()
        };
        Self::new(
            natural_width as f64,
            natural_height as f64,
            displayed_width as f64,
            displayed_height,
        )
    }

    /// `(scale_x, scale_y)` from natural to displayed pixels.
    ///
    /// Natural dimensions must be positive and finite; displayed dimensions
    /// must be non-negative and finite.
    pub fn scale(&self) -> Result<(f64, f64), OverlayError> {
        let natural_ok = |v: f64| v.is_finite() && v > 0.0;
        let displayed_ok = |v: f64| v.is_finite() && v >= 0.0;
        if !natural_ok(self.natural_width)
            || !natural_ok(self.natural_height)
            || !displayed_ok(self.displayed_width)
            || !displayed_ok(self.displayed_height)
        {
            return Err(OverlayError::InvalidGeometry {
                natural_width: self.natural_width,
                natural_height: self.natural_height,
                displayed_width: self.displayed_width,
                displayed_height: self.displayed_height,
            });
        }
        Ok((
            self.displayed_width / self.natural_width,
            self.displayed_height / self.natural_height,
        ))
    }
}
