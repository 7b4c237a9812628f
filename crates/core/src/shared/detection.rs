use serde::{Deserialize, Serialize};

/// One recognized face as reported by the recognition backend.
///
/// `bbox` is `[x1, y1, x2, y2]` in source-image pixels. The backend does
/// not guarantee `x1 < x2` or `y1 < y2`; consumers normalise with
/// [`Detection::normalized_box`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub name: String,
    pub score: f64,
    #[serde(rename = "box")]
    pub bbox: [f64; 4],
}

impl Detection {
    pub fn new(name: impl Into<String>, score: f64, bbox: [f64; 4]) -> Self {
        Self {
            name: name.into(),
            score,
            bbox,
        }
    }

    /// Box with corners ordered so that `x1 <= x2` and `y1 <= y2`.
    pub fn normalized_box(&self) -> [f64; 4] {
        let [ax, ay, bx, by] = self.bbox;
        [ax.min(bx), ay.min(by), ax.max(bx), ay.max(by)]
    }

    pub fn has_finite_box(&self) -> bool {
        self.bbox.iter().all(|v| v.is_finite())
    }
}
