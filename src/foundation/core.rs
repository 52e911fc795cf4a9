use crate::foundation::error::{FolioError, FolioResult};

pub use kurbo::{Point, Rect, Size};

/// Tolerance used for floating point comparisons in layout math.
pub const EPSILON: f64 = 1e-6;

/// Output page canvas in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Resolution the pixel sizes were derived from.
    pub dpi: u32,
}

impl Canvas {
    /// Validated constructor.
    pub fn new(width: u32, height: u32, dpi: u32) -> FolioResult<Self> {
        if width == 0 || height == 0 {
            return Err(FolioError::validation("Canvas width/height must be > 0"));
        }
        if dpi == 0 {
            return Err(FolioError::validation("Canvas dpi must be > 0"));
        }
        Ok(Self { width, height, dpi })
    }

    /// Canvas size for a paper format given in millimetres.
    pub fn from_paper_mm(width_mm: f64, height_mm: f64, dpi: u32) -> FolioResult<Self> {
        let px = |mm: f64| (mm / 25.4 * f64::from(dpi)).round();
        let (w, h) = (px(width_mm), px(height_mm));
        if !(w.is_finite() && h.is_finite()) || w < 1.0 || h < 1.0 {
            return Err(FolioError::validation("paper size must be positive"));
        }
        Self::new(w as u32, h as u32, dpi)
    }
}

/// Page margins in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edges {
    /// Left margin.
    #[serde(default)]
    pub left: f64,
    /// Right margin.
    #[serde(default)]
    pub right: f64,
    /// Top margin.
    #[serde(default)]
    pub top: f64,
    /// Bottom margin.
    #[serde(default)]
    pub bottom: f64,
}

impl Edges {
    /// Same margin on every side.
    pub fn uniform(v: f64) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }
}

/// Usable area of a page: the canvas minus its margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentBox {
    /// Left edge in page pixels.
    pub left: f64,
    /// Top edge in page pixels.
    pub top: f64,
    /// Usable width.
    pub width: f64,
    /// Usable height.
    pub height: f64,
}

impl ContentBox {
    /// Canvas minus margins; fails when nothing usable is left.
    pub fn new(canvas: Canvas, margins: Edges) -> FolioResult<Self> {
        let width = f64::from(canvas.width) - margins.left - margins.right;
        let height = f64::from(canvas.height) - margins.top - margins.bottom;
        if !(width > 0.0 && height > 0.0) {
            return Err(FolioError::validation(
                "margins must leave a positive content area",
            ));
        }
        Ok(Self {
            left: margins.left,
            top: margins.top,
            width,
            height,
        })
    }

    /// Right edge in page pixels.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge in page pixels.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
