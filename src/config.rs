use crate::foundation::core::{Canvas, ContentBox, Edges};
use crate::foundation::error::{FolioError, FolioResult};
use crate::layout::classify::MinHeightPolicy;
use crate::layout::select::SelectionPolicy;

/// Complete configuration of a layout run.
///
/// Every field has a default tuned for an A4 page at 150 DPI, so a JSON config only needs to
/// name the values it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Output page canvas.
    pub canvas: Canvas,
    /// Page margins subtracted from the canvas to form the content box.
    pub margins: Edges,
    /// Vertical/inter-picture spacing constants.
    pub spacing: Spacing,
    /// Time label block metrics.
    pub time: TimeStyle,
    /// Body text metrics.
    pub text: TextStyle,
    /// Per-class minimum rendered photo heights.
    pub min_height: MinHeightPolicy,
    /// Template selection tuning.
    pub selection: SelectionPolicy,
    /// Emit a labelled divider page whenever the entry month changes.
    pub month_divider_pages: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1240,
                height: 1754,
                dpi: 150,
            },
            margins: Edges {
                left: 80.0,
                right: 80.0,
                top: 100.0,
                bottom: 100.0,
            },
            spacing: Spacing::default(),
            time: TimeStyle::default(),
            text: TextStyle::default(),
            min_height: MinHeightPolicy::default(),
            selection: SelectionPolicy::default(),
            month_divider_pages: false,
        }
    }
}

/// Spacing constants in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Gap between consecutive entries on the same page.
    pub entry: f64,
    /// Gap between time, text and photo blocks of one entry.
    pub element: f64,
    /// Gap between photos inside a template.
    pub picture: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            entry: 48.0,
            element: 20.0,
            picture: 10.0,
        }
    }
}

/// Time label block metrics.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimeStyle {
    /// Fixed height reserved for the time label.
    pub block_height: f64,
    /// Font size used by renderers for the label.
    pub font_size: f64,
}

impl Default for TimeStyle {
    fn default() -> Self {
        Self {
            block_height: 56.0,
            font_size: 32.0,
        }
    }
}

/// Body text metrics.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Em size in pixels; a full-width glyph advances by exactly this much.
    pub font_size: f64,
    /// Vertical advance per wrapped line.
    pub line_height: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 30.0,
            line_height: 44.0,
        }
    }
}

impl LayoutConfig {
    /// Parse a JSON config (missing fields take their defaults) and validate it.
    pub fn from_json(s: &str) -> FolioResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Usable page area.
    pub fn content_box(&self) -> FolioResult<ContentBox> {
        ContentBox::new(self.canvas, self.margins)
    }

    /// Check every value the layout relies on; called by [`crate::LayoutEngine::new`].
    pub fn validate(&self) -> FolioResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height, self.canvas.dpi)?;
        for (name, v) in [
            ("margins.left", self.margins.left),
            ("margins.right", self.margins.right),
            ("margins.top", self.margins.top),
            ("margins.bottom", self.margins.bottom),
            ("spacing.entry", self.spacing.entry),
            ("spacing.element", self.spacing.element),
            ("spacing.picture", self.spacing.picture),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(FolioError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        for (name, v) in [
            ("time.block_height", self.time.block_height),
            ("time.font_size", self.time.font_size),
            ("text.font_size", self.text.font_size),
            ("text.line_height", self.text.line_height),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(FolioError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        let content = self.content_box()?;
        if self.text.font_size > content.width {
            return Err(FolioError::validation(
                "text.font_size must not exceed the content width",
            ));
        }
        let first_block = self.time.block_height + self.spacing.element + self.text.line_height;
        if first_block > content.height {
            return Err(FolioError::validation(
                "content height must fit a time block and one text line",
            ));
        }

        self.min_height.validate()?;
        self.selection.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
