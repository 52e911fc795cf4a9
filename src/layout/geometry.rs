//! Pure template solvers.
//!
//! Every solver receives the metrics of exactly the photos it arranges, the available width and
//! the inter-picture spacing, and returns positions/sizes relative to the block's top-left
//! corner. Nothing here knows about pages or available height; scaling to fit is the selection
//! policy's job.

use std::fmt;

use crate::foundation::core::{EPSILON, Point, Size};
use crate::layout::classify::{AspectClass, PhotoMetrics};

/// Result type of the template solvers.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Why a template could not be solved for a group.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("template {template} expects {expected} photos, got {actual}")]
    CountMismatch {
        template: TemplateKind,
        expected: usize,
        actual: usize,
    },

    #[error("non-positive aspect ratio {0}")]
    NonPositiveAspect(f64),

    #[error("degenerate geometry: {0}")]
    Degenerate(&'static str),
}

/// Side of the large photo in a large-side template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Named geometric arrangement for a fixed photo count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// One photo at full width.
    Single,
    /// Two photos sharing one row.
    PairSideBySide,
    /// Two photos, each at full width, one above the other.
    PairStacked,
    /// The first photo large on `side`, the remaining `stacked` photos in a column beside it
    /// whose combined height equals the large photo's height.
    LargeSide { side: Side, stacked: usize },
    /// Rows of the given sizes, filled in photo order; every row spans the full width.
    Rows(&'static [usize]),
    /// Every photo at full width, stacked top to bottom.
    Column(usize),
}

impl TemplateKind {
    /// Number of photos the template arranges.
    pub fn photo_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::PairSideBySide | Self::PairStacked => 2,
            Self::LargeSide { stacked, .. } => stacked + 1,
            Self::Rows(rows) => rows.iter().sum(),
            Self::Column(n) => n,
        }
    }

    /// Pure single-column stacks. Selection only falls back to these when nothing else is close.
    pub fn is_degenerate(self) -> bool {
        matches!(self, Self::PairStacked | Self::Column(_))
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::PairSideBySide => f.write_str("pair-side-by-side"),
            Self::PairStacked => f.write_str("pair-stacked"),
            Self::LargeSide { side, stacked } => match side {
                Side::Left => write!(f, "large-left-{stacked}"),
                Side::Right => write!(f, "large-right-{stacked}"),
            },
            Self::Rows(rows) => {
                f.write_str("rows")?;
                for r in rows.iter() {
                    write!(f, "-{r}")?;
                }
                Ok(())
            }
            Self::Column(n) => write!(f, "column-{n}"),
        }
    }
}

const THREE: &[TemplateKind] = &[
    TemplateKind::LargeSide {
        side: Side::Left,
        stacked: 2,
    },
    TemplateKind::LargeSide {
        side: Side::Right,
        stacked: 2,
    },
    TemplateKind::Rows(&[1, 2]),
    TemplateKind::Rows(&[2, 1]),
    TemplateKind::Rows(&[3]),
    TemplateKind::Column(3),
];

const FOUR: &[TemplateKind] = &[
    TemplateKind::Rows(&[2, 2]),
    TemplateKind::Rows(&[1, 3]),
    TemplateKind::Rows(&[3, 1]),
    TemplateKind::LargeSide {
        side: Side::Left,
        stacked: 3,
    },
    TemplateKind::LargeSide {
        side: Side::Right,
        stacked: 3,
    },
];

const FIVE: &[TemplateKind] = &[
    TemplateKind::Rows(&[3, 2]),
    TemplateKind::Rows(&[2, 3]),
    TemplateKind::Rows(&[1, 2, 2]),
    TemplateKind::Rows(&[2, 2, 1]),
    TemplateKind::Rows(&[2, 1, 2]),
];

const SIX: &[TemplateKind] = &[
    TemplateKind::Rows(&[3, 3]),
    TemplateKind::Rows(&[2, 2, 2]),
    TemplateKind::Rows(&[1, 2, 3]),
    TemplateKind::Rows(&[3, 2, 1]),
];

const SEVEN: &[TemplateKind] = &[
    TemplateKind::Rows(&[3, 2, 2]),
    TemplateKind::Rows(&[2, 2, 3]),
    TemplateKind::Rows(&[2, 3, 2]),
    TemplateKind::Rows(&[3, 4]),
    TemplateKind::Rows(&[4, 3]),
    TemplateKind::Rows(&[1, 3, 3]),
];

const EIGHT: &[TemplateKind] = &[
    TemplateKind::Rows(&[4, 4]),
    TemplateKind::Rows(&[3, 3, 2]),
    TemplateKind::Rows(&[2, 3, 3]),
    TemplateKind::Rows(&[3, 2, 3]),
    TemplateKind::Rows(&[2, 2, 2, 2]),
];

const NINE: &[TemplateKind] = &[
    TemplateKind::Rows(&[3, 3, 3]),
    TemplateKind::Rows(&[3, 2, 2, 2]),
    TemplateKind::Rows(&[2, 2, 2, 3]),
    TemplateKind::Rows(&[2, 3, 2, 2]),
];

/// Largest group the template catalogue covers.
pub const MAX_GROUP: usize = 9;

/// Candidate templates for a group, in tie-break order.
///
/// Two-photo groups get exactly one candidate, picked by [`pair_template`].
pub fn catalogue(metrics: &[PhotoMetrics]) -> Vec<TemplateKind> {
    match metrics {
        [] => Vec::new(),
        [_] => vec![TemplateKind::Single],
        [a, b] => vec![pair_template(a.class, b.class)],
        _ => match metrics.len() {
            3 => THREE.to_vec(),
            4 => FOUR.to_vec(),
            5 => FIVE.to_vec(),
            6 => SIX.to_vec(),
            7 => SEVEN.to_vec(),
            8 => EIGHT.to_vec(),
            9 => NINE.to_vec(),
            _ => Vec::new(),
        },
    }
}

/// Two-up compatibility table: an extreme photo (wide/tall) stacks with a landscape, portrait
/// or opposite-extreme partner; every other pair shares a row.
pub fn pair_template(a: AspectClass, b: AspectClass) -> TemplateKind {
    fn must_stack(extreme: AspectClass, partner: AspectClass) -> bool {
        let opposite = match extreme {
            AspectClass::Wide => AspectClass::Tall,
            AspectClass::Tall => AspectClass::Wide,
            _ => return false,
        };
        matches!(partner, AspectClass::Landscape | AspectClass::Portrait) || partner == opposite
    }

    if must_stack(a, b) || must_stack(b, a) {
        TemplateKind::PairStacked
    } else {
        TemplateKind::PairSideBySide
    }
}

/// Block geometry produced by a template solver, relative to the block's top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateLayout {
    /// Top-left corner of each photo, in group order.
    pub positions: Vec<Point>,
    /// Rendered size of each photo, in group order.
    pub sizes: Vec<Size>,
    /// Bounding width of the block.
    pub width: f64,
    /// Bounding height of the block.
    pub height: f64,
}

impl TemplateLayout {
    fn with_capacity(n: usize) -> Self {
        Self {
            positions: Vec::with_capacity(n),
            sizes: Vec::with_capacity(n),
            width: 0.0,
            height: 0.0,
        }
    }

    fn push(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.positions.push(Point::new(x, y));
        self.sizes.push(Size::new(w, h));
    }

    /// Uniformly scale every position and size.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            positions: self
                .positions
                .iter()
                .map(|p| Point::new(p.x * factor, p.y * factor))
                .collect(),
            sizes: self.sizes.iter().map(|s| *s * factor).collect(),
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Total photo area, spacing excluded.
    pub fn area(&self) -> f64 {
        self.sizes.iter().map(|s| s.width * s.height).sum()
    }

    fn check(self) -> GeometryResult<Self> {
        let finite_non_negative = |v: f64| v.is_finite() && v >= 0.0;
        let positions_ok = self
            .positions
            .iter()
            .all(|p| finite_non_negative(p.x) && finite_non_negative(p.y));
        let sizes_ok = self.sizes.iter().all(|s| {
            s.width.is_finite() && s.height.is_finite() && s.width > EPSILON && s.height > EPSILON
        });
        if !positions_ok || !sizes_ok || !(self.width > 0.0 && self.height > 0.0) {
            return Err(GeometryError::Degenerate(
                "non-positive or non-finite dimension",
            ));
        }
        Ok(self)
    }
}

/// Solve `kind` for `metrics` at `width` with `spacing` between photos.
pub fn solve(
    kind: TemplateKind,
    metrics: &[PhotoMetrics],
    width: f64,
    spacing: f64,
) -> GeometryResult<TemplateLayout> {
    if metrics.len() != kind.photo_count() {
        return Err(GeometryError::CountMismatch {
            template: kind,
            expected: kind.photo_count(),
            actual: metrics.len(),
        });
    }
    if let Some(bad) = metrics
        .iter()
        .find(|m| !(m.aspect_ratio > 0.0 && m.aspect_ratio.is_finite()))
    {
        return Err(GeometryError::NonPositiveAspect(bad.aspect_ratio));
    }
    if !(width > 0.0 && width.is_finite()) {
        return Err(GeometryError::Degenerate(
            "available width must be positive",
        ));
    }

    let ratios: Vec<f64> = metrics.iter().map(|m| m.aspect_ratio).collect();
    let layout = match kind {
        TemplateKind::Single | TemplateKind::PairStacked | TemplateKind::Column(_) => {
            solve_column(&ratios, width, spacing)
        }
        TemplateKind::PairSideBySide => solve_rows(&[2], &ratios, width, spacing)?,
        TemplateKind::Rows(rows) => solve_rows(rows, &ratios, width, spacing)?,
        TemplateKind::LargeSide { side, .. } => solve_large_side(side, &ratios, width, spacing)?,
    };
    layout.check()
}

/// Height and photo widths of a single row spanning `width`.
///
/// Every photo in the row shares the height `(width - spacing * (k - 1)) / sum(ratios)`.
pub fn solve_row(ratios: &[f64], width: f64, spacing: f64) -> GeometryResult<(f64, Vec<f64>)> {
    if ratios.is_empty() {
        return Err(GeometryError::Degenerate("empty row"));
    }
    let usable = width - spacing * (ratios.len() - 1) as f64;
    let sum: f64 = ratios.iter().sum();
    if usable <= 0.0 || sum <= 0.0 {
        return Err(GeometryError::Degenerate("row has no usable width"));
    }
    let height = usable / sum;
    Ok((height, ratios.iter().map(|ar| height * ar).collect()))
}

fn solve_rows(
    rows: &[usize],
    ratios: &[f64],
    width: f64,
    spacing: f64,
) -> GeometryResult<TemplateLayout> {
    let mut out = TemplateLayout::with_capacity(ratios.len());
    let mut start = 0usize;
    let mut y = 0.0;
    for (row_idx, &count) in rows.iter().enumerate() {
        if row_idx > 0 {
            y += spacing;
        }
        let row = &ratios[start..start + count];
        let (h, widths) = solve_row(row, width, spacing)?;
        let mut x = 0.0;
        for w in widths {
            out.push(x, y, w, h);
            x += w + spacing;
        }
        y += h;
        start += count;
    }
    out.width = width;
    out.height = y;
    Ok(out)
}

fn solve_column(ratios: &[f64], width: f64, spacing: f64) -> TemplateLayout {
    let mut out = TemplateLayout::with_capacity(ratios.len());
    let mut y = 0.0;
    for (idx, ar) in ratios.iter().enumerate() {
        if idx > 0 {
            y += spacing;
        }
        let h = width / ar;
        out.push(0.0, y, width, h);
        y += h;
    }
    out.width = width;
    out.height = y;
    out
}

/// One large photo beside a stacked column.
///
/// With `a0` the large photo's ratio, `S = sum(1 / ai)` over the stacked photos, `k` stacked
/// photos and column width `w2`, the column height is `w2 * S + s * (k - 1)`. Setting the large
/// photo's height equal to it and requiring `w1 + s + w2 = W` gives
/// `w2 = (W - s - a0 * s * (k - 1)) / (a0 * S + 1)`.
fn solve_large_side(
    side: Side,
    ratios: &[f64],
    width: f64,
    spacing: f64,
) -> GeometryResult<TemplateLayout> {
    let (a0, stacked) = match ratios.split_first() {
        Some((a0, rest)) if !rest.is_empty() => (*a0, rest),
        _ => {
            return Err(GeometryError::Degenerate(
                "large-side needs a stacked column",
            ));
        }
    };
    let k = stacked.len() as f64;
    let inv_sum: f64 = stacked.iter().map(|ar| 1.0 / ar).sum();

    let denominator = a0 * inv_sum + 1.0;
    if denominator <= 0.0 {
        return Err(GeometryError::Degenerate(
            "large-side denominator is non-positive",
        ));
    }
    let numerator = width - spacing - a0 * spacing * (k - 1.0);
    if numerator <= 0.0 {
        return Err(GeometryError::Degenerate("large-side has no usable width"));
    }

    let column_w = numerator / denominator;
    let height = column_w * inv_sum + spacing * (k - 1.0);
    let large_w = a0 * height;

    let (large_x, column_x) = match side {
        Side::Left => (0.0, large_w + spacing),
        Side::Right => (column_w + spacing, 0.0),
    };

    let mut out = TemplateLayout::with_capacity(ratios.len());
    out.push(large_x, 0.0, large_w, height);
    let mut y = 0.0;
    for ar in stacked {
        let h = column_w / ar;
        out.push(column_x, y, column_w, h);
        y += h + spacing;
    }
    out.width = large_w + spacing + column_w;
    out.height = height;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
