//! Template selection: evaluate every candidate for a group, scale it into the available
//! height and keep the largest one that honours the minimum-height policy.

use crate::foundation::core::EPSILON;
use crate::foundation::error::{FolioError, FolioResult};
use crate::layout::classify::{MinHeightPolicy, PhotoMetrics};
use crate::layout::geometry::{TemplateKind, TemplateLayout, catalogue, solve};

/// Tuning constants of the selection policy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SelectionPolicy {
    /// Largest violation factor a fallback template may have.
    pub relaxation_threshold: f64,
    /// Areas closer than this (px²) tie; the earlier catalogue entry wins a tie.
    pub area_tie_tolerance: f64,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            relaxation_threshold: 2.0,
            area_tie_tolerance: 1e-6,
        }
    }
}

impl SelectionPolicy {
    pub(crate) fn validate(&self) -> FolioResult<()> {
        if !self.relaxation_threshold.is_finite() || self.relaxation_threshold < 1.0 {
            return Err(FolioError::validation(
                "selection.relaxation_threshold must be finite and >= 1",
            ));
        }
        if !self.area_tie_tolerance.is_finite() || self.area_tie_tolerance < 0.0 {
            return Err(FolioError::validation(
                "selection.area_tie_tolerance must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Space a group may occupy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Available {
    /// Content width.
    pub width: f64,
    /// Height left below the cursor.
    pub height: f64,
    /// Spacing between photos inside the block.
    pub spacing: f64,
}

/// Why a group could not be placed in the space offered.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SelectionSignal {
    /// The group holds wide/tall photos (positions listed); a fresh page may help.
    #[error("no template fits; extreme photos {extreme:?} need a fresh page")]
    ForceNewPage { extreme: Vec<usize> },

    /// No template comes close; the group has to be split.
    #[error("no template fits {count} photos (best violation {best_violation:.3})")]
    SplitRequired { count: usize, best_violation: f64 },
}

/// The chosen template, already scaled into the available height.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Template that won.
    pub kind: TemplateKind,
    /// Its geometry, scaled into the available height.
    pub layout: TemplateLayout,
    /// Total photo area.
    pub area: f64,
    /// Worst `required / actual` height ratio; `1.0` when every minimum is met.
    pub violation: f64,
    /// Accepted through the relaxation threshold rather than strictly.
    pub relaxed: bool,
}

#[derive(Debug)]
struct Candidate {
    kind: TemplateKind,
    layout: TemplateLayout,
    area: f64,
    violation: f64,
}

impl Candidate {
    fn is_strict(&self) -> bool {
        self.violation <= 1.0
    }

    fn into_selection(self, relaxed: bool) -> Selection {
        Selection {
            kind: self.kind,
            layout: self.layout,
            area: self.area,
            violation: self.violation,
            relaxed,
        }
    }
}

/// Choose the template for `metrics` in `available`, or say why none fits.
pub fn select_template(
    metrics: &[PhotoMetrics],
    available: Available,
    min_height: &MinHeightPolicy,
    policy: &SelectionPolicy,
) -> Result<Selection, SelectionSignal> {
    let count = metrics.len();
    let mut candidates: Vec<Candidate> = catalogue(metrics)
        .into_iter()
        .filter_map(|kind| evaluate(kind, metrics, available, min_height))
        .collect();

    let mut best_strict: Option<usize> = None;
    for (idx, c) in candidates.iter().enumerate() {
        if !c.is_strict() {
            continue;
        }
        if best_strict.is_none_or(|b| c.area > candidates[b].area + policy.area_tie_tolerance) {
            best_strict = Some(idx);
        }
    }

    let least_bad = |allow_degenerate: bool| {
        candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| allow_degenerate || !c.kind.is_degenerate())
            .filter(|(_, c)| c.violation <= policy.relaxation_threshold)
            .min_by(|(_, a), (_, b)| a.violation.total_cmp(&b.violation))
            .map(|(idx, _)| idx)
    };
    let chosen = match best_strict {
        Some(idx) => Some((idx, false)),
        None => least_bad(false)
            .or_else(|| least_bad(true))
            .map(|idx| (idx, true)),
    };

    if let Some((idx, relaxed)) = chosen {
        let c = candidates.swap_remove(idx);
        tracing::trace!(
            template = %c.kind,
            area = c.area,
            violation = c.violation,
            relaxed,
            "template selected"
        );
        return Ok(c.into_selection(relaxed));
    }

    let extreme: Vec<usize> = metrics
        .iter()
        .enumerate()
        .filter(|(_, m)| m.class.is_extreme())
        .map(|(idx, _)| idx)
        .collect();
    if !extreme.is_empty() {
        return Err(SelectionSignal::ForceNewPage { extreme });
    }
    let best_violation = candidates
        .iter()
        .map(|c| c.violation)
        .fold(f64::INFINITY, f64::min);
    Err(SelectionSignal::SplitRequired {
        count,
        best_violation,
    })
}

fn evaluate(
    kind: TemplateKind,
    metrics: &[PhotoMetrics],
    available: Available,
    min_height: &MinHeightPolicy,
) -> Option<Candidate> {
    let natural = match solve(kind, metrics, available.width, available.spacing) {
        Ok(l) => l,
        Err(err) => {
            tracing::trace!(template = %kind, %err, "template skipped");
            return None;
        }
    };

    let layout = if natural.height > available.height && natural.height > EPSILON {
        natural.scaled((available.height / natural.height).max(0.0))
    } else {
        natural
    };

    let group = metrics.len();
    let violation = metrics
        .iter()
        .zip(&layout.sizes)
        .map(|(m, size)| violation_factor(min_height.min_height(m.class, group), size.height))
        .fold(1.0, f64::max);

    Some(Candidate {
        kind,
        area: layout.area(),
        layout,
        violation,
    })
}

/// `required / actual` for an undersized photo, `1.0` for a compliant one.
pub fn violation_factor(required: f64, actual: f64) -> f64 {
    if actual + EPSILON >= required {
        1.0
    } else if actual <= EPSILON {
        f64::INFINITY
    } else {
        required / actual
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/select.rs"]
mod tests;
