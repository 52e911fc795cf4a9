//! Page-split coordinator for photo groups.
//!
//! A group is first tried whole at the cursor. When that fails it is split by count into
//! sub-groups that are placed as a greedy chain: each sub-group tries the current page, then a
//! new page (only when the current one has content), then its terminal handling. Every split
//! yields strictly smaller sub-groups, so recursion always terminates.

use std::ops::Range;

use crate::foundation::core::{Point, Rect};
use crate::layout::classify::PhotoMetrics;
use crate::layout::flow::LayoutSession;
use crate::layout::geometry::{MAX_GROUP, TemplateKind, TemplateLayout, solve};
use crate::layout::select::{Available, SelectionSignal, select_template};
use crate::model::entry::Photo;
use crate::model::page::PlacedPhoto;

/// Photos of one entry (or a contiguous run of them) with their precomputed metrics.
#[derive(Clone, Copy, Debug)]
pub struct Group<'p> {
    photos: &'p [Photo],
    metrics: &'p [PhotoMetrics],
}

impl<'p> Group<'p> {
    /// Pair up photos with their metrics; both slices have the same length.
    pub fn new(photos: &'p [Photo], metrics: &'p [PhotoMetrics]) -> Self {
        debug_assert_eq!(photos.len(), metrics.len());
        Self { photos, metrics }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    fn range(self, r: Range<usize>) -> Self {
        Self {
            photos: &self.photos[r.clone()],
            metrics: &self.metrics[r],
        }
    }

    /// Consecutive sub-groups of the given sizes; any remainder joins the last one.
    fn partition(self, sizes: &[usize]) -> Vec<Group<'p>> {
        let mut out = Vec::with_capacity(sizes.len());
        let mut start = 0;
        for (i, &size) in sizes.iter().enumerate() {
            let end = if i + 1 == sizes.len() {
                self.len()
            } else {
                (start + size).min(self.len())
            };
            if start < end {
                out.push(self.range(start..end));
            }
            start = end;
        }
        out
    }

    fn chunks(self) -> impl Iterator<Item = Group<'p>> {
        self.photos
            .chunks(MAX_GROUP)
            .zip(self.metrics.chunks(MAX_GROUP))
            .map(|(photos, metrics)| Group { photos, metrics })
    }
}

/// Groups this small move whole to a new page before they are split.
const SMALL_GROUP: usize = 3;

/// Sub-group sizes for a group that did not fit whole.
fn split_sizes(n: usize) -> &'static [usize] {
    match n {
        2 => &[1, 1],
        3 => &[2, 1],
        4 => &[2, 2],
        5 => &[3, 2],
        6 => &[3, 3],
        7 => &[3, 4],
        8 => &[4, 4],
        _ => &[3, 6],
    }
}

/// Alternative partition tried when the leading part of the primary one does not fit.
fn alternate_sizes(n: usize) -> Option<&'static [usize]> {
    match n {
        5 => Some(&[2, 3]),
        6 => Some(&[2, 2, 2]),
        _ => None,
    }
}

impl LayoutSession<'_> {
    /// Place an entry's photo group, splitting it across pages as needed.
    ///
    /// Groups larger than [`MAX_GROUP`] are laid out as consecutive groups of at most that size.
    pub(crate) fn place_group(&mut self, group: Group<'_>) {
        if group.len() > MAX_GROUP {
            tracing::debug!(photos = group.len(), "chunking oversized group");
            for chunk in group.chunks() {
                self.place_counted(chunk);
            }
            return;
        }
        self.place_counted(group);
    }

    /// Whole group at the cursor, then whole on a new page, then split by count.
    ///
    /// The new-page retry happens for extreme photos and for groups of up to
    /// [`SMALL_GROUP`] photos; larger groups split on the current page first.
    fn place_counted(&mut self, group: Group<'_>) {
        if group.is_empty() {
            return;
        }
        let signal = match self.try_place(group) {
            Ok(()) => return,
            Err(signal) => signal,
        };
        let retry_fresh =
            matches!(signal, SelectionSignal::ForceNewPage { .. }) || group.len() <= SMALL_GROUP;
        if retry_fresh && !self.is_fresh() {
            self.start_new_page();
            if self.try_place(group).is_ok() {
                return;
            }
        }
        tracing::debug!(photos = group.len(), %signal, "splitting photo group");
        self.place_split(group);
    }

    fn place_split(&mut self, group: Group<'_>) {
        match group.len() {
            0 => {}
            1 => self.place_degraded(group),
            9 => self.place_nine(group),
            n => match alternate_sizes(n) {
                Some(alternate) => self.place_leading_fit(group, &[split_sizes(n), alternate]),
                None => self.place_chain(group, split_sizes(n)),
            },
        }
    }

    fn place_chain(&mut self, group: Group<'_>, sizes: &[usize]) {
        for part in group.partition(sizes) {
            self.place_part(part);
        }
    }

    /// Pick the first partition whose leading part fits the current page, else a new page.
    fn place_leading_fit(&mut self, group: Group<'_>, partitions: &[&[usize]]) {
        for attempt in 0..2 {
            if attempt == 1 {
                if self.is_fresh() {
                    break;
                }
                self.start_new_page();
            }
            for sizes in partitions {
                let parts = group.partition(sizes);
                let Some((lead, rest)) = parts.split_first() else {
                    return;
                };
                if self.try_place(*lead).is_ok() {
                    for &part in rest {
                        self.place_part(part);
                    }
                    return;
                }
            }
        }
        if let Some(sizes) = partitions.first() {
            self.place_chain(group, sizes);
        }
    }

    /// Nine photos: three at the cursor, the remaining six always from a new page.
    fn place_nine(&mut self, group: Group<'_>) {
        let parts = group.partition(split_sizes(9));
        let mut parts = parts.into_iter();
        if let Some(head) = parts.next() {
            self.place_part(head);
        }
        self.start_new_page();
        for tail in parts {
            self.place_counted(tail);
        }
    }

    /// One link of a greedy chain: current page, new page, then terminal handling.
    fn place_part(&mut self, part: Group<'_>) {
        if self.try_place(part).is_ok() {
            return;
        }
        if !self.is_fresh() {
            self.start_new_page();
            if self.try_place(part).is_ok() {
                return;
            }
        }
        match part.len() {
            1 => self.place_degraded(part),
            2 | 3 => self.drop_photos(part.photos, "does not fit on an empty page"),
            _ => self.place_split(part),
        }
    }

    /// Place a single photo that misses its minimum even alone, scaled to the page.
    fn place_degraded(&mut self, single: Group<'_>) {
        if !self.is_fresh() {
            self.start_new_page();
            if self.try_place(single).is_ok() {
                return;
            }
        }
        let Some(metrics) = single.metrics.first() else {
            return;
        };
        let width = self.content.width;
        let height = self.available_for_block();
        match solve(TemplateKind::Single, single.metrics, width, 0.0) {
            Ok(layout) => {
                let layout = if layout.height > height {
                    layout.scaled(height / layout.height)
                } else {
                    layout
                };
                tracing::warn!(
                    class = ?metrics.class,
                    aspect_ratio = metrics.aspect_ratio,
                    height = layout.height,
                    "photo placed below its minimum height"
                );
                self.commit(single, &layout);
            }
            Err(err) => self.drop_photos(single.photos, &err.to_string()),
        }
    }

    /// Select and commit a template for `group` at the cursor.
    pub(crate) fn try_place(&mut self, group: Group<'_>) -> Result<(), SelectionSignal> {
        let available = Available {
            width: self.content.width,
            height: self.available_for_block(),
            spacing: self.config.spacing.picture,
        };
        let selection = select_template(
            group.metrics,
            available,
            &self.config.min_height,
            &self.config.selection,
        )?;
        if selection.relaxed {
            tracing::debug!(
                template = %selection.kind,
                violation = selection.violation,
                "accepted relaxed template"
            );
        }
        self.commit(group, &selection.layout);
        Ok(())
    }

    /// Write the layout into the current page, horizontally centred at the cursor.
    fn commit(&mut self, group: Group<'_>, layout: &TemplateLayout) {
        let gap = self.gap_before_block();
        self.advance(gap);
        let origin = Point::new(
            self.content.left + (self.content.width - layout.width) / 2.0,
            self.cursor_y(),
        );
        let placed: Vec<PlacedPhoto> = group
            .photos
            .iter()
            .zip(layout.positions.iter().zip(&layout.sizes))
            .map(|(photo, (pos, size))| {
                let x0 = origin.x + pos.x;
                let y0 = origin.y + pos.y;
                PlacedPhoto {
                    photo: photo.clone(),
                    rendered: *size,
                    rect: Rect::new(x0, y0, x0 + size.width, y0 + size.height),
                }
            })
            .collect();
        self.entry_slot().photos.extend(placed);
        self.advance(layout.height);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/split.rs"]
mod tests;
