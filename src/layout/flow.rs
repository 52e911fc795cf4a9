//! Page/cursor flow controller.
//!
//! A [`LayoutSession`] owns all mutable pagination state for one document, including the page
//! being filled and its vertical cursor. Each page moves through
//! `Empty -> HasContent -> Full`; "full" simply means the next block did not fit and a new page
//! was started. The cursor only moves down within a page and resets to the content top on a new
//! page.

use crate::config::LayoutConfig;
use crate::foundation::core::{ContentBox, EPSILON, Rect};
use crate::foundation::error::FolioResult;
use crate::layout::classify::PhotoMetrics;
use crate::layout::geometry::MAX_GROUP;
use crate::layout::split::Group;
use crate::layout::text::wrap_text;
use crate::model::entry::{Entry, Photo};
use crate::model::page::{DroppedPhoto, LayoutOutput, Page, PageEntry, TimeBlock};
use crate::model::time::TimeLabel;

/// Mutable pagination state for one layout run.
pub struct LayoutSession<'c> {
    pub(crate) config: &'c LayoutConfig,
    pub(crate) content: ContentBox,
    pages: Vec<Page>,
    page: Page,
    cursor_y: f64,
    entry_index: usize,
    year_month: Option<String>,
    dropped: Vec<DroppedPhoto>,
}

impl<'c> LayoutSession<'c> {
    /// Start a session on page 1 with the cursor at the content top.
    pub fn new(config: &'c LayoutConfig) -> FolioResult<Self> {
        config.validate()?;
        let content = config.content_box()?;
        Ok(Self {
            config,
            content,
            pages: Vec::new(),
            page: Page::new(1, None),
            cursor_y: content.top,
            entry_index: 0,
            year_month: None,
            dropped: Vec::new(),
        })
    }

    /// Height left between the cursor and the bottom margin.
    pub fn remaining(&self) -> f64 {
        (self.content.bottom() - self.cursor_y).max(0.0)
    }

    /// Nothing has been placed on the current page yet.
    pub fn is_fresh(&self) -> bool {
        !self.page.insert_page && self.cursor_y <= self.content.top + EPSILON
    }

    /// Number of the page being filled.
    pub fn page_number(&self) -> u32 {
        self.page.number
    }

    /// Vertical cursor on the current page.
    pub fn cursor_y(&self) -> f64 {
        self.cursor_y
    }

    /// Gap owed before the next block of the current entry.
    pub(crate) fn gap_before_block(&self) -> f64 {
        if self.is_fresh() {
            0.0
        } else {
            self.config.spacing.element
        }
    }

    /// Height a block placed next could occupy, after its leading gap.
    pub(crate) fn available_for_block(&self) -> f64 {
        (self.remaining() - self.gap_before_block()).max(0.0)
    }

    pub(crate) fn advance(&mut self, dy: f64) {
        debug_assert!(dy >= 0.0, "cursor never moves up within a page");
        self.cursor_y += dy.max(0.0);
    }

    /// Start a new page unless the current one is still empty.
    pub(crate) fn start_new_page(&mut self) {
        if self.is_fresh() {
            return;
        }
        self.push_page();
    }

    fn push_page(&mut self) {
        let next = Page::new(self.page.number + 1, self.year_month.clone());
        let done = std::mem::replace(&mut self.page, next);
        tracing::trace!(page = done.number, "page complete");
        self.pages.push(done);
        self.cursor_y = self.content.top;
    }

    /// The current entry's fragment on the current page, created on first use.
    pub(crate) fn entry_slot(&mut self) -> &mut PageEntry {
        let idx = self.entry_index;
        let open = self
            .page
            .entries
            .last()
            .is_some_and(|e| e.entry_index == idx);
        if !open {
            self.page.entries.push(PageEntry::new(idx));
        }
        let last = self.page.entries.len() - 1;
        &mut self.page.entries[last]
    }

    pub(crate) fn full_width_rect(&self, y: f64, height: f64) -> Rect {
        Rect::new(self.content.left, y, self.content.right(), y + height)
    }

    pub(crate) fn drop_photos(&mut self, photos: &[Photo], reason: &str) {
        for photo in photos {
            tracing::warn!(
                entry = self.entry_index,
                photo = photo.index,
                url = %photo.url,
                reason,
                "photo dropped"
            );
            self.dropped.push(DroppedPhoto {
                entry_index: self.entry_index,
                photo_index: photo.index,
                url: photo.url.clone(),
                reason: reason.to_string(),
            });
        }
    }

    /// Lay out one entry: time label, then text, then its photo group.
    pub fn place_entry(&mut self, index: usize, entry: &Entry) {
        self.entry_index = index;
        let label = entry.time_label();
        if let Some(ym) = label.year_month() {
            let changed = self.year_month.as_deref().is_some_and(|prev| prev != ym);
            if self.config.month_divider_pages && changed {
                self.insert_divider(ym);
            }
            self.year_month = Some(ym.to_string());
        }

        self.place_entry_spacing();
        self.place_time(&label);

        let lines = wrap_text(
            &entry.text,
            self.content.width,
            self.config.text.font_size,
        );
        if !lines.is_empty() {
            self.place_text(&lines);
        }
        if !entry.photos.is_empty() {
            self.place_photos(&entry.photos);
        }
    }

    fn insert_divider(&mut self, year_month: &str) {
        self.start_new_page();
        self.page.insert_page = true;
        self.page.year_month = Some(year_month.to_string());
        self.year_month = Some(year_month.to_string());
        self.push_page();
    }

    fn place_entry_spacing(&mut self) {
        if self.is_fresh() {
            return;
        }
        let spacing = self.config.spacing.entry;
        if self.remaining() >= spacing {
            self.advance(spacing);
        } else {
            self.start_new_page();
        }
    }

    fn place_time(&mut self, label: &TimeLabel) {
        let block = self.config.time.block_height;
        if self.remaining() < block {
            self.start_new_page();
        }
        if self.page.year_month.is_none() {
            self.page.year_month = self.year_month.clone();
        }
        let rect = self.full_width_rect(self.cursor_y, block);
        let fragments = label.fragments();
        self.entry_slot().time = Some(TimeBlock { fragments, rect });
        self.advance(block);
    }

    fn place_photos(&mut self, photos: &[Photo]) {
        let metrics: Vec<PhotoMetrics> = photos.iter().map(PhotoMetrics::from_photo).collect();
        let group_size = photos.len().min(MAX_GROUP);
        let min_row = metrics
            .iter()
            .map(|m| self.config.min_height.min_height(m.class, group_size))
            .fold(f64::INFINITY, f64::min);
        if self.available_for_block() < min_row {
            self.start_new_page();
        }
        self.place_group(Group::new(photos, &metrics));
    }

    /// Close the session, returning pages numbered 1..=n without trailing blanks.
    pub fn finish(mut self) -> LayoutOutput {
        let mut pages = std::mem::take(&mut self.pages);
        pages.push(self.page);
        while pages.last().is_some_and(Page::is_empty) {
            pages.pop();
        }
        LayoutOutput {
            pages,
            dropped: self.dropped,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/flow.rs"]
mod tests;
