use crate::foundation::core::{Rect, Size};
use crate::model::entry::Photo;

/// One fixed-size output page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Page {
    /// 1-based, contiguous page number.
    pub number: u32,
    /// Divider page inserted between months; carries no entries.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub insert_page: bool,
    /// Year-month label of the entries on this page, e.g. `2024年3月`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_month: Option<String>,
    /// Page-local entry fragments in placement order.
    pub entries: Vec<PageEntry>,
}

impl Page {
    pub(crate) fn new(number: u32, year_month: Option<String>) -> Self {
        Self {
            number,
            insert_page: false,
            year_month,
            entries: Vec::new(),
        }
    }

    /// No content and not a divider.
    pub fn is_empty(&self) -> bool {
        !self.insert_page && self.entries.iter().all(PageEntry::is_empty)
    }

    /// Photos placed on this page.
    pub fn photo_count(&self) -> usize {
        self.entries.iter().map(|e| e.photos.len()).sum()
    }
}

/// The part of one logical [`crate::Entry`] that landed on a page.
///
/// An entry whose content continues across pages produces one `PageEntry` per page; only the
/// first one carries the time block.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageEntry {
    /// Index of the logical entry in the input list.
    pub entry_index: usize,
    /// Time label; only on the entry's first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeBlock>,
    /// Wrapped text placed on this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextBlock>,
    /// Photos placed on this page, in group order.
    #[serde(default)]
    pub photos: Vec<PlacedPhoto>,
}

impl PageEntry {
    pub(crate) fn new(entry_index: usize) -> Self {
        Self {
            entry_index,
            time: None,
            text: None,
            photos: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_none() && self.text.is_none() && self.photos.is_empty()
    }

    /// Whether this fragment continues an entry begun on an earlier page.
    pub fn is_continuation(&self) -> bool {
        self.time.is_none()
    }
}

/// Time label block of an entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeBlock {
    /// Date, weekday and clock fragments; empty for unparsable timestamps.
    pub fragments: Vec<String>,
    /// Block rectangle spanning the content width.
    pub rect: Rect,
}

/// Text of an entry placed on one page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextBlock {
    /// One rectangle per contiguous run of wrapped lines.
    pub rects: Vec<Rect>,
    /// The wrapped lines covered by `rects`, joined with `\n`.
    pub text: String,
}

/// A photo after layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacedPhoto {
    /// The source record.
    #[serde(flatten)]
    pub photo: Photo,
    /// Rendered size in page pixels.
    pub rendered: Size,
    /// Absolute page rectangle (top-left, bottom-right).
    pub rect: Rect,
}

/// A photo that could not be placed anywhere.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DroppedPhoto {
    /// Index of the logical entry.
    pub entry_index: usize,
    /// Position of the photo within the entry.
    pub photo_index: usize,
    /// Source URL.
    pub url: String,
    /// Why the photo was dropped.
    pub reason: String,
}

/// Result of laying out a document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutOutput {
    /// Pages numbered from 1.
    pub pages: Vec<Page>,
    /// Photos lost to terminal split failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<DroppedPhoto>,
}
