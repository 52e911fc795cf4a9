//! Folio turns timestamped diary entries into fixed-size print pages.
//!
//! Each [`Entry`] is laid out as a time label, wrapped text and a photo group. Photo groups are
//! arranged with aspect-ratio-preserving row, column and large-beside-stack templates
//! chosen to maximise rendered area while meeting per-class minimum heights. Groups that
//! do not fit are split across pages by count-specific rules.
//!
//! - Build a [`LayoutConfig`] (or load one from JSON)
//! - Create a [`LayoutEngine`]
//! - Call [`LayoutEngine::process_entries`] to get absolute page rectangles
//!
//! Layout does no IO and keeps no state between runs, so identical input gives identical pages.
#![forbid(unsafe_code)]

mod config;
mod engine;
mod foundation;
mod layout;
mod model;

pub use crate::config::{LayoutConfig, Spacing, TextStyle, TimeStyle};
pub use crate::engine::{LayoutEngine, process_entries};
pub use crate::foundation::core::{Canvas, ContentBox, Edges, Point, Rect, Size};
pub use crate::foundation::error::{FolioError, FolioResult};
pub use crate::layout::classify::{
    AspectClass, HeightTiers, MinHeightPolicy, PhotoMetrics, TALL_RATIO, WIDE_RATIO, classify,
};
pub use crate::layout::geometry::{
    GeometryError, GeometryResult, MAX_GROUP, Side, TemplateKind, TemplateLayout, catalogue,
    solve,
};
pub use crate::layout::select::{
    Available, Selection, SelectionPolicy, SelectionSignal, select_template, violation_factor,
};
pub use crate::layout::text::wrap_text;
pub use crate::model::entry::{Entry, Photo};
pub use crate::model::page::{
    DroppedPhoto, LayoutOutput, Page, PageEntry, PlacedPhoto, TextBlock, TimeBlock,
};
pub use crate::model::time::{TIMESTAMP_FORMATS, TimeLabel, parse_timestamp};
