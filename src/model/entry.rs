use crate::model::time::TimeLabel;

/// One timestamped diary entry: the unit the engine lays out.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Entry {
    /// Raw timestamp in one of the accepted formats (see [`crate::TIMESTAMP_FORMATS`]).
    pub time: String,
    /// Free text; may be empty.
    #[serde(default)]
    pub text: String,
    /// Photos laid out together as one group.
    #[serde(default, deserialize_with = "numbered_photos")]
    pub photos: Vec<Photo>,
}

/// Photo `index` is the position within the entry, whatever the input said.
fn number_photos(photos: Vec<Photo>) -> Vec<Photo> {
    photos
        .into_iter()
        .enumerate()
        .map(|(index, p)| Photo { index, ..p })
        .collect()
}

fn numbered_photos<'de, D>(deserializer: D) -> Result<Vec<Photo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let photos = <Vec<Photo> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(number_photos(photos))
}

impl Entry {
    /// Build an entry, numbering photos by their position in `photos`.
    pub fn new(time: impl Into<String>, text: impl Into<String>, photos: Vec<Photo>) -> Self {
        Self {
            time: time.into(),
            text: text.into(),
            photos: number_photos(photos),
        }
    }

    /// Display label parsed from `time`.
    pub fn time_label(&self) -> TimeLabel {
        TimeLabel::parse(&self.time)
    }
}

/// Photo record as delivered by the photo source.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Photo {
    /// Position within the entry; assigned on entry construction and deserialization.
    #[serde(default)]
    pub index: usize,
    /// Source URL.
    pub url: String,
    /// Original pixel width.
    pub width: i64,
    /// Original pixel height.
    pub height: i64,
}

impl Photo {
    /// Build a photo record.
    pub fn new(index: usize, url: impl Into<String>, width: i64, height: i64) -> Self {
        Self {
            index,
            url: url.into(),
            width,
            height,
        }
    }

    /// `width / height`, or `None` when either dimension is not positive.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width <= 0 || self.height <= 0 {
            return None;
        }
        Some(self.width as f64 / self.height as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/entry.rs"]
mod tests;
