//! Chapter records and chapter list configuration

use super::timestamp::deserialize_opt_millis;
use super::TriState;
use serde::{Deserialize, Serialize};

/// A single chapter of a manga
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    pub id: i64,

    pub manga_id: i64,

    pub name: String,

    /// Chapter number as parsed by the source (can be fractional)
    #[serde(default)]
    pub chapter_number: f64,

    /// Position of the chapter in the source's own listing
    #[serde(default)]
    pub source_order: i64,

    #[serde(default)]
    pub scanlator: Option<String>,

    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub upload_date: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub fetched_at: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub last_read_at: Option<i64>,

    #[serde(default)]
    pub is_read: bool,

    #[serde(default)]
    pub is_downloaded: bool,

    #[serde(default)]
    pub is_bookmarked: bool,
}

impl Chapter {
    pub fn new(id: i64, manga_id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            manga_id,
            name: name.into(),
            chapter_number: 0.0,
            source_order: 0,
            scanlator: None,
            upload_date: None,
            fetched_at: None,
            last_read_at: None,
            is_read: false,
            is_downloaded: false,
            is_bookmarked: false,
        }
    }
}

/// Sort key for a manga's chapter list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChapterSortMode {
    #[default]
    Source,
    ChapterNumber,
    UploadedAt,
    FetchedAt,
}

impl ChapterSortMode {
    pub const ALL: [ChapterSortMode; 4] = [
        ChapterSortMode::Source,
        ChapterSortMode::ChapterNumber,
        ChapterSortMode::UploadedAt,
        ChapterSortMode::FetchedAt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChapterSortMode::Source => "source",
            ChapterSortMode::ChapterNumber => "chapterNumber",
            ChapterSortMode::UploadedAt => "uploadedAt",
            ChapterSortMode::FetchedAt => "fetchedAt",
        }
    }

    /// Look up a sort key by name, ignoring case and separators
    pub fn parse_lenient(name: &str) -> Option<Self> {
        let wanted: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().to_ascii_lowercase() == wanted)
    }
}

/// Filter and sort configuration for a chapter list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterListOptions {
    pub unread: TriState,
    pub downloaded: TriState,
    pub bookmarked: TriState,

    /// Show the list in reverse sort order (newest first for source order)
    pub reverse: bool,

    pub sort_by: ChapterSortMode,

    /// Display the parsed chapter number instead of the chapter name
    pub show_chapter_number: bool,

    /// Chapters from these scanlators are hidden
    pub excluded_scanlators: Vec<String>,
}

impl Default for ChapterListOptions {
    fn default() -> Self {
        Self {
            unread: TriState::Unset,
            downloaded: TriState::Unset,
            bookmarked: TriState::Unset,
            reverse: true,
            sort_by: ChapterSortMode::Source,
            show_chapter_number: false,
            excluded_scanlators: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options: ChapterListOptions = serde_json::from_str("{}").unwrap();
        assert!(options.reverse);
        assert_eq!(options.sort_by, ChapterSortMode::Source);
        assert!(options.excluded_scanlators.is_empty());
    }

    #[test]
    fn test_sort_mode_names() {
        assert_eq!(
            ChapterSortMode::parse_lenient("chapter_number"),
            Some(ChapterSortMode::ChapterNumber)
        );
        assert_eq!(ChapterSortMode::parse_lenient("volume"), None);
        let json = serde_json::to_string(&ChapterSortMode::UploadedAt).unwrap();
        assert_eq!(json, r#""uploadedAt""#);
    }
}
