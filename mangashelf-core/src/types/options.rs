//! Library view configuration

use super::{StatusFilter, TriState};
use crate::error::FilterError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Sort key for the library view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LibrarySortMode {
    Alphabetically,
    DateAdded,
    UnreadChapters,
    LastRead,
    LatestUploadedChapter,
    LatestFetchedChapter,
    TotalChapters,
}

impl LibrarySortMode {
    pub const ALL: [LibrarySortMode; 7] = [
        LibrarySortMode::Alphabetically,
        LibrarySortMode::DateAdded,
        LibrarySortMode::UnreadChapters,
        LibrarySortMode::LastRead,
        LibrarySortMode::LatestUploadedChapter,
        LibrarySortMode::LatestFetchedChapter,
        LibrarySortMode::TotalChapters,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LibrarySortMode::Alphabetically => "alphabetically",
            LibrarySortMode::DateAdded => "dateAdded",
            LibrarySortMode::UnreadChapters => "unreadChapters",
            LibrarySortMode::LastRead => "lastRead",
            LibrarySortMode::LatestUploadedChapter => "latestUploadedChapter",
            LibrarySortMode::LatestFetchedChapter => "latestFetchedChapter",
            LibrarySortMode::TotalChapters => "totalChapters",
        }
    }

    /// Look up a sort key by name; unknown names yield `None`.
    ///
    /// Accepts the camelCase wire name as well as snake/kebab case.
    pub fn parse_lenient(name: &str) -> Option<Self> {
        let wanted: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        let found = Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().to_ascii_lowercase() == wanted);
        if found.is_none() {
            tracing::debug!(sort = name, "Ignoring unknown library sort key");
        }
        found
    }
}

impl fmt::Display for LibrarySortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter and sort configuration for the library view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryOptions {
    pub has_unread_chapters: TriState,
    pub has_read_chapters: TriState,
    pub has_bookmarked_chapters: TriState,
    pub has_downloaded_chapters: TriState,
    pub has_duplicate_chapters: TriState,

    /// Per-status constraints
    pub has_status: StatusFilter,

    /// Per-tracker constraints, keyed by tracker id
    pub has_tracker_binding: BTreeMap<i64, TriState>,

    #[serde(deserialize_with = "deserialize_sort_mode")]
    pub sort_by: Option<LibrarySortMode>,

    pub sort_desc: bool,
}

impl LibraryOptions {
    /// Whether any of the chapter-count tri-state flags is set
    pub fn has_active_flags(&self) -> bool {
        [
            self.has_unread_chapters,
            self.has_read_chapters,
            self.has_bookmarked_chapters,
            self.has_downloaded_chapters,
            self.has_duplicate_chapters,
        ]
        .iter()
        .any(|state| state.is_set())
    }

    /// Whether any filter (flag, status or tracker entry) constrains the view
    pub fn has_active_filters(&self) -> bool {
        self.has_active_flags()
            || self.has_status.is_active()
            || self.has_tracker_binding.values().any(|state| state.is_set())
    }
}

/// Parse `1:true,4:false` into per-tracker constraints
pub fn parse_tracker_overrides(s: &str) -> Result<BTreeMap<i64, TriState>, FilterError> {
    let mut bindings = BTreeMap::new();
    for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (tracker, state) = pair
            .split_once([':', '='])
            .ok_or_else(|| FilterError::InvalidTracker(pair.to_string()))?;
        let tracker: i64 = tracker
            .trim()
            .parse()
            .map_err(|_| FilterError::InvalidTracker(tracker.to_string()))?;
        bindings.insert(tracker, state.trim().parse()?);
    }
    Ok(bindings)
}

fn deserialize_sort_mode<'de, D>(deserializer: D) -> Result<Option<LibrarySortMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.as_deref().and_then(LibrarySortMode::parse_lenient))
}
