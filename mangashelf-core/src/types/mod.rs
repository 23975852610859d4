//! Core types for the manga library

mod chapter;
mod library;
mod manga;
mod options;
mod status;
pub mod timestamp;
mod tri_state;

pub use chapter::{Chapter, ChapterListOptions, ChapterSortMode};
pub use library::LibrarySnapshot;
pub use manga::{ChapterStamp, Manga, TrackRecord};
pub use options::{parse_tracker_overrides, LibraryOptions, LibrarySortMode};
pub use status::{MangaStatus, StatusFilter};
pub use tri_state::TriState;
