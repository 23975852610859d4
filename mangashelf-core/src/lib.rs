//! Mangashelf Core Library
//!
//! This crate provides the data model and the library view pipeline of the
//! Mangashelf manga library: free-text search, tri-state filters and sorting
//! over the user's library, plus the chapter list view and read/download
//! progress used for bulk actions.

pub mod chapters;
pub mod error;
pub mod library;
pub mod progress;
pub mod storage;
pub mod text;
pub mod types;

pub use error::{FilterError, Result, ShelfError, StorageError};
pub use library::{visible_mangas, VisibleMangas};
pub use types::{
    Chapter, ChapterListOptions, ChapterSortMode, ChapterStamp, LibraryOptions, LibrarySnapshot,
    LibrarySortMode, Manga, MangaStatus, StatusFilter, TrackRecord, TriState,
};
