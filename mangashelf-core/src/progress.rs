//! Read and download progress of library mangas
//!
//! Used to decide which bulk actions apply to a selection of mangas.

use crate::types::Manga;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadProgress {
    Unread,
    PartiallyRead,
    FullyRead,
}

impl ReadProgress {
    /// Classify a manga; `None` when its chapter counts are unknown.
    ///
    /// A manga without chapters has nothing left to read and counts as fully read.
    pub fn of(manga: &Manga) -> Option<Self> {
        let (unread, total) = manga.unread_count.zip(manga.total_chapters)?;
        Some(if unread <= 0 {
            ReadProgress::FullyRead
        } else if unread >= total {
            ReadProgress::Unread
        } else {
            ReadProgress::PartiallyRead
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadProgress {
    NotDownloaded,
    PartiallyDownloaded,
    FullyDownloaded,
}

impl DownloadProgress {
    /// Classify a manga; `None` when its chapter counts are unknown
    pub fn of(manga: &Manga) -> Option<Self> {
        let (downloaded, total) = manga.download_count.zip(manga.total_chapters)?;
        Some(if downloaded <= 0 {
            DownloadProgress::NotDownloaded
        } else if downloaded >= total {
            DownloadProgress::FullyDownloaded
        } else {
            DownloadProgress::PartiallyDownloaded
        })
    }
}

/// Mangas of a selection grouped by the bulk actions that apply to them
#[derive(Debug, Default, Serialize)]
pub struct SelectionGroups<'a> {
    /// Not or partially downloaded
    pub downloadable: Vec<&'a Manga>,

    /// Partially or fully downloaded
    pub downloaded: Vec<&'a Manga>,

    /// Unread or partially read
    pub unread: Vec<&'a Manga>,

    /// Partially or fully read
    pub read: Vec<&'a Manga>,
}

impl<'a> SelectionGroups<'a> {
    pub fn from_mangas(mangas: impl IntoIterator<Item = &'a Manga>) -> Self {
        let mut groups = Self::default();
        for manga in mangas {
            match DownloadProgress::of(manga) {
                Some(DownloadProgress::NotDownloaded) => groups.downloadable.push(manga),
                Some(DownloadProgress::PartiallyDownloaded) => {
                    groups.downloadable.push(manga);
                    groups.downloaded.push(manga);
                }
                Some(DownloadProgress::FullyDownloaded) => groups.downloaded.push(manga),
                None => {}
            }
            match ReadProgress::of(manga) {
                Some(ReadProgress::Unread) => groups.unread.push(manga),
                Some(ReadProgress::PartiallyRead) => {
                    groups.unread.push(manga);
                    groups.read.push(manga);
                }
                Some(ReadProgress::FullyRead) => groups.read.push(manga),
                None => {}
            }
        }
        groups
    }

    /// Group sizes, for reporting
    pub fn counts(&self) -> SelectionCounts {
        SelectionCounts {
            downloadable: self.downloadable.len(),
            downloaded: self.downloaded.len(),
            unread: self.unread.len(),
            read: self.read.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionCounts {
    pub downloadable: usize,
    pub downloaded: usize,
    pub unread: usize,
    pub read: usize,
}
