//! Library manga record

use super::timestamp::deserialize_opt_millis;
use super::MangaStatus;
use serde::{Deserialize, Serialize};

/// A manga in the user's library, with the chapter statistics the library
/// view filters and sorts on.
///
/// Counts and timestamps are optional: records coming from partial API
/// responses leave them out, and the library view degrades gracefully.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manga {
    pub id: i64,

    pub title: String,

    /// Genre tags, in source order
    #[serde(default)]
    pub genre: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub artist: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    /// Identifier of the source the manga was added from
    #[serde(default)]
    pub source_id: Option<String>,

    #[serde(default)]
    pub status: MangaStatus,

    #[serde(default)]
    pub unread_count: Option<i64>,

    /// Total number of chapters
    #[serde(default)]
    pub total_chapters: Option<i64>,

    #[serde(default)]
    pub bookmark_count: Option<i64>,

    #[serde(default)]
    pub download_count: Option<i64>,

    #[serde(default)]
    pub has_duplicate_chapters: bool,

    /// When the manga was added to the library (epoch millis)
    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub in_library_at: Option<i64>,

    #[serde(default)]
    pub last_read_chapter: Option<ChapterStamp>,

    #[serde(default)]
    pub latest_uploaded_chapter: Option<ChapterStamp>,

    #[serde(default)]
    pub latest_fetched_chapter: Option<ChapterStamp>,

    #[serde(default)]
    pub track_records: Vec<TrackRecord>,
}

impl Manga {
    /// Create a manga with only an id and a title
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genre: Vec::new(),
            description: None,
            artist: None,
            author: None,
            source_id: None,
            status: MangaStatus::Unknown,
            unread_count: None,
            total_chapters: None,
            bookmark_count: None,
            download_count: None,
            has_duplicate_chapters: false,
            in_library_at: None,
            last_read_chapter: None,
            latest_uploaded_chapter: None,
            latest_fetched_chapter: None,
            track_records: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: MangaStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genre = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Set unread and total chapter counts
    pub fn with_chapter_counts(mut self, unread: i64, total: i64) -> Self {
        self.unread_count = Some(unread);
        self.total_chapters = Some(total);
        self
    }

    /// Number of read chapters (`total - unread`).
    ///
    /// Not clamped: inconsistent counts yield a negative value.
    pub fn read_count(&self) -> Option<i64> {
        self.total_chapters
            .zip(self.unread_count)
            .map(|(total, unread)| total - unread)
    }

    pub fn last_read_at(&self) -> Option<i64> {
        self.last_read_chapter.as_ref().and_then(|c| c.last_read_at)
    }

    pub fn latest_upload_date(&self) -> Option<i64> {
        self.latest_uploaded_chapter
            .as_ref()
            .and_then(|c| c.upload_date)
    }

    pub fn latest_fetched_at(&self) -> Option<i64> {
        self.latest_fetched_chapter.as_ref().and_then(|c| c.fetched_at)
    }

    /// Whether the manga is bound to the given tracker
    pub fn is_tracked_by(&self, tracker_id: i64) -> bool {
        self.track_records.iter().any(|r| r.tracker_id == tracker_id)
    }

    pub fn has_unread_chapters(&self) -> bool {
        self.unread_count.is_some_and(|n| n > 0)
    }

    pub fn has_read_chapters(&self) -> bool {
        match (self.unread_count, self.total_chapters) {
            (Some(unread), Some(total)) => unread != total,
            _ => false,
        }
    }

    pub fn has_downloaded_chapters(&self) -> bool {
        self.download_count.is_some_and(|n| n > 0)
    }

    pub fn is_fully_downloaded(&self) -> bool {
        matches!(
            (self.download_count, self.total_chapters),
            (Some(downloaded), Some(total)) if downloaded == total
        )
    }
}

/// Timestamps of a chapter referenced from a manga record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChapterStamp {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub last_read_at: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub upload_date: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub fetched_at: Option<i64>,
}

impl ChapterStamp {
    pub fn read_at(millis: i64) -> Self {
        Self {
            last_read_at: Some(millis),
            ..Self::default()
        }
    }

    pub fn uploaded_at(millis: i64) -> Self {
        Self {
            upload_date: Some(millis),
            ..Self::default()
        }
    }

    pub fn fetched_at(millis: i64) -> Self {
        Self {
            fetched_at: Some(millis),
            ..Self::default()
        }
    }
}

/// Binding between a manga and an external progress tracker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackRecord {
    pub id: i64,
    pub tracker_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_count_is_not_clamped() {
        let manga = Manga::new(1, "Odd").with_chapter_counts(12, 10);
        assert_eq!(manga.read_count(), Some(-2));

        let manga = Manga::new(2, "Missing");
        assert_eq!(manga.read_count(), None);
    }

    #[test]
    fn test_deserialize_partial_record() {
        let json = r#"{
            "id": 7,
            "title": "Partial",
            "status": "ON_HIATUS",
            "in_library_at": "1690000000000",
            "last_read_chapter": { "last_read_at": "1695000000000" }
        }"#;
        let manga: Manga = serde_json::from_str(json).unwrap();
        assert_eq!(manga.status, MangaStatus::OnHiatus);
        assert_eq!(manga.in_library_at, Some(1_690_000_000_000));
        assert_eq!(manga.last_read_at(), Some(1_695_000_000_000));
        assert_eq!(manga.latest_upload_date(), None);
        assert!(manga.genre.is_empty());
        assert!(!manga.has_duplicate_chapters);
    }

    #[test]
    fn test_deserialize_odd_status_keeps_record() {
        let json = r#"[
            { "id": 1, "title": "Null", "status": null },
            { "id": 2, "title": "Novel", "status": "SERIALIZING" }
        ]"#;
        let mangas: Vec<Manga> = serde_json::from_str(json).unwrap();
        assert_eq!(mangas.len(), 2);
        assert!(mangas.iter().all(|m| m.status == MangaStatus::Unknown));
    }

    #[test]
    fn test_action_hints() {
        let mut manga = Manga::new(3, "Hints").with_chapter_counts(4, 10);
        manga.download_count = Some(10);
        assert!(manga.has_unread_chapters());
        assert!(manga.has_read_chapters());
        assert!(manga.has_downloaded_chapters());
        assert!(manga.is_fully_downloaded());

        let untouched = Manga::new(4, "Untouched").with_chapter_counts(10, 10);
        assert!(!untouched.has_read_chapters());
        assert!(!untouched.is_fully_downloaded());
    }

    #[test]
    fn test_tracker_binding() {
        let mut manga = Manga::new(5, "Tracked");
        manga.track_records.push(TrackRecord { id: 1, tracker_id: 2 });
        assert!(manga.is_tracked_by(2));
        assert!(!manga.is_tracked_by(1));
    }
}
