//! Info command implementation

use super::count;
use anyhow::{Context, Result};
use mangashelf_core::progress::{DownloadProgress, ReadProgress};
use mangashelf_core::types::timestamp::to_datetime;
use mangashelf_core::{LibrarySnapshot, MangaStatus};
use serde::Serialize;

/// Manga info output
#[derive(Serialize)]
struct MangaInfo {
    id: i64,
    title: String,
    author: Option<String>,
    artist: Option<String>,
    status: MangaStatus,
    genres: Vec<String>,
    source: Option<String>,
    unread: Option<i64>,
    read: Option<i64>,
    total: Option<i64>,
    downloaded: Option<i64>,
    bookmarked: Option<i64>,
    read_progress: Option<ReadProgress>,
    download_progress: Option<DownloadProgress>,
    added: Option<String>,
    last_read: Option<String>,
    trackers: Vec<i64>,
    chapters: usize,
}

fn format_millis(millis: Option<i64>) -> Option<String> {
    millis.and_then(to_datetime).map(|dt| dt.to_rfc3339())
}

/// Display information about a manga
pub fn info(library: &LibrarySnapshot, id: i64, json: bool) -> Result<()> {
    let manga = library
        .get(id)
        .with_context(|| format!("No manga with id {} in library", id))?;

    let info = MangaInfo {
        id: manga.id,
        title: manga.title.clone(),
        author: manga.author.clone(),
        artist: manga.artist.clone(),
        status: manga.status,
        genres: manga.genre.clone(),
        source: manga.source_id.clone(),
        unread: manga.unread_count,
        read: manga.read_count(),
        total: manga.total_chapters,
        downloaded: manga.download_count,
        bookmarked: manga.bookmark_count,
        read_progress: ReadProgress::of(manga),
        download_progress: DownloadProgress::of(manga),
        added: format_millis(manga.in_library_at),
        last_read: format_millis(manga.last_read_at()),
        trackers: manga.track_records.iter().map(|t| t.tracker_id).collect(),
        chapters: library.chapters_of(id).len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Title:       {}", info.title);
        if let Some(author) = &info.author {
            println!("Author:      {}", author);
        }
        if let Some(artist) = &info.artist {
            println!("Artist:      {}", artist);
        }
        println!("Status:      {}", info.status);
        if !info.genres.is_empty() {
            println!("Genres:      {}", info.genres.join(", "));
        }
        if let Some(source) = &info.source {
            println!("Source:      {}", source);
        }
        println!(
            "Chapters:    {} total, {} unread, {} read",
            count(info.total),
            count(info.unread),
            count(info.read)
        );
        println!("Downloaded:  {}", count(info.downloaded));
        println!("Bookmarked:  {}", count(info.bookmarked));
        if let Some(added) = &info.added {
            println!("Added:       {}", added);
        }
        if let Some(last_read) = &info.last_read {
            println!("Last read:   {}", last_read);
        }
        if !info.trackers.is_empty() {
            let trackers: Vec<String> = info.trackers.iter().map(i64::to_string).collect();
            println!("Trackers:    {}", trackers.join(", "));
        }
        println!("Stored:      {} chapters", info.chapters);
    }

    Ok(())
}
