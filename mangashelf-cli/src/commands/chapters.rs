//! Chapters command implementation

use super::parse_tri_state;
use anyhow::{bail, Result};
use clap::Args;
use mangashelf_core::chapters::visible_chapters;
use mangashelf_core::{ChapterListOptions, ChapterSortMode, LibrarySnapshot, TriState};

/// Filter and sort options of a chapter list
#[derive(Args, Debug, Clone)]
pub struct ChapterArgs {
    /// Unread (true) or read (false) chapters only
    #[arg(long, default_value = "unset", value_parser = parse_tri_state)]
    pub unread: TriState,

    /// Downloaded (true) or not downloaded (false) chapters only
    #[arg(long, default_value = "unset", value_parser = parse_tri_state)]
    pub downloaded: TriState,

    /// Bookmarked (true) or not bookmarked (false) chapters only
    #[arg(long, default_value = "unset", value_parser = parse_tri_state)]
    pub bookmarked: TriState,

    /// Sort key (source, chapterNumber, uploadedAt, fetchedAt)
    #[arg(short, long, default_value = "source")]
    pub sort: String,

    /// Oldest first instead of newest first
    #[arg(long)]
    pub ascending: bool,

    /// Hide chapters from this scanlator (repeatable)
    #[arg(long = "exclude-scanlator")]
    pub excluded_scanlators: Vec<String>,

    /// Show chapter numbers instead of chapter names
    #[arg(long)]
    pub numbers: bool,
}

impl ChapterArgs {
    pub fn to_options(&self) -> Result<ChapterListOptions> {
        let Some(sort_by) = ChapterSortMode::parse_lenient(&self.sort) else {
            bail!("Unknown chapter sort key: {}", self.sort);
        };
        Ok(ChapterListOptions {
            unread: self.unread,
            downloaded: self.downloaded,
            bookmarked: self.bookmarked,
            reverse: !self.ascending,
            sort_by,
            show_chapter_number: self.numbers,
            excluded_scanlators: self.excluded_scanlators.clone(),
        })
    }
}

/// List the visible chapters of a manga
pub fn chapters(library: &LibrarySnapshot, id: i64, args: &ChapterArgs, json: bool) -> Result<()> {
    let Some(manga) = library.get(id) else {
        bail!("No manga with id {} in library", id);
    };
    let options = args.to_options()?;
    let all = library.chapters_of(id);
    let visible = visible_chapters(all, &options);

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!("{} ({} of {} chapters)", manga.title, visible.len(), all.len());
    for chapter in visible {
        let label = if options.show_chapter_number {
            format!("Chapter {}", chapter.chapter_number)
        } else {
            chapter.name.clone()
        };
        let mut marks = String::new();
        if chapter.is_read {
            marks.push('R');
        }
        if chapter.is_downloaded {
            marks.push('D');
        }
        if chapter.is_bookmarked {
            marks.push('B');
        }
        match &chapter.scanlator {
            Some(scanlator) => println!("{:>8}  {:<3}  {}  [{}]", chapter.id, marks, label, scanlator),
            None => println!("{:>8}  {:<3}  {}", chapter.id, marks, label),
        }
    }

    Ok(())
}
