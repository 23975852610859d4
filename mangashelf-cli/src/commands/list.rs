//! List command implementation

use super::{count, parse_tri_state};
use anyhow::{Context, Result};
use clap::Args;
use mangashelf_core::types::parse_tracker_overrides;
use mangashelf_core::{
    visible_mangas, LibraryOptions, LibrarySnapshot, LibrarySortMode, StatusFilter, TriState,
};

/// Search, filter and sort options of the library view
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Search title, genres, description, artist, author and source
    #[arg(short, long)]
    pub query: Option<String>,

    /// Mangas with (true) or without (false) unread chapters
    #[arg(long, default_value = "unset", value_parser = parse_tri_state)]
    pub unread: TriState,

    /// Mangas with (true) or without (false) read chapters
    #[arg(long, default_value = "unset", value_parser = parse_tri_state)]
    pub read: TriState,

    /// Mangas with (true) or without (false) bookmarked chapters
    #[arg(long, default_value = "unset", value_parser = parse_tri_state)]
    pub bookmarked: TriState,

    /// Mangas with (true) or without (false) downloaded chapters
    #[arg(long, default_value = "unset", value_parser = parse_tri_state)]
    pub downloaded: TriState,

    /// Mangas with (true) or without (false) duplicate chapters
    #[arg(long, default_value = "unset", value_parser = parse_tri_state)]
    pub duplicates: TriState,

    /// Status constraints, e.g. ONGOING:true,COMPLETED:false
    #[arg(long)]
    pub status: Option<String>,

    /// Tracker constraints by tracker id, e.g. 1:true,2:false
    #[arg(long)]
    pub tracker: Option<String>,

    /// Sort key (alphabetically, dateAdded, unreadChapters, lastRead,
    /// latestUploadedChapter, latestFetchedChapter, totalChapters)
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Sort in descending order
    #[arg(long)]
    pub desc: bool,

    /// Bypass filters while a query is given
    #[arg(long)]
    pub ignore_filters: bool,
}

impl ViewArgs {
    /// Build the library options described by the flags
    pub fn to_options(&self) -> Result<LibraryOptions> {
        let has_status = match self.status {
            Some(ref status) => StatusFilter::parse_overrides(status)
                .with_context(|| format!("Invalid --status: {}", status))?,
            None => StatusFilter::new(),
        };
        let has_tracker_binding = match self.tracker {
            Some(ref tracker) => parse_tracker_overrides(tracker)
                .with_context(|| format!("Invalid --tracker: {}", tracker))?,
            None => Default::default(),
        };

        Ok(LibraryOptions {
            has_unread_chapters: self.unread,
            has_read_chapters: self.read,
            has_bookmarked_chapters: self.bookmarked,
            has_downloaded_chapters: self.downloaded,
            has_duplicate_chapters: self.duplicates,
            has_status,
            has_tracker_binding,
            sort_by: self.sort.as_deref().and_then(LibrarySortMode::parse_lenient),
            sort_desc: self.desc,
        })
    }
}

/// List the visible mangas of a library
pub fn list(library: &LibrarySnapshot, view: &ViewArgs, json: bool) -> Result<()> {
    let options = view.to_options()?;
    let result = visible_mangas(
        &library.mangas,
        view.query.as_deref(),
        &options,
        view.ignore_filters,
    );

    tracing::info!(
        "Showing {} of {} mangas",
        result.visible.len(),
        library.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if library.is_empty() {
        println!("Library is empty");
    } else if result.show_filtered_out_message {
        println!("No mangas match the current search and filters");
    }

    for manga in &result.visible {
        println!(
            "{:>8}  {:<40}  {:<19}  {:>5}/{}",
            manga.id,
            manga.title,
            manga.status,
            count(manga.unread_count),
            count(manga.total_chapters)
        );
    }

    Ok(())
}
