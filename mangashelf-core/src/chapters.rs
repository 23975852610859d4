//! Chapter list view: filter and sort a manga's chapters

use crate::library::tri_state_filter_boolean;
use crate::types::{Chapter, ChapterListOptions, ChapterSortMode};

/// Keep the chapters matching the read/download/bookmark toggles and not
/// coming from an excluded scanlator, in input order.
pub fn filter_chapters<'a>(chapters: &'a [Chapter], options: &ChapterListOptions) -> Vec<&'a Chapter> {
    chapters
        .iter()
        .filter(|chapter| {
            tri_state_filter_boolean(options.unread, !chapter.is_read)
                && tri_state_filter_boolean(options.downloaded, chapter.is_downloaded)
                && tri_state_filter_boolean(options.bookmarked, chapter.is_bookmarked)
                && !is_excluded(chapter, &options.excluded_scanlators)
        })
        .collect()
}

fn is_excluded(chapter: &Chapter, excluded: &[String]) -> bool {
    chapter
        .scanlator
        .as_deref()
        .is_some_and(|scanlator| excluded.iter().any(|e| e == scanlator))
}

/// Return the chapters stably sorted by `sort_by`, reversed when `reverse` is set.
pub fn sort_chapters<'a>(
    chapters: &[&'a Chapter],
    sort_by: ChapterSortMode,
    reverse: bool,
) -> Vec<&'a Chapter> {
    let mut result = chapters.to_vec();

    match sort_by {
        ChapterSortMode::Source => result.sort_by_key(|c| c.source_order),
        ChapterSortMode::ChapterNumber => {
            result.sort_by(|a, b| a.chapter_number.total_cmp(&b.chapter_number))
        }
        ChapterSortMode::UploadedAt => result.sort_by_key(|c| c.upload_date.unwrap_or(0)),
        ChapterSortMode::FetchedAt => result.sort_by_key(|c| c.fetched_at.unwrap_or(0)),
    }

    if reverse {
        result.reverse();
    }

    result
}

/// Filter then sort a chapter list according to `options`
pub fn visible_chapters<'a>(chapters: &'a [Chapter], options: &ChapterListOptions) -> Vec<&'a Chapter> {
    let filtered = filter_chapters(chapters, options);
    tracing::debug!(
        total = chapters.len(),
        visible = filtered.len(),
        sort = options.sort_by.as_str(),
        reverse = options.reverse,
        "Computed chapter list"
    );
    sort_chapters(&filtered, options.sort_by, options.reverse)
}
