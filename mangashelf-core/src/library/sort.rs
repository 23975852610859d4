//! Library sort stage

use crate::text::title_collator;
use crate::types::{LibrarySortMode, Manga};
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Compare two optional numbers, treating a missing value as zero
fn cmp_number(a: Option<i64>, b: Option<i64>) -> Ordering {
    a.unwrap_or(0).cmp(&b.unwrap_or(0))
}

type NumberKey = fn(&Manga) -> Option<i64>;

/// Numeric sort key of a mode; `None` for the title ordering
fn number_key(sort_by: LibrarySortMode) -> Option<NumberKey> {
    let key: NumberKey = match sort_by {
        LibrarySortMode::Alphabetically => return None,
        LibrarySortMode::DateAdded => |m: &Manga| m.in_library_at,
        LibrarySortMode::UnreadChapters => |m: &Manga| m.unread_count,
        LibrarySortMode::LastRead => |m: &Manga| m.last_read_at(),
        LibrarySortMode::LatestUploadedChapter => |m: &Manga| m.latest_upload_date(),
        LibrarySortMode::LatestFetchedChapter => |m: &Manga| m.latest_fetched_at(),
        LibrarySortMode::TotalChapters => |m: &Manga| m.total_chapters,
    };
    Some(key)
}

/// Return a sorted copy of `mangas`; the input is left untouched.
///
/// The sort is stable. Without a sort key the copy keeps input order. When
/// `desc` is set the whole sorted sequence is reversed afterwards, ties
/// included.
pub fn sort_mangas<M>(mangas: &[M], sort_by: Option<LibrarySortMode>, desc: bool) -> Vec<M>
where
    M: Borrow<Manga> + Clone,
{
    let mut result = mangas.to_vec();

    if let Some(sort_by) = sort_by {
        match number_key(sort_by) {
            Some(key) => result.sort_by(|a, b| cmp_number(key(a.borrow()), key(b.borrow()))),
            None => {
                let mut collator = title_collator();
                result.sort_by(|a, b| {
                    let (a, b): (&Manga, &Manga) = (a.borrow(), b.borrow());
                    collator.collate(a.title.as_str(), b.title.as_str())
                });
            }
        }
    }

    if desc {
        result.reverse();
    }

    result
}
