//! Library view: search, filter and sort over the user's library
//!
//! The pipeline is a pure function of its inputs. Callers own the manga list,
//! the query and the [`LibraryOptions`]; they recompute the view whenever any
//! of them changes and can use [`VisibleMangas::filter_key`] to invalidate
//! memoized results.

mod filter;
mod search;
mod sort;

pub use filter::{
    filter_manga, filter_mangas, status_filter, tracker_filter, tri_state_filter,
    tri_state_filter_boolean, tri_state_filter_number,
};
pub use search::{perform_search, query_search_manga};
pub use sort::sort_mangas;

use crate::types::{LibraryOptions, Manga};
use serde::Serialize;

/// Result of computing the library view
#[derive(Debug, Clone, Serialize)]
pub struct VisibleMangas<'a> {
    /// Filtered mangas in sort order
    pub visible: Vec<&'a Manga>,

    /// The library is not empty but the active query/filters hid every manga
    pub show_filtered_out_message: bool,

    /// Key identifying the configuration the view was computed with
    pub filter_key: String,
}

/// Compute the visible part of the library.
pub fn visible_mangas<'a>(
    mangas: &'a [Manga],
    query: Option<&str>,
    options: &LibraryOptions,
    ignore_filters: bool,
) -> VisibleMangas<'a> {
    let filtered = filter_mangas(mangas, query, options, ignore_filters);
    let visible = sort_mangas(&filtered, options.sort_by, options.sort_desc);

    let is_searching = query.is_some_and(|q| !q.is_empty());
    let show_filtered_out_message =
        (options.has_active_filters() || is_searching) && filtered.is_empty() && !mangas.is_empty();

    tracing::debug!(
        total = mangas.len(),
        visible = visible.len(),
        sort = ?options.sort_by,
        desc = options.sort_desc,
        "Computed library view"
    );

    VisibleMangas {
        visible,
        show_filtered_out_message,
        filter_key: filter_key(options, ignore_filters),
    }
}

/// Serialize the configuration into a cache key
pub fn filter_key(options: &LibraryOptions, ignore_filters: bool) -> String {
    let options = serde_json::to_string(options).unwrap_or_default();
    format!("{options}{ignore_filters}")
}
