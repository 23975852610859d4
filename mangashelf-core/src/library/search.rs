//! Free-text search over manga fields

use crate::text::enhanced_cleanup;
use crate::types::Manga;

/// Check that every query term occurs in the folded, joined target strings.
///
/// Absent queries and targets are skipped. With no query terms left the
/// search matches vacuously. Targets are folded one by one and joined with
/// `", "` before the substring checks.
pub fn perform_search(queries: &[Option<&str>], strings: &[Option<&str>]) -> bool {
    let queries: Vec<String> = queries.iter().flatten().map(|q| enhanced_cleanup(q)).collect();
    if queries.is_empty() {
        return true;
    }

    let haystack = strings
        .iter()
        .flatten()
        .map(|s| enhanced_cleanup(s))
        .collect::<Vec<_>>()
        .join(", ");

    queries.iter().all(|query| haystack.contains(query.as_str()))
}

/// Match a query against a manga.
///
/// Fields are tried independently and any hit counts: title, genres (the
/// query is split on commas and every piece must be found among the genres),
/// description, artist, author and source id.
pub fn query_search_manga(query: Option<&str>, manga: &Manga) -> bool {
    let genre_terms: Option<Vec<Option<&str>>> =
        query.map(|q| q.split(',').map(Some).collect());
    let genres: Vec<String> = manga.genre.iter().map(|g| enhanced_cleanup(g)).collect();
    let genres: Vec<Option<&str>> = genres.iter().map(|g| Some(g.as_str())).collect();

    perform_search(&[query], &[Some(manga.title.as_str())])
        || perform_search(genre_terms.as_deref().unwrap_or_default(), &genres)
        || perform_search(&[query], &[manga.description.as_deref()])
        || perform_search(&[query], &[manga.artist.as_deref()])
        || perform_search(&[query], &[manga.author.as_deref()])
        || perform_search(&[query], &[manga.source_id.as_deref()])
}
