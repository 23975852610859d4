//! Tri-state predicates and the library filter stage

use super::search::query_search_manga;
use crate::types::{LibraryOptions, Manga, MangaStatus, StatusFilter, TriState};
use std::collections::BTreeMap;

/// Evaluate a tri-state toggle; only the check matching the state runs.
pub fn tri_state_filter(
    state: TriState,
    enabled: impl FnOnce() -> bool,
    disabled: impl FnOnce() -> bool,
) -> bool {
    match state {
        TriState::Enabled => enabled(),
        TriState::Disabled => disabled(),
        TriState::Unset => true,
    }
}

/// Tri-state check on a count.
///
/// `Enabled` needs a present count of at least one. `Disabled` needs a count
/// of exactly zero, so a missing count satisfies neither.
pub fn tri_state_filter_number(state: TriState, count: Option<i64>) -> bool {
    tri_state_filter(
        state,
        || count.is_some_and(|n| n != 0 && n >= 1),
        || count == Some(0),
    )
}

pub fn tri_state_filter_boolean(state: TriState, value: bool) -> bool {
    tri_state_filter(state, || value, || !value)
}

/// Check a manga's status against every entry of the status filter.
pub fn status_filter(filter: &StatusFilter, manga: &Manga) -> bool {
    MangaStatus::ALL
        .into_iter()
        .all(|status| tri_state_filter_boolean(filter.get(status), manga.status == status))
}

/// Check a manga's tracker bindings against every per-tracker entry.
pub fn tracker_filter(bindings: &BTreeMap<i64, TriState>, manga: &Manga) -> bool {
    bindings
        .iter()
        .all(|(&tracker_id, &state)| tri_state_filter_boolean(state, manga.is_tracked_by(tracker_id)))
}

/// Apply every configured filter to one manga.
pub fn filter_manga(manga: &Manga, options: &LibraryOptions) -> bool {
    tri_state_filter_number(options.has_unread_chapters, manga.unread_count)
        && tri_state_filter_number(options.has_read_chapters, manga.read_count())
        && tri_state_filter_number(options.has_bookmarked_chapters, manga.bookmark_count)
        && tri_state_filter_number(options.has_downloaded_chapters, manga.download_count)
        && tri_state_filter_boolean(options.has_duplicate_chapters, manga.has_duplicate_chapters)
        && status_filter(&options.has_status, manga)
        && tracker_filter(&options.has_tracker_binding, manga)
}

/// Keep the mangas matching both the query and the filters, in input order.
///
/// With `ignore_filters` set, a non-empty query bypasses the filters; an
/// empty query never does.
pub fn filter_mangas<'a>(
    mangas: &'a [Manga],
    query: Option<&str>,
    options: &LibraryOptions,
    ignore_filters: bool,
) -> Vec<&'a Manga> {
    let ignore_filters_while_searching = ignore_filters && query.is_some_and(|q| !q.is_empty());

    mangas
        .iter()
        .filter(|manga| {
            let matches_search = query_search_manga(query, manga);
            let matches_filters = ignore_filters_while_searching || filter_manga(manga, options);
            matches_search && matches_filters
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [TriState; 3] = [TriState::Enabled, TriState::Disabled, TriState::Unset];

    #[test]
    fn test_unset_never_constrains() {
        for count in [None, Some(-1), Some(0), Some(1), Some(42)] {
            assert!(tri_state_filter_number(TriState::Unset, count));
        }
        assert!(tri_state_filter_boolean(TriState::Unset, true));
        assert!(tri_state_filter_boolean(TriState::Unset, false));
    }

    #[test]
    fn test_checks_are_lazy() {
        let ran = std::cell::Cell::new(false);
        let result = tri_state_filter(
            TriState::Enabled,
            || true,
            || {
                ran.set(true);
                false
            },
        );
        assert!(result);
        assert!(!ran.get());
    }

    #[test]
    fn test_number_filter() {
        assert!(tri_state_filter_number(TriState::Enabled, Some(3)));
        assert!(!tri_state_filter_number(TriState::Enabled, Some(0)));
        assert!(!tri_state_filter_number(TriState::Enabled, Some(-2)));
        assert!(!tri_state_filter_number(TriState::Enabled, None));

        assert!(tri_state_filter_number(TriState::Disabled, Some(0)));
        assert!(!tri_state_filter_number(TriState::Disabled, Some(3)));
        assert!(!tri_state_filter_number(TriState::Disabled, None));
    }

    #[test]
    fn test_boolean_filter() {
        for state in STATES {
            let on = tri_state_filter_boolean(state, true);
            let off = tri_state_filter_boolean(state, false);
            match state {
                TriState::Enabled => assert!(on && !off),
                TriState::Disabled => assert!(!on && off),
                TriState::Unset => assert!(on && off),
            }
        }
    }

    #[test]
    fn test_status_filter() {
        let ongoing = Manga::new(1, "A").with_status(MangaStatus::Ongoing);
        let completed = Manga::new(2, "B").with_status(MangaStatus::Completed);

        let filter = StatusFilter::new().with(MangaStatus::Ongoing, TriState::Enabled);
        assert!(status_filter(&filter, &ongoing));
        assert!(!status_filter(&filter, &completed));

        let filter = StatusFilter::new().with(MangaStatus::Ongoing, TriState::Disabled);
        assert!(!status_filter(&filter, &ongoing));
        assert!(status_filter(&filter, &completed));

        // Two required statuses can never both hold
        let filter = StatusFilter::new()
            .with(MangaStatus::Ongoing, TriState::Enabled)
            .with(MangaStatus::Completed, TriState::Enabled);
        assert!(!status_filter(&filter, &ongoing));
        assert!(!status_filter(&filter, &completed));
    }

    #[test]
    fn test_read_count_uses_total_minus_unread() {
        let options = LibraryOptions {
            has_read_chapters: TriState::Disabled,
            ..LibraryOptions::default()
        };
        let unread = Manga::new(1, "Fresh").with_chapter_counts(10, 10);
        let started = Manga::new(2, "Started").with_chapter_counts(9, 10);
        let unknown = Manga::new(3, "Unknown");

        assert!(filter_manga(&unread, &options));
        assert!(!filter_manga(&started, &options));
        assert!(!filter_manga(&unknown, &options));
    }

    #[test]
    fn test_tracker_filter() {
        let mut tracked = Manga::new(1, "Tracked");
        tracked.track_records.push(crate::types::TrackRecord { id: 1, tracker_id: 3 });
        let untracked = Manga::new(2, "Untracked");

        let bindings = BTreeMap::from([(3, TriState::Enabled)]);
        assert!(tracker_filter(&bindings, &tracked));
        assert!(!tracker_filter(&bindings, &untracked));

        let bindings = BTreeMap::from([(3, TriState::Disabled), (4, TriState::Unset)]);
        assert!(!tracker_filter(&bindings, &tracked));
        assert!(tracker_filter(&bindings, &untracked));
    }

    #[test]
    fn test_ignore_filters_only_while_searching() {
        let mangas = vec![
            Manga::new(1, "Berserk").with_chapter_counts(0, 10),
            Manga::new(2, "Vagabond").with_chapter_counts(5, 10),
        ];
        let options = LibraryOptions {
            has_unread_chapters: TriState::Enabled,
            ..LibraryOptions::default()
        };

        let hits = filter_mangas(&mangas, Some("berserk"), &options, true);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        let hits = filter_mangas(&mangas, Some("berserk"), &options, false);
        assert!(hits.is_empty());

        let hits = filter_mangas(&mangas, Some(""), &options, true);
        assert_eq!(hits.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2]);

        let hits = filter_mangas(&mangas, None, &options, true);
        assert_eq!(hits.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_filter_keeps_input_order() {
        let mangas: Vec<Manga> = ["Zeta", "Alpha", "Mu"]
            .iter()
            .enumerate()
            .map(|(i, t)| Manga::new(i as i64, *t))
            .collect();
        let hits = filter_mangas(&mangas, None, &LibraryOptions::default(), false);
        let titles: Vec<&str> = hits.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mu"]);
    }
}
