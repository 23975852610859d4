//! Property tests for the library view pipeline

use mangashelf_core::library::{
    filter_mangas, sort_mangas, tri_state_filter_boolean, tri_state_filter_number,
    visible_mangas,
};
use mangashelf_core::text::enhanced_cleanup;
use mangashelf_core::types::{LibraryOptions, LibrarySortMode, Manga, MangaStatus, TriState};
use proptest::prelude::*;

fn arb_tri_state() -> impl Strategy<Value = TriState> {
    prop_oneof![
        Just(TriState::Enabled),
        Just(TriState::Disabled),
        Just(TriState::Unset),
    ]
}

fn arb_status() -> impl Strategy<Value = MangaStatus> {
    prop::sample::select(MangaStatus::ALL.to_vec())
}

fn arb_sort_mode() -> impl Strategy<Value = Option<LibrarySortMode>> {
    prop::option::of(prop::sample::select(LibrarySortMode::ALL.to_vec()))
}

prop_compose! {
    fn arb_manga()(
        id in 0i64..10_000,
        title in "[A-Za-z ]{0,12}",
        status in arb_status(),
        unread in prop::option::of(0i64..50),
        total in prop::option::of(0i64..50),
        bookmarks in prop::option::of(0i64..5),
        duplicates in any::<bool>(),
        added in prop::option::of(0i64..1_000_000),
    ) -> Manga {
        let mut manga = Manga::new(id, title).with_status(status);
        manga.unread_count = unread;
        manga.total_chapters = total;
        manga.bookmark_count = bookmarks;
        manga.has_duplicate_chapters = duplicates;
        manga.in_library_at = added;
        manga
    }
}

prop_compose! {
    fn arb_options()(
        unread in arb_tri_state(),
        read in arb_tri_state(),
        bookmarked in arb_tri_state(),
        duplicates in arb_tri_state(),
        sort_by in arb_sort_mode(),
        sort_desc in any::<bool>(),
    ) -> LibraryOptions {
        LibraryOptions {
            has_unread_chapters: unread,
            has_read_chapters: read,
            has_bookmarked_chapters: bookmarked,
            has_duplicate_chapters: duplicates,
            sort_by,
            sort_desc,
            ..LibraryOptions::default()
        }
    }
}

proptest! {
    #[test]
    fn unset_tri_state_is_vacuous(count in prop::option::of(any::<i64>()), value in any::<bool>()) {
        prop_assert!(tri_state_filter_number(TriState::Unset, count));
        prop_assert!(tri_state_filter_boolean(TriState::Unset, value));
    }

    #[test]
    fn cleanup_is_idempotent(s in "[A-Za-zÀ-ÿ0-9 ,.!'-]{0,40}") {
        let once = enhanced_cleanup(&s);
        prop_assert_eq!(enhanced_cleanup(&once), once);
    }

    #[test]
    fn filter_yields_subsequence_of_input(
        mangas in prop::collection::vec(arb_manga(), 0..20),
        options in arb_options(),
        query in prop::option::of("[a-z]{0,3}"),
        ignore in any::<bool>(),
    ) {
        let hits = filter_mangas(&mangas, query.as_deref(), &options, ignore);
        let mut remaining = mangas.iter();
        for hit in &hits {
            prop_assert!(remaining.any(|m| std::ptr::eq(m, *hit)));
        }
    }

    #[test]
    fn sort_is_a_permutation_and_leaves_input_alone(
        mangas in prop::collection::vec(arb_manga(), 0..20),
        sort_by in arb_sort_mode(),
        desc in any::<bool>(),
    ) {
        let before = mangas.clone();
        let sorted = sort_mangas(&mangas, sort_by, desc);
        prop_assert_eq!(&mangas, &before);

        let mut sorted_ids: Vec<i64> = sorted.iter().map(|m| m.id).collect();
        let mut input_ids: Vec<i64> = mangas.iter().map(|m| m.id).collect();
        sorted_ids.sort_unstable();
        input_ids.sort_unstable();
        prop_assert_eq!(sorted_ids, input_ids);
    }

    #[test]
    fn desc_is_reverse_of_asc(
        mangas in prop::collection::vec(arb_manga(), 0..20),
        sort_by in arb_sort_mode(),
    ) {
        let asc = sort_mangas(&mangas, sort_by, false);
        let mut desc = sort_mangas(&mangas, sort_by, true);
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn ignoring_filters_with_query_only_depends_on_search(
        mangas in prop::collection::vec(arb_manga(), 0..20),
        options in arb_options(),
        query in "[a-z]{1,3}",
    ) {
        let with_filters = filter_mangas(&mangas, Some(query.as_str()), &options, true);
        let without = filter_mangas(&mangas, Some(query.as_str()), &LibraryOptions::default(), false);
        prop_assert_eq!(with_filters, without);
    }

    #[test]
    fn filtered_out_message_implies_nonempty_input(
        mangas in prop::collection::vec(arb_manga(), 0..10),
        options in arb_options(),
        query in prop::option::of("[a-z]{0,3}"),
    ) {
        let view = visible_mangas(&mangas, query.as_deref(), &options, false);
        if view.show_filtered_out_message {
            prop_assert!(!mangas.is_empty());
            prop_assert!(view.visible.is_empty());
        }
    }
}
