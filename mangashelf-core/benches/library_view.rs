//! Library view benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use mangashelf_core::library::visible_mangas;
use mangashelf_core::types::{LibraryOptions, LibrarySortMode, Manga, MangaStatus, TriState};

fn library(size: i64) -> Vec<Manga> {
    (0..size)
        .map(|i| {
            let mut manga = Manga::new(i, format!("Series {:05}", (i * 7919) % size))
                .with_status(MangaStatus::ALL[(i % 7) as usize])
                .with_genres(["Action", "Drama", "Slice of Life"])
                .with_chapter_counts(i % 13, 100);
            manga.in_library_at = Some(i * 1_000);
            manga
        })
        .collect()
}

fn library_view_benchmark(c: &mut Criterion) {
    let mangas = library(5_000);
    let options = LibraryOptions {
        has_unread_chapters: TriState::Enabled,
        sort_by: Some(LibrarySortMode::Alphabetically),
        ..LibraryOptions::default()
    };

    c.bench_function("filter_and_sort_5k", |b| {
        b.iter(|| {
            let view = visible_mangas(&mangas, None, &options, false);
            std::hint::black_box(view.visible.len())
        })
    });

    c.bench_function("search_5k", |b| {
        b.iter(|| {
            let view = visible_mangas(&mangas, Some("series 004"), &options, true);
            std::hint::black_box(view.visible.len())
        })
    });
}

criterion_group!(benches, library_view_benchmark);
criterion_main!(benches);
