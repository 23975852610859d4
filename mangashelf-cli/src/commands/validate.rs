//! Validate command implementation

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use mangashelf_core::{LibrarySnapshot, Manga};
use std::collections::BTreeSet;

#[derive(Debug, PartialEq, Eq)]
enum Severity {
    Warning,
    Error,
}

#[derive(Debug)]
struct Issue {
    severity: Severity,
    message: String,
}

impl Issue {
    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }
}

/// Record-level checks; these never make the library unusable
fn check_manga(manga: &Manga, issues: &mut Vec<Issue>) {
    let label = format!("manga {} ({})", manga.id, manga.title);

    if manga.title.trim().is_empty() {
        issues.push(Issue::warning(format!("manga {} has an empty title", manga.id)));
    }

    for (field, value) in [
        ("unread_count", manga.unread_count),
        ("total_chapters", manga.total_chapters),
        ("bookmark_count", manga.bookmark_count),
        ("download_count", manga.download_count),
    ] {
        if value.is_some_and(|n| n < 0) {
            issues.push(Issue::warning(format!("{}: negative {}", label, field)));
        }
    }

    if let (Some(unread), Some(total)) = (manga.unread_count, manga.total_chapters) {
        if unread > total {
            issues.push(Issue::warning(format!(
                "{}: {} unread of {} chapters gives a negative read count",
                label, unread, total
            )));
        }
    }

    if let (Some(downloaded), Some(total)) = (manga.download_count, manga.total_chapters) {
        if downloaded > total {
            issues.push(Issue::warning(format!(
                "{}: {} downloaded of {} chapters",
                label, downloaded, total
            )));
        }
    }
}

/// Validate a library
pub fn validate(library: &LibrarySnapshot, strict: bool) -> Result<()> {
    let mut issues = Vec::new();
    let mut seen = BTreeSet::new();

    let pb = ProgressBar::new(library.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")?
            .progress_chars("##-"),
    );

    for manga in &library.mangas {
        if !seen.insert(manga.id) {
            issues.push(Issue::error(format!("duplicate manga id {}", manga.id)));
        }
        check_manga(manga, &mut issues);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mut chapter_count = 0;
    for (manga_id, chapters) in &library.chapters {
        chapter_count += chapters.len();
        if !seen.contains(manga_id) {
            issues.push(Issue::error(format!(
                "{} chapters stored for unknown manga {}",
                chapters.len(),
                manga_id
            )));
        }
        for chapter in chapters.iter().filter(|c| c.manga_id != *manga_id) {
            issues.push(Issue::error(format!(
                "chapter {} is stored under manga {} but belongs to manga {}",
                chapter.id, manga_id, chapter.manga_id
            )));
        }
    }

    for issue in &issues {
        match issue.severity {
            Severity::Warning => println!("warning: {}", issue.message),
            Severity::Error => println!("error: {}", issue.message),
        }
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let warnings = issues.len() - errors;
    tracing::debug!(errors, warnings, strict, "Validated library");

    if errors > 0 || (strict && warnings > 0) {
        bail!(
            "Validation failed: {} errors, {} warnings",
            errors,
            warnings
        );
    }

    println!(
        "Valid library: {} mangas, {} chapters, {} warnings",
        library.len(),
        chapter_count,
        warnings
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mangashelf_core::Chapter;

    #[test]
    fn test_read_count_overflow_is_a_warning() {
        let mut issues = Vec::new();
        check_manga(&Manga::new(1, "Odd").with_chapter_counts(12, 10), &mut issues);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_strict_fails_on_warnings() {
        let mut library = LibrarySnapshot::new();
        library.upsert(Manga::new(1, "Odd").with_chapter_counts(12, 10));
        assert!(validate(&library, false).is_ok());
        assert!(validate(&library, true).is_err());
    }

    #[test]
    fn test_misplaced_chapter_is_an_error() {
        let mut library = LibrarySnapshot::new();
        library.upsert(Manga::new(1, "Home"));
        library.chapters.insert(1, vec![Chapter::new(10, 2, "Stray")]);
        assert!(validate(&library, false).is_err());
    }
}
