//! Text folding used by search and title ordering

use feruca::{Collator, Locale, Tailoring};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]+").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Fold a string for search comparison.
///
/// Lower-cases, strips diacritics, drops punctuation and collapses runs of
/// whitespace into a single space. The result is trimmed, and folding an
/// already folded string is a no-op.
pub fn enhanced_cleanup(s: &str) -> String {
    let stripped: String = s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    let stripped = PUNCTUATION_RE.replace_all(&stripped, "");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

/// Collator for title ordering.
///
/// CLDR root order with punctuation kept significant at the primary level, and
/// lowercase ahead of uppercase when strings differ only in case.
pub fn title_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// Order two strings the way a reader expects a title list to be ordered.
///
/// Builds a fresh collator; sorting a whole list should reuse one from
/// [`title_collator`].
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    title_collator().collate(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_folds_case_accents_and_punctuation() {
        assert_eq!(enhanced_cleanup("  Héllo,   WORLD!  "), "hello world");
        assert_eq!(enhanced_cleanup("Re:Zero - Starting Life"), "rezero starting life");
        assert_eq!(enhanced_cleanup("Pokémon"), "pokemon");
        assert_eq!(enhanced_cleanup(""), "");
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let once = enhanced_cleanup("Slice-of-Life!!  Drama");
        assert_eq!(enhanced_cleanup(&once), once);
    }

    #[test]
    fn test_cleanup_keeps_non_latin_letters() {
        assert_eq!(enhanced_cleanup("進撃の巨人"), "進撃の巨人");
        assert_eq!(enhanced_cleanup("Глава 1"), "глава 1");
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Éclair", "eclipse"), Ordering::Less);
        assert_eq!(locale_compare("Banana", "Apple"), Ordering::Greater);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
        assert_ne!(locale_compare("Same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_locale_compare_keeps_punctuation_and_puts_lowercase_first() {
        assert_eq!(locale_compare("A-B", "AA"), Ordering::Less);
        assert_eq!(locale_compare("apple", "Apple"), Ordering::Less);
        assert_eq!(locale_compare("Apple", "apple"), Ordering::Greater);
    }
}
