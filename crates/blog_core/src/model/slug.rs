//! URL slug derivation for post titles.
//!
//! Every character outside `[A-Za-z0-9_]` becomes one `-`. There is no
//! trimming and no collapsing of runs: `"Hello, World!"` yields
//! `"Hello--World-"`. The class is ASCII-only, so each non-ASCII code point
//! also becomes a single `-`.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid slug regex"));

/// Derives a slug from `title`.
///
/// Returns `None` for an empty title.
pub fn generate_slug(title: &str) -> Option<String> {
    if title.is_empty() {
        return None;
    }
    Some(NON_WORD_CHAR_RE.replace_all(title, "-").into_owned())
}

#[cfg(test)]
mod tests {
    use super::generate_slug;

    #[test]
    fn replaces_space_with_hyphen() {
        assert_eq!(generate_slug("Post 1").as_deref(), Some("Post-1"));
    }

    #[test]
    fn each_separator_becomes_its_own_hyphen() {
        assert_eq!(
            generate_slug("Hello, World!").as_deref(),
            Some("Hello--World-")
        );
        assert_eq!(generate_slug("  a  ").as_deref(), Some("--a--"));
    }

    #[test]
    fn keeps_word_characters_untouched() {
        assert_eq!(
            generate_slug("snake_case_42").as_deref(),
            Some("snake_case_42")
        );
    }

    #[test]
    fn empty_title_has_no_slug() {
        assert_eq!(generate_slug(""), None);
    }

    #[test]
    fn non_ascii_code_points_become_single_hyphens() {
        assert_eq!(generate_slug("Café ☕").as_deref(), Some("Caf---"));
        assert_eq!(generate_slug("Привет").as_deref(), Some("------"));
    }

    #[test]
    fn output_stays_within_url_safe_alphabet() {
        let titles = [
            "Post 1",
            "Hello, World!",
            "C++ & Rust: a/b?c=d#e",
            "tabs\tand\nnewlines",
            "émoji 🚀 and ünïcödé",
            "100% done...",
            "+plus+",
        ];
        for title in titles {
            let slug = generate_slug(title).unwrap();
            assert!(!slug.is_empty(), "empty slug for {title:?}");
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
                "unexpected character in slug {slug:?} for {title:?}"
            );
            assert_eq!(slug.chars().count(), title.chars().count());
        }
    }
}
