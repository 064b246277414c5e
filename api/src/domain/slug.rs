//! Slug derivation
//!
//! Titles are transliterated from Cyrillic to Latin before slugifying,
//! so "Новый заголовок" becomes "novyj-zagolovok".

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of a note slug, in characters
pub const SLUG_MAX_LENGTH: usize = 100;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern is valid"));

/// Build a URL-safe slug from arbitrary text.
///
/// - Replaces `&` with "and"
/// - Transliterates Cyrillic letters
/// - Lowercases and drops anything outside `[a-z0-9_-]`
/// - Collapses whitespace and hyphen runs into a single hyphen
pub fn slugify(input: &str) -> String {
    let mut latin = String::with_capacity(input.len());
    for c in input.replace('&', " and ").chars() {
        for lower in c.to_lowercase() {
            match transliterate(lower) {
                Some(s) => latin.push_str(s),
                None => latin.push(lower),
            }
        }
    }

    let mut slug = String::with_capacity(latin.len());
    let mut pending_hyphen = false;
    for c in latin.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
        }
    }

    slug
}

/// Slug for a title, cut to [`SLUG_MAX_LENGTH`]
pub fn slug_for_title(title: &str) -> String {
    slugify(title).chars().take(SLUG_MAX_LENGTH).collect()
}

/// Whether a user-supplied slug is acceptable as-is
pub fn is_valid_slug(slug: &str) -> bool {
    slug.chars().count() <= SLUG_MAX_LENGTH && SLUG_PATTERN.is_match(slug)
}

fn transliterate(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' | 'ґ' => "g",
        'д' => "d",
        'е' | 'э' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' | 'і' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        'є' => "ye",
        'ї' => "yi",
        _ => return None,
    };
    Some(latin)
}
