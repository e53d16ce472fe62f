//! Project folder naming.
//!
//! Names have the form `YYMMDD-slug`, where the slug is derived from a free
//! text purpose: lowercase ASCII letters and digits joined by single hyphens,
//! filler words dropped, at most [`MAX_SLUG_LEN`] characters.

use chrono::NaiveDate;

/// Maximum slug length, excluding the date prefix.
pub const MAX_SLUG_LEN: usize = 40;

const FALLBACK_SLUG: &str = "project";

const FILLER_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "of", "for", "to", "in", "on", "at", "by", "with",
    "from", "into", "about", "is", "are", "was", "be", "this", "that", "these", "those", "my",
    "our", "its", "as",
];

/// Generates a project name for `purpose` on `date`.
#[must_use]
pub fn generate_name(purpose: &str, date: NaiveDate) -> String {
    format!("{}-{}", date.format("%y%m%d"), slugify(purpose))
}

/// Generates a project name dated today in local time.
#[must_use]
pub fn generate_name_today(purpose: &str) -> String {
    generate_name(purpose, chrono::Local::now().date_naive())
}

/// Turns free text into a slug of whole words.
///
/// Words are kept in order while they fit; the first word that would push
/// the slug past the limit ends it. A single word longer than the limit is
/// cut. Nothing left over yields `project`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let words = lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty() && !FILLER_WORDS.contains(word));

    let mut slug = String::new();
    for word in words {
        if slug.is_empty() {
            slug.push_str(&word[..word.len().min(MAX_SLUG_LEN)]);
        } else if slug.len() + 1 + word.len() <= MAX_SLUG_LEN {
            slug.push('-');
            slug.push_str(word);
        } else {
            break;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}
