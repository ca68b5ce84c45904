//! Text utilities: case conversion, slugs, whitespace and HTML entities.
//!
//! All functions operate on Unicode scalar values (`char`), never on bytes,
//! so lengths and reversals never split a code point.

use std::sync::OnceLock;

use unicode_normalization::UnicodeNormalization;

static CAMEL_BOUNDARY_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();
static KEBAB_BOUNDARY_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();
static HTML_ENTITY_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();

/// Marker appended by [`truncate`] when text is cut.
pub const ELLIPSIS: &str = "...";

/// Upper-cases the first character and leaves the rest untouched.
///
/// Uses full Unicode upper-casing, so a single character may expand
/// (`ß` becomes `SS`).
///
/// # Examples
///
/// ```
/// use snipkit_common::text::capitalize;
///
/// assert_eq!(capitalize("hello world"), "Hello world");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Converts text into a URL-safe slug.
///
/// Lower-cases, strips diacritics, replaces each run of whitespace with a
/// single `-` and drops anything outside `[a-z0-9-]`. Leading or trailing
/// whitespace therefore produces a leading or trailing `-`.
///
/// # Examples
///
/// ```
/// use snipkit_common::slugify;
///
/// assert_eq!(slugify("Olá Mundo Café"), "ola-mundo-cafe");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// ```
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut in_whitespace = false;

    for c in s.to_lowercase().nfd() {
        if is_combining_diacritic(c) {
            continue;
        }
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;

        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }

    slug
}

/// Returns true when the text reads the same reversed.
///
/// The comparison is ordinal: no case folding and no normalization.
pub fn is_palindrome(s: &str) -> bool {
    s.chars().eq(s.chars().rev())
}

/// Counts non-overlapping occurrences of `needle` in `haystack`.
///
/// An empty needle counts zero.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Reverses the order of characters.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

/// Collapses internal whitespace runs to one space and trims both ends.
pub fn collapse_whitespace(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());
    for segment in s.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Cuts text longer than `max_chars` characters and appends [`ELLIPSIS`].
///
/// Text at or under the limit is returned unchanged. The ellipsis is not
/// counted against the limit.
///
/// # Examples
///
/// ```
/// use snipkit_common::text::truncate;
///
/// assert_eq!(truncate("Hello, world", 5), "Hello...");
/// assert_eq!(truncate("Hi", 5), "Hi");
/// ```
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &s[..cut], ELLIPSIS),
        None => s.to_string(),
    }
}

/// Converts `camelCase` to `kebab-case`.
///
/// Only an ASCII lowercase letter followed by an ASCII uppercase letter is
/// a word boundary, so runs of capitals (`parseHTML`) stay together.
pub fn camel_to_kebab(s: &str) -> String {
    let re = CAMEL_BOUNDARY_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"([a-z])([A-Z])")
            .expect("CAMEL_BOUNDARY_REGEX pattern is invalid")
    });
    re.replace_all(s, "${1}-${2}").to_lowercase()
}

/// Converts `kebab-case` to `camelCase`.
///
/// Approximate inverse of [`camel_to_kebab`] for simple identifiers.
pub fn kebab_to_camel(s: &str) -> String {
    let re = KEBAB_BOUNDARY_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"-([a-z])").expect("KEBAB_BOUNDARY_REGEX pattern is invalid")
    });
    re.replace_all(s, |caps: &regex_lite::Captures<'_>| caps[1].to_uppercase())
        .into_owned()
}

/// Escapes `& < > ' "` as HTML entities.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Decodes the five entities produced by [`escape_html`].
///
/// This is a best-effort inverse: text that already contains literal
/// entity-like sequences (`&amp;lt;`) is decoded one level only, and
/// unescaping arbitrary text before escaping it is not idempotent.
pub fn unescape_html(s: &str) -> String {
    let re = HTML_ENTITY_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"&(amp|lt|gt|#39|quot);")
            .expect("HTML_ENTITY_REGEX pattern is invalid")
    });
    re.replace_all(s, |caps: &regex_lite::Captures<'_>| match &caps[1] {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "#39" => "'",
        _ => "\"",
    })
    .into_owned()
}

/// Extension trait exposing the most common text helpers as methods.
///
/// # Examples
///
/// ```
/// use snipkit_common::TextExt;
///
/// assert_eq!("olá".capitalize(), "Olá");
/// assert_eq!("Hello There".slugify(), "hello-there");
/// assert_eq!("abcdef".truncate_with_ellipsis(3), "abc...");
/// ```
pub trait TextExt {
    /// See [`capitalize`].
    fn capitalize(&self) -> String;
    /// See [`slugify`].
    fn slugify(&self) -> String;
    /// See [`truncate`].
    fn truncate_with_ellipsis(&self, max_chars: usize) -> String;
}

impl TextExt for str {
    fn capitalize(&self) -> String {
        capitalize(self)
    }

    fn slugify(&self) -> String {
        slugify(self)
    }

    fn truncate_with_ellipsis(&self, max_chars: usize) -> String {
        truncate(self, max_chars)
    }
}
