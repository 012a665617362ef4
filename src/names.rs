//! Personal-name parsing for `creator` fields.
//!
//! bepress feeds list creators as "Family, Given Middle" with occasional
//! honorifics and generational suffixes; direct-order names and bare single
//! names also occur. The parser splits either form into the contributor
//! schema without inventing data: a word it cannot classify lands in the
//! slot its position suggests.

use unicode_normalization::UnicodeNormalization;

use crate::types::Contributor;

/// Honorific prefixes recognized at the start of a name.
const TITLES: &[&str] = &["dr", "prof", "professor", "mr", "mrs", "ms", "sir"];

/// Generational and professional suffixes recognized at the end of a name.
const SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv", "phd", "md", "esq"];

/// Parse one creator string into the contributor schema.
///
/// Email and ORCID are never present in creator text and stay empty.
///
/// # Examples
/// ```
/// use wayne_harvester::names::parse_name;
///
/// let contributor = parse_name("Smith, John A.");
/// assert_eq!(contributor.family, "Smith");
/// assert_eq!(contributor.given, "John");
/// assert_eq!(contributor.middle, "A.");
/// ```
#[must_use]
pub fn parse_name(text: &str) -> Contributor {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return Contributor::default();
    }
    match cleaned.split_once(',') {
        Some((family_part, rest)) => parse_comma_format(family_part, rest),
        None => parse_direct_format(&cleaned),
    }
}

/// "Family [Suffix], Given [Middle ...] [Suffix][, Suffix ...]".
fn parse_comma_format(family_part: &str, rest: &str) -> Contributor {
    let mut suffixes: Vec<String> = Vec::new();

    // Suffixes may trail the family segment ("Smith Jr., John").
    let mut family_words: Vec<&str> = family_part.split_whitespace().collect();
    let mut family_suffixes: Vec<String> = Vec::new();
    while family_words.len() > 1 && is_suffix(family_words[family_words.len() - 1]) {
        if let Some(word) = family_words.pop() {
            family_suffixes.push(word.to_string());
        }
    }
    family_suffixes.reverse();
    suffixes.extend(family_suffixes);

    let mut segments = rest.split(',').map(str::trim);
    let first_segment = segments.next().unwrap_or("");

    let mut words: Vec<&str> = first_segment.split_whitespace().collect();
    let mut prefix_words: Vec<&str> = Vec::new();
    while !words.is_empty() && is_title(words[0]) {
        prefix_words.push(words.remove(0));
    }
    let mut trailing: Vec<String> = Vec::new();
    while words.len() > 1 && is_suffix(words[words.len() - 1]) {
        if let Some(word) = words.pop() {
            trailing.push(word.to_string());
        }
    }
    trailing.reverse();
    suffixes.extend(trailing);

    // Everything after the second comma is suffix text ("Smith, John, Jr.").
    suffixes.extend(segments.filter(|s| !s.is_empty()).map(String::from));

    let given = words.first().copied().unwrap_or("").to_string();
    let middle = words.get(1..).unwrap_or(&[]).join(" ");

    Contributor {
        prefix: prefix_words.join(" "),
        given,
        middle,
        family: family_words.join(" "),
        suffix: suffixes.join(", "),
        ..Contributor::default()
    }
}

/// "[Title ...] Given [Middle ...] Family [Suffix ...]".
fn parse_direct_format(name: &str) -> Contributor {
    let mut words: Vec<&str> = name.split_whitespace().collect();

    let mut prefix_words: Vec<&str> = Vec::new();
    while words.len() > 1 && is_title(words[0]) {
        prefix_words.push(words.remove(0));
    }

    let mut suffixes: Vec<String> = Vec::new();
    while words.len() > 1 && is_suffix(words[words.len() - 1]) {
        if let Some(word) = words.pop() {
            suffixes.push(word.to_string());
        }
    }
    suffixes.reverse();

    let (given, middle, family) = match words.as_slice() {
        [] => (String::new(), String::new(), String::new()),
        [only] => ((*only).to_string(), String::new(), String::new()),
        [first, rest @ .., last] => {
            ((*first).to_string(), rest.join(" "), (*last).to_string())
        }
    };

    Contributor {
        prefix: prefix_words.join(" "),
        given,
        middle,
        family,
        suffix: suffixes.join(", "),
        ..Contributor::default()
    }
}

/// NFC-normalize and collapse runs of whitespace.
fn clean(text: &str) -> String {
    let normalized: String = text.nfc().collect();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_title(word: &str) -> bool {
    let canon = canon(word);
    TITLES.contains(&canon.as_str())
}

fn is_suffix(word: &str) -> bool {
    let canon = canon(word);
    SUFFIXES.contains(&canon.as_str())
}

fn canon(word: &str) -> String {
    word.trim_end_matches('.').to_lowercase()
}
