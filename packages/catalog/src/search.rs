//! Case-insensitive substring search over the reference datasets.
//!
//! Every lookup screen works the same way: the query is trimmed and
//! lowercased, a haystack is built from the searchable fields of each
//! record, and records whose haystack contains the query are kept in their
//! original order. An empty query matches everything.

use std::collections::BTreeSet;

use metro_pd_catalog_models::{NatoLetter, RadioCode, ReferenceItem, SpeedLimit, StatuteEntry};

/// Upper bound on statute search results.
pub const MAX_RESULTS: usize = 500;

/// Trims and lowercases a search query.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Filter state for the penal code lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatuteFilter {
    /// Free-text query matched against code, title, description and class.
    pub query: String,
    /// Exact classification to keep. `None` keeps every class.
    pub class: Option<String>,
    /// Keep only entries the officer has marked as favorites.
    pub only_favorites: bool,
}

impl StatuteFilter {
    /// Creates a filter with only a text query.
    #[must_use]
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Applies `filter` to `entries`, returning at most [`MAX_RESULTS`] matches.
///
/// `is_favorite` is consulted only when [`StatuteFilter::only_favorites`] is
/// set.
#[must_use]
pub fn filter_statutes<'a>(
    entries: &'a [StatuteEntry],
    filter: &StatuteFilter,
    is_favorite: impl Fn(&str) -> bool,
) -> Vec<&'a StatuteEntry> {
    let query = normalize_query(&filter.query);

    entries
        .iter()
        .filter(|entry| {
            if let Some(class) = &filter.class
                && entry.class.as_ref() != Some(class)
            {
                return false;
            }
            if filter.only_favorites && !is_favorite(&entry.code) {
                return false;
            }
            if query.is_empty() {
                return true;
            }
            let haystack = [
                Some(entry.code.as_str()),
                Some(entry.title.as_str()),
                entry.description.as_deref(),
                entry.class.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" | ")
            .to_lowercase();
            haystack.contains(&query)
        })
        .take(MAX_RESULTS)
        .collect()
}

/// Returns the distinct classifications present in `entries`, sorted.
#[must_use]
pub fn available_classes(entries: &[StatuteEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| entry.class.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn matches(query: &str, fields: &[&str]) -> bool {
    query.is_empty() || fields.join(" ").to_lowercase().contains(query)
}

/// Searches radio codes by code, description and category.
#[must_use]
pub fn search_radio_codes<'a>(codes: &'a [RadioCode], query: &str) -> Vec<&'a RadioCode> {
    let query = normalize_query(query);
    codes
        .iter()
        .filter(|c| matches(&query, &[&c.code, &c.description, c.category.as_ref()]))
        .collect()
}

/// Searches the NATO alphabet by letter and phonetic word.
#[must_use]
pub fn search_nato<'a>(letters: &'a [NatoLetter], query: &str) -> Vec<&'a NatoLetter> {
    let query = normalize_query(query);
    letters
        .iter()
        .filter(|l| matches(&query, &[&l.letter.to_string(), &l.phonetic]))
        .collect()
}

/// Searches speed limits by road type, limit, color and notes.
#[must_use]
pub fn search_speed_limits<'a>(limits: &'a [SpeedLimit], query: &str) -> Vec<&'a SpeedLimit> {
    let query = normalize_query(query);
    limits
        .iter()
        .filter(|l| {
            matches(
                &query,
                &[
                    &l.road_type,
                    &l.limit,
                    l.color.as_deref().unwrap_or_default(),
                    l.notes.as_deref().unwrap_or_default(),
                ],
            )
        })
        .collect()
}

/// Searches quick-reference cards by title, tags and body.
#[must_use]
pub fn search_reference<'a>(items: &'a [ReferenceItem], query: &str) -> Vec<&'a ReferenceItem> {
    let query = normalize_query(query);
    items
        .iter()
        .filter(|i| matches(&query, &[&i.title, &i.tags.join(" "), &i.body]))
        .collect()
}

/// Spells `text` using the phonetic alphabet.
///
/// Letters become their phonetic word, digits are kept as-is, whitespace
/// becomes `/`, and any other character is dropped.
#[must_use]
pub fn spell_phonetic(letters: &[NatoLetter], text: &str) -> Vec<String> {
    text.chars()
        .filter_map(|ch| {
            if ch.is_whitespace() {
                return Some("/".to_string());
            }
            if ch.is_ascii_digit() {
                return Some(ch.to_string());
            }
            let upper = ch.to_ascii_uppercase();
            letters
                .iter()
                .find(|l| l.letter == upper)
                .map(|l| l.phonetic.clone())
        })
        .collect()
}
