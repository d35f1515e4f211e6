//! Dataset registry — loads every reference dataset from embedded TOML.
//!
//! Each `.toml` file in `packages/catalog/data/` is baked into the binary at
//! compile time via [`include_str!`]. The loaders below panic with the
//! dataset name if an embedded file is malformed; the tests in this module
//! parse every dataset so that can only happen on a broken build.

use std::collections::BTreeSet;

use metro_pd_catalog_models::{
    CatalogError, CatalogScope, NatoLetter, RadioCode, RawStatuteEntry, ReferenceItem, SpeedLimit,
    StatuteEntry,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const LOCAL_PENAL_CODES: &str = include_str!("../data/local_penal_codes.toml");
const FEDERAL_PENAL_CODES: &str = include_str!("../data/federal_penal_codes.toml");
const RADIO_CODES: &str = include_str!("../data/radio_codes.toml");
const NATO_ALPHABET: &str = include_str!("../data/nato_alphabet.toml");
const SPEED_LIMITS: &str = include_str!("../data/speed_limits.toml");
const REFERENCE_ITEMS: &str = include_str!("../data/reference.toml");

#[derive(Deserialize)]
struct StatuteFile {
    #[serde(default)]
    statute: Vec<RawStatuteEntry>,
}

#[derive(Deserialize)]
struct RadioFile {
    radio_code: Vec<RadioCode>,
}

#[derive(Deserialize)]
struct NatoFile {
    letter: Vec<NatoLetter>,
}

#[derive(Deserialize)]
struct SpeedLimitFile {
    speed_limit: Vec<SpeedLimit>,
}

#[derive(Deserialize)]
struct ReferenceFile {
    item: Vec<ReferenceItem>,
}

/// Parses and validates a statute catalog from TOML.
///
/// The document holds a `[[statute]]` array of tables. Every entry must have
/// a non-blank `code` and `title`, and codes must be unique within the
/// document.
///
/// # Errors
///
/// * [`CatalogError::Toml`] if the document is not valid TOML
/// * [`CatalogError::MissingField`] if an entry lacks a code or title
/// * [`CatalogError::DuplicateCode`] if a code appears twice
pub fn parse_statutes(toml_str: &str) -> Result<Vec<StatuteEntry>, CatalogError> {
    let file: StatuteFile = toml::de::from_str(toml_str)?;

    let mut seen = BTreeSet::new();
    let mut entries = Vec::with_capacity(file.statute.len());

    for (index, raw) in file.statute.into_iter().enumerate() {
        let entry = StatuteEntry::validate(raw, index)?;
        if !seen.insert(entry.code.clone()) {
            return Err(CatalogError::DuplicateCode { code: entry.code });
        }
        entries.push(entry);
    }

    log::debug!("Parsed statute catalog with {} entries", entries.len());

    Ok(entries)
}

fn load<T: DeserializeOwned>(name: &str, toml_str: &str) -> T {
    toml::de::from_str(toml_str).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
}

/// Returns the statute catalog for the given scope.
///
/// # Panics
///
/// Panics if the embedded catalog is malformed (a build-time guarantee since
/// the file is embedded and covered by tests).
#[must_use]
pub fn penal_codes(scope: CatalogScope) -> Vec<StatuteEntry> {
    let (name, toml_str) = match scope {
        CatalogScope::Local => ("local_penal_codes", LOCAL_PENAL_CODES),
        CatalogScope::Federal => ("federal_penal_codes", FEDERAL_PENAL_CODES),
    };
    parse_statutes(toml_str).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
}

/// Returns every radio ten-code.
///
/// # Panics
///
/// Panics if the embedded dataset is malformed.
#[must_use]
pub fn radio_codes() -> Vec<RadioCode> {
    load::<RadioFile>("radio_codes", RADIO_CODES).radio_code
}

/// Returns the NATO phonetic alphabet in letter order.
///
/// # Panics
///
/// Panics if the embedded dataset is malformed.
#[must_use]
pub fn nato_alphabet() -> Vec<NatoLetter> {
    load::<NatoFile>("nato_alphabet", NATO_ALPHABET).letter
}

/// Returns posted speed limits by road class.
///
/// # Panics
///
/// Panics if the embedded dataset is malformed.
#[must_use]
pub fn speed_limits() -> Vec<SpeedLimit> {
    load::<SpeedLimitFile>("speed_limits", SPEED_LIMITS).speed_limit
}

/// Returns the quick-reference procedure cards.
///
/// # Panics
///
/// Panics if the embedded dataset is malformed.
#[must_use]
pub fn reference_items() -> Vec<ReferenceItem> {
    load::<ReferenceFile>("reference", REFERENCE_ITEMS).item
}

#[cfg(test)]
mod tests {
    use metro_pd_catalog_models::RadioCategory;

    use super::*;

    #[test]
    fn loads_local_penal_codes() {
        let codes = penal_codes(CatalogScope::Local);
        assert_eq!(codes.len(), 52);
        let kidnapping = codes.iter().find(|c| c.code == "PC 207").unwrap();
        assert_eq!(kidnapping.fine.as_deref(), Some("$12,000"));
        assert_eq!(kidnapping.time.as_deref(), Some("120s"));
        assert_eq!(kidnapping.class.as_deref(), Some("Felony"));
    }

    #[test]
    fn loads_federal_penal_codes() {
        let codes = penal_codes(CatalogScope::Federal);
        assert_eq!(codes.len(), 2);
        assert!(codes.iter().all(|c| c.extra.is_none()));
    }

    #[test]
    fn all_statutes_have_required_fields() {
        for scope in CatalogScope::all() {
            for entry in penal_codes(*scope) {
                assert!(!entry.code.is_empty(), "{scope}: empty code");
                assert!(!entry.title.is_empty(), "{scope}: {} has no title", entry.code);
            }
        }
    }

    #[test]
    fn loads_auxiliary_datasets() {
        let radio = radio_codes();
        assert_eq!(radio.len(), 41);
        let ack = radio.iter().find(|r| r.code == "10-4").unwrap();
        assert_eq!(ack.category, RadioCategory::General);

        let nato = nato_alphabet();
        assert_eq!(nato.len(), 26);
        assert_eq!(nato[0].letter, 'A');
        assert_eq!(nato[25].phonetic, "Zulu");

        assert_eq!(speed_limits().len(), 5);

        let items = reference_items();
        assert_eq!(items.len(), 17);
        assert!(items.iter().any(|i| i.id == "miranda"));
    }

    #[test]
    fn rejects_duplicate_codes() {
        let toml_str = r#"
            [[statute]]
            code = "PC 1"
            title = "First"

            [[statute]]
            code = "PC 1"
            title = "Again"
        "#;
        let err = parse_statutes(toml_str).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCode { code } if code == "PC 1"));
    }

    #[test]
    fn rejects_entry_without_title() {
        let toml_str = r#"
            [[statute]]
            code = "PC 1"
            title = "First"

            [[statute]]
            code = "PC 2"
        "#;
        let err = parse_statutes(toml_str).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingField {
                field: "title",
                index: 1
            }
        ));
    }

    #[test]
    fn empty_document_is_an_empty_catalog() {
        assert!(parse_statutes("").unwrap().is_empty());
    }
}
