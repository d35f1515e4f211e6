#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference record types for the Metro PD toolkit.
//!
//! Every dataset shipped with the toolkit (penal codes, radio codes, the
//! NATO alphabet, speed limits, and quick-reference procedures) is described
//! here. Penal code records arrive in a loose serialized shape
//! ([`RawStatuteEntry`]) and are validated into [`StatuteEntry`], where
//! optional fields are either present with real content or `None`, never an
//! empty string.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Errors produced while loading or validating a reference catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A required field was missing or blank.
    #[error("entry {index}: required field `{field}` is missing or blank")]
    MissingField {
        /// Name of the offending field.
        field: &'static str,
        /// Zero-based position of the entry within its dataset.
        index: usize,
    },

    /// Two entries in the same catalog share a code.
    #[error("duplicate statute code `{code}`")]
    DuplicateCode {
        /// The repeated code.
        code: String,
    },

    /// The embedded TOML could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Which statute book a catalog belongs to.
///
/// Codes are unique within one scope but may repeat across scopes, so the
/// two catalogs are always handled independently.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CatalogScope {
    /// City and state statutes
    Local,
    /// Federal statutes
    Federal,
}

impl CatalogScope {
    /// Human-readable tab label for this scope.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Local => "Local / RP",
            Self::Federal => "Federal",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Local, Self::Federal]
    }
}

/// A penal code record exactly as it appears in a dataset file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawStatuteEntry {
    /// Statute code, e.g. `"PC 207"`.
    pub code: Option<String>,
    /// Short label.
    pub title: Option<String>,
    /// Longer explanation of the offense.
    pub description: Option<String>,
    /// Classification such as `"Felony"`.
    pub class: Option<String>,
    /// Free-text fine expression.
    pub fine: Option<String>,
    /// Free-text time expression.
    pub time: Option<String>,
    /// Officer note such as `"Seize Cash"`.
    pub extra: Option<String>,
}

/// A validated penal code record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatuteEntry {
    /// Statute code, unique within its catalog.
    pub code: String,
    /// Short human label.
    pub title: String,
    /// Longer explanation of the offense.
    pub description: Option<String>,
    /// Classification label (e.g. "Felony", "Misdemeanor").
    pub class: Option<String>,
    /// Free-text fine expression (e.g. `"$3,000 - $10,000"`).
    pub fine: Option<String>,
    /// Free-text time expression (e.g. `"120s"`).
    pub time: Option<String>,
    /// Officer note such as `"Seize Vehicle"`.
    pub extra: Option<String>,
}

impl StatuteEntry {
    /// Creates an entry with only a code and title.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingField`] if either value is blank.
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Result<Self, CatalogError> {
        Self::validate(
            RawStatuteEntry {
                code: Some(code.into()),
                title: Some(title.into()),
                ..RawStatuteEntry::default()
            },
            0,
        )
    }

    /// Validates a raw record found at `index` within its dataset.
    ///
    /// Surrounding whitespace is trimmed from every field and blank optional
    /// fields collapse to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingField`] if the code or title is missing
    /// or blank.
    pub fn validate(raw: RawStatuteEntry, index: usize) -> Result<Self, CatalogError> {
        let code = present(raw.code).ok_or(CatalogError::MissingField {
            field: "code",
            index,
        })?;
        let title = present(raw.title).ok_or(CatalogError::MissingField {
            field: "title",
            index,
        })?;

        Ok(Self {
            code,
            title,
            description: present(raw.description),
            class: present(raw.class),
            fine: present(raw.fine),
            time: present(raw.time),
            extra: present(raw.extra),
        })
    }

    /// Sets the fine expression. A blank value clears it.
    #[must_use]
    pub fn with_fine(mut self, fine: impl Into<String>) -> Self {
        self.fine = present(Some(fine.into()));
        self
    }

    /// Sets the time expression. A blank value clears it.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = present(Some(time.into()));
        self
    }

    /// Sets the classification. A blank value clears it.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = present(Some(class.into()));
        self
    }

    /// Sets the description. A blank value clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = present(Some(description.into()));
        self
    }

    /// Single-entry text placed on the clipboard when an officer copies one
    /// code, e.g. `"PC 207 — Kidnapping (Felony) | Fine: $12,000 | Time: 120s"`.
    #[must_use]
    pub fn clipboard_line(&self) -> String {
        let mut line = format!("{} — {}", self.code, self.title);
        if let Some(class) = &self.class {
            line.push_str(&format!(" ({class})"));
        }
        if let Some(fine) = &self.fine {
            line.push_str(&format!(" | Fine: {fine}"));
        }
        if let Some(time) = &self.time {
            line.push_str(&format!(" | Time: {time}"));
        }
        line
    }

    /// `"<code> — <title> | Fine: <fine> | Time: <time>"`, the line a charge
    /// sheet exports for this entry. See [`charge_summary`].
    #[must_use]
    pub fn charge_summary(&self) -> String {
        charge_summary(
            &self.code,
            &self.title,
            self.fine.as_deref(),
            self.time.as_deref(),
        )
    }
}

/// Renders one charge as `"<code> — <title> | Fine: <fine> | Time: <time>"`.
///
/// A missing fine or time is shown as `"—"`.
#[must_use]
pub fn charge_summary(code: &str, title: &str, fine: Option<&str>, time: Option<&str>) -> String {
    format!(
        "{code} — {title} | Fine: {} | Time: {}",
        fine.unwrap_or("—"),
        time.unwrap_or("—"),
    )
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Grouping used to color and filter radio codes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum RadioCategory {
    /// Routine traffic between units and dispatch
    General,
    /// Unit availability and progress
    Status,
    /// Officer safety and priority calls
    Emergency,
    /// Vehicle stops and checks
    Traffic,
    /// EMS and medical aid
    Medical,
    /// Tactical operations
    Tactical,
}

/// A ten-code used on the radio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioCode {
    /// The code itself, e.g. `"10-4"`.
    pub code: String,
    /// Meaning of the code.
    pub description: String,
    /// Grouping for display and filtering.
    pub category: RadioCategory,
}

/// One letter of the NATO phonetic alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatoLetter {
    /// Upper-case letter.
    pub letter: char,
    /// Spoken word, e.g. `"Alpha"`.
    pub phonetic: String,
}

/// Posted speed limit for a class of road.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedLimit {
    /// Road classification, e.g. `"School Zones"`.
    pub road_type: String,
    /// Limit as posted, e.g. `"25 MPH"`.
    pub limit: String,
    /// Sign color, if the map uses one.
    pub color: Option<String>,
    /// Additional guidance.
    pub notes: Option<String>,
}

/// A quick-reference procedure card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    /// Stable slug, e.g. `"miranda"`.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Search keywords.
    pub tags: Vec<String>,
    /// Card body, one step or bullet per line.
    pub body: String,
}
