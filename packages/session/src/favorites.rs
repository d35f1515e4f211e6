//! Favorite statute codes.

use std::collections::{BTreeMap, BTreeSet};

use crate::SessionError;
use crate::store::KeyValueStore;

/// Storage key holding the favorites object.
pub const FAVORITES_KEY: &str = "metro_favorite_penal_codes_v1";

/// Set of statute codes an officer has starred.
///
/// Persisted as a JSON object mapping each code to `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    codes: BTreeSet<String>,
}

impl Favorites {
    /// Loads favorites from `store`.
    ///
    /// Missing or unreadable data yields an empty set; a corrupt value is
    /// logged and ignored rather than failing the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] only if the store itself fails.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, SessionError> {
        let Some(raw) = store.get(FAVORITES_KEY)? else {
            return Ok(Self::default());
        };

        match serde_json::from_str::<BTreeMap<String, bool>>(&raw) {
            Ok(map) => Ok(Self {
                codes: map
                    .into_iter()
                    .filter_map(|(code, starred)| starred.then_some(code))
                    .collect(),
            }),
            Err(e) => {
                log::warn!("Ignoring corrupt favorites under {FAVORITES_KEY}: {e}");
                Ok(Self::default())
            }
        }
    }

    /// Writes the current set to `store`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if serialization or the store fails.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), SessionError> {
        let map: BTreeMap<&str, bool> = self.codes.iter().map(|c| (c.as_str(), true)).collect();
        store.set(FAVORITES_KEY, serde_json::to_string(&map)?)
    }

    /// Flips `code` in or out of the set. Returns `true` if it is now a
    /// favorite.
    pub fn toggle(&mut self, code: &str) -> bool {
        if self.codes.remove(code) {
            false
        } else {
            self.codes.insert(code.to_string());
            true
        }
    }

    /// Whether `code` is a favorite.
    #[must_use]
    pub fn is_favorite(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// All favorite codes, sorted.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether there are no favorites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
