#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Session-scoped state for the Metro PD toolkit.
//!
//! A [`Session`] bundles everything that lives for one officer's working
//! session: who is signed in, their favorite statute codes, and the charge
//! sheet being built. Persistence goes through an injected
//! [`KeyValueStore`], so the same session logic runs against an in-memory
//! store in tests and a JSON file from the CLI.

pub mod favorites;
pub mod login;
pub mod paths;
pub mod store;

use chrono::{DateTime, Utc};
use metro_pd_charges::ChargeSheet;

pub use favorites::Favorites;
pub use login::OfficerLogin;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

/// Errors that can occur while reading or writing session state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// I/O error (store file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The display name was blank.
    #[error("name must not be empty")]
    EmptyName,

    /// The callsign did not have the `#X-##` shape.
    #[error("invalid callsign {callsign:?}: must be #X-## (e.g. 1N-12)")]
    InvalidCallsign {
        /// The rejected callsign.
        callsign: String,
    },

    /// An operation required a signed-in officer.
    #[error("not signed in")]
    NotLoggedIn,
}

/// One officer's working session.
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    store: S,
    officer: Option<OfficerLogin>,
    favorites: Favorites,
    charges: ChargeSheet,
}

impl<S: KeyValueStore> Session<S> {
    /// Starts a session, restoring any unexpired login and the saved
    /// favorites from `store`. The charge sheet always starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store cannot be read.
    pub fn start(store: S, now: DateTime<Utc>) -> Result<Self, SessionError> {
        let officer = login::current_login(&store, now)?;
        let favorites = Favorites::load(&store)?;

        log::info!(
            "Session started ({}, {} favorite(s))",
            officer
                .as_ref()
                .map_or_else(|| "signed out".to_string(), |o| o.callsign.clone()),
            favorites.len()
        );

        Ok(Self {
            store,
            officer,
            favorites,
            charges: ChargeSheet::new(),
        })
    }

    /// Signs an officer in, replacing any current login.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the name or callsign is invalid or the
    /// store fails.
    pub fn login(
        &mut self,
        name: &str,
        callsign: &str,
        now: DateTime<Utc>,
    ) -> Result<&OfficerLogin, SessionError> {
        let officer = login::login(&mut self.store, name, callsign, now)?;
        Ok(self.officer.insert(officer))
    }

    /// Signs out and discards the charge sheet. Favorites are kept.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store fails.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        login::logout(&mut self.store)?;
        if let Some(officer) = self.officer.take() {
            log::info!("{} ({}) signed out", officer.name, officer.callsign);
        }
        self.charges.clear();
        Ok(())
    }

    /// The signed-in officer, if any.
    #[must_use]
    pub const fn officer(&self) -> Option<&OfficerLogin> {
        self.officer.as_ref()
    }

    /// The signed-in officer.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] if nobody is signed in.
    pub fn require_officer(&self) -> Result<&OfficerLogin, SessionError> {
        self.officer.as_ref().ok_or(SessionError::NotLoggedIn)
    }

    /// Favorite statute codes.
    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Toggles a favorite and saves the set immediately. Returns `true` if
    /// `code` is now a favorite.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store fails.
    pub fn toggle_favorite(&mut self, code: &str) -> Result<bool, SessionError> {
        let starred = self.favorites.toggle(code);
        self.favorites.save(&mut self.store)?;
        Ok(starred)
    }

    /// The charge sheet for the current case.
    #[must_use]
    pub const fn charges(&self) -> &ChargeSheet {
        &self.charges
    }

    /// Mutable access to the charge sheet.
    pub const fn charges_mut(&mut self) -> &mut ChargeSheet {
        &mut self.charges
    }

    /// Ends the session, saving favorites, and hands back the store.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if favorites cannot be saved.
    pub fn end(mut self) -> Result<S, SessionError> {
        self.favorites.save(&mut self.store)?;
        log::info!("Session ended");
        Ok(self.store)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use metro_pd_catalog_models::StatuteEntry;
    use metro_pd_charges::LineId;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn fresh_session_is_signed_out() {
        let session = Session::start(MemoryStore::new(), now()).unwrap();
        assert!(session.officer().is_none());
        assert!(matches!(
            session.require_officer(),
            Err(SessionError::NotLoggedIn)
        ));
        assert!(session.favorites().is_empty());
        assert!(session.charges().is_empty());
    }

    #[test]
    fn state_survives_a_restart() {
        let mut session = Session::start(MemoryStore::new(), now()).unwrap();
        session.login("Jane", "1A-12", now()).unwrap();
        assert!(session.toggle_favorite("PC 187").unwrap());
        let store = session.end().unwrap();

        let restored = Session::start(store, now()).unwrap();
        assert_eq!(restored.require_officer().unwrap().callsign, "1A-12");
        assert!(restored.favorites().is_favorite("PC 187"));
    }

    #[test]
    fn logout_clears_login_and_charges() {
        let mut session = Session::start(MemoryStore::new(), now()).unwrap();
        session.login("Jane", "1A-12", now()).unwrap();
        session.toggle_favorite("PC 207").unwrap();

        let entry = StatuteEntry::new("PC 207", "Kidnapping")
            .unwrap()
            .with_fine("$12,000");
        let ids: Vec<LineId> = session.charges_mut().add_lines(&[entry]);
        assert_eq!(ids.len(), 1);

        session.logout().unwrap();
        assert!(session.officer().is_none());
        assert!(session.charges().is_empty());
        assert!(session.favorites().is_favorite("PC 207"));

        let store = session.end().unwrap();
        assert_eq!(store.get(login::SESSION_KEY).unwrap(), None);
    }
}
