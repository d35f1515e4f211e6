//! Local officer login gate.
//!
//! Records who is using the toolkit and under which callsign. This is a
//! display-name gate, not an authentication mechanism: nothing is secret and
//! anyone with access to the store can edit it.

use std::sync::LazyLock;

use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::SessionError;
use crate::store::KeyValueStore;

/// Storage key holding the current login.
pub const SESSION_KEY: &str = "metropd-session";

/// How long a login stays valid.
pub const SESSION_HOURS: i64 = 2;

static CALLSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9][A-Z]-[0-9]{2}$").unwrap_or_else(|_| unreachable!()));

/// A signed-in officer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerLogin {
    /// Display name.
    pub name: String,
    /// Unit callsign, e.g. `"1A-12"`.
    pub callsign: String,
    /// When the officer signed in.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub logged_in_at: DateTime<Utc>,
}

impl OfficerLogin {
    /// Whether the login has outlived [`SESSION_HOURS`] at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.logged_in_at > TimeDelta::hours(SESSION_HOURS)
    }
}

/// Whether `callsign` has the `#X-##` shape, e.g. `"1A-12"`.
#[must_use]
pub fn is_valid_callsign(callsign: &str) -> bool {
    CALLSIGN.is_match(callsign)
}

/// Validates and stores a new login.
///
/// # Errors
///
/// * [`SessionError::EmptyName`] if `name` is blank
/// * [`SessionError::InvalidCallsign`] if `callsign` is not `#X-##`
/// * [`SessionError`] if the store fails
pub fn login(
    store: &mut impl KeyValueStore,
    name: &str,
    callsign: &str,
    now: DateTime<Utc>,
) -> Result<OfficerLogin, SessionError> {
    let name = name.trim();
    let callsign = callsign.trim();

    if name.is_empty() {
        return Err(SessionError::EmptyName);
    }
    if !is_valid_callsign(callsign) {
        return Err(SessionError::InvalidCallsign {
            callsign: callsign.to_string(),
        });
    }

    let officer = OfficerLogin {
        name: name.to_string(),
        callsign: callsign.to_string(),
        logged_in_at: now,
    };
    store.set(SESSION_KEY, serde_json::to_string(&officer)?)?;

    log::info!("{} ({}) signed in", officer.name, officer.callsign);

    Ok(officer)
}

/// Returns the stored login if one exists and has not expired at `now`.
///
/// A corrupt stored value counts as signed out.
///
/// # Errors
///
/// Returns [`SessionError`] only if the store itself fails.
pub fn current_login(
    store: &impl KeyValueStore,
    now: DateTime<Utc>,
) -> Result<Option<OfficerLogin>, SessionError> {
    let Some(raw) = store.get(SESSION_KEY)? else {
        return Ok(None);
    };

    let officer = match serde_json::from_str::<OfficerLogin>(&raw) {
        Ok(officer) => officer,
        Err(e) => {
            log::warn!("Ignoring corrupt login under {SESSION_KEY}: {e}");
            return Ok(None);
        }
    };

    if officer.is_expired(now) {
        log::info!("Login for {} expired", officer.callsign);
        return Ok(None);
    }

    Ok(Some(officer))
}

/// Clears the stored login.
///
/// # Errors
///
/// Returns [`SessionError`] if the store fails.
pub fn logout(store: &mut impl KeyValueStore) -> Result<(), SessionError> {
    store.remove(SESSION_KEY)
}
