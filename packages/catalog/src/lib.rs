#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference datasets for the Metro PD toolkit.
//!
//! All data is baked into the binary at compile time from the TOML files in
//! `packages/catalog/data/`. [`registry`] loads and validates them;
//! [`search`] implements the filtering used by every lookup screen.

pub mod registry;
pub mod search;

pub use metro_pd_catalog_models::{
    CatalogError, CatalogScope, NatoLetter, RadioCategory, RadioCode, ReferenceItem, SpeedLimit,
    StatuteEntry,
};
pub use registry::{
    nato_alphabet, parse_statutes, penal_codes, radio_codes, reference_items, speed_limits,
};
