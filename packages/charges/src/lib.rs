#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Penal code charge sheet builder.
//!
//! Statute records carry their penalties as loosely formatted text
//! (`"$3,000 - $10,000"`, `"$100 per bud over"`, `"120s"`, `"15m"`).
//! [`money`] and [`duration`] turn that text into numbers, degrading to an
//! "unparseable" result instead of failing. [`sheet::ChargeSheet`] holds the
//! charges selected for a case and derives totals and the plain-text export
//! from them.

pub mod duration;
pub mod money;
pub mod sheet;

pub use duration::{format_seconds, parse_duration};
pub use money::{ParsedMoney, format_money, parse_money};
pub use sheet::{AddOutcome, AggregateTotals, ChargeLine, ChargeSheet, LineId};
