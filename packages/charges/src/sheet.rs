//! The working charge sheet for a case.
//!
//! A [`ChargeSheet`] owns an ordered list of [`ChargeLine`] snapshots. Fine
//! and time text is parsed once when a line is added; totals are always
//! derived from the full list so they can never drift from its contents.

use std::collections::HashMap;
use std::fmt;

use metro_pd_catalog_models::{StatuteEntry, charge_summary};
use serde::Serialize;

use crate::duration::{format_seconds, parse_duration};
use crate::money::{ParsedMoney, format_money, parse_money};

/// Identifier of a line on one charge sheet. Never reused by that sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineId(u64);

impl LineId {
    /// Returns the raw numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for LineId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// One statute added to the sheet, copied at the moment it was added.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeLine {
    /// Sheet-local identifier.
    pub line_id: LineId,
    /// Statute code.
    pub code: String,
    /// Statute title.
    pub title: String,
    /// Fine text as it appeared in the catalog.
    pub fine: Option<String>,
    /// Time text as it appeared in the catalog.
    pub time: Option<String>,
    /// Classification label.
    pub class: Option<String>,
    /// `fine` parsed at insertion.
    pub parsed_fine: ParsedMoney,
    /// `time` parsed at insertion. `None` if missing or unparseable.
    pub parsed_seconds: Option<u64>,
}

impl ChargeLine {
    fn snapshot(line_id: LineId, entry: &StatuteEntry) -> Self {
        let parsed_fine = entry.fine.as_deref().map(parse_money).unwrap_or_default();
        let parsed_seconds = entry.time.as_deref().and_then(parse_duration);

        if entry.fine.is_some() && parsed_fine.is_unparseable() {
            log::debug!("{}: fine {:?} contributes $0", entry.code, entry.fine);
        }
        if entry.time.is_some() && parsed_seconds.is_none() {
            log::debug!("{}: time {:?} contributes 0s", entry.code, entry.time);
        }

        Self {
            line_id,
            code: entry.code.clone(),
            title: entry.title.clone(),
            fine: entry.fine.clone(),
            time: entry.time.clone(),
            class: entry.class.clone(),
            parsed_fine,
            parsed_seconds,
        }
    }

    /// Line as it appears in the exported sheet.
    #[must_use]
    pub fn export_line(&self) -> String {
        charge_summary(
            &self.code,
            &self.title,
            self.fine.as_deref(),
            self.time.as_deref(),
        )
    }
}

/// Totals derived from every line on a sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateTotals {
    /// Sum of every line's lower bound.
    pub min_fine: f64,
    /// Sum of every line's upper bound, or its lower bound when it has none.
    pub max_fine: f64,
    /// Whether at least one line has distinct lower and upper bounds.
    pub has_range: bool,
    /// Sum of every parseable time.
    pub total_seconds: u64,
    /// `"<code>: <note>"` for every per-unit fine, in sheet order.
    pub notes: Vec<String>,
}

impl AggregateTotals {
    /// `"$min - $max"` when a range exists, otherwise `"$min"`.
    #[must_use]
    pub fn fine_display(&self) -> String {
        if self.has_range {
            format!(
                "{} - {}",
                format_money(self.min_fine),
                format_money(self.max_fine)
            )
        } else {
            format_money(self.min_fine)
        }
    }

    /// Total time formatted by [`format_seconds`].
    #[must_use]
    pub fn time_display(&self) -> String {
        format_seconds(self.total_seconds)
    }
}

/// Result of [`ChargeSheet::add_codes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Ids of the lines that were added, in request order.
    pub added: Vec<LineId>,
    /// Requested codes that were not in the catalog.
    pub unknown: Vec<String>,
}

/// Charges selected for a single case.
#[derive(Debug, Clone, Default)]
pub struct ChargeSheet {
    lines: Vec<ChargeLine>,
    next_id: u64,
}

impl ChargeSheet {
    /// Creates an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot of each entry, in order, returning the new ids.
    ///
    /// The same statute may be added any number of times; each addition is
    /// an independent line.
    pub fn add_lines(&mut self, entries: &[StatuteEntry]) -> Vec<LineId> {
        let ids: Vec<LineId> = entries
            .iter()
            .map(|entry| {
                self.next_id += 1;
                let id = LineId(self.next_id);
                self.lines.push(ChargeLine::snapshot(id, entry));
                id
            })
            .collect();

        if !ids.is_empty() {
            log::debug!("Added {} charge(s); sheet now has {}", ids.len(), self.lines.len());
        }

        ids
    }

    /// Looks up `codes` in `catalog` and adds the matching entries in the
    /// order requested. Codes missing from the catalog are skipped.
    pub fn add_codes<S: AsRef<str>>(&mut self, catalog: &[StatuteEntry], codes: &[S]) -> AddOutcome {
        let by_code: HashMap<&str, &StatuteEntry> =
            catalog.iter().map(|e| (e.code.as_str(), e)).collect();

        let mut selected = Vec::with_capacity(codes.len());
        let mut unknown = Vec::new();

        for code in codes {
            let code = code.as_ref().trim();
            match by_code.get(code) {
                Some(entry) => selected.push((*entry).clone()),
                None => {
                    log::warn!("Unknown statute code {code:?}; skipping");
                    unknown.push(code.to_string());
                }
            }
        }

        AddOutcome {
            added: self.add_lines(&selected),
            unknown,
        }
    }

    /// Removes the line with `id`. Returns `false` if no such line exists.
    pub fn remove_line(&mut self, id: LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.line_id != id);
        before != self.lines.len()
    }

    /// Removes every line. Ids already handed out are not reused.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[ChargeLine] {
        &self.lines
    }

    /// Number of lines on the sheet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the sheet has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Recomputes totals from the current lines.
    #[must_use]
    pub fn compute_totals(&self) -> AggregateTotals {
        let mut totals = AggregateTotals::default();

        for line in &self.lines {
            let fine = &line.parsed_fine;

            if let Some(note) = &fine.note {
                totals.notes.push(format!("{}: {note}", line.code));
            }
            if let Some(min) = fine.min {
                totals.min_fine += min;
            }
            match (fine.min, fine.max) {
                (_, Some(max)) => {
                    totals.max_fine += max;
                    totals.has_range |= fine.is_range();
                }
                (Some(min), None) => totals.max_fine += min,
                (None, None) => {}
            }

            totals.total_seconds = totals
                .total_seconds
                .saturating_add(line.parsed_seconds.unwrap_or(0));
        }

        totals
    }

    /// Plain-text sheet for the clipboard.
    ///
    /// ```text
    /// CHARGE SHEET
    /// PC 207 — Kidnapping | Fine: $12,000 | Time: 120s
    ///
    /// TOTALS: Fine $12,000 | Time 2m
    /// ```
    ///
    /// A `NOTES:` line follows the totals when any fine is per-unit.
    #[must_use]
    pub fn export_text(&self) -> String {
        let totals = self.compute_totals();

        let mut out = Vec::with_capacity(self.lines.len() + 4);
        out.push("CHARGE SHEET".to_string());
        out.extend(self.lines.iter().map(ChargeLine::export_line));
        out.push(String::new());
        out.push(format!(
            "TOTALS: Fine {} | Time {}",
            totals.fine_display(),
            totals.time_display()
        ));
        if !totals.notes.is_empty() {
            out.push(format!("NOTES: {}", totals.notes.join("; ")));
        }

        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use metro_pd_catalog::{CatalogScope, penal_codes};

    use super::*;

    fn entry(code: &str, fine: Option<&str>, time: Option<&str>) -> StatuteEntry {
        let mut entry = StatuteEntry::new(code, format!("{code} title")).unwrap();
        if let Some(fine) = fine {
            entry = entry.with_fine(fine);
        }
        if let Some(time) = time {
            entry = entry.with_time(time);
        }
        entry
    }

    #[test]
    fn kidnapping_and_robbery_totals() {
        let mut sheet = ChargeSheet::new();
        sheet.add_lines(&[
            entry("PC 207", Some("$12,000"), Some("120s")),
            entry("PC 211(a)", Some("$7,000"), Some("90s")),
        ]);

        let totals = sheet.compute_totals();
        assert!((totals.min_fine - 19_000.0).abs() < f64::EPSILON);
        assert!((totals.max_fine - 19_000.0).abs() < f64::EPSILON);
        assert!(!totals.has_range);
        assert_eq!(totals.total_seconds, 210);
        assert_eq!(totals.time_display(), "3m 30s");
        assert_eq!(totals.fine_display(), "$19,000");
        assert!(totals.notes.is_empty());
    }

    #[test]
    fn per_unit_fine_adds_note() {
        let mut sheet = ChargeSheet::new();
        sheet.add_lines(&[entry("HS 11350", Some("$100 per bud over"), None)]);

        let totals = sheet.compute_totals();
        assert!((totals.min_fine - 100.0).abs() < f64::EPSILON);
        assert_eq!(totals.notes, vec!["HS 11350: per bud over"]);
        assert_eq!(totals.total_seconds, 0);
    }

    #[test]
    fn range_widens_max_only() {
        let mut sheet = ChargeSheet::new();
        sheet.add_lines(&[
            entry("PC 451", Some("$3,000 - $10,000"), Some("60s")),
            entry("PC 32", Some("$3,000"), Some("60s")),
        ]);

        let totals = sheet.compute_totals();
        assert!((totals.min_fine - 6_000.0).abs() < f64::EPSILON);
        assert!((totals.max_fine - 13_000.0).abs() < f64::EPSILON);
        assert!(totals.has_range);
        assert_eq!(totals.fine_display(), "$6,000 - $13,000");
    }

    #[test]
    fn equal_bounds_do_not_flag_a_range() {
        let mut sheet = ChargeSheet::new();
        sheet.add_lines(&[entry("X 1", Some("$500 - $500"), None)]);

        let totals = sheet.compute_totals();
        assert!(!totals.has_range);
        assert!((totals.max_fine - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unparseable_values_contribute_nothing() {
        let mut sheet = ChargeSheet::new();
        sheet.add_lines(&[
            entry("X 1", Some("free"), Some("soon")),
            entry("X 2", None, None),
        ]);

        let totals = sheet.compute_totals();
        assert_eq!(totals, AggregateTotals::default());
    }

    #[test]
    fn duplicate_codes_are_independent_lines() {
        let mut sheet = ChargeSheet::new();
        let kidnapping = entry("PC 207", Some("$12,000"), Some("120s"));
        let ids = sheet.add_lines(&[kidnapping.clone(), kidnapping]);

        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert!((sheet.compute_totals().min_fine - 24_000.0).abs() < f64::EPSILON);

        assert!(sheet.remove_line(ids[0]));
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.lines()[0].line_id, ids[1]);

        let totals = sheet.compute_totals();
        assert!((totals.min_fine - 12_000.0).abs() < f64::EPSILON);
        assert_eq!(totals.total_seconds, 120);
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut sheet = ChargeSheet::new();
        let ids = sheet.add_lines(&[entry("PC 207", Some("$12,000"), None)]);
        assert!(sheet.remove_line(ids[0]));
        assert!(!sheet.remove_line(ids[0]));
        assert!(!sheet.remove_line(LineId::from(999)));
        assert!(sheet.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut sheet = ChargeSheet::new();
        let first = sheet.add_lines(&[entry("PC 207", None, None)]);
        sheet.clear();
        assert!(sheet.is_empty());
        let second = sheet.add_lines(&[entry("PC 207", None, None)]);
        assert_ne!(first[0], second[0]);
    }

    #[test]
    fn empty_add_is_a_no_op() {
        let mut sheet = ChargeSheet::new();
        assert!(sheet.add_lines(&[]).is_empty());
        assert!(sheet.is_empty());
    }

    #[test]
    fn lines_are_snapshots() {
        let mut sheet = ChargeSheet::new();
        let mut source = entry("PC 207", Some("$12,000"), Some("120s"));
        sheet.add_lines(std::slice::from_ref(&source));

        source.fine = Some("$1".to_string());
        source.title = "Changed".to_string();

        assert_eq!(sheet.lines()[0].fine.as_deref(), Some("$12,000"));
        assert_eq!(sheet.lines()[0].title, "PC 207 title");
    }

    #[test]
    fn export_line_matches_catalog_summary() {
        let mut sheet = ChargeSheet::new();
        let source = entry("PC 459", None, Some("60s"));
        sheet.add_lines(std::slice::from_ref(&source));

        assert_eq!(sheet.lines()[0].export_line(), source.charge_summary());
        assert_eq!(
            sheet.lines()[0].export_line(),
            "PC 459 — PC 459 title | Fine: — | Time: 60s"
        );
    }

    #[test]
    fn totals_are_idempotent() {
        let mut sheet = ChargeSheet::new();
        sheet.add_lines(&penal_codes(CatalogScope::Local));

        let first = sheet.compute_totals();
        let second = sheet.compute_totals();
        assert_eq!(first, second);
        assert_eq!(sheet.export_text(), sheet.export_text());
    }

    #[test]
    fn totals_stay_non_negative_and_ordered() {
        let catalog = penal_codes(CatalogScope::Local);
        let mut sheet = ChargeSheet::new();

        for (i, chunk) in catalog.chunks(7).enumerate() {
            let ids = sheet.add_lines(chunk);
            if i % 2 == 0 {
                sheet.remove_line(ids[0]);
            }
            if i % 3 == 2 {
                sheet.clear();
            }

            let totals = sheet.compute_totals();
            assert!(totals.min_fine >= 0.0);
            assert!(totals.max_fine >= totals.min_fine);
        }
    }

    #[test]
    fn add_codes_resolves_against_catalog() {
        let catalog = penal_codes(CatalogScope::Local);
        let mut sheet = ChargeSheet::new();

        let outcome = sheet.add_codes(&catalog, &["PC 207", "NOPE 1", " PC 211(a) "]);
        assert_eq!(outcome.added.len(), 2);
        assert_eq!(outcome.unknown, vec!["NOPE 1"]);

        let codes: Vec<&str> = sheet.lines().iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["PC 207", "PC 211(a)"]);
        assert_eq!(sheet.compute_totals().total_seconds, 210);
    }

    #[test]
    fn federal_catalog_uses_minutes() {
        let catalog = penal_codes(CatalogScope::Federal);
        let mut sheet = ChargeSheet::new();
        sheet.add_codes(&catalog, &["FED-01", "FED-02"]);

        let totals = sheet.compute_totals();
        assert_eq!(totals.total_seconds, 45 * 60);
        assert_eq!(totals.fine_display(), "$600,000");
    }

    #[test]
    fn export_text_lists_lines_totals_and_notes() {
        let mut sheet = ChargeSheet::new();
        let mut arson = entry("PC 451", Some("$3,000 - $10,000"), Some("60s"));
        arson.title = "Arson".to_string();
        let mut meth = entry("HS 11377", Some("$500 per wrap"), None);
        meth.title = "Meth Possession".to_string();
        let mut weed = entry("HS 11350", Some("$100 per bud over"), Some("60s"));
        weed.title = "Cannabis".to_string();
        sheet.add_lines(&[arson, meth, weed]);

        assert_eq!(
            sheet.export_text(),
            "CHARGE SHEET\n\
             PC 451 — Arson | Fine: $3,000 - $10,000 | Time: 60s\n\
             HS 11377 — Meth Possession | Fine: $500 per wrap | Time: —\n\
             HS 11350 — Cannabis | Fine: $100 per bud over | Time: 60s\n\
             \n\
             TOTALS: Fine $3,600 - $10,600 | Time 2m\n\
             NOTES: HS 11377: per wrap; HS 11350: per bud over"
        );
    }

    #[test]
    fn export_text_on_empty_sheet() {
        let sheet = ChargeSheet::new();
        assert_eq!(
            sheet.export_text(),
            "CHARGE SHEET\n\nTOTALS: Fine $0 | Time 0s"
        );
    }
}
