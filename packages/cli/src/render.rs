//! Plain-text rendering of datasets and charge sheets for the terminal.

use metro_pd_catalog::{NatoLetter, RadioCode, ReferenceItem, SpeedLimit, StatuteEntry};
use metro_pd_charges::ChargeSheet;
use metro_pd_session::Favorites;

const DASH: &str = "—";

pub fn statutes(entries: &[&StatuteEntry], favorites: &Favorites) {
    println!(
        "{:<2} {:<14} {:<32} {:<16} {:>18} {:>6}",
        "", "CODE", "TITLE", "CLASS", "FINE", "TIME"
    );
    println!("{}", "-".repeat(94));
    for entry in entries {
        let star = if favorites.is_favorite(&entry.code) {
            "*"
        } else {
            ""
        };
        println!(
            "{:<2} {:<14} {:<32} {:<16} {:>18} {:>6}",
            star,
            entry.code,
            entry.title,
            entry.class.as_deref().unwrap_or(DASH),
            entry.fine.as_deref().unwrap_or(DASH),
            entry.time.as_deref().unwrap_or(DASH),
        );
    }
    println!();
    println!("{} SHOWN", entries.len());
}

pub fn radio_codes(codes: &[&RadioCode]) {
    println!("{:<8} {:<10} DESCRIPTION", "CODE", "CATEGORY");
    println!("{}", "-".repeat(60));
    for code in codes {
        println!("{:<8} {:<10} {}", code.code, code.category.to_string(), code.description);
    }
    println!();
    println!("{} RECORDS FOUND", codes.len());
}

pub fn nato(letters: &[&NatoLetter]) {
    for letter in letters {
        println!("{}  {}", letter.letter, letter.phonetic);
    }
}

pub fn speed_limits(limits: &[&SpeedLimit]) {
    println!("{:<24} {:<8} {:<10} NOTES", "ROAD TYPE", "LIMIT", "COLOR");
    println!("{}", "-".repeat(60));
    for limit in limits {
        println!(
            "{:<24} {:<8} {:<10} {}",
            limit.road_type,
            limit.limit,
            limit.color.as_deref().unwrap_or(DASH),
            limit.notes.as_deref().unwrap_or(""),
        );
    }
}

pub fn reference(items: &[&ReferenceItem]) {
    for item in items {
        println!("== {} [{}]", item.title, item.tags.join(", "));
        println!("{}", item.body);
        println!();
    }
    println!("{} ITEM(S)", items.len());
}

pub fn charge_sheet(sheet: &ChargeSheet) {
    if sheet.is_empty() {
        println!("Charge sheet is empty.");
        return;
    }
    for line in sheet.lines() {
        println!("{:>4}  {}", line.line_id.to_string(), line.export_line());
    }
    let totals = sheet.compute_totals();
    println!();
    println!("Total fine: {}", totals.fine_display());
    println!("Total time: {}", totals.time_display());
    if !totals.notes.is_empty() {
        println!("Notes: {}", totals.notes.join("; "));
    }
}
