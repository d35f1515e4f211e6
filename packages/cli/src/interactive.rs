//! Interactive menu for the reference portal.
//!
//! Provides a menu-driven interface using `dialoguer`, mirroring the tabs of
//! the web portal. The officer is asked to sign in first if no unexpired
//! login is stored.

use dialoguer::{Confirm, Input, MultiSelect, Select};
use metro_pd_catalog::search::{
    StatuteFilter, filter_statutes, search_nato, search_radio_codes, search_reference,
    search_speed_limits, spell_phonetic,
};
use metro_pd_catalog::{CatalogScope, registry};
use metro_pd_session::{KeyValueStore, Session};

use crate::render;

/// Top-level actions available in the portal menu.
enum PortalAction {
    PenalCodes,
    ChargeSheet,
    ToggleFavorite,
    RadioCodes,
    Nato,
    SpeedLimits,
    Reference,
    SignOut,
    Quit,
}

impl PortalAction {
    const ALL: &[Self] = &[
        Self::PenalCodes,
        Self::ChargeSheet,
        Self::ToggleFavorite,
        Self::RadioCodes,
        Self::Nato,
        Self::SpeedLimits,
        Self::Reference,
        Self::SignOut,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::PenalCodes => "Search penal codes",
            Self::ChargeSheet => "Charge sheet",
            Self::ToggleFavorite => "Star / unstar a penal code",
            Self::RadioCodes => "Radio codes",
            Self::Nato => "NATO alphabet",
            Self::SpeedLimits => "Speed limits",
            Self::Reference => "Quick reference",
            Self::SignOut => "Sign out",
            Self::Quit => "Quit",
        }
    }
}

/// Actions inside the charge sheet builder.
enum SheetAction {
    Add,
    Remove,
    Clear,
    Copy,
    Back,
}

impl SheetAction {
    const ALL: &[Self] = &[
        Self::Add,
        Self::Remove,
        Self::Clear,
        Self::Copy,
        Self::Back,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Add => "Add charges",
            Self::Remove => "Remove a charge",
            Self::Clear => "Clear charge sheet",
            Self::Copy => "Print export text",
            Self::Back => "Back",
        }
    }
}

/// Runs the menu loop until the officer quits or signs out.
///
/// # Errors
///
/// Returns an error if a prompt fails or session state cannot be saved.
pub fn run<S: KeyValueStore>(session: &mut Session<S>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Metro Reference Portal");
    println!();

    if session.officer().is_none() && !sign_in(session)? {
        return Ok(());
    }

    if let Some(officer) = session.officer() {
        println!("Signed in as {} ({}).", officer.name, officer.callsign);
        println!();
    }

    let labels: Vec<&str> = PortalAction::ALL.iter().map(PortalAction::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match PortalAction::ALL[idx] {
            PortalAction::PenalCodes => search_penal_codes(session)?,
            PortalAction::ChargeSheet => charge_sheet(session)?,
            PortalAction::ToggleFavorite => toggle_favorite(session)?,
            PortalAction::RadioCodes => {
                let codes = registry::radio_codes();
                render::radio_codes(&search_radio_codes(&codes, &prompt_query()?));
            }
            PortalAction::Nato => {
                let letters = registry::nato_alphabet();
                let text = prompt_query()?;
                if text.chars().count() > 1 {
                    println!("{}", spell_phonetic(&letters, &text).join(" "));
                } else {
                    render::nato(&search_nato(&letters, &text));
                }
            }
            PortalAction::SpeedLimits => {
                let limits = registry::speed_limits();
                render::speed_limits(&search_speed_limits(&limits, &prompt_query()?));
            }
            PortalAction::Reference => {
                let items = registry::reference_items();
                render::reference(&search_reference(&items, &prompt_query()?));
            }
            PortalAction::SignOut => {
                if Confirm::new()
                    .with_prompt("Sign out? The charge sheet will be discarded.")
                    .default(false)
                    .interact()?
                {
                    session.logout()?;
                    println!("Signed out.");
                    return Ok(());
                }
            }
            PortalAction::Quit => return Ok(()),
        }

        println!();
    }
}

fn sign_in<S: KeyValueStore>(session: &mut Session<S>) -> Result<bool, Box<dyn std::error::Error>> {
    println!("Departmental access required.");

    loop {
        let name: String = Input::new().with_prompt("Name").interact_text()?;
        let callsign: String = Input::new()
            .with_prompt("Callsign (e.g. 1N-12)")
            .interact_text()?;

        match session.login(&name, &callsign.to_uppercase(), chrono::Utc::now()) {
            Ok(_) => return Ok(true),
            Err(e) => {
                println!("{e}");
                if !Confirm::new()
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?
                {
                    return Ok(false);
                }
            }
        }
    }
}

fn prompt_query() -> Result<String, dialoguer::Error> {
    Input::new()
        .with_prompt("Search (blank for all)")
        .allow_empty(true)
        .interact_text()
}

fn prompt_scope() -> Result<CatalogScope, dialoguer::Error> {
    let labels: Vec<&str> = CatalogScope::all().iter().map(|s| s.label()).collect();
    let idx = Select::new()
        .with_prompt("Statute book")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(CatalogScope::all()[idx])
}

fn search_penal_codes<S: KeyValueStore>(
    session: &Session<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scope = prompt_scope()?;
    let catalog = registry::penal_codes(scope);

    let only_favorites = Confirm::new()
        .with_prompt("Favorites only?")
        .default(false)
        .interact()?;

    let filter = StatuteFilter {
        query: prompt_query()?,
        class: None,
        only_favorites,
    };
    let results = filter_statutes(&catalog, &filter, |code| {
        session.favorites().is_favorite(code)
    });
    render::statutes(&results, session.favorites());

    Ok(())
}

fn toggle_favorite<S: KeyValueStore>(
    session: &mut Session<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scope = prompt_scope()?;
    let catalog = registry::penal_codes(scope);
    let filter = StatuteFilter::query(prompt_query()?);
    let results = filter_statutes(&catalog, &filter, |_| false);

    if results.is_empty() {
        println!("NO RESULTS FOUND");
        return Ok(());
    }

    let labels: Vec<String> = results
        .iter()
        .map(|entry| {
            let star = if session.favorites().is_favorite(&entry.code) {
                "*"
            } else {
                " "
            };
            format!("{star} {} — {}", entry.code, entry.title)
        })
        .collect();
    let idx = Select::new()
        .with_prompt("Code")
        .items(&labels)
        .interact()?;

    let code = results[idx].code.clone();
    if session.toggle_favorite(&code)? {
        println!("Starred {code}.");
    } else {
        println!("Unstarred {code}.");
    }

    Ok(())
}

fn charge_sheet<S: KeyValueStore>(
    session: &mut Session<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = SheetAction::ALL.iter().map(SheetAction::label).collect();

    loop {
        println!();
        render::charge_sheet(session.charges());
        println!();

        let idx = Select::new()
            .with_prompt("Charge sheet")
            .items(&labels)
            .default(0)
            .interact()?;

        match SheetAction::ALL[idx] {
            SheetAction::Add => add_charges(session)?,
            SheetAction::Remove => {
                let sheet = session.charges();
                if sheet.is_empty() {
                    continue;
                }
                let lines: Vec<String> = sheet.lines().iter().map(|l| l.export_line()).collect();
                let idx = Select::new()
                    .with_prompt("Remove which charge?")
                    .items(&lines)
                    .interact()?;
                let id = sheet.lines()[idx].line_id;
                session.charges_mut().remove_line(id);
            }
            SheetAction::Clear => {
                if Confirm::new()
                    .with_prompt("Clear every charge?")
                    .default(false)
                    .interact()?
                {
                    session.charges_mut().clear();
                }
            }
            SheetAction::Copy => {
                println!();
                println!("{}", session.charges().export_text());
            }
            SheetAction::Back => return Ok(()),
        }
    }
}

fn add_charges<S: KeyValueStore>(
    session: &mut Session<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scope = prompt_scope()?;
    let catalog = registry::penal_codes(scope);
    let filter = StatuteFilter::query(prompt_query()?);
    let results = filter_statutes(&catalog, &filter, |_| false);

    if results.is_empty() {
        println!("NO RESULTS FOUND");
        return Ok(());
    }

    let labels: Vec<String> = results
        .iter()
        .map(|entry| entry.charge_summary())
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Select charges (space to toggle, enter to add)")
        .items(&labels)
        .interact()?;

    if picked.is_empty() {
        println!("No charges selected. Pick at least 1 code, then add it.");
        return Ok(());
    }

    let selected: Vec<_> = picked.into_iter().map(|i| results[i].clone()).collect();
    let added = session.charges_mut().add_lines(&selected);
    println!("Added {} charge(s) to the charge sheet.", added.len());

    Ok(())
}
