#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the Metro PD reference portal.
//!
//! Every lookup is available as a subcommand. Running without a subcommand
//! starts the interactive menu, which also hosts the charge sheet builder.

mod interactive;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use metro_pd_catalog::search::{
    StatuteFilter, available_classes, filter_statutes, search_nato, search_radio_codes,
    search_reference, search_speed_limits, spell_phonetic,
};
use metro_pd_catalog::{CatalogScope, registry};
use metro_pd_session::paths::{self, DATA_DIR_ENV};
use metro_pd_session::{JsonFileStore, Session};

#[derive(Parser)]
#[command(name = "metro_pd", about = "Metro PD reference portal")]
struct Cli {
    /// Directory holding the session store
    #[arg(long, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a display name and callsign
    Login {
        /// Display name
        name: String,
        /// Unit callsign (e.g. "1A-12")
        callsign: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in officer
    Whoami,
    /// Search penal codes
    Codes {
        /// Text to match against code, title, description and class
        query: Option<String>,
        /// Statute book to search ("local" or "federal")
        #[arg(long, default_value = "local", value_parser = parse_scope)]
        scope: CatalogScope,
        /// Only show this classification (e.g. "Felony")
        #[arg(long)]
        class: Option<String>,
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
        /// List the classifications in the statute book instead
        #[arg(long)]
        classes: bool,
    },
    /// Star or unstar a penal code
    Favorite {
        /// Statute code (e.g. "PC 187")
        code: String,
        /// Statute book the code belongs to
        #[arg(long, default_value = "local", value_parser = parse_scope)]
        scope: CatalogScope,
    },
    /// Build a charge sheet from statute codes and print it
    Sheet {
        /// Statute codes, repeated once per count
        #[arg(required = true)]
        codes: Vec<String>,
        /// Statute book the codes belong to
        #[arg(long, default_value = "local", value_parser = parse_scope)]
        scope: CatalogScope,
    },
    /// Search radio ten-codes
    Radio {
        /// Text to match against code, description and category
        query: Option<String>,
    },
    /// Search the NATO phonetic alphabet
    Nato {
        /// Letter or word to match
        query: Option<String>,
    },
    /// Spell text with the NATO phonetic alphabet
    Spell {
        /// Text to spell (e.g. a plate number)
        text: String,
    },
    /// Search posted speed limits
    Speed {
        /// Text to match against road type, limit and color
        query: Option<String>,
    },
    /// Search quick-reference procedures
    Reference {
        /// Text to match against title, tags and body
        query: Option<String>,
    },
}

fn parse_scope(s: &str) -> Result<CatalogScope, String> {
    s.parse()
        .map_err(|_| format!("unknown scope {s:?} (expected local or federal)"))
}

#[allow(clippy::too_many_lines)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(paths::data_dir);
    log::debug!("Using data directory {}", data_dir.display());
    let store = JsonFileStore::open(paths::store_path(&data_dir))?;
    let mut session = Session::start(store, chrono::Utc::now())?;

    let Some(command) = cli.command else {
        interactive::run(&mut session)?;
        session.end()?;
        return Ok(());
    };

    match command {
        Commands::Login { name, callsign } => {
            let officer = session.login(&name, &callsign, chrono::Utc::now())?;
            println!("Signed in as {} ({}).", officer.name, officer.callsign);
        }
        Commands::Logout => {
            session.logout()?;
            println!("Signed out.");
        }
        Commands::Whoami => match session.officer() {
            Some(officer) => println!("{} ({})", officer.name, officer.callsign),
            None => println!("Not signed in."),
        },
        Commands::Codes {
            query,
            scope,
            class,
            favorites,
            classes,
        } => {
            let catalog = registry::penal_codes(scope);
            if classes {
                for class in available_classes(&catalog) {
                    println!("{class}");
                }
            } else {
                let filter = StatuteFilter {
                    query: query.unwrap_or_default(),
                    class,
                    only_favorites: favorites,
                };
                let results = filter_statutes(&catalog, &filter, |code| {
                    session.favorites().is_favorite(code)
                });
                render::statutes(&results, session.favorites());
            }
        }
        Commands::Favorite { code, scope } => {
            let catalog = registry::penal_codes(scope);
            let code = code.trim();
            if !catalog.iter().any(|entry| entry.code == code) {
                return Err(format!("Unknown {scope} statute code: {code}").into());
            }
            if session.toggle_favorite(code)? {
                println!("Starred {code}.");
            } else {
                println!("Unstarred {code}.");
            }
        }
        Commands::Sheet { codes, scope } => {
            let catalog = registry::penal_codes(scope);
            let outcome = session.charges_mut().add_codes(&catalog, &codes);
            for code in &outcome.unknown {
                eprintln!("Skipping unknown {scope} statute code: {code}");
            }
            println!("{}", session.charges().export_text());
        }
        Commands::Radio { query } => {
            let codes = registry::radio_codes();
            render::radio_codes(&search_radio_codes(&codes, &query.unwrap_or_default()));
        }
        Commands::Nato { query } => {
            let letters = registry::nato_alphabet();
            render::nato(&search_nato(&letters, &query.unwrap_or_default()));
        }
        Commands::Spell { text } => {
            let letters = registry::nato_alphabet();
            println!("{}", spell_phonetic(&letters, &text).join(" "));
        }
        Commands::Speed { query } => {
            let limits = registry::speed_limits();
            render::speed_limits(&search_speed_limits(&limits, &query.unwrap_or_default()));
        }
        Commands::Reference { query } => {
            let items = registry::reference_items();
            render::reference(&search_reference(&items, &query.unwrap_or_default()));
        }
    }

    session.end()?;

    Ok(())
}
