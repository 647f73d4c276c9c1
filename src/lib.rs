//! Match report table scraper.
//!
//! Fetches match report pages, pulls every statistics table out of them, cleans the
//! tables up and writes one CSV per table into a directory per match. A second pass
//! gives each CSV a name that says which team and which table it is.

pub mod config;
mod error;
pub mod identity;
mod macros;
pub mod manifest;
pub mod normalize;
pub mod parse;
pub mod persist;
pub mod process;
pub mod request;
pub mod table;

pub use config::{Config, Locale};
pub use error::{Error, Result};

/// Match reports scraped by a default run.
pub const MATCH_URLS: [&str; 7] = [
    "https://fbref.com/es/partidos/33e26065/Chelsea-Tottenham-Hotspur-Abril-3-2025-Premier-League",
    "https://fbref.com/es/partidos/5984e216/Brentford-Chelsea-Abril-6-2025-Premier-League",
    "https://fbref.com/es/partidos/a45626b5/Chelsea-Ipswich-Town-Abril-13-2025-Premier-League",
    "https://fbref.com/es/partidos/c559794a/Legia-Warsaw-Chelsea-Abril-10-2025-Conference-League",
    "https://fbref.com/es/partidos/c83977dc/Chelsea-Legia-Warsaw-Abril-17-2025-Conference-League",
    "https://fbref.com/es/partidos/aaac9748/Fulham-Chelsea-Abril-20-2025-Premier-League",
    "https://fbref.com/es/partidos/06c5f0ab/Chelsea-Everton-Abril-26-2025-Premier-League",
];
/// Wiped and recreated at the start of every run.
const OUTPUT_ROOT: &str = "partidos_a_analizar";
const FETCH_TIMEOUT_SECS: u64 = 20;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
/// Class marker carried by every statistics table.
const STATS_TABLE_CLASS: &str = "stats_table";
/// Directive handed to the log subscriber by the binary.
pub const LOG_FILTER: &str = "info,match_tables=info";
