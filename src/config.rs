use std::path::PathBuf;
use std::time::Duration;

use crate::{FETCH_TIMEOUT_SECS, MATCH_URLS, OUTPUT_ROOT, USER_AGENT};

/// Literals that depend on the language the report pages are served in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// Trailing label of the page title, everything from here on is dropped.
    pub report_suffix: &'static str,
    /// Separator between the home and away team in the title.
    pub team_separator: &'static str,
    pub player_column: &'static str,
    pub age_column: &'static str,
    pub nationality_column: &'static str,
    /// Found in the player cell of "N players" aggregate rows.
    pub aggregate_marker: &'static str,
    /// Directory prefix for matches whose teams couldn't be read from the title.
    pub fallback_prefix: &'static str,
}

impl Locale {
    pub const SPANISH: Locale = Locale {
        report_suffix: " Informe del partido",
        team_separator: " vs. ",
        player_column: "Jugador",
        age_column: "Edad",
        nationality_column: "País",
        aggregate_marker: " jugadores",
        fallback_prefix: "partido_desconocido",
    };

    pub const ENGLISH: Locale = Locale {
        report_suffix: " Match Report",
        team_separator: " vs. ",
        player_column: "Player",
        age_column: "Age",
        nationality_column: "Nation",
        aggregate_marker: " Players",
        fallback_prefix: "unknown_match",
    };
}

impl Default for Locale {
    fn default() -> Self {
        Self::SPANISH
    }
}

/// Everything a run needs to know. `Config::default()` is the production setup.
#[derive(Debug, Clone)]
pub struct Config {
    pub urls: Vec<String>,
    pub output_root: PathBuf,
    pub fetch_timeout: Duration,
    pub user_agent: String,
    /// Prefix every CSV with a UTF-8 byte order mark.
    pub write_bom: bool,
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: MATCH_URLS.iter().map(|u| u.to_string()).collect(),
            output_root: PathBuf::from(OUTPUT_ROOT),
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            write_bom: true,
            locale: Locale::default(),
        }
    }
}
