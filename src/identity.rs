//! Which two teams a report page is about, read from the page title.

use std::fmt;

use crate::Locale;

const DIR_TEAM_JOIN: &str = "_vs_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchIdentity {
    /// Both team names, already made filesystem safe.
    Teams { home: String, away: String },
    /// The title didn't name exactly two teams. Tables of such a match keep their
    /// positional names.
    Unknown { name: String },
}

impl MatchIdentity {
    /// Parses a title like `"Chelsea vs. Tottenham Hotspur Informe del partido"`.
    /// Falls back to a timestamped name when the title doesn't split into two teams.
    pub fn from_title(title: &str, locale: &Locale) -> Self {
        Self::from_title_at(title, locale, chrono::Utc::now().timestamp())
    }

    pub fn from_title_at(title: &str, locale: &Locale, timestamp: i64) -> Self {
        match split_teams(title, locale) {
            Some((home, away)) => MatchIdentity::Teams { home, away },
            None => Self::fallback(locale, timestamp),
        }
    }

    pub fn fallback(locale: &Locale, timestamp: i64) -> Self {
        MatchIdentity::Unknown {
            name: format!("{}_{timestamp}", locale.fallback_prefix),
        }
    }

    /// Name of the match's output directory.
    pub fn dir_name(&self) -> String {
        match self {
            MatchIdentity::Teams { home, away } => format!("{home}{DIR_TEAM_JOIN}{away}"),
            MatchIdentity::Unknown { name } => name.clone(),
        }
    }

    /// `(home, away)` tokens, if the teams are known.
    pub fn teams(&self) -> Option<(&str, &str)> {
        match self {
            MatchIdentity::Teams { home, away } => Some((home, away)),
            MatchIdentity::Unknown { .. } => None,
        }
    }
}

impl fmt::Display for MatchIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dir_name())
    }
}

fn split_teams(title: &str, locale: &Locale) -> Option<(String, String)> {
    let info = title.split(locale.report_suffix).next()?;
    let teams: Vec<&str> = info.split(locale.team_separator).collect();
    let [home, away] = teams.as_slice() else {
        return None;
    };
    let (home, away) = (team_token(home), team_token(away));
    if home.is_empty() || away.is_empty() {
        return None;
    }
    Some((home, away))
}

/// Trims and swaps each inner whitespace character for `_`.
fn team_token(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
