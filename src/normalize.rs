//! Turns a `RawTable` into a `CleanTable`.
//!
//! Every table loses its fully blank rows and its grouping header level. Player
//! roster tables (recognised by a nationality column) additionally lose their
//! "N players" aggregate rows, get ages cut down to whole years and nationalities
//! cut down to the three letter country code.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::{Cell, CleanTable, RawTable};
use crate::{Error, Locale, Result};

static COUNTRY_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]{3}").expect("country code pattern is valid"));

/// Separates years from days in composite ages like `"27-154"`.
const AGE_SEPARATOR: char = '-';

pub fn normalize_table(raw: RawTable, locale: &Locale) -> Result<CleanTable> {
    let is_roster = raw.header().mentions(locale.nationality_column);
    let (header, rows) = raw.into_parts();

    let mut rows: Vec<Vec<Cell>> = rows
        .into_iter()
        .filter(|row| !row.iter().all(Cell::is_missing))
        .collect();
    let columns = header.collapse();

    if is_roster {
        if let Some(idx) = unique_column(&columns, locale.player_column)? {
            rows.retain(|row| !is_aggregate_row(&row[idx], locale));
        }
        if let Some(idx) = unique_column(&columns, locale.age_column)? {
            map_column(&mut rows, idx, years_only);
        }
        if let Some(idx) = unique_column(&columns, locale.nationality_column)? {
            map_column(&mut rows, idx, country_code);
        }
    }

    Ok(CleanTable::new(columns, rows))
}

/// Position of the column named `name`. A name shared by several columns is ambiguous.
fn unique_column(columns: &[String], name: &str) -> Result<Option<usize>> {
    let mut hits = columns.iter().enumerate().filter(|(_, c)| *c == name);
    match (hits.next(), hits.next()) {
        (Some((idx, _)), None) => Ok(Some(idx)),
        (None, _) => Ok(None),
        (Some(_), Some(_)) => Err(Error::MalformedTable(format!(
            "column {name:?} appears more than once"
        ))),
    }
}

fn map_column(rows: &mut [Vec<Cell>], idx: usize, f: fn(&str) -> Option<String>) {
    for row in rows {
        let cell = std::mem::replace(&mut row[idx], Cell::Missing);
        row[idx] = cell.map_text(f);
    }
}

fn is_aggregate_row(player: &Cell, locale: &Locale) -> bool {
    player
        .as_text()
        .is_some_and(|p| p.contains(locale.aggregate_marker))
}

fn years_only(age: &str) -> Option<String> {
    age.split(AGE_SEPARATOR).next().map(str::to_string)
}

fn country_code(nation: &str) -> Option<String> {
    COUNTRY_CODE.find(nation).map(|m| m.as_str().to_string())
}
