//! Maps a table's position in the page to a name that says what it holds.

use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use crate::identity::MatchIdentity;
use crate::{Error, Result};

const POSITIONAL_PREFIX: &str = "table_";
pub const EXTENSION: &str = "csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Away,
    /// Not tied to one team, the label is used as is.
    Both,
}

struct Slot {
    side: Side,
    label: &'static str,
}

const fn slot(side: Side, label: &'static str) -> Slot {
    Slot { side, label }
}

/// Entry `i` names the table with ordinal `i + 1`.
const MANIFEST: [Slot; 17] = [
    slot(Side::Home, "Resumen"),
    slot(Side::Home, "Pases"),
    slot(Side::Home, "TiposPases"),
    slot(Side::Home, "AccionesDefensivas"),
    slot(Side::Home, "Posesion"),
    slot(Side::Home, "EstadisticasDiversas"),
    slot(Side::Home, "Portero"),
    slot(Side::Away, "Resumen"),
    slot(Side::Away, "Pases"),
    slot(Side::Away, "TiposPases"),
    slot(Side::Away, "AccionesDefensivas"),
    slot(Side::Away, "Posesion"),
    slot(Side::Away, "EstadisticasDiversas"),
    slot(Side::Away, "Portero"),
    slot(Side::Both, "Tiros_ambos_equipos"),
    slot(Side::Home, "tiros"),
    slot(Side::Away, "tiros"),
];

/// Number of tables the manifest knows a name for.
pub const MANIFEST_LEN: usize = MANIFEST.len();

/// `table_<n>`, the name every table is first written under.
pub fn positional_name(ordinal: usize) -> String {
    format!("{POSITIONAL_PREFIX}{ordinal}")
}

/// Semantic name for the 1-based `ordinal`. `None` past the end of the manifest
/// or when the teams aren't known.
pub fn semantic_name(ordinal: usize, identity: &MatchIdentity) -> Option<String> {
    let (home, away) = identity.teams()?;
    let slot = MANIFEST.get(ordinal.checked_sub(1)?)?;
    Some(match slot.side {
        Side::Home => format!("{home}_{}", slot.label),
        Side::Away => format!("{away}_{}", slot.label),
        Side::Both => slot.label.to_string(),
    })
}

pub fn file_name(stem: &str) -> String {
    format!("{stem}.{EXTENSION}")
}

/// Ordinal of a `table_<n>.csv` file name.
pub fn parse_positional(file_name: &str) -> Option<usize> {
    file_name
        .strip_suffix(EXTENSION)?
        .strip_suffix('.')?
        .strip_prefix(POSITIONAL_PREFIX)?
        .parse()
        .ok()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameReport {
    /// `(from, to)` file names.
    pub renamed: Vec<(String, String)>,
    /// Files left under their positional name.
    pub positional: Vec<String>,
    /// Files whose target name was already taken.
    pub collisions: Vec<String>,
}

/// Renames every `table_<n>.csv` in `dir` to its semantic name.
/// A failing rename is logged and recorded, the rest still go ahead.
pub async fn rename_tables(dir: &Path, identity: &MatchIdentity) -> Result<RenameReport> {
    let mut report = RenameReport::default();

    let mut tables = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(ordinal) = parse_positional(&name) {
            tables.push((ordinal, name));
        }
    }
    tables.sort_unstable();

    if identity.teams().is_none() {
        info!(dir = %dir.display(), "teams unknown, keeping positional names");
        report.positional = tables.into_iter().map(|(_, name)| name).collect();
        return Ok(report);
    }

    for (ordinal, name) in tables {
        let Some(target) = semantic_name(ordinal, identity).map(|stem| file_name(&stem)) else {
            info!("   - {name} has no name past table {MANIFEST_LEN}, left as is");
            report.positional.push(name);
            continue;
        };
        match rename_one(dir, &name, &target).await {
            Ok(()) => {
                info!("   - Renamed: '{name}' -> '{target}'");
                report.renamed.push((name, target));
            }
            Err(e) => {
                warn!("   - Couldn't rename '{name}': {e}");
                report.collisions.push(name);
            }
        }
    }
    Ok(report)
}

async fn rename_one(dir: &Path, from: &str, to: &str) -> Result<()> {
    let (from, to) = (dir.join(from), dir.join(to));
    if fs::try_exists(&to).await? {
        return Err(Error::RenameCollision { from, to });
    }
    fs::rename(&from, &to).await?;
    Ok(())
}
