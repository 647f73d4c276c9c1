//! Output tree handling: the run-wide root and one CSV per table.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::identity::MatchIdentity;
use crate::table::CleanTable;
use crate::Result;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Removes `root` with everything under it and recreates it empty.
pub async fn reset_root(root: &Path) -> Result<()> {
    if fs::try_exists(root).await? {
        fs::remove_dir_all(root).await?;
    }
    fs::create_dir_all(root).await?;
    Ok(())
}

/// Creates the match's directory under `root`.
/// A known match reuses its directory. A fallback name that is already taken gets a
/// `_<n>` suffix, and `identity` is updated to the name actually used.
pub async fn match_dir(root: &Path, identity: &mut MatchIdentity) -> Result<PathBuf> {
    let MatchIdentity::Unknown { name } = identity else {
        let dir = root.join(identity.dir_name());
        fs::create_dir_all(&dir).await?;
        return Ok(dir);
    };
    fs::create_dir_all(root).await?;
    let base = name.clone();
    let mut n = 1;
    loop {
        let dir = root.join(name.as_str());
        match fs::create_dir(&dir).await {
            Ok(()) => return Ok(dir),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                n += 1;
                *name = format!("{base}_{n}");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Header row first, then every row. Missing cells become empty fields.
pub fn to_csv_bytes(table: &CleanTable, bom: bool) -> Result<Vec<u8>> {
    let buf = if bom { UTF8_BOM.to_vec() } else { Vec::new() };
    let mut wtr = csv::Writer::from_writer(buf);
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(|c| c.as_text().unwrap_or_default()))?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

pub async fn write_table(path: &Path, table: &CleanTable, bom: bool) -> Result<()> {
    let bytes = to_csv_bytes(table, bom)?;
    fs::write(path, bytes).await?;
    Ok(())
}
