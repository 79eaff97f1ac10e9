use std::fs;
use std::path::{Path, PathBuf};

use crate::charts::types::{GameEntry, CSV_HEADER};
use crate::utils::error::Result;

/// Write the entries as UTF-8, comma-delimited CSV with a header row.
///
/// A destination whose extension is not `csv` gets it replaced or
/// appended, so `stats/top` becomes `stats/top.csv`. Returns the path
/// actually written.
pub fn write_csv(entries: &[GameEntry], path: &Path) -> Result<PathBuf> {
    let path = if path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
        path.to_path_buf()
    } else {
        path.with_extension("csv")
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        writer.write_record([&entry.name, &entry.current_players, &entry.peak_players])?;
    }
    writer.flush()?;

    Ok(path)
}
