//! On-disk storage for the latest batch [`Snapshot`].
//!
//! Only one snapshot is kept. Writes go through a temp file in the same
//! directory and are renamed into place, so readers never observe a partial
//! report.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config;
use crate::error::{Result, SupplyRiskError};
use crate::models::Snapshot;

/// Message returned when no batch run has written a report yet.
pub const MISSING_REPORT: &str =
    "Report not yet generated. Run the daily scan or investigate_commodity.";

/// Reads and writes `latest_report.json` in a data directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    /// Directory holding the report file.
    pub data_dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `data_dir`.
    ///
    /// If `data_dir` is `None`, uses the platform-appropriate data directory.
    /// Creates the directory if it does not exist.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { data_dir: dir })
    }

    /// Path of the report file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(config::REPORT_FILE)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Replace the stored snapshot.
    pub fn save(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        let dest = self.path();
        fs::create_dir_all(&self.data_dir)?;

        let tmp = NamedTempFile::new_in(&self.data_dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, snapshot)?;
            writer.flush()?;
        }
        // A failed persist drops the temp file, which deletes it.
        tmp.persist(&dest).map_err(|e| SupplyRiskError::Io(e.error))?;

        tracing::info!(
            path = %dest.display(),
            commodities = snapshot.commodities.len(),
            "saved snapshot"
        );
        Ok(dest)
    }

    /// Load the stored snapshot.
    ///
    /// A corrupt file is removed so the next batch run starts clean.
    pub fn load(&self) -> Result<Snapshot> {
        let path = self.path();
        if !path.exists() {
            return Err(SupplyRiskError::NotFound(MISSING_REPORT.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str(&contents) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt snapshot, removing");
                let outcome = match fs::remove_file(&path) {
                    Ok(()) => "has been removed",
                    Err(remove_err) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %remove_err,
                            "failed to remove corrupt snapshot"
                        );
                        "could not be removed"
                    }
                };
                Err(SupplyRiskError::NotFound(format!(
                    "Report file '{}' was corrupt and {}. \
                     Run the scan again. Original error: {}",
                    file_name(&path),
                    outcome,
                    e
                )))
            }
        }
    }

    /// Remove the stored snapshot, if any.
    pub fn clear(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
}
