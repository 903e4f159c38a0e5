use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::{ExpenseRecord, Ledger};

const TMP_SUFFIX: &str = "tmp";
const BACKUP_SUFFIX: &str = "bak";

/// Repository persisting the ledger as a single JSON array of expense records.
/// The whole file is rewritten on every save.
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger from disk.
    ///
    /// A missing file and a file that does not hold a valid record list both
    /// yield an empty ledger. A malformed file is first copied to
    /// `<file>.bak` so the next save cannot destroy it. Other I/O failures
    /// (e.g. permission denied) are returned to the caller.
    pub fn load(&self) -> Result<Ledger> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no data file, starting empty");
                return Ok(Ledger::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        match serde_json::from_slice::<Vec<ExpenseRecord>>(&bytes) {
            Ok(records) => {
                tracing::debug!(
                    path = %self.path.display(),
                    count = records.len(),
                    "loaded ledger"
                );
                Ok(Ledger::from_records(records))
            }
            Err(e) => {
                let backup = sibling_path(&self.path, BACKUP_SUFFIX);
                match fs::copy(&self.path, &backup) {
                    Ok(_) => tracing::error!(
                        path = %self.path.display(),
                        backup = %backup.display(),
                        error = %e,
                        "malformed data file, starting empty"
                    ),
                    Err(copy_err) => tracing::error!(
                        path = %self.path.display(),
                        error = %e,
                        backup_error = %copy_err,
                        "malformed data file could not be backed up, starting empty"
                    ),
                }
                Ok(Ledger::new())
            }
        }
    }

    /// Replace the file with the full contents of `ledger`.
    /// Writes a sibling temp file first and renames it over the target.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger.records())
            .context("Failed to serialize ledger")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let tmp = sibling_path(&self.path, TMP_SUFFIX);
        if let Err(e) = write_file(&tmp, &json) {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("Failed to write {}", tmp.display()));
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("Failed to replace {}", self.path.display()));
        }

        tracing::debug!(
            path = %self.path.display(),
            count = ledger.len(),
            "saved ledger"
        );
        Ok(())
    }
}

/// `path` with `suffix` appended to its extension: `expenses.json` -> `expenses.json.tmp`.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut sibling = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, suffix),
        None => suffix.to_string(),
    };
    sibling.set_extension(ext);
    sibling
}

fn write_file(path: &Path, data: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
