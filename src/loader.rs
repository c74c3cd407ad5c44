//! Training from a directory of sample files.
//!
//! Every regular file in the directory is one sample. Files are learned in
//! file-name order so the same directory always yields the same template.
//! Bytes that are not valid UTF-8 are replaced with U+FFFD.

use std::fs;
use std::path::{Path, PathBuf};

use crate::align::Aligner;
use crate::clean::Sanitizer;
use crate::template::{Outcome, Template};
use crate::{Error, Result};

impl Template {
    /// Build a template from every file in `dir`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the directory or one of its files cannot be read.
    pub fn from_directory(dir: impl AsRef<Path>, aligner: Aligner) -> Result<Self> {
        let mut template = Self::with_aligner(aligner);
        template.learn_directory(dir)?;
        Ok(template)
    }
}

impl<S: Sanitizer> Template<S> {
    /// Learn every file in `dir`, returning the outcome for each file.
    ///
    /// Subdirectories and other non-file entries are skipped.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the directory or one of its files cannot be read.
    /// Files learned before the failure stay learned.
    pub fn learn_directory(&mut self, dir: impl AsRef<Path>) -> Result<Vec<(PathBuf, Outcome)>> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();

        for entry in fs::read_dir(dir).map_err(io_error(dir))? {
            let path = entry.map_err(io_error(dir))?.path();
            if path.is_file() {
                paths.push(path);
            } else {
                tracing::warn!(path = %path.display(), "skipping non-file entry");
            }
        }
        paths.sort();

        let mut outcomes = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = fs::read(&path).map_err(io_error(&path))?;
            let outcome = self.learn(&String::from_utf8_lossy(&bytes));
            tracing::info!(
                path = %path.display(),
                ?outcome,
                holes = self.skeleton().map_or(0, |s| s.hole_count()),
                "learned sample file"
            );
            outcomes.push((path, outcome));
        }

        Ok(outcomes)
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}
