//! Writing extracted pages to disk.
//!
//! Every page lands at `<base_dir>/<output_slot>/index.html`, whether it was
//! assembled into a full document or written as the raw region. The slot
//! directory is an external precondition: it is not created unless the
//! writer is explicitly told to.

use crate::error::{Error, Result};
use crate::model::PageSpec;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of every written page.
pub const PAGE_FILE_NAME: &str = "index.html";

/// Writes page content to deterministic paths under a base directory.
#[derive(Debug, Clone)]
pub struct PageWriter {
    base_dir: PathBuf,
    create_dirs: bool,
}

impl PageWriter {
    /// Create a writer rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            create_dirs: false,
        }
    }

    /// Create missing slot directories instead of failing.
    pub fn with_create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }

    /// Base output directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path a page is written to.
    pub fn path_for(&self, spec: &PageSpec) -> PathBuf {
        page_path(&self.base_dir, &spec.output_slot)
    }

    /// Write `contents` for `spec`, overwriting any previous file.
    ///
    /// Returns the written path.
    pub fn write(&self, spec: &PageSpec, contents: &str) -> Result<PathBuf> {
        spec.validate()?;
        let path = self.path_for(spec);

        if self.create_dirs {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| Error::Write {
                    path: path.clone(),
                    source,
                })?;
            }
        }

        match fs::write(&path, contents) {
            Ok(()) => {
                log::debug!("wrote {} bytes to {}", contents.len(), path.display());
                Ok(path)
            }
            Err(source) => Err(Error::Write { path, source }),
        }
    }
}

/// Build `<base>/<slot>/index.html`.
pub fn page_path(base: &Path, slot: &str) -> PathBuf {
    base.join(slot).join(PAGE_FILE_NAME)
}
