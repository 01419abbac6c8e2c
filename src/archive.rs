//! ZIP archive extraction with an inventory of what was extracted.
//!
//! # Example
//!
//! ```no_run
//! use unpage::archive::extract_archive;
//!
//! let inventory = extract_archive("WhatsApp Chat.zip", "whatsapp_chat")?;
//! for entry in &inventory.entries {
//!     println!("- {} ({} bytes)", entry.name, entry.size);
//! }
//! # Ok::<(), unpage::Error>(())
//! ```

use crate::error::{Error, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// One entry of an extracted archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    /// Name as recorded in the archive
    pub name: String,

    /// Uncompressed size in bytes
    pub size: u64,

    /// Compressed size in bytes
    pub compressed_size: u64,

    /// Whether the entry is a directory
    pub is_dir: bool,
}

/// Everything extracted from one archive.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveInventory {
    /// Directory the archive was extracted into
    pub target_dir: PathBuf,

    /// Entries in archive order
    pub entries: Vec<ArchiveEntry>,
}

impl ArchiveInventory {
    /// File entries (directories excluded).
    pub fn files(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter().filter(|e| !e.is_dir)
    }

    /// Number of file entries.
    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    /// Total uncompressed size of all files.
    pub fn total_size(&self) -> u64 {
        self.files().map(|e| e.size).sum()
    }
}

/// A file found on disk after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFile {
    /// Path of the file
    pub path: PathBuf,

    /// Size on disk in bytes
    pub size: u64,
}

/// List the entries of an archive without extracting it.
pub fn list_archive<P: AsRef<Path>>(archive_path: P) -> Result<Vec<ArchiveEntry>> {
    let mut archive = open_archive(archive_path.as_ref())?;
    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        entries.push(entry_at(&mut archive, index)?);
    }
    Ok(entries)
}

/// Extract every entry of a ZIP archive into `target_dir`.
///
/// The target directory is created if absent. Entry paths are kept relative
/// to it. The whole archive is checked before anything is written: an entry
/// that would land outside the target directory fails the extraction with
/// [`Error::UnsafeEntry`].
pub fn extract_archive<P, Q>(archive_path: P, target_dir: Q) -> Result<ArchiveInventory>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let archive_path = archive_path.as_ref();
    let archive = open_archive(archive_path)?;
    log::debug!(
        "{} contains {} entries",
        archive_path.display(),
        archive.len()
    );
    extract_from(archive, target_dir.as_ref())
}

/// Extract an archive read from any seekable reader.
pub fn extract_reader<R: Read + Seek>(reader: R, target_dir: &Path) -> Result<ArchiveInventory> {
    let archive = ZipArchive::new(reader)?;
    extract_from(archive, target_dir)
}

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

fn extract_from<R: Read + Seek>(
    mut archive: ZipArchive<R>,
    target_dir: &Path,
) -> Result<ArchiveInventory> {
    // Validate every name up front so a bad entry leaves nothing behind.
    let mut plan = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let file = archive.by_index(index)?;
        let relative = file
            .enclosed_name()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| Error::UnsafeEntry(file.name().to_string()))?;
        plan.push((index, relative));
    }

    fs::create_dir_all(target_dir)?;

    let mut entries = Vec::with_capacity(plan.len());
    for (index, relative) in plan {
        let entry = entry_at(&mut archive, index)?;
        let out_path = target_dir.join(&relative);

        if entry.is_dir {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = archive.by_index(index)?;
            if let Err(e) = copy_entry(&mut file, &entry.name, &out_path) {
                let _ = fs::remove_file(&out_path);
                return Err(e);
            }
        }

        log::debug!("extracted {}", out_path.display());
        entries.push(entry);
    }

    log::info!(
        "extracted {} entries to {}",
        entries.len(),
        target_dir.display()
    );

    Ok(ArchiveInventory {
        target_dir: target_dir.to_path_buf(),
        entries,
    })
}

fn entry_at<R: Read + Seek>(archive: &mut ZipArchive<R>, index: usize) -> Result<ArchiveEntry> {
    let file = archive.by_index(index)?;
    Ok(ArchiveEntry {
        name: file.name().to_string(),
        size: file.size(),
        compressed_size: file.compressed_size(),
        is_dir: file.is_dir(),
    })
}

/// Copy one entry's data to `out_path`.
///
/// Failing to read the entry (bad checksum, truncated data) is an
/// [`Error::Archive`]; failing to write the output is an [`Error::Io`].
fn copy_entry<R: Read>(entry: &mut R, name: &str, out_path: &Path) -> Result<u64> {
    let mut out = File::create(out_path)?;
    let mut buf = [0u8; 8192];
    let mut written = 0u64;

    loop {
        let n = match entry.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Archive(format!("{}: {}", name, e))),
        };
        out.write_all(&buf[..n])?;
        written += n as u64;
    }

    Ok(written)
}

/// Walk `dir` recursively and report every file with its size on disk.
///
/// Files are listed in path order.
pub fn list_files<P: AsRef<Path>>(dir: P) -> Result<Vec<ExtractedFile>> {
    let mut files = Vec::new();
    walk(dir.as_ref(), &mut files)?;
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<ExtractedFile>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk(&entry.path(), files)?;
        } else if file_type.is_file() {
            files.push(ExtractedFile {
                path: entry.path(),
                size: entry.metadata()?.len(),
            });
        }
    }
    Ok(())
}
