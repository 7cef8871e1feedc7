//! Locally stored PDFs returned by the generation API
//!
//! A [`PdfHandle`] owns one file in the preview directory until it is
//! released. Releasing twice is a no-op.

use crate::document::DocumentKind;
use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Creates preview files under one directory
#[derive(Debug, Clone)]
pub struct PdfStore {
    dir: PathBuf,
}

impl PdfStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to a uniquely named file and return its handle
    pub fn create(&self, kind: DocumentKind, bytes: &[u8]) -> io::Result<PdfHandle> {
        fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(format!("{}-{}.pdf", kind.slug(), Uuid::new_v4()));
        fs::write(&path, bytes)?;
        tracing::debug!("Stored {} byte PDF at {}", bytes.len(), path.display());
        Ok(PdfHandle {
            path,
            kind,
            info: PdfInfo::inspect(bytes),
            released: false,
        })
    }
}

/// Owned reference to a stored PDF
#[derive(Debug)]
pub struct PdfHandle {
    path: PathBuf,
    kind: DocumentKind,
    info: PdfInfo,
    released: bool,
}

impl PdfHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn info(&self) -> &PdfInfo {
        &self.info
    }

    /// Remove the backing file.
    ///
    /// Returns `Ok(true)` the first time and `Ok(false)` on every later call.
    /// A file that is already gone counts as released.
    pub fn release(&mut self) -> io::Result<bool> {
        if self.released {
            return Ok(false);
        }
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        self.released = true;
        tracing::debug!("Released preview {}", self.path.display());
        Ok(true)
    }

    /// Copy the PDF into `dir` under a timestamped name
    pub fn save_copy(&self, dir: &Path) -> io::Result<PathBuf> {
        if self.released {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "preview was already released",
            ));
        }
        fs::create_dir_all(dir)?;
        let stem = format!(
            "{}-{}",
            self.kind.slug(),
            Local::now().format("%Y%m%d-%H%M%S")
        );
        let target = unused_path(dir, &stem);
        fs::copy(&self.path, &target)?;
        Ok(target)
    }
}

/// `<stem>.pdf` in `dir`, or `<stem>-N.pdf` with the first free N
fn unused_path(dir: &Path, stem: &str) -> PathBuf {
    let mut target = dir.join(format!("{stem}.pdf"));
    let mut n = 1;
    while target.exists() {
        target = dir.join(format!("{stem}-{n}.pdf"));
        n += 1;
    }
    target
}

impl Drop for PdfHandle {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!("Failed to release preview {}: {}", self.path.display(), e);
        }
    }
}

/// Summary shown in the preview dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfInfo {
    pub size_bytes: usize,
    /// Version from the `%PDF-x.y` header, `None` if the header is missing
    pub version: Option<String>,
    /// Count of `/Type /Page` objects, approximate for compressed files
    pub page_count: usize,
}

impl PdfInfo {
    pub fn inspect(bytes: &[u8]) -> Self {
        let version = bytes.strip_prefix(b"%PDF-").map(|rest| {
            rest.iter()
                .take_while(|b| b.is_ascii_digit() || **b == b'.')
                .map(|b| *b as char)
                .collect::<String>()
        });
        Self {
            size_bytes: bytes.len(),
            version: version.filter(|v| !v.is_empty()),
            page_count: count_pages(bytes),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.version.is_some()
    }

    pub fn human_size(&self) -> String {
        let size = self.size_bytes as f64;
        if size >= 1024.0 * 1024.0 {
            format!("{:.1} MB", size / (1024.0 * 1024.0))
        } else if size >= 1024.0 {
            format!("{:.1} KB", size / 1024.0)
        } else {
            format!("{} B", self.size_bytes)
        }
    }
}

fn count_pages(bytes: &[u8]) -> usize {
    const NEEDLES: [&[u8]; 2] = [b"/Type /Page", b"/Type/Page"];
    NEEDLES
        .iter()
        .map(|needle| {
            bytes
                .windows(needle.len() + 1)
                .filter(|w| w.starts_with(needle) && w[needle.len()] != b's')
                .count()
        })
        .sum()
}
