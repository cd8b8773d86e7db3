//! Upload storage for corkboard.
//!
//! Files are written under a single configured directory with UUID-based
//! names so uploads never collide and the stored name doubles as the public
//! path segment under `/uploads/`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

use crate::{BoardError, Result};

/// Coarse classification of an uploaded file by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Image formats.
    Image,
    /// Video formats.
    Video,
    /// Audio formats.
    Audio,
    /// Anything else.
    File,
}

impl FileKind {
    /// Classify a filename by its extension.
    pub fn from_name(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "svg" => FileKind::Image,
            "mp4" | "avi" | "mov" | "wmv" | "flv" | "webm" | "mkv" => FileKind::Video,
            "mp3" | "wav" | "flac" | "aac" | "ogg" | "m4a" => FileKind::Audio,
            _ => FileKind::File,
        }
    }

    /// String form used in API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::File => "file",
        }
    }
}

/// Storage service for uploaded files.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for stored files.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Save content with a new UUID-based filename.
    ///
    /// The original filename only contributes its extension.
    /// Returns the stored filename.
    pub fn save(&self, content: &[u8], original_name: &str) -> Result<String> {
        let stored_name = Self::generate_stored_name(original_name);
        fs::write(self.file_path(&stored_name), content)?;
        Ok(stored_name)
    }

    /// Load content from storage.
    pub fn load(&self, stored_name: &str) -> Result<Vec<u8>> {
        match fs::read(self.file_path(stored_name)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(BoardError::NotFound(format!("file {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a file from storage.
    ///
    /// Returns true if the file was deleted, false if it didn't exist.
    pub fn delete(&self, stored_name: &str) -> Result<bool> {
        match fs::remove_file(self.file_path(stored_name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a file exists in storage.
    pub fn exists(&self, stored_name: &str) -> bool {
        self.file_path(stored_name).exists()
    }

    /// Get the size of a stored file.
    pub fn file_size(&self, stored_name: &str) -> Result<u64> {
        match fs::metadata(self.file_path(stored_name)) {
            Ok(m) => Ok(m.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(BoardError::NotFound(format!("file {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Full path of a stored file.
    fn file_path(&self, stored_name: &str) -> PathBuf {
        self.base_path.join(stored_name)
    }

    /// Extract the file extension from a filename.
    ///
    /// Returns "bin" if no extension is found.
    fn extract_extension(filename: &str) -> &str {
        Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("bin")
    }

    /// Generate a new UUID-based stored name preserving the extension.
    pub fn generate_stored_name(original_name: &str) -> String {
        let uuid = Uuid::new_v4();
        let ext = Self::extract_extension(original_name);
        format!("{uuid}.{ext}")
    }
}
