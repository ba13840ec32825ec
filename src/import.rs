//! File Import Pipeline
//!
//! Reads dropped/picked text files, normalizes their content through the
//! formatter, and turns them into chapter rows. Each file is identified by
//! its blake3 content hash so re-importing the same document is a no-op.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::domain::Chapter;
use crate::format::{format_input_text, FormatOptions};

/// A file read and normalized, ready to become a chapter
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedFile {
    pub path: String,
    pub title: String,
    pub body: String,
    /// blake3 hex digest of the raw file content
    pub hash: String,
}

/// Compute the blake3 content hash of a file, reading in chunks so large
/// documents never sit in memory whole.
pub fn content_hash(path: &Path) -> Result<String, String> {
    let mut file = fs::File::open(path).map_err(|e| e.to_string())?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0; 65536];

    loop {
        match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(hasher.finalize().to_hex().to_string())
}

/// Read one text file and normalize it for import.
///
/// The title is the file stem; the body goes through the formatter with
/// the caller's line-break options.
pub fn read_import_file(path: &Path, options: &FormatOptions) -> Result<ImportedFile, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string());

    Ok(ImportedFile {
        path: path.to_string_lossy().into_owned(),
        title,
        body: format_input_text(&raw, options),
        hash: content_hash(path)?,
    })
}

impl ImportedFile {
    /// Turn the imported file into a chapter row (ID assigned on insert)
    pub fn into_chapter(self, jump_id: Option<u32>) -> Chapter {
        let mut chapter = Chapter::new(0, self.title, self.body);
        chapter.jump_id = jump_id;
        chapter.source_hash = Some(self.hash);
        chapter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_import_file_normalizes_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Chapter One.txt");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "First line\r\n Second line\r\n\r\nThird   line").unwrap();

        let imported = read_import_file(&path, &FormatOptions::default()).unwrap();
        assert_eq!(imported.title, "Chapter One");
        assert_eq!(imported.body, "First line Second line\n\nThird line");
        assert_eq!(imported.hash.len(), 64);
    }

    #[test]
    fn test_content_hash_is_stable_and_content_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "same content").unwrap();
        fs::write(&b, "same content").unwrap();

        assert_eq!(content_hash(&a).unwrap(), content_hash(&b).unwrap());

        fs::write(&b, "different").unwrap();
        assert_ne!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
    }

    #[test]
    fn test_into_chapter_carries_hash_and_jump() {
        let imported = ImportedFile {
            path: "/tmp/x.txt".to_string(),
            title: "X".to_string(),
            body: "body".to_string(),
            hash: "abc".to_string(),
        };
        let chapter = imported.into_chapter(Some(7));
        assert_eq!(chapter.jump_id, Some(7));
        assert_eq!(chapter.source_hash.as_deref(), Some("abc"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = read_import_file(Path::new("/nonexistent/nope.txt"), &FormatOptions::default());
        assert!(result.is_err());
    }
}
