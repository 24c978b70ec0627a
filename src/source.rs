//! File sources: where import bytes come from.
//!
//! The core never touches the filesystem itself. Hosts hand it a
//! [`SourceFile`]; [`FsSource`] is the trivial local-disk implementation.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::import::PresentationFormat;

/// A file chosen by the user, with its bytes already read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Where the file came from.
    pub path: PathBuf,
    /// Display name (last path component).
    pub name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Trait for byte acquisition.
pub trait FileSource {
    /// Read the file at `path`.
    fn load(&self, path: &Path) -> Result<SourceFile>;
}

/// Reads files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl FileSource for FsSource {
    fn load(&self, path: &Path) -> Result<SourceFile> {
        let bytes = fs_err::read(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        Ok(SourceFile { path: path.to_path_buf(), name: file_name(path), bytes })
    }
}

/// Last path component as a string, or the whole path if it has none.
pub fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Check whether a file name carries a recognized presentation extension.
pub fn is_presentation_file(name: &str) -> bool {
    PresentationFormat::from_file_name(name).is_some()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::io::Write;

    #[test]
    fn fs_source_reads_bytes_and_name() {
        let mut file = tempfile::Builder::new().suffix(".pptx").tempfile().unwrap();
        file.write_all(b"PK").unwrap();

        let source = FsSource.load(file.path()).unwrap();
        assert_eq!(source.bytes, b"PK");
        assert!(source.name.ends_with(".pptx"));
        assert!(is_presentation_file(&source.name));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = FsSource.load(Path::new("/definitely/not/here.pptx")).unwrap_err();
        assert!(matches!(err, Error::Io { path: Some(_), .. }));
    }

    #[test]
    fn presentation_file_check() {
        assert!(is_presentation_file("a.PPT"));
        assert!(!is_presentation_file("a.docx"));
    }
}
