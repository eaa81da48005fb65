//! Read a cheque file from disk and check it is something we can send.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::types::{DocumentKind, Upload};

pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "pdf"];

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file type for {path} (expected one of: jpg, jpeg, png, pdf)")]
    UnsupportedType { path: String },

    #[error("{path} is empty")]
    Empty { path: String },
}

pub fn load_upload(path: impl AsRef<Path>) -> Result<Upload, IngestError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let kind = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(DocumentKind::from_extension)
        .ok_or_else(|| IngestError::UnsupportedType {
            path: display.clone(),
        })?;

    let bytes = fs::read(path).map_err(|source| IngestError::Io {
        path: display.clone(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(IngestError::Empty { path: display });
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(display);

    debug!(file = %file_name, size = bytes.len(), mime = kind.mime_type(), "loaded upload");
    Ok(Upload {
        file_name,
        kind,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(DocumentKind::from_extension("JPG"), Some(DocumentKind::Jpeg));
        assert_eq!(DocumentKind::from_extension("jpeg"), Some(DocumentKind::Jpeg));
        assert_eq!(DocumentKind::from_extension("png").unwrap().mime_type(), "image/png");
        assert_eq!(DocumentKind::from_extension("pdf").unwrap().mime_type(), "application/pdf");
        assert_eq!(DocumentKind::from_extension("gif"), None);
        for ext in ACCEPTED_EXTENSIONS {
            assert!(DocumentKind::from_extension(ext).is_some());
        }
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("cheque.PNG");
        fs::write(&p, b"\x89PNG\r\n\x1a\n").unwrap();

        let up = load_upload(&p).unwrap();
        assert_eq!(up.file_name, "cheque.PNG");
        assert_eq!(up.mime_type(), "image/png");
        assert_eq!(up.bytes.len(), 8);
    }

    #[test]
    fn test_rejects_unsupported_and_empty() {
        let dir = tempfile::tempdir().unwrap();

        let txt = dir.path().join("notes.txt");
        fs::write(&txt, b"hello").unwrap();
        assert!(matches!(load_upload(&txt), Err(IngestError::UnsupportedType { .. })));

        let empty = dir.path().join("blank.pdf");
        fs::write(&empty, b"").unwrap();
        assert!(matches!(load_upload(&empty), Err(IngestError::Empty { .. })));

        let missing = dir.path().join("missing.jpg");
        assert!(matches!(load_upload(&missing), Err(IngestError::Io { .. })));
    }
}
