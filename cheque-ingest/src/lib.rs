//! cheque-ingest: cheque upload intake (images and PDFs).

pub mod types;
pub mod upload;

pub use types::{DocumentKind, Upload};
pub use upload::{load_upload, IngestError, ACCEPTED_EXTENSIONS};
