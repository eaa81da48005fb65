//! cheque-store: SQLite persistence for cheque records and CSV/JSON export

pub mod export;
pub mod store;

pub use export::{to_csv, to_json, ExportError, ExportFormat};
pub use store::{ChequeStore, StorageError};
