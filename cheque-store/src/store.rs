//! SQLite-backed persistence for extracted cheques.
//!
//! Every operation opens its own connection and drops it before returning,
//! whatever the outcome. Nothing is pooled or shared between calls.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use cheque_core::{ChequeRecord, ChequeRow, Fetched};
use rusqlite::{params, Connection};
use thiserror::Error;
use tracing::{debug, error, info, warn};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS cheque_details (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        payee TEXT NOT NULL DEFAULT '',
        amount TEXT NOT NULL DEFAULT '',
        bank TEXT,
        micr_code TEXT NOT NULL DEFAULT '',
        branch TEXT NOT NULL DEFAULT '',
        ifsc_code TEXT NOT NULL DEFAULT '',
        account_number TEXT NOT NULL DEFAULT '',
        cheque_number INTEGER,
        date TEXT NOT NULL DEFAULT '',
        signature_verification INTEGER,
        created_at TEXT NOT NULL
    );
";

const INSERT: &str = "
    INSERT INTO cheque_details
        (payee, amount, bank, micr_code, branch, ifsc_code, account_number,
         cheque_number, date, signature_verification, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
";

const SELECT_PROJECTION: &str = "
    SELECT date, cheque_number, account_number, payee, amount, bank
    FROM cheque_details
    ORDER BY id ASC
";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database connection failed: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("writing cheque details failed: {0}")]
    Write(#[source] rusqlite::Error),

    #[error("reading cheque details failed: {0}")]
    Read(#[source] rusqlite::Error),

    #[error("creating database directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Handle to the cheque database file. Holds only the path.
#[derive(Debug, Clone)]
pub struct ChequeStore {
    path: PathBuf,
}

impl ChequeStore {
    /// Point at `path`, creating the file and table when missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StorageError::Directory {
                path: dir.display().to_string(),
                source,
            })?;
        }

        let store = Self { path };
        let conn = store.connect()?;
        conn.execute_batch(SCHEMA).map_err(StorageError::Write)?;
        info!(path = %store.path.display(), "cheque database ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        let conn = Connection::open(&self.path).map_err(StorageError::Connection)?;
        debug!(path = %self.path.display(), "database connected");
        Ok(conn)
    }

    /// Insert all ten columns in one transaction. Returns the new row id.
    pub fn insert(&self, record: &ChequeRecord) -> Result<i64, StorageError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction().map_err(StorageError::Write)?;
        tx.execute(
            INSERT,
            params![
                record.payee,
                record.amount,
                record.bank,
                record.micr_code,
                record.branch,
                record.ifsc_code,
                record.account_number,
                record.cheque_number,
                record.date,
                record.signature_verified,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(StorageError::Write)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(StorageError::Write)?;
        Ok(id)
    }

    /// Insert and report whether the row was committed.
    pub fn save(&self, record: &ChequeRecord) -> bool {
        match self.insert(record) {
            Ok(id) => {
                info!(id, "cheque details inserted");
                true
            }
            Err(e) => {
                error!(error = %e, "inserting cheque details failed");
                false
            }
        }
    }

    /// Narrowed projection of every stored cheque, oldest first.
    pub fn fetch_all(&self) -> Result<Fetched, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(SELECT_PROJECTION).map_err(StorageError::Read)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ChequeRow {
                    date: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    cheque_number: row.get(1)?,
                    account_number: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    payee: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    amount: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    bank: row.get(5)?,
                    status: None,
                })
            })
            .map_err(StorageError::Read)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StorageError::Read)?;

        if rows.is_empty() {
            info!("no cheque details found");
        }
        Ok(Fetched::from_rows(rows))
    }

    /// Reporting-path read: storage failures show up as "no data".
    pub fn fetch_or_no_data(&self) -> Fetched {
        self.fetch_all().unwrap_or_else(|e| {
            warn!(error = %e, "database fetch failed; reporting no data");
            Fetched::NoData
        })
    }
}
