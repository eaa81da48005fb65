//! Cheque record types shared by extraction, storage and reporting.

use serde::{Deserialize, Serialize};

/// A cheque as extracted from one uploaded image or PDF.
///
/// Text fields use the empty string for "not extracted". `cheque_number` and
/// `signature_verified` use `None` instead; reporting relies on both conventions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeRecord {
    pub payee: String,
    /// Literal as extracted (no currency parsing).
    pub amount: String,
    pub bank: String,
    pub micr_code: String,
    pub branch: String,
    pub ifsc_code: String,
    pub account_number: String,
    pub cheque_number: Option<i64>,
    /// Free-form, in whatever format the model produced.
    pub date: String,
    /// Tri-state: verified / not verified / unknown.
    pub signature_verified: Option<bool>,
}

impl ChequeRecord {
    /// True when the model produced none of the recognized fields.
    pub fn is_blank(&self) -> bool {
        self.payee.is_empty()
            && self.amount.is_empty()
            && self.bank.is_empty()
            && self.micr_code.is_empty()
            && self.branch.is_empty()
            && self.ifsc_code.is_empty()
            && self.account_number.is_empty()
            && self.date.is_empty()
            && self.cheque_number.is_none()
            && self.signature_verified.is_none()
    }
}

/// Processing outcome shown in analytics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChequeStatus {
    #[default]
    Processed,
    Failed,
}

impl ChequeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ChequeStatus::Processed => "Processed",
            ChequeStatus::Failed => "Failed",
        }
    }
}

/// Narrowed read-side projection of a stored cheque.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeRow {
    pub date: String,
    pub cheque_number: Option<i64>,
    pub account_number: String,
    pub payee: String,
    pub amount: String,
    /// `None` when the column is NULL in storage.
    pub bank: Option<String>,
    /// Never stored; absent means `Processed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ChequeStatus>,
}

impl ChequeRow {
    pub fn effective_status(&self) -> ChequeStatus {
        self.status.unwrap_or_default()
    }

    /// Bank name exactly as stored, unless it is missing or whitespace-only.
    pub fn bank_name(&self) -> Option<&str> {
        self.bank.as_deref().filter(|b| !b.trim().is_empty())
    }
}

/// Result of reading the whole record set.
///
/// `NoData` is distinct from an empty-but-present result: stores return it
/// whenever the table holds zero rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    NoData,
    Rows(Vec<ChequeRow>),
}

impl Fetched {
    pub fn from_rows(rows: Vec<ChequeRow>) -> Self {
        if rows.is_empty() {
            Fetched::NoData
        } else {
            Fetched::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[ChequeRow] {
        match self {
            Fetched::NoData => &[],
            Fetched::Rows(rows) => rows,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Fetched::NoData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_blank() {
        let r = ChequeRecord::default();
        assert!(r.is_blank());
        assert_eq!(r.cheque_number, None);
        assert_eq!(r.signature_verified, None);
    }

    #[test]
    fn test_row_status_defaults_to_processed() {
        let row = ChequeRow::default();
        assert_eq!(row.effective_status(), ChequeStatus::Processed);

        let failed = ChequeRow {
            status: Some(ChequeStatus::Failed),
            ..ChequeRow::default()
        };
        assert_eq!(failed.effective_status(), ChequeStatus::Failed);
    }

    #[test]
    fn test_bank_name_skips_blank() {
        let mut row = ChequeRow::default();
        assert_eq!(row.bank_name(), None);
        row.bank = Some("   ".to_string());
        assert_eq!(row.bank_name(), None);
        row.bank = Some("HDFC Bank".to_string());
        assert_eq!(row.bank_name(), Some("HDFC Bank"));
        row.bank = Some(" SBI".to_string());
        assert_eq!(row.bank_name(), Some(" SBI"));
    }

    #[test]
    fn test_fetched_from_empty_rows_is_no_data() {
        assert!(Fetched::from_rows(Vec::new()).is_no_data());
        let f = Fetched::from_rows(vec![ChequeRow::default()]);
        assert!(!f.is_no_data());
        assert_eq!(f.rows().len(), 1);
    }
}
