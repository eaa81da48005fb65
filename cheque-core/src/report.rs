//! Analytics over the stored record set.
//!
//! Status is never persisted, so every stored row counts as `Processed` and
//! `failed_count` stays at zero for data read back from a store.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::{ChequeRow, ChequeStatus, Fetched};

/// Number of cheques drawn on one bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankCount {
    pub bank: String,
    pub count: usize,
}

impl BankCount {
    /// Percentage of `of` (the number of rows with a bank), 0.0 when `of` is 0.
    pub fn share(&self, of: usize) -> f64 {
        if of == 0 {
            return 0.0;
        }
        self.count as f64 * 100.0 / of as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub processed_count: usize,
    pub failed_count: usize,
    /// Descending by count, ties broken by bank name.
    pub bank_distribution: Vec<BankCount>,
}

impl ReportSummary {
    /// `(label, count)` pairs in display order.
    pub fn status_counts(&self) -> [(&'static str, usize); 2] {
        [
            (ChequeStatus::Processed.label(), self.processed_count),
            (ChequeStatus::Failed.label(), self.failed_count),
        ]
    }

    /// Rows that carried a bank name.
    pub fn banked_total(&self) -> usize {
        self.bank_distribution.iter().map(|b| b.count).sum()
    }

    #[cfg(test)]
    fn bank_count(&self, bank: &str) -> Option<usize> {
        self.bank_distribution
            .iter()
            .find(|b| b.bank == bank)
            .map(|b| b.count)
    }
}

pub fn summarize(fetched: &Fetched) -> ReportSummary {
    summarize_rows(fetched.rows())
}

pub fn summarize_rows(rows: &[ChequeRow]) -> ReportSummary {
    let mut processed_count = 0;
    let mut failed_count = 0;
    let mut by_bank: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        match row.effective_status() {
            ChequeStatus::Processed => processed_count += 1,
            ChequeStatus::Failed => failed_count += 1,
        }
        if let Some(bank) = row.bank_name() {
            *by_bank.entry(bank).or_default() += 1;
        }
    }

    let mut bank_distribution: Vec<BankCount> = by_bank
        .into_iter()
        .map(|(bank, count)| BankCount {
            bank: bank.to_string(),
            count,
        })
        .collect();
    bank_distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.bank.cmp(&b.bank)));

    ReportSummary {
        total: rows.len(),
        processed_count,
        failed_count,
        bank_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(bank: Option<&str>) -> ChequeRow {
        ChequeRow {
            bank: bank.map(str::to_string),
            ..ChequeRow::default()
        }
    }

    #[test]
    fn test_no_data_is_all_zero() {
        let s = summarize(&Fetched::NoData);
        assert_eq!(s, ReportSummary::default());
        assert_eq!(s.total, 0);
        assert_eq!(s.processed_count, 0);
        assert_eq!(s.failed_count, 0);
        assert!(s.bank_distribution.is_empty());
    }

    #[test]
    fn test_bank_distribution_excludes_null() {
        let rows = vec![row(Some("X")), row(Some("X")), row(Some("Y")), row(None)];
        let s = summarize_rows(&rows);
        assert_eq!(s.total, 4);
        assert_eq!(s.bank_distribution.len(), 2);
        assert_eq!(s.bank_count("X"), Some(2));
        assert_eq!(s.bank_count("Y"), Some(1));
        assert_eq!(s.banked_total(), 3);
    }

    #[test]
    fn test_bank_distribution_excludes_empty_string() {
        let s = summarize_rows(&[row(Some("")), row(Some("HDFC"))]);
        assert_eq!(s.total, 2);
        assert_eq!(s.bank_distribution, vec![BankCount { bank: "HDFC".into(), count: 1 }]);
    }

    #[test]
    fn test_bank_names_match_dashboard_values() {
        let s = summarize_rows(&[row(Some("SBI")), row(Some(" SBI")), row(Some("\t"))]);
        assert_eq!(s.total, 3);
        assert_eq!(s.bank_count("SBI"), Some(1));
        assert_eq!(s.bank_count(" SBI"), Some(1));
        assert_eq!(s.banked_total(), 2);
    }

    #[test]
    fn test_distribution_sorted_descending() {
        let rows = vec![
            row(Some("Canara")),
            row(Some("SBI")),
            row(Some("SBI")),
            row(Some("Axis")),
            row(Some("SBI")),
            row(Some("Axis")),
        ];
        let s = summarize_rows(&rows);
        let order: Vec<_> = s.bank_distribution.iter().map(|b| b.bank.as_str()).collect();
        assert_eq!(order, ["SBI", "Axis", "Canara"]);
    }

    #[test]
    fn test_status_counts() {
        let mut rows = vec![row(None), row(None), row(None)];
        rows[1].status = Some(ChequeStatus::Failed);
        let s = summarize_rows(&rows);
        assert_eq!(s.processed_count, 2);
        assert_eq!(s.failed_count, 1);
        assert_eq!(s.status_counts(), [("Processed", 2), ("Failed", 1)]);
    }

    #[test]
    fn test_stored_rows_are_all_processed() {
        let s = summarize_rows(&[row(Some("X")), row(None)]);
        assert_eq!(s.processed_count, 2);
        assert_eq!(s.failed_count, 0);
    }

    #[test]
    fn test_share() {
        let b = BankCount { bank: "X".into(), count: 1 };
        assert!((b.share(3) - 33.333).abs() < 0.01);
        assert_eq!(b.share(0), 0.0);
    }
}
