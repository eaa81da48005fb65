//! Dashboard projection: numbered rows with free-text search.

use serde::Serialize;

use crate::record::ChequeRow;

/// One dashboard line. Serial numbers are assigned before filtering, so a
/// search keeps each row's original number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardRow {
    #[serde(rename = "Serial Number")]
    pub serial_number: usize,
    pub date: String,
    pub cheque_number: Option<i64>,
    pub payee: String,
    pub amount: String,
    pub bank: Option<String>,
}

impl DashboardRow {
    pub const HEADERS: [&'static str; 6] =
        ["Serial Number", "date", "cheque_number", "payee", "amount", "bank"];

    /// Cell text in `HEADERS` order; null columns render empty.
    pub fn cells(&self) -> [String; 6] {
        [
            self.serial_number.to_string(),
            self.date.clone(),
            self.cheque_number.map(|n| n.to_string()).unwrap_or_default(),
            self.payee.clone(),
            self.amount.clone(),
            self.bank.clone().unwrap_or_default(),
        ]
    }

    fn matches(&self, needle: &str) -> bool {
        self.cells()
            .iter()
            .any(|cell| cell.to_lowercase().contains(needle))
    }
}

pub fn dashboard_rows(rows: &[ChequeRow]) -> Vec<DashboardRow> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| DashboardRow {
            serial_number: i + 1,
            date: r.date.clone(),
            cheque_number: r.cheque_number,
            payee: r.payee.clone(),
            amount: r.amount.clone(),
            bank: r.bank.clone(),
        })
        .collect()
}

/// Case-insensitive substring search across every column.
pub fn filter_rows(rows: Vec<DashboardRow>, query: &str) -> Vec<DashboardRow> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter().filter(|r| r.matches(&needle)).collect()
}
