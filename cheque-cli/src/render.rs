//! Plain-text output for the dashboard and analytics commands.

use cheque_core::{DashboardRow, ReportSummary};

pub const NO_DATA: &str = "No cheque data available.";

const BAR_WIDTH: usize = 40;

pub fn dashboard_table(rows: &[DashboardRow]) -> String {
    let cells: Vec<[String; 6]> = rows.iter().map(DashboardRow::cells).collect();

    let mut widths = DashboardRow::HEADERS.map(str::len);
    for row in &cells {
        for (w, c) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(c.chars().count());
        }
    }

    let line = |row: &[String]| -> String {
        row.iter()
            .zip(widths.iter())
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = DashboardRow::HEADERS.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(&line(&header[..]));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &cells {
        out.push_str(&line(&row[..]));
        out.push('\n');
    }
    out
}

pub fn analytics(summary: &ReportSummary) -> String {
    let mut s = String::new();
    s.push_str("# Cheque Processing Analytics\n\n");
    s.push_str(&format!("Total cheques uploaded : {}\n", summary.total));
    s.push_str(&format!("Failed cheques         : {}\n", summary.failed_count));
    s.push_str(&format!("Processed cheques      : {}\n", summary.processed_count));

    s.push_str("\n## Status\n\n");
    let peak = summary.status_counts().iter().map(|(_, n)| *n).max().unwrap_or(0);
    for (label, n) in summary.status_counts() {
        s.push_str(&format!("{label:<10} {} {n}\n", bar(n, peak)));
    }

    s.push_str("\n## Bank-wise cheque distribution\n\n");
    if summary.bank_distribution.is_empty() {
        s.push_str("(no bank names extracted)\n");
        return s;
    }
    let banked = summary.banked_total();
    let name_width = summary
        .bank_distribution
        .iter()
        .map(|b| b.bank.chars().count())
        .max()
        .unwrap_or(0);
    for b in &summary.bank_distribution {
        s.push_str(&format!(
            "{:<name_width$}  {:>4}  {:>5.1}%\n",
            b.bank,
            b.count,
            b.share(banked)
        ));
    }
    s
}

fn bar(n: usize, peak: usize) -> String {
    if peak == 0 {
        return String::new();
    }
    "#".repeat((n * BAR_WIDTH).div_ceil(peak))
}
