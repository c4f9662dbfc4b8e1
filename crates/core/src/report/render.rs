//! Text and HTML exports.

use std::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};
use tipjar_shared::types::{format_cash, format_dollars};

use super::types::{ReportRow, report_rows};
use crate::allocation::AllocationOutcome;

const HTML_STYLE: &str = r"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; margin: 20px; color: #333; }
        h1 { color: #00704A; text-align: center; }
        .info { margin: 10px 0; background-color: #f8f9fa; padding: 10px; border-radius: 8px; }
        table { width: 100%; border-collapse: collapse; margin-top: 20px; }
        th, td { border: 1px solid #ddd; padding: 12px 8px; text-align: left; }
        th { background-color: #00704A; color: white; }
        tr:nth-child(even) { background-color: #f2f2f2; }
        .calculation { color: #666; font-size: 0.9em; }
        .cash-amount { font-weight: bold; color: #00704A; }
        @media (max-width: 600px) { th, td { padding: 8px 4px; font-size: 14px; } }
";

/// How the hourly rate was derived, e.g. `$100.00 ÷ 61.25 = $1.63 per hour`.
#[must_use]
pub fn rate_summary(outcome: &AllocationOutcome) -> String {
    format!(
        "{} ÷ {} = {} per hour",
        format_dollars(outcome.total_tip_amount),
        two_places(outcome.total_hours),
        format_dollars(outcome.hourly_rate)
    )
}

/// Plain-text export, one line per worker.
#[must_use]
pub fn render_text(outcome: &AllocationOutcome) -> String {
    let mut out = format!("Hourly rate: {}\n", rate_summary(outcome));
    for (row, allocation) in report_rows(outcome).iter().zip(&outcome.allocations) {
        let _ = writeln!(
            out,
            "Name: {} | #: {} | Hours: {} | Exact: {} | Cash: {} | Bills: {}",
            row.name,
            row.number,
            row.hours,
            format_dollars(allocation.exact_amount),
            row.cash,
            row.bills
        );
    }
    let _ = writeln!(
        out,
        "Total cash: {} | Rounding drift: {}",
        format_cash(outcome.total_cash()),
        format_dollars(outcome.rounding_drift())
    );
    out
}

/// Standalone HTML document with the distribution table.
#[must_use]
pub fn render_html(outcome: &AllocationOutcome) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>TipJar Results</title>
    <style>{HTML_STYLE}    </style>
</head>
<body>
    <h1>Tip Distribution Results</h1>
    <div class="info">
        <p><strong>Hourly Rate Calculation:</strong> {}</p>
    </div>
    <table>
        <thead>
            <tr>
                <th>#</th>
                <th>Name</th>
                <th>Hours</th>
                <th>Calculation</th>
                <th>Cash</th>
                <th>Bills</th>
            </tr>
        </thead>
        <tbody>
"#,
        escape_html(&rate_summary(outcome))
    );

    for row in report_rows(outcome) {
        push_row(&mut html, &row);
    }

    html.push_str(
        "        </tbody>
    </table>
</body>
</html>
",
    );
    html
}

fn push_row(html: &mut String, row: &ReportRow) {
    let _ = write!(
        html,
        r#"            <tr>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td class="calculation">{}</td>
                <td class="cash-amount">{}</td>
                <td>{}</td>
            </tr>
"#,
        row.number,
        escape_html(&row.name),
        escape_html(&row.hours),
        escape_html(&row.calculation),
        escape_html(&row.cash),
        escape_html(&row.bills)
    );
}

fn two_places(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
