//! Summary rendering and CSV export of the per-period breakdown
//!
//! Presentation lives here: records keep full precision, and only this
//! module rounds to cents. Output filenames are validated before anything
//! touches the filesystem: bare names ending in `.csv` only, no embedded
//! path separators.

use std::io;

use crate::config::{CalendarScenario, Scenario};
use crate::error::Error;
use crate::projection::{PeriodRecord, Totals};

const CSV_HEADER: [&str; 8] = [
    "label",
    "period",
    "starting_balance",
    "contribution",
    "gross_interest",
    "net_interest",
    "tax_paid",
    "ending_balance",
];

/// Format a monetary amount with thousands separators, two decimals
fn format_money(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let int_grouped: String = grouped.chars().rev().collect();
    format!("{sign}{int_grouped}.{frac_part}")
}

fn render_table(items: &[(&str, String)]) -> String {
    let label_width = items.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let border = "=".repeat(label_width + 30);
    let title = "Compound Interest Summary";

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    out.push_str(&format!("{title:^width$}\n", width = label_width + 30));
    out.push_str(&border);
    out.push('\n');
    for (label, value) in items {
        out.push_str(&format!("{label:<label_width$} :    {value}\n"));
    }
    out.push_str(&border);
    out
}

/// Labelled summary table for a period-grid projection
pub fn render_summary(scenario: &Scenario, totals: &Totals) -> String {
    let items = [
        ("Initial Investment", format_money(scenario.initial_value())),
        (
            "Total Contributions",
            format_money(totals.total_contributions),
        ),
        (
            "Gross Interest Earned",
            format_money(totals.total_gross_interest),
        ),
        (
            "Net Interest Earned",
            format_money(totals.total_net_interest),
        ),
        ("Tax Paid", format_money(totals.total_tax)),
        ("Future Value", format_money(totals.future_value)),
    ];
    render_table(&items)
}

/// Labelled summary table for a calendar projection
pub fn render_calendar_summary(scenario: &CalendarScenario, totals: &Totals) -> String {
    let items = [
        ("Start Date", scenario.start_date().format("%d.%m.%Y").to_string()),
        ("End Date", scenario.end_date().format("%d.%m.%Y").to_string()),
        ("Initial Investment", format_money(scenario.initial_value())),
        (
            "Total Contributions",
            format_money(totals.total_contributions),
        ),
        (
            "Gross Interest Earned",
            format_money(totals.total_gross_interest),
        ),
        (
            "Net Interest Earned",
            format_money(totals.total_net_interest),
        ),
        ("Tax Paid", format_money(totals.total_tax)),
        ("Future Value", format_money(totals.future_value)),
    ];
    render_table(&items)
}

/// Boundary check for export filenames: bare name, `.csv` extension
fn validate_filename(filename: &str) -> Result<(), Error> {
    if filename.contains('/') || filename.contains('\\') {
        return Err(Error::invalid(format!(
            "output filename '{filename}' must not contain path separators"
        )));
    }
    let lower = filename.to_lowercase();
    if !lower.ends_with(".csv") || lower.len() == ".csv".len() {
        return Err(Error::invalid(format!(
            "output filename '{filename}' must end in .csv"
        )));
    }
    Ok(())
}

/// Stream the record table through a CSV writer
pub fn write_records<W: io::Write>(
    records: &[PeriodRecord],
    writer: &mut csv::Writer<W>,
) -> Result<(), Error> {
    writer.write_record(CSV_HEADER)?;
    for r in records {
        writer.write_record(&[
            r.moment.label(),
            r.moment.value(),
            format!("{:.2}", r.starting_balance),
            format!("{:.2}", r.contribution),
            format!("{:.2}", r.gross_interest),
            format!("{:.2}", r.net_interest),
            format!("{:.2}", r.tax_paid),
            format!("{:.2}", r.ending_balance),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Export the breakdown to a CSV file in the working directory
///
/// The filename is validated before the file is created; nothing is
/// written on rejection.
pub fn export_csv(records: &[PeriodRecord], filename: &str) -> Result<(), Error> {
    validate_filename(filename)?;
    let mut writer = csv::Writer::from_path(filename)?;
    write_records(records, &mut writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Moment;
    use crate::schedule::Timing;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(100.0), "100.00");
        assert_eq!(format_money(12_559.930871), "12,559.93");
        assert_eq!(format_money(1_234_567.891), "1,234,567.89");
        assert_eq!(format_money(999.999), "1,000.00");
        assert_eq!(format_money(-4_200.5), "-4,200.50");
    }

    #[test]
    fn test_filename_validation() {
        assert!(validate_filename("breakdown.csv").is_ok());
        assert!(validate_filename("Breakdown.CSV").is_ok());

        for bad in [
            "out/breakdown.csv",
            "..\\breakdown.csv",
            "breakdown.xlsx",
            "breakdown",
            ".csv",
        ] {
            assert!(
                matches!(validate_filename(bad), Err(Error::InvalidArgument(_))),
                "expected rejection for {bad}"
            );
        }
    }

    #[test]
    fn test_export_rejects_before_writing() {
        let err = export_csv(&[], "nested/out.csv").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_csv_layout() {
        let records = vec![PeriodRecord {
            moment: Moment::Period {
                index: 1,
                label: "Year",
            },
            starting_balance: 10_000.0,
            contribution: 100.0,
            contribution_timing: Timing::End,
            gross_interest: 500.0,
            tax_paid: 125.0,
            net_interest: 375.0,
            ending_balance: 10_475.0,
        }];
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_records(&records, &mut writer).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "label,period,starting_balance,contribution,gross_interest,net_interest,tax_paid,ending_balance"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Year,1,10000.00,100.00,500.00,375.00,125.00,10475.00"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_summary_contains_totals() {
        let scenario = Scenario::builder(
            10_000.0,
            0.05,
            5.0,
            crate::schedule::Frequency::Annually,
        )
        .contribution(100.0)
        .tax_rate(0.25)
        .build()
        .unwrap();
        let totals = Totals {
            total_contributions: 500.0,
            total_gross_interest: 2_746.574495,
            total_tax: 686.643624,
            total_net_interest: 2_059.930871,
            future_value: 12_559.930871,
        };
        let rendered = render_summary(&scenario, &totals);
        assert!(rendered.contains("Compound Interest Summary"));
        assert!(rendered.contains("Initial Investment"));
        assert!(rendered.contains("10,000.00"));
        assert!(rendered.contains("Future Value"));
        assert!(rendered.contains("12,559.93"));
    }
}
