//! Installation summary table

use console::{Style, measure_text_width};

use crate::installer::{InstallationRecord, Summary};

const HEADER_PACKAGE: &str = "Package";
const HEADER_METHOD: &str = "Method";
const HEADER_STATUS: &str = "Status";

/// Notice printed instead of a table when nothing was tracked
pub const EMPTY_NOTICE: &str = "No packages tracked.";

/// Print the summary to stdout, coloured when the terminal supports it
pub fn print(summary: &Summary) {
    println!("{}", render(summary, console::colors_enabled()));
}

/// Render the summary as a fixed-width table
pub fn render(summary: &Summary, colored: bool) -> String {
    let style = |s: Style| s.force_styling(colored);

    if summary.is_empty() {
        return format!("\n{}", style(Style::new().yellow()).apply_to(EMPTY_NOTICE));
    }

    let records = summary.records();
    let widths = [
        column_width(HEADER_PACKAGE, records, |r| r.package.as_str()),
        column_width(HEADER_METHOD, records, |r| r.method.as_str()),
        column_width(HEADER_STATUS, records, |r| r.status.label()),
    ];
    let separator = format!(
        "+-{}-+-{}-+-{}-+",
        "-".repeat(widths[0]),
        "-".repeat(widths[1]),
        "-".repeat(widths[2])
    );

    let mut lines = vec![
        String::new(),
        style(Style::new().blue())
            .apply_to("--- Installation summary ---")
            .to_string(),
        separator.clone(),
        format!(
            "| {} | {} | {} |",
            pad(HEADER_PACKAGE, widths[0]),
            pad(HEADER_METHOD, widths[1]),
            pad(HEADER_STATUS, widths[2])
        ),
        separator.clone(),
    ];

    for record in records {
        let status_style = if record.status.is_success() {
            Style::new().green()
        } else {
            Style::new().red()
        };
        lines.push(format!(
            "| {} | {} | {} |",
            pad(&record.package, widths[0]),
            pad(&record.method, widths[1]),
            style(status_style).apply_to(pad(record.status.label(), widths[2]))
        ));
    }

    lines.push(separator);
    lines.push(format!(
        "{} succeeded, {} failed",
        summary.succeeded(),
        summary.failed()
    ));
    if summary.has_failures() {
        lines.push(
            style(Style::new().yellow())
                .apply_to("Check the output above for details on failed installations.")
                .to_string(),
        );
    }

    lines.join("\n")
}

fn column_width<F>(header: &str, records: &[InstallationRecord], value: F) -> usize
where
    F: Fn(&InstallationRecord) -> &str,
{
    records
        .iter()
        .map(|r| measure_text_width(value(r)))
        .chain(std::iter::once(measure_text_width(header)))
        .max()
        .unwrap_or(0)
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(measure_text_width(text));
    format!("{text}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::{InstallStatus, METHOD_UNKNOWN};

    #[test]
    fn test_empty_summary_prints_notice() {
        let rendered = render(&Summary::new(), false);
        assert!(rendered.contains(EMPTY_NOTICE));
        assert!(!rendered.contains('+'));
    }

    #[test]
    fn test_table_layout() {
        let mut summary = Summary::new();
        summary.record("git", "native", InstallStatus::Success);
        summary.record(
            "org.mozilla.firefox",
            "sandbox",
            InstallStatus::FailedMaxRetries,
        );

        let rendered = render(&summary, false);
        let lines: Vec<&str> = rendered.lines().collect();
        let table: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|l| l.starts_with('+') || l.starts_with('|'))
            .collect();

        assert_eq!(
            table,
            vec![
                "+---------------------+---------+----------------------+",
                "| Package             | Method  | Status               |",
                "+---------------------+---------+----------------------+",
                "| git                 | native  | Success              |",
                "| org.mozilla.firefox | sandbox | Failed (max retries) |",
                "+---------------------+---------+----------------------+",
            ]
        );
        assert!(rendered.contains("1 succeeded, 1 failed"));
    }

    #[test]
    fn test_headers_set_minimum_width() {
        let mut summary = Summary::new();
        summary.record("a", "b", InstallStatus::Success);

        let rendered = render(&summary, false);
        assert!(rendered.contains("| Package | Method | Status  |"));
        assert!(rendered.contains("| a       | b      | Success |"));
        assert!(!rendered.contains("Check the output above"));
    }

    #[test]
    fn test_all_rows_have_equal_width() {
        let mut summary = Summary::new();
        summary.record("<invalid entry>", METHOD_UNKNOWN, InstallStatus::FailedInvalidEntry);
        summary.record("vim", "native", InstallStatus::FailedToolMissing);
        summary.record("htop", METHOD_UNKNOWN, InstallStatus::FailedUnknownMethod);

        let rendered = render(&summary, false);
        let widths: Vec<usize> = rendered
            .lines()
            .filter(|l| l.starts_with('+') || l.starts_with('|'))
            .map(measure_text_width)
            .collect();
        assert_eq!(widths.len(), 7);
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_colored_rows_keep_alignment() {
        let mut summary = Summary::new();
        summary.record("git", "native", InstallStatus::Success);
        summary.record("vlc", "native", InstallStatus::FailedMaxRetries);

        let rendered = render(&summary, true);
        assert!(rendered.contains("\u{1b}["));
        let widths: Vec<usize> = rendered
            .lines()
            .filter(|l| l.starts_with('+') || l.starts_with('|'))
            .map(measure_text_width)
            .collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }
}
