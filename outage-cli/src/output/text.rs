//! Text output: the site outage table.

use chrono::{DateTime, TimeDelta, Utc};
use outage_core::{Anomalies, Clock, CoreError, SiteOutage, detect_anomalies};

/// Column headers, left to right.
const HEADERS: [&str; 5] = ["Device Name", "Begin", "End", "Duration", "Warnings"];

/// Display format for begin/end columns.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Heading line of a non-empty warnings cell.
const WARNING_HEADING: &str = "WARNING:";

/// One rendered table row, each cell already split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: [Vec<String>; 5],
}

impl Row {
    fn name(&self) -> &str {
        self.cells[0].first().map_or("", String::as_str)
    }

    fn height(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(1).max(1)
    }
}

/// Renders site outages as an aligned ASCII table.
pub struct TextFormatter<'a> {
    clock: &'a dyn Clock,
}

impl<'a> TextFormatter<'a> {
    /// Creates a formatter that judges future dates against `clock`.
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    /// Formats the report table.
    ///
    /// Rows are sorted by device name; ties keep input order. Any malformed
    /// timestamp fails the whole render.
    pub fn format_report(&self, outages: &[SiteOutage]) -> Result<String, CoreError> {
        let mut rows = outages
            .iter()
            .map(|outage| self.row(outage))
            .collect::<Result<Vec<_>, _>>()?;
        rows.sort_by(|a, b| a.name().cmp(b.name()));

        Ok(draw_table(&rows))
    }

    /// Builds the row for one outage.
    pub fn row(&self, outage: &SiteOutage) -> Result<Row, CoreError> {
        let begin = outage.begin_at()?;
        let end = outage.end_at()?;
        let anomalies = detect_anomalies(begin, end, self.clock);

        Ok(Row {
            cells: [
                vec![outage.name.clone()],
                vec![format_instant(begin)],
                vec![format_instant(end)],
                vec![format_duration(end - begin)],
                warning_lines(&anomalies),
            ],
        })
    }
}

/// `YYYY-MM-DD HH:MM:SS`, sub-second part dropped.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format(DATE_FORMAT).to_string()
}

/// `H:MM:SS`, prefixed with `N day(s), ` when the day count is non-zero.
///
/// Days are floored, so the clock part is never negative: an outage that
/// ends 59m59.5s before it begins renders as `-1 day, 23:00:00`. The
/// sub-second part is dropped.
pub fn format_duration(duration: TimeDelta) -> String {
    let mut total = duration.num_seconds();
    if duration < TimeDelta::seconds(total) {
        total -= 1;
    }

    let days = total.div_euclid(86_400);
    let rem = total.rem_euclid(86_400);
    let hours = rem / 3_600;
    let minutes = (rem % 3_600) / 60;
    let seconds = rem % 60;

    let clock = format!("{hours}:{minutes:02}:{seconds:02}");
    match days {
        0 => clock,
        1 | -1 => format!("{days} day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}

/// Lines of the warnings cell; empty when there is nothing to report.
pub fn warning_lines(anomalies: &Anomalies) -> Vec<String> {
    if anomalies.is_empty() {
        return Vec::new();
    }
    std::iter::once(WARNING_HEADING.to_string())
        .chain(anomalies.iter().map(|a| a.message().to_string()))
        .collect()
}

// ============================================================================
// Table Drawing
// ============================================================================

fn draw_table(rows: &[Row]) -> String {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            for line in cell {
                *width = (*width).max(line.chars().count());
            }
        }
    }

    let rule = rule(&widths);
    let mut out = Vec::with_capacity(rows.len() + 4);

    out.push(rule.clone());
    out.push(line(&widths, |col| HEADERS[col]));
    out.push(rule.clone());
    for row in rows {
        for i in 0..row.height() {
            out.push(line(&widths, |col| {
                row.cells[col].get(i).map_or("", String::as_str)
            }));
        }
    }
    out.push(rule);

    out.join("\n")
}

fn rule(widths: &[usize; 5]) -> String {
    let mut s = String::from("+");
    for width in widths {
        s.push_str(&"-".repeat(width + 2));
        s.push('+');
    }
    s
}

fn line<'c>(widths: &[usize; 5], cell: impl Fn(usize) -> &'c str) -> String {
    let mut s = String::from("|");
    for (col, width) in widths.iter().enumerate() {
        let text = cell(col);
        let pad = width - text.chars().count();
        s.push(' ');
        s.push_str(text);
        s.push_str(&" ".repeat(pad + 1));
        s.push('|');
    }
    s
}
