//! Parser for tab-delimited daily sales exports.
//!
//! The export is inconsistently quoted: whole lines may be wrapped in quotes and
//! individual fields in doubled quotes (`""15""`). The parser degrades
//! gracefully. Unparseable numbers become 0 and lines with fewer than
//! [`MIN_FIELDS`] fields are skipped, never reported as errors. Skipped lines
//! are still recorded in the [`ImportReport`] so callers can audit them.

use crate::domain::daily_record::{DailyRecord, sort_records};
use tracing::{debug, info};

/// date, orders, net value, shipping cost, total value.
pub const MIN_FIELDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooFewFields { found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the input text (the header is line 1).
    pub line: usize,
    pub reason: SkipReason,
}

/// Outcome of parsing a single data line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Parsed(DailyRecord),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Records in input order.
    pub records: Vec<DailyRecord>,
    pub skipped: Vec<SkippedLine>,
}

impl ImportReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Consume the report, returning records in chronological order.
    pub fn into_sorted(self) -> Vec<DailyRecord> {
        let mut records = self.records;
        sort_records(&mut records);
        records
    }
}

/// Parse an export into records, dropping malformed lines. Order follows the input.
pub fn parse(text: &str) -> Vec<DailyRecord> {
    parse_lines(text).records
}

/// Parse an export, keeping track of every skipped line.
pub fn parse_lines(text: &str) -> ImportReport {
    let lines: Vec<&str> = text.trim().split('\n').collect();
    let mut report = ImportReport::default();

    if lines.len() < 2 {
        return report;
    }

    for (idx, line) in lines.iter().enumerate().skip(1) {
        match parse_line(line) {
            LineOutcome::Parsed(record) => report.records.push(record),
            LineOutcome::Skipped(reason) => {
                debug!(line = idx + 1, ?reason, "skipping export line");
                report.skipped.push(SkippedLine {
                    line: idx + 1,
                    reason,
                });
            }
        }
    }

    info!(
        records = report.records.len(),
        skipped = report.skipped.len(),
        "parsed export"
    );
    report
}

/// Parse one data line (no header handling).
pub fn parse_line(line: &str) -> LineOutcome {
    let fields = split_fields(strip_line_quotes(line.trim()));

    if fields.len() < MIN_FIELDS {
        return LineOutcome::Skipped(SkipReason::TooFewFields {
            found: fields.len(),
        });
    }

    LineOutcome::Parsed(DailyRecord {
        date: fields[0].trim().to_string(),
        orders: parse_count(&fields[1]),
        net_value: parse_amount(&fields[2]),
        shipping_cost: parse_amount(&fields[3]),
        total_value: parse_amount(&fields[4]),
    })
}

fn strip_line_quotes(line: &str) -> &str {
    if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
        &line[1..line.len() - 1]
    } else {
        line
    }
}

fn split_fields(line: &str) -> Vec<String> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match rdr.records().next() {
        Some(Ok(record)) => record.iter().map(clean_field).collect(),
        _ => Vec::new(),
    }
}

fn clean_field(field: &str) -> String {
    let field = field.strip_prefix("\"\"").unwrap_or(field);
    let field = field.strip_suffix("\"\"").unwrap_or(field);
    field.replace('"', "")
}

/// Leading integer of the field; anything unparseable or negative is 0.
fn parse_count(field: &str) -> u64 {
    numeric_prefix(field, false)
        .and_then(|digits| digits.parse::<i64>().ok())
        .map(|n| n.max(0) as u64)
        .unwrap_or(0)
}

/// Leading decimal of the field, accepting a comma as decimal separator.
fn parse_amount(field: &str) -> f64 {
    let normalized = field.replacen(',', ".", 1);
    numeric_prefix(&normalized, true)
        .and_then(|number| number.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Longest numeric prefix after leading whitespace, or `None` if there are no digits.
fn numeric_prefix(input: &str, allow_fraction: bool) -> Option<&str> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if allow_fraction {
        if end < bytes.len() && bytes[end] == b'.' {
            let frac_start = end + 1;
            let mut frac_end = frac_start;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            if digits > 0 || frac_end > frac_start {
                digits += frac_end - frac_start;
                end = frac_end;
            }
        }

        if digits > 0 && end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
            let mut exp_end = end + 1;
            if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
                exp_end += 1;
            }
            let exp_digits_start = exp_end;
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > exp_digits_start {
                end = exp_end;
            }
        }
    }

    if digits == 0 {
        return None;
    }
    Some(&s[..end])
}
