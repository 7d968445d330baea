//! Calculator session state.
//!
//! Holds the imported records, the selected date range and the editable period
//! inputs. Every mutation recomputes the aggregate from the full record set;
//! metrics are derived on read, so they always match the current inputs.

use crate::domain::aggregate::{AggregateInput, InputField, aggregate};
use crate::domain::daily_record::{DailyRecord, date_span, sort_records};
use crate::domain::metrics::{CostBreakdown, DerivedMetrics, MetricsConfig};
use crate::domain::record_parser::{ImportReport, parse_lines};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Read-only view of the calculator after the latest change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub range: Option<DateRange>,
    pub inputs: AggregateInput,
    pub metrics: DerivedMetrics,
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: MetricsConfig,
    records: Vec<DailyRecord>,
    range: Option<DateRange>,
    inputs: AggregateInput,
}

impl Calculator {
    pub fn new(config: MetricsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start from pre-filled inputs (manual entry defaults).
    pub fn with_inputs(config: MetricsConfig, inputs: AggregateInput) -> Self {
        Self {
            config,
            inputs,
            ..Self::default()
        }
    }

    /// Parse an export and, if it holds any records, replace the record set and
    /// select its full span. An import without records leaves state untouched.
    pub fn import_text(&mut self, text: &str) -> ImportReport {
        let report = parse_lines(text);
        if !report.is_empty() {
            self.load_records(report.records.clone());
        }
        report
    }

    /// Replace the record set with already-parsed records, selecting the full span.
    pub fn load_records(&mut self, mut records: Vec<DailyRecord>) {
        sort_records(&mut records);
        let Some((start, end)) = date_span(&records) else {
            return;
        };
        self.records = records;
        info!(records = self.records.len(), %start, %end, "records imported");
        self.range = Some(DateRange { start, end });
        self.recompute();
    }

    /// Select a new range. Ignored without records or while either bound is empty,
    /// so a half-edited range keeps the previous figures.
    pub fn set_range(&mut self, start: &str, end: &str) {
        if self.records.is_empty() || start.trim().is_empty() || end.trim().is_empty() {
            return;
        }
        self.range = Some(DateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
        self.recompute();
    }

    pub fn set_start(&mut self, start: &str) {
        if let Some(range) = &self.range {
            let end = range.end.clone();
            self.set_range(start, &end);
        }
    }

    pub fn set_end(&mut self, end: &str) {
        if let Some(range) = &self.range {
            let start = range.start.clone();
            self.set_range(&start, end);
        }
    }

    pub fn set_field(&mut self, field: InputField, value: f64) {
        self.inputs.set(field, value);
    }

    /// Drop imported data. Only `days_count` is reset; other inputs keep their values.
    pub fn clear_import(&mut self) {
        self.records.clear();
        self.range = None;
        self.inputs.days_count = 1;
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn range(&self) -> Option<&DateRange> {
        self.range.as_ref()
    }

    pub fn inputs(&self) -> &AggregateInput {
        &self.inputs
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    pub fn metrics(&self) -> DerivedMetrics {
        DerivedMetrics::compute(&self.inputs, &self.config)
    }

    pub fn snapshot(&self) -> Snapshot {
        let metrics = self.metrics();
        Snapshot {
            range: self.range.clone(),
            breakdown: CostBreakdown::from_metrics(&self.inputs, &metrics),
            inputs: self.inputs.clone(),
            metrics,
        }
    }

    fn recompute(&mut self) {
        let Some(range) = &self.range else {
            return;
        };
        let totals = aggregate(&self.records, &range.start, &range.end);
        info!(
            start = %range.start,
            end = %range.end,
            orders = totals.orders_count,
            days = totals.days_count,
            "range aggregated"
        );
        self.inputs.apply_totals(&totals);
    }
}
