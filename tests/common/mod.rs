#![allow(dead_code)]

use ecomcalc::domain::error::EcomcalcError;
pub use ecomcalc::domain::daily_record::DailyRecord;
use ecomcalc::domain::record_parser::{parse_lines, ImportReport};
use ecomcalc::ports::data_port::DataPort;
use std::collections::HashMap;

pub const HEADER: &str = "Data\tComenzi\tValoare Neta\tCost Livrare\tValoare Totala";

/// In-memory exports keyed by name.
pub struct MockDataPort {
    pub exports: HashMap<String, String>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            exports: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_export(mut self, name: &str, text: &str) -> Self {
        self.exports.insert(name.to_string(), text.to_string());
        self
    }

    pub fn with_error(mut self, name: &str, reason: &str) -> Self {
        self.errors.insert(name.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn read_export(&self, name: &str) -> Result<ImportReport, EcomcalcError> {
        if let Some(reason) = self.errors.get(name) {
            return Err(EcomcalcError::ExportRead {
                path: name.to_string(),
                reason: reason.clone(),
            });
        }
        match self.exports.get(name) {
            Some(text) => Ok(parse_lines(text)),
            None => Err(EcomcalcError::ExportRead {
                path: name.to_string(),
                reason: "not found".to_string(),
            }),
        }
    }

    fn list_exports(&self) -> Result<Vec<String>, EcomcalcError> {
        let mut names: Vec<String> = self.exports.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

pub fn make_record(date: &str, orders: u64, net_value: f64) -> DailyRecord {
    DailyRecord {
        date: date.to_string(),
        orders,
        net_value,
        shipping_cost: 10.0,
        total_value: net_value + 10.0,
    }
}

/// One export line in the doubled-quote shape produced by the shop backend.
pub fn quoted_line(date: &str, orders: u64, net: &str, shipping: &str, total: &str) -> String {
    format!("\"{date}\"\"\t\"\"{orders}\"\"\t\"\"{net}\"\"\t\"\"{shipping}\"\"\t\"\"{total}\"")
}

/// Header plus one plain tab-separated line per record.
pub fn export_text(records: &[DailyRecord]) -> String {
    let mut text = String::from(HEADER);
    for r in records {
        text.push_str(&format!(
            "\n{}\t{}\t{}\t{}\t{}",
            r.date, r.orders, r.net_value, r.shipping_cost, r.total_value
        ));
    }
    text.push('\n');
    text
}

/// `count` consecutive days starting at 2025-01-01.
pub fn generate_records(count: usize) -> Vec<DailyRecord> {
    let start = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let date = start + chrono::Duration::days(i as i64);
            make_record(
                &date.format("%Y-%m-%d").to_string(),
                (i as u64 % 7) + 1,
                100.0 + i as f64 * 12.5,
            )
        })
        .collect()
}
