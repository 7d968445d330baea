//! JSON report adapter implementing ReportPort.

use std::fs;

use crate::domain::calculator::Snapshot;
use crate::domain::error::EcomcalcError;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportAdapter {
    pub compact: bool,
}

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, snapshot: &Snapshot) -> Result<String, EcomcalcError> {
        let rendered = if self.compact {
            serde_json::to_string(snapshot)
        } else {
            serde_json::to_string_pretty(snapshot)
        };
        rendered.map_err(|e| EcomcalcError::Report {
            reason: format!("failed to serialize snapshot: {e}"),
        })
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, snapshot: &Snapshot, output_path: &str) -> Result<(), EcomcalcError> {
        let json = self.render(snapshot)?;
        fs::write(output_path, json + "\n").map_err(|e| EcomcalcError::Report {
            reason: format!("failed to write {output_path}: {e}"),
        })
    }
}
