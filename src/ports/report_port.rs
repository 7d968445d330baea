//! Report generation port trait.

use crate::domain::calculator::Snapshot;
use crate::domain::error::EcomcalcError;

/// Port for writing calculation reports.
pub trait ReportPort {
    fn write(&self, snapshot: &Snapshot, output_path: &str) -> Result<(), EcomcalcError>;
}
