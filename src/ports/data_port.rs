//! Export data access port trait.

use crate::domain::error::EcomcalcError;
use crate::domain::record_parser::ImportReport;

pub trait DataPort {
    /// Read and parse one export. Records come back in file order.
    fn read_export(&self, name: &str) -> Result<ImportReport, EcomcalcError>;

    fn list_exports(&self) -> Result<Vec<String>, EcomcalcError>;
}
