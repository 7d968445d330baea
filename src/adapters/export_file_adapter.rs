//! Export file data adapter.
//!
//! Reads tab-delimited daily sales exports from a base directory.

use crate::domain::error::EcomcalcError;
use crate::domain::record_parser::{ImportReport, parse_lines};
use crate::ports::data_port::DataPort;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const EXPORT_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

pub struct ExportFileAdapter {
    base_path: PathBuf,
}

impl ExportFileAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Absolute names are used as-is, relative names resolve under the base path.
    fn export_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }
}

impl DataPort for ExportFileAdapter {
    fn read_export(&self, name: &str) -> Result<ImportReport, EcomcalcError> {
        let path = self.export_path(name);
        let bytes = fs::read(&path).map_err(|e| EcomcalcError::ExportRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        // Exports are not always valid UTF-8; stray bytes only affect the
        // fields they appear in.
        let text = String::from_utf8_lossy(&bytes);
        let content: &str = &text;
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        debug!(path = %path.display(), bytes = bytes.len(), "read export");

        Ok(parse_lines(content))
    }

    fn list_exports(&self) -> Result<Vec<String>, EcomcalcError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| EcomcalcError::ExportRead {
            path: self.base_path.display().to_string(),
            reason: format!("failed to read directory: {}", e),
        })?;

        let mut names = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| EcomcalcError::ExportRead {
                path: self.base_path.display().to_string(),
                reason: format!("directory entry error: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_export = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| {
                    EXPORT_EXTENSIONS
                        .iter()
                        .any(|known| ext.eq_ignore_ascii_case(known))
                })
                .unwrap_or(false);

            if is_export {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        names.sort();
        Ok(names)
    }
}
