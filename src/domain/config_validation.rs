//! Configuration validation.
//!
//! Checks ranges and formats of every configured value before a run.

use crate::domain::error::EcomcalcError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

const MONEY_KEYS: [&str; 5] = [
    "net_value_with_vat",
    "shipping_cost",
    "total_value_with_shipping",
    "marketing_cost",
    "daily_fixed_expenses",
];

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), EcomcalcError> {
    validate_vat_rate(config)?;
    validate_inputs(config)?;
    validate_import_dates(config)?;
    Ok(())
}

fn validate_vat_rate(config: &dyn ConfigPort) -> Result<(), EcomcalcError> {
    if config.get_string("calculator", "vat_rate").is_none() {
        return Ok(());
    }
    let value = config.get_double("calculator", "vat_rate", f64::NAN);
    if !(0.0..1.0).contains(&value) {
        return Err(EcomcalcError::ConfigInvalid {
            section: "calculator".to_string(),
            key: "vat_rate".to_string(),
            reason: "vat_rate must be between 0 and 1".to_string(),
        });
    }
    Ok(())
}

fn validate_inputs(config: &dyn ConfigPort) -> Result<(), EcomcalcError> {
    for key in MONEY_KEYS {
        if config.get_string("inputs", key).is_none() {
            continue;
        }
        let value = config.get_double("inputs", key, f64::NAN);
        if !value.is_finite() || value < 0.0 {
            return Err(EcomcalcError::ConfigInvalid {
                section: "inputs".to_string(),
                key: key.to_string(),
                reason: format!("{key} must be a non-negative number"),
            });
        }
    }

    if config.get_string("inputs", "orders_count").is_some()
        && config.get_int("inputs", "orders_count", -1) < 0
    {
        return Err(EcomcalcError::ConfigInvalid {
            section: "inputs".to_string(),
            key: "orders_count".to_string(),
            reason: "orders_count must be a non-negative integer".to_string(),
        });
    }

    if config.get_string("inputs", "days_count").is_some()
        && config.get_int("inputs", "days_count", 0) < 1
    {
        return Err(EcomcalcError::ConfigInvalid {
            section: "inputs".to_string(),
            key: "days_count".to_string(),
            reason: "days_count must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_import_dates(config: &dyn ConfigPort) -> Result<(), EcomcalcError> {
    let start = parse_optional_date(config.get_string("import", "start_date"), "start_date")?;
    let end = parse_optional_date(config.get_string("import", "end_date"), "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(EcomcalcError::ConfigInvalid {
                section: "import".to_string(),
                key: "start_date".to_string(),
                reason: "start_date must not be after end_date".to_string(),
            });
        }
    }
    Ok(())
}

fn parse_optional_date(
    value: Option<String>,
    field: &str,
) -> Result<Option<NaiveDate>, EcomcalcError> {
    match value {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| EcomcalcError::ConfigInvalid {
                section: "import".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            }),
    }
}
