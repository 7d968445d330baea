//! Core domain types and logic.

pub mod daily_record;
pub mod record_parser;
pub mod aggregate;
pub mod metrics;
pub mod calculator;
pub mod config_validation;
pub mod error;
