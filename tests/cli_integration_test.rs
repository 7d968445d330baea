//! CLI integration tests for command orchestration.
//!
//! Tests cover:
//! - Config parsing (build_metrics_config, build_inputs, load_validated_config)
//! - Import pipeline with MockDataPort and with real files on disk
//! - Manual entry overrides
//! - Summary formatting and JSON reports

mod common;

use approx::assert_relative_eq;
use common::*;
use ecomcalc::adapters::export_file_adapter::ExportFileAdapter;
use ecomcalc::adapters::file_config_adapter::FileConfigAdapter;
use ecomcalc::adapters::json_report_adapter::JsonReportAdapter;
use ecomcalc::cli::{self, ImportOptions};
use ecomcalc::domain::aggregate::InputField;
use ecomcalc::domain::error::EcomcalcError;
use ecomcalc::ports::report_port::ReportPort;
use std::io::Write;
use std::path::PathBuf;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[calculator]
vat_rate = 0.19

[inputs]
marketing_cost = 120.0
daily_fixed_expenses = 15

[import]
file = exports/january.tsv
data_dir = exports

[report]
output = report.json
"#;

fn january() -> String {
    export_text(&generate_records(31))
}

mod config_loading {
    use super::*;

    #[test]
    fn metrics_config_reads_vat_rate() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_metrics_config(&adapter);
        assert!((config.vat_rate - 0.19).abs() < f64::EPSILON);
    }

    #[test]
    fn metrics_config_defaults_to_standard_rate() {
        let config = cli::build_metrics_config(&FileConfigAdapter::empty());
        assert!((config.vat_rate - 0.21).abs() < f64::EPSILON);
    }

    #[test]
    fn inputs_come_from_config() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let inputs = cli::build_inputs(&adapter);

        assert_relative_eq!(inputs.marketing_cost, 120.0);
        assert_relative_eq!(inputs.daily_fixed_expenses, 15.0);
        assert_eq!(inputs.orders_count, 0);
        assert_eq!(inputs.days_count, 1);
    }

    #[test]
    fn days_count_from_config() {
        let adapter = FileConfigAdapter::from_string("[inputs]\ndays_count = 7\n").unwrap();
        assert_eq!(cli::build_inputs(&adapter).days_count, 7);
    }

    #[test]
    fn validated_config_from_file() {
        let file = write_temp_ini(VALID_INI);
        let path = file.path().to_path_buf();
        assert!(cli::load_validated_config(Some(&path)).is_ok());
    }

    #[test]
    fn validated_config_rejects_bad_vat() {
        let file = write_temp_ini("[calculator]\nvat_rate = 2\n");
        let path = file.path().to_path_buf();
        assert!(cli::load_validated_config(Some(&path)).is_err());
    }

    #[test]
    fn validated_config_rejects_missing_file() {
        let path = PathBuf::from("/nonexistent/ecomcalc.ini");
        assert!(cli::load_validated_config(Some(&path)).is_err());
    }

    #[test]
    fn no_config_is_empty_and_valid() {
        assert!(cli::load_validated_config(None).is_ok());
    }
}

mod import_pipeline {
    use super::*;

    #[test]
    fn defaults_to_full_span() {
        let port = MockDataPort::new().with_export("jan.tsv", &january());
        let snapshot = cli::import_snapshot(
            &port,
            "jan.tsv",
            &FileConfigAdapter::empty(),
            &ImportOptions::default(),
        )
        .unwrap();

        let range = snapshot.range.unwrap();
        assert_eq!(range.start, "2025-01-01");
        assert_eq!(range.end, "2025-01-31");
        assert_eq!(snapshot.inputs.days_count, 31);
    }

    #[test]
    fn cli_bounds_override_span() {
        let port = MockDataPort::new().with_export("jan.tsv", &january());
        let options = ImportOptions {
            start: Some("2025-01-10".into()),
            end: Some("2025-01-16".into()),
            ..ImportOptions::default()
        };
        let snapshot =
            cli::import_snapshot(&port, "jan.tsv", &FileConfigAdapter::empty(), &options).unwrap();

        let expected: u64 = generate_records(31)[9..16].iter().map(|r| r.orders).sum();
        assert_eq!(snapshot.inputs.orders_count, expected);
        assert_eq!(snapshot.inputs.days_count, 7);
    }

    #[test]
    fn single_bound_keeps_other_span_end() {
        let port = MockDataPort::new().with_export("jan.tsv", &january());
        let options = ImportOptions {
            start: Some("2025-01-30".into()),
            ..ImportOptions::default()
        };
        let snapshot =
            cli::import_snapshot(&port, "jan.tsv", &FileConfigAdapter::empty(), &options).unwrap();

        assert_eq!(snapshot.range.unwrap().end, "2025-01-31");
        assert_eq!(snapshot.inputs.days_count, 2);
    }

    #[test]
    fn config_dates_apply_when_cli_is_silent() {
        let port = MockDataPort::new().with_export("jan.tsv", &january());
        let adapter = FileConfigAdapter::from_string(
            "[import]\nstart_date = 2025-01-01\nend_date = 2025-01-01\n",
        )
        .unwrap();
        let snapshot =
            cli::import_snapshot(&port, "jan.tsv", &adapter, &ImportOptions::default()).unwrap();

        assert_eq!(snapshot.inputs.orders_count, generate_records(1)[0].orders);
        assert_eq!(snapshot.inputs.days_count, 1);
    }

    #[test]
    fn cost_overrides_beat_config() {
        let port = MockDataPort::new().with_export("jan.tsv", &january());
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let options = ImportOptions {
            marketing_cost: Some(500.0),
            ..ImportOptions::default()
        };
        let snapshot = cli::import_snapshot(&port, "jan.tsv", &adapter, &options).unwrap();

        assert_relative_eq!(snapshot.inputs.marketing_cost, 500.0);
        assert_relative_eq!(snapshot.inputs.daily_fixed_expenses, 15.0);
        assert_relative_eq!(snapshot.metrics.total_fixed_costs, 15.0 * 31.0);
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        let port = MockDataPort::new().with_export("jan.tsv", &january());
        let options = ImportOptions {
            start: Some("2025-01-20".into()),
            end: Some("2025-01-10".into()),
            ..ImportOptions::default()
        };
        let err = cli::import_snapshot(&port, "jan.tsv", &FileConfigAdapter::empty(), &options)
            .unwrap_err();
        assert!(matches!(err, EcomcalcError::InvalidRange { .. }));
    }

    #[test]
    fn header_only_export_is_rejected() {
        let port = MockDataPort::new().with_export("empty.tsv", HEADER);
        let err = cli::import_snapshot(
            &port,
            "empty.tsv",
            &FileConfigAdapter::empty(),
            &ImportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EcomcalcError::EmptyImport { path } if path == "empty.tsv"));
    }

    #[test]
    fn read_failure_propagates() {
        let port = MockDataPort::new().with_error("jan.tsv", "disk on fire");
        let err = cli::import_snapshot(
            &port,
            "jan.tsv",
            &FileConfigAdapter::empty(),
            &ImportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EcomcalcError::ExportRead { .. }));
    }

    #[test]
    fn real_file_round_trip_with_report() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("january.tsv"), january()).unwrap();
        let port = ExportFileAdapter::new(dir.path().to_path_buf());

        let snapshot = cli::import_snapshot(
            &port,
            "january.tsv",
            &FileConfigAdapter::empty(),
            &ImportOptions::default(),
        )
        .unwrap();

        let output = dir.path().join("report.json");
        JsonReportAdapter::new()
            .write(&snapshot, output.to_str().unwrap())
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["inputs"]["daysCount"], 31);
        assert_eq!(json["range"]["start"], "2025-01-01");
    }
}

mod manual_entry {
    use super::*;

    #[test]
    fn overrides_produce_expected_metrics() {
        let overrides = [
            (InputField::NetValueWithVat, Some(1210.0)),
            (InputField::MarketingCost, Some(100.0)),
            (InputField::DailyFixedExpenses, Some(50.0)),
            (InputField::DaysCount, Some(2.0)),
            (InputField::OrdersCount, Some(5.0)),
            (InputField::TotalValueWithShipping, Some(1300.0)),
            (InputField::ShippingCost, None),
        ];
        let snapshot = cli::manual_snapshot(&FileConfigAdapter::empty(), &overrides);

        assert!(snapshot.range.is_none());
        assert_relative_eq!(snapshot.metrics.net_value_ex_vat, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(snapshot.metrics.gross_profit, 300.0, epsilon = 1e-9);
        assert_relative_eq!(snapshot.metrics.profit_margin, 30.0, epsilon = 1e-9);
        assert_relative_eq!(snapshot.metrics.average_order_value, 260.0, epsilon = 1e-9);
    }

    #[test]
    fn negative_override_is_coerced() {
        let overrides = [(InputField::MarketingCost, Some(-40.0))];
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let snapshot = cli::manual_snapshot(&adapter, &overrides);
        assert_eq!(snapshot.inputs.marketing_cost, 0.0);
    }

    #[test]
    fn config_values_survive_without_overrides() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let snapshot = cli::manual_snapshot(&adapter, &[]);
        assert_relative_eq!(snapshot.inputs.marketing_cost, 120.0);
        assert_relative_eq!(snapshot.metrics.gross_profit, -135.0, epsilon = 1e-9);
    }
}

mod summary {
    use super::*;

    #[test]
    fn summary_lists_period_and_results() {
        let port = MockDataPort::new().with_export("jan.tsv", &january());
        let snapshot = cli::import_snapshot(
            &port,
            "jan.tsv",
            &FileConfigAdapter::empty(),
            &ImportOptions::default(),
        )
        .unwrap();
        let text = cli::format_summary(&snapshot);

        assert!(text.contains("Period:              2025-01-01 to 2025-01-31 (31 days)"));
        assert!(text.contains("Gross Profit:"));
        assert!(text.contains("Profit Margin:"));
    }

    #[test]
    fn summary_labels_losses() {
        let snapshot = cli::manual_snapshot(
            &FileConfigAdapter::empty(),
            &[(InputField::MarketingCost, Some(10.0))],
        );
        let text = cli::format_summary(&snapshot);

        assert!(!text.contains("Period:"));
        assert!(text.contains("Gross Loss:"));
        assert!(text.contains("-10.00"));
    }
}
