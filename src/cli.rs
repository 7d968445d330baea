//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::export_file_adapter::ExportFileAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::aggregate::{AggregateInput, InputField};
use crate::domain::calculator::{Calculator, Snapshot};
use crate::domain::config_validation::validate_config;
use crate::domain::daily_record::{date_span, sort_records};
use crate::domain::error::EcomcalcError;
use crate::domain::metrics::{DEFAULT_VAT_RATE, MetricsConfig};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "ecomcalc", about = "E-commerce profitability calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a daily sales export and compute metrics for a date range
    Import {
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        marketing_cost: Option<f64>,
        #[arg(long)]
        daily_fixed_expenses: Option<f64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Compute metrics from manually entered figures
    Manual {
        #[arg(long)]
        orders: Option<f64>,
        #[arg(long)]
        net_value: Option<f64>,
        #[arg(long)]
        shipping: Option<f64>,
        #[arg(long)]
        total_value: Option<f64>,
        #[arg(long)]
        marketing_cost: Option<f64>,
        #[arg(long)]
        daily_fixed_expenses: Option<f64>,
        #[arg(long)]
        days: Option<f64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show records, date span and skipped lines of an export
    Inspect {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// List export files in a directory
    List {
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Write a JSON report to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Print the snapshot as JSON instead of a text summary
    #[arg(long)]
    pub json: bool,
}

/// Optional overrides for the imported-range command.
#[derive(Debug, Default, Clone)]
pub struct ImportOptions {
    pub start: Option<String>,
    pub end: Option<String>,
    pub marketing_cost: Option<f64>,
    pub daily_fixed_expenses: Option<f64>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Import {
            file,
            start,
            end,
            marketing_cost,
            daily_fixed_expenses,
            output,
        } => {
            let options = ImportOptions {
                start,
                end,
                marketing_cost,
                daily_fixed_expenses,
            };
            run_import(file.as_ref(), &options, &output)
        }
        Command::Manual {
            orders,
            net_value,
            shipping,
            total_value,
            marketing_cost,
            daily_fixed_expenses,
            days,
            output,
        } => {
            let overrides = [
                (InputField::OrdersCount, orders),
                (InputField::NetValueWithVat, net_value),
                (InputField::ShippingCost, shipping),
                (InputField::TotalValueWithShipping, total_value),
                (InputField::MarketingCost, marketing_cost),
                (InputField::DailyFixedExpenses, daily_fixed_expenses),
                (InputField::DaysCount, days),
            ];
            run_manual(&overrides, &output)
        }
        Command::Inspect { file } => run_inspect(&file),
        Command::List { dir, config } => run_list(dir.as_ref(), config.as_ref()),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Load and validate the config file if one was given, otherwise an empty config.
pub fn load_validated_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    let adapter = match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            load_config(p)?
        }
        None => FileConfigAdapter::empty(),
    };

    if let Err(e) = validate_config(&adapter) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }
    Ok(adapter)
}

pub fn build_metrics_config(config: &dyn ConfigPort) -> MetricsConfig {
    MetricsConfig {
        vat_rate: config.get_double("calculator", "vat_rate", DEFAULT_VAT_RATE),
    }
}

/// Period inputs pre-filled from the `[inputs]` section; absent keys keep defaults.
pub fn build_inputs(config: &dyn ConfigPort) -> AggregateInput {
    let mut inputs = AggregateInput::default();
    for field in InputField::ALL {
        let current = inputs.get(field);
        inputs.set(field, config.get_double("inputs", field.key(), current));
    }
    inputs
}

/// Run the import pipeline: read, select the range, aggregate.
///
/// The range defaults to the full span of the export; either bound may be
/// overridden by `options` or by `[import] start_date/end_date`.
pub fn import_snapshot(
    data_port: &dyn DataPort,
    name: &str,
    config: &dyn ConfigPort,
    options: &ImportOptions,
) -> Result<Snapshot, EcomcalcError> {
    let report = data_port.read_export(name)?;
    if report.is_empty() {
        return Err(EcomcalcError::EmptyImport {
            path: name.to_string(),
        });
    }
    if report.skipped_count() > 0 {
        eprintln!(
            "warning: skipped {} malformed line(s) in {}",
            report.skipped_count(),
            name
        );
    }

    let mut calc = Calculator::with_inputs(build_metrics_config(config), build_inputs(config));
    if let Some(value) = options.marketing_cost {
        calc.set_field(InputField::MarketingCost, value);
    }
    if let Some(value) = options.daily_fixed_expenses {
        calc.set_field(InputField::DailyFixedExpenses, value);
    }
    calc.load_records(report.records);

    let start = options
        .start
        .clone()
        .or_else(|| config.get_string("import", "start_date"));
    let end = options
        .end
        .clone()
        .or_else(|| config.get_string("import", "end_date"));

    if let Some(span) = calc.range().cloned() {
        if start.is_some() || end.is_some() {
            let start = start.unwrap_or(span.start);
            let end = end.unwrap_or(span.end);
            if start > end {
                return Err(EcomcalcError::InvalidRange { start, end });
            }
            calc.set_range(&start, &end);
        }
    }

    Ok(calc.snapshot())
}

pub fn manual_snapshot(
    config: &dyn ConfigPort,
    overrides: &[(InputField, Option<f64>)],
) -> Snapshot {
    let mut calc = Calculator::with_inputs(build_metrics_config(config), build_inputs(config));
    for (field, value) in overrides {
        if let Some(value) = value {
            calc.set_field(*field, *value);
        }
    }
    calc.snapshot()
}

pub fn format_summary(snapshot: &Snapshot) -> String {
    let inputs = &snapshot.inputs;
    let metrics = &snapshot.metrics;
    let mut out = String::new();

    if let Some(range) = &snapshot.range {
        out.push_str(&format!(
            "Period:              {} to {} ({} days)\n",
            range.start, range.end, inputs.days_count
        ));
    }

    out.push_str("=== Inputs ===\n");
    out.push_str(&format!("Orders:              {}\n", inputs.orders_count));
    out.push_str(&format!("Net Value (VAT):     {:.2}\n", inputs.net_value_with_vat));
    out.push_str(&format!("Shipping:            {:.2}\n", inputs.shipping_cost));
    out.push_str(&format!("Total Value:         {:.2}\n", inputs.total_value_with_shipping));
    out.push_str(&format!("Marketing:           {:.2}\n", inputs.marketing_cost));
    out.push_str(&format!(
        "Fixed Costs / Day:   {:.2} x {} days\n",
        inputs.daily_fixed_expenses, inputs.days_count
    ));

    out.push_str("\n=== Results ===\n");
    out.push_str(&format!("Net Value ex VAT:    {:.2}\n", metrics.net_value_ex_vat));
    out.push_str(&format!("VAT:                 {:.2}\n", metrics.vat_amount));
    out.push_str(&format!("Product Cost:        {:.2}\n", metrics.product_cost));
    out.push_str(&format!("Total Fixed Costs:   {:.2}\n", metrics.total_fixed_costs));
    let label = if metrics.gross_profit < 0.0 {
        "Gross Loss:  "
    } else {
        "Gross Profit:"
    };
    out.push_str(&format!("{label}       {:.2}\n", metrics.gross_profit));
    out.push_str(&format!("Profit Margin:       {:.1}%\n", metrics.profit_margin));
    out.push_str(&format!("Avg Order Value:     {:.2}\n", metrics.average_order_value));
    out
}

fn emit(snapshot: &Snapshot, output: &OutputArgs, config: &dyn ConfigPort) -> ExitCode {
    let reporter = JsonReportAdapter {
        compact: !config.get_bool("report", "pretty", true),
    };

    if output.json {
        match reporter.render(snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    } else {
        print!("{}", format_summary(snapshot));
    }

    let report_path = output
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .or_else(|| config.get_string("report", "output"));

    if let Some(path) = report_path {
        if let Err(e) = reporter.write(snapshot, &path) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("\nReport written to: {path}");
    }
    ExitCode::SUCCESS
}

fn run_import(file: Option<&PathBuf>, options: &ImportOptions, output: &OutputArgs) -> ExitCode {
    let config = match load_validated_config(output.config.as_ref()) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let name = match file
        .map(|f| f.display().to_string())
        .or_else(|| config.get_string("import", "file"))
    {
        Some(n) => n,
        None => {
            let err = EcomcalcError::ConfigMissing {
                section: "import".into(),
                key: "file".into(),
            };
            eprintln!("error: {err} (or pass --file)");
            return (&err).into();
        }
    };

    eprintln!("Importing {name}");
    let data_port = ExportFileAdapter::new(PathBuf::from("."));
    match import_snapshot(&data_port, &name, &config, options) {
        Ok(snapshot) => emit(&snapshot, output, &config),
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_manual(overrides: &[(InputField, Option<f64>)], output: &OutputArgs) -> ExitCode {
    let config = match load_validated_config(output.config.as_ref()) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let snapshot = manual_snapshot(&config, overrides);
    emit(&snapshot, output, &config)
}

fn run_inspect(file: &Path) -> ExitCode {
    let data_port = ExportFileAdapter::new(PathBuf::from("."));
    let name = file.display().to_string();
    let report = match data_port.read_export(&name) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let mut records = report.records.clone();
    sort_records(&mut records);

    match date_span(&records) {
        Some((first, last)) => println!("{}: {} records, {} to {}", name, records.len(), first, last),
        None => println!("{}: no records", name),
    }
    for skipped in &report.skipped {
        println!("  skipped line {}: {:?}", skipped.line, skipped.reason);
    }
    ExitCode::SUCCESS
}

fn run_list(dir: Option<&PathBuf>, config_path: Option<&PathBuf>) -> ExitCode {
    let config = match load_validated_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let dir = dir
        .cloned()
        .or_else(|| config.get_string("import", "data_dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let adapter = ExportFileAdapter::new(dir.clone());
    let names = match adapter.list_exports() {
        Ok(n) => n,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if names.is_empty() {
        eprintln!("No exports found in {}", dir.display());
    } else {
        for name in &names {
            println!("{}", name);
        }
        eprintln!("{} exports found", names.len());
    }
    ExitCode::SUCCESS
}
