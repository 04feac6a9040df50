//! Command execution: logging setup, loading, inference and reporting

use crate::cli::args::{Args, OutputFormat};
use crate::constants::TIMESTAMP_FORMAT;
use crate::export::{series_to_json, write_series_csv};
use crate::filter::date_bounds;
use crate::inference::{TypeInferrer, default_x_column, summarize_columns};
use crate::models::{Column, ColumnKind, ColumnSummary, Series};
use crate::normalize::format_date;
use crate::series::build_series;
use crate::table::load_table;
use anyhow::{Context, Result, bail};
use colored::*;
use tracing::{debug, info};

/// Load, infer and report or export according to the arguments
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args);

    let config = args.to_config();
    config.validate()?;
    let range = args.date_range()?;

    let table = load_table(&args.file, config.delimiter)
        .await
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let columns = TypeInferrer::new(config.clone()).infer(&table);

    if args.y_columns.is_empty() {
        if args.format != OutputFormat::Summary {
            bail!("Select at least one Y column with -y to export series");
        }
        print_column_report(&summarize_columns(&table, &columns), &columns);
        return Ok(());
    }

    let x_name = match &args.x_column {
        Some(name) => name.clone(),
        None => default_x_column(&columns)
            .map(|c| c.name().to_string())
            .context("No date column found; the X axis needs one")?,
    };
    info!("Building {} series over '{}'", args.y_columns.len(), x_name);

    let series = build_series(&table, &columns, &x_name, &args.y_columns, &range)?;

    match args.format {
        OutputFormat::Summary => {
            print_column_report(&summarize_columns(&table, &columns), &columns);
            print_series_report(&x_name, &series);
        }
        OutputFormat::Csv => {
            let stdout = std::io::stdout();
            write_series_csv(&series, stdout.lock(), config.delimiter)?;
        }
        OutputFormat::Json => println!("{}", series_to_json(&series)?),
    }

    Ok(())
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("csv_graph={}", log_level)));

    // try_init: a second initialization (tests, embedding) is not fatal
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}

fn print_column_report(summaries: &[ColumnSummary], columns: &[Column]) {
    println!("{}", "Columns".bright_green().bold());

    for summary in summaries {
        let kind = match summary.kind {
            ColumnKind::Date => summary.kind.to_string().bright_cyan(),
            ColumnKind::Number => summary.kind.to_string().bright_yellow(),
            ColumnKind::Text => summary.kind.to_string().bright_black(),
        };
        let dropped = if summary.dropped > 0 {
            format!(" ({} dropped)", summary.dropped).bright_red()
        } else {
            "".normal()
        };
        println!(
            "  {:<24} {:<8} {} values{}",
            summary.name.bright_white(),
            kind,
            summary.parsed,
            dropped
        );
    }

    match default_x_column(columns) {
        Some(x) => {
            let bounds = date_bounds(x)
                .map(|b| format!("{} .. {}", format_date(&b.min), format_date(&b.max)))
                .unwrap_or_else(|| "no dates".to_string());
            println!(
                "\n  {} {} [{}]",
                "Default X column:".bright_cyan(),
                x.name().bright_white().bold(),
                bounds
            );
        }
        None => println!("\n  {}", "No date column detected".bright_yellow()),
    }
}

fn print_series_report(x_name: &str, series: &[Series]) {
    println!("\n{} {}", "Series over".bright_green().bold(), x_name.bold());

    for s in series {
        let span = match (s.points.first(), s.points.last()) {
            (Some(first), Some(last)) => format!(
                "{} .. {}",
                first.x.format(TIMESTAMP_FORMAT),
                last.x.format(TIMESTAMP_FORMAT)
            ),
            _ => "empty".to_string(),
        };
        println!(
            "  {:<24} {} points [{}]",
            s.label.bright_white(),
            s.len().to_string().bright_white().bold(),
            span
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn weather_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Date;Temp\n01.03.2024;3,5\n02.03.2024;4,0\n")
            .unwrap();
        file
    }

    fn args_for(file: &NamedTempFile, extra: &[&str]) -> Args {
        let path = file.path().to_str().unwrap();
        let mut argv = vec!["csv-graph", path, "-q"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let args = Args::parse_from(["csv-graph", "/nonexistent/data.csv", "-q"]);
        let err = run(args).await.unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/data.csv"));
    }

    #[tokio::test]
    async fn test_export_without_y_column_is_rejected() {
        let file = weather_file();
        let err = run(args_for(&file, &["-f", "json"])).await.unwrap_err();
        assert!(err.to_string().contains("Y column"));
    }

    #[tokio::test]
    async fn test_unknown_y_column_is_a_selection_error() {
        let file = weather_file();
        let err = run(args_for(&file, &["-y", "Rain", "-f", "json"]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Rain"));
    }

    #[tokio::test]
    async fn test_summary_and_exports_succeed() {
        let file = weather_file();
        run(args_for(&file, &[])).await.unwrap();
        run(args_for(&file, &["-y", "Temp"])).await.unwrap();
        run(args_for(&file, &["-y", "Temp", "-f", "csv"])).await.unwrap();
        run(args_for(&file, &["-y", "Temp", "-f", "json", "--end", "2024-03-01"]))
            .await
            .unwrap();
    }
}
