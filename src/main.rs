//! CLI entry point for the MGNREGA insights tool.
//!
//! Loads a job-card dataset from a file or URL, applies the year, district and
//! gender filters, and prints the requested aggregate view as JSON.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mgnrega_insights::analyzers::aggregate::{by_district, by_gender, wage_analysis, yearly_trends};
use mgnrega_insights::analyzers::ranking::{
    DEFAULT_TOP, DistrictSort, gender_participation, rank_districts,
};
use mgnrega_insights::analyzers::summary::{DEFAULT_BASELINE_YEAR, SummaryReport};
use mgnrega_insights::analyzers::validate::validate_records;
use mgnrega_insights::{
    config::Settings,
    districts::{DistrictProfile, DistrictProfiles, format_lakhs},
    filter::{FilterState, GenderFilter, filter_records},
    loader::load_records_or_empty,
    output::{DEFAULT_EXPORT_FILENAME, render_json, write_export},
    record::Record,
    table::{SortDirection, SortField, TableSort},
};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "mgnrega_insights")]
#[command(about = "Aggregate views over the Tamil Nadu MGNREGA job-card dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Dataset selection and filters shared by every view.
#[derive(Args)]
struct DataArgs {
    /// Path or URL of the dataset (defaults to MGNREGA_DATASET)
    #[arg(long, value_name = "FILE_OR_URL")]
    source: Option<String>,

    /// Use the standalone 2025 snapshot instead of the full series
    #[arg(long, default_value_t = false)]
    snapshot: bool,

    /// Restrict to these years (repeatable; none = all years)
    #[arg(short, long = "year", value_name = "YEAR")]
    years: Vec<i32>,

    /// Restrict to these districts (repeatable; none = all districts)
    #[arg(short, long = "district", value_name = "NAME")]
    districts: Vec<String>,

    /// All, Male or Female
    #[arg(short, long, default_value = "All")]
    gender: GenderFilter,
}

impl DataArgs {
    fn filters(&self) -> FilterState {
        FilterState::all()
            .with_years(self.years.iter().copied())
            .with_districts(self.districts.iter().cloned())
            .with_gender(self.gender)
    }

    fn source(&self, settings: &Settings) -> String {
        match (&self.source, self.snapshot) {
            (Some(source), _) => source.clone(),
            (None, true) => settings.snapshot.clone(),
            (None, false) => settings.dataset.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Headline totals, comparison with a baseline year, and wage insights
    Summary {
        #[command(flatten)]
        data: DataArgs,

        /// Year the filtered totals are compared against, taken from the
        /// full series (MGNREGA_DATASET) even when --snapshot or --source is set
        #[arg(long, default_value_t = DEFAULT_BASELINE_YEAR)]
        baseline_year: i32,
    },
    /// Year-by-year totals with a trailing wage-rate average
    Trends {
        #[command(flatten)]
        data: DataArgs,

        /// Rolling average window (defaults to MGNREGA_ROLLING_WINDOW)
        #[arg(short, long)]
        window: Option<usize>,
    },
    /// Year-by-year wage figures with a trailing wage-rate average
    Wages {
        #[command(flatten)]
        data: DataArgs,

        /// Rolling average window (defaults to MGNREGA_ROLLING_WINDOW)
        #[arg(short, long)]
        window: Option<usize>,
    },
    /// District ranking by completion rate, days worked, or name
    Districts {
        #[command(flatten)]
        data: DataArgs,

        /// work_completion_rate, avg_days_worked or name
        #[arg(long, default_value = "work_completion_rate")]
        sort_by: DistrictSort,

        /// Number of districts to show
        #[arg(long, default_value_t = DEFAULT_TOP)]
        top: usize,
    },
    /// Applications, work and participation by gender
    Gender {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Filtered records, sorted
    Table {
        #[command(flatten)]
        data: DataArgs,

        /// Column to sort by (default: year, newest first)
        #[arg(long)]
        sort_field: Option<SortField>,

        /// asc or desc (a newly picked column starts ascending)
        #[arg(long)]
        direction: Option<SortDirection>,

        /// Only print the first N rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Write the filtered records as comma-separated text
    Export {
        #[command(flatten)]
        data: DataArgs,

        /// File to write
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILENAME)]
        output: String,
    },
    /// District reference profiles alongside filtered application counts
    Profiles {
        #[command(flatten)]
        data: DataArgs,

        /// District profile JSON (defaults to MGNREGA_DISTRICTS)
        #[arg(long)]
        profiles: Option<String>,
    },
    /// Report inconsistent records (worked > applied, wage mismatches, unknown values)
    Validate {
        #[command(flatten)]
        data: DataArgs,
    },
}

#[derive(Serialize)]
struct ProfileView<'a> {
    #[serde(flatten)]
    profile: &'a DistrictProfile,
    population_display: String,
    rural_population_display: String,
    applied: u64,
    applications_per_thousand_rural: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let settings = Settings::from_env()?;
    let _file_guard = init_tracing(&settings.log_file_path)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary {
            data,
            baseline_year,
        } => {
            let Selection {
                source,
                all,
                records,
                filters,
            } = load_filtered(&data, &settings).await;

            let series = if source == settings.dataset {
                all
            } else {
                load_records_or_empty(&settings.dataset).await
            };

            let report = SummaryReport::build(&records, &series, filters, baseline_year);
            println!("{}", render_json(&report)?);
        }
        Commands::Trends { data, window } => {
            let records = load_filtered(&data, &settings).await.records;
            let trends = yearly_trends(&records, window.unwrap_or(settings.rolling_window));
            warn_missing(trends.iter().filter(|t| t.missing).map(|t| t.summary.year));
            println!("{}", render_json(&trends)?);
        }
        Commands::Wages { data, window } => {
            let records = load_filtered(&data, &settings).await.records;
            let wages = wage_analysis(&records, window.unwrap_or(settings.rolling_window));
            warn_missing(wages.iter().filter(|t| t.missing).map(|t| t.summary.year));
            println!("{}", render_json(&wages)?);
        }
        Commands::Districts { data, sort_by, top } => {
            let records = load_filtered(&data, &settings).await.records;
            let ranked = rank_districts(&by_district(&records), sort_by, top);
            println!("{}", render_json(&ranked)?);
        }
        Commands::Gender { data } => {
            let records = load_filtered(&data, &settings).await.records;
            let participation = gender_participation(&by_gender(&records));
            println!("{}", render_json(&participation)?);
        }
        Commands::Table {
            data,
            sort_field,
            direction,
            limit,
        } => {
            let records = load_filtered(&data, &settings).await.records;
            let sort = TableSort::chosen(sort_field, direction);
            let mut sorted = sort.apply(&records);
            if let Some(limit) = limit {
                sorted.truncate(limit);
            }
            info!(?sort, rows = sorted.len(), of = records.len(), "Table rows");
            println!("{}", render_json(&sorted)?);
        }
        Commands::Export { data, output } => {
            let records = load_filtered(&data, &settings).await.records;
            write_export(&output, &records)?;
        }
        Commands::Profiles { data, profiles } => {
            let records = load_filtered(&data, &settings).await.records;
            let path = profiles.unwrap_or_else(|| settings.districts.clone());
            let table = DistrictProfiles::load(&path)?;
            let summaries = by_district(&records);

            let views: Vec<ProfileView> = table
                .iter()
                .map(|profile| {
                    let applied = summaries
                        .iter()
                        .find(|s| s.name == profile.name)
                        .map_or(0, |s| s.applied);
                    ProfileView {
                        profile,
                        population_display: format_lakhs(profile.population),
                        rural_population_display: format_lakhs(profile.rural_population),
                        applied,
                        applications_per_thousand_rural: profile
                            .applications_per_thousand_rural(applied),
                    }
                })
                .collect();
            println!("{}", render_json(&views)?);
        }
        Commands::Validate { data } => {
            let records = load_filtered(&data, &settings).await.records;
            let issues = validate_records(&records);
            info!(records = records.len(), issues = issues.len(), "Validation finished");
            println!("{}", render_json(&issues)?);
        }
    }

    Ok(())
}

/// The loaded dataset and the records selected by the filters.
struct Selection {
    source: String,
    all: Vec<Record>,
    records: Vec<Record>,
    filters: FilterState,
}

/// Loads the selected dataset and applies the filters.
///
/// A load failure has already been logged and yields no records, so every
/// view still renders (with empty or zero aggregates).
#[tracing::instrument(skip_all)]
async fn load_filtered(data: &DataArgs, settings: &Settings) -> Selection {
    let source = data.source(settings);
    let filters = data.filters();

    let all = load_records_or_empty(&source).await;
    let records = filter_records(&all, &filters);

    info!(
        source = %source,
        loaded = all.len(),
        matched = records.len(),
        "Filters applied"
    );
    Selection {
        source,
        all,
        records,
        filters,
    }
}

fn warn_missing(years: impl Iterator<Item = i32>) {
    let years: Vec<i32> = years.collect();
    if !years.is_empty() {
        warn!(?years, "Series has rows with missing values");
    }
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_tracing(log_file_path: &str) -> Result<WorkerGuard> {
    let log_dir = Path::new(log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("mgnrega_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}
