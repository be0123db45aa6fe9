//! Headline figures for a filtered collection, year-over-year comparison and
//! wage-series insights.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::types::YearlyWages;
use crate::analyzers::aggregate::by_year;
use crate::analyzers::utility::{pct, percent_change, round_half_up, round_to, rounded_mean};
use crate::filter::{FilterState, filter_records};
use crate::record::Record;

/// Year compared against when the caller does not pick one.
pub const DEFAULT_BASELINE_YEAR: i32 = 2024;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub records: usize,
    pub total_applied: u64,
    pub total_worked: u64,
    pub total_not_worked: u64,
    pub total_wages: u64,
    pub avg_days_worked: f64,
    pub avg_wage_rate: f64,
    /// Worked as a percentage of applied, one decimal.
    pub work_rate: f64,
}

impl Overview {
    pub fn from_records(records: &[Record]) -> Self {
        let n = records.len();
        let total = |field: fn(&Record) -> u64| {
            records.iter().fold(0u64, |acc, r| acc.saturating_add(field(r)))
        };
        let total_applied = total(|r| r.applied);
        let total_worked = total(|r| r.worked);

        Overview {
            records: n,
            total_applied,
            total_worked,
            total_not_worked: total(|r| r.not_worked),
            total_wages: total(|r| r.total_wages),
            avg_days_worked: rounded_mean(total(|r| u64::from(r.days_worked)), n as u64),
            avg_wage_rate: rounded_mean(total(|r| u64::from(r.wage_rate)), n as u64),
            work_rate: round_to(pct(total_worked, total_applied), 1),
        }
    }
}

/// Relative change of the current overview against a baseline, in percent
/// with one decimal. Every field is `None` when its baseline value is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub baseline_year: i32,
    pub applied_change_pct: Option<f64>,
    pub worked_change_pct: Option<f64>,
    pub wages_change_pct: Option<f64>,
    pub wage_rate_change_pct: Option<f64>,
    /// Change of the work rate itself, not a difference in points.
    pub work_rate_change_pct: Option<f64>,
}

pub fn compare_to_baseline(current: &Overview, baseline: &Overview, baseline_year: i32) -> Comparison {
    let change = |c: f64, b: f64| percent_change(c, b).map(|v| round_to(v, 1));

    Comparison {
        baseline_year,
        applied_change_pct: change(current.total_applied as f64, baseline.total_applied as f64),
        worked_change_pct: change(current.total_worked as f64, baseline.total_worked as f64),
        wages_change_pct: change(current.total_wages as f64, baseline.total_wages as f64),
        wage_rate_change_pct: change(current.avg_wage_rate, baseline.avg_wage_rate),
        work_rate_change_pct: change(current.work_rate, baseline.work_rate),
    }
}

/// The overview for `baseline_year` under otherwise identical filters.
///
/// `series` should be the full multi-year dataset; a single-year snapshot
/// has no baseline rows.
pub fn baseline_overview(series: &[Record], filters: &FilterState, baseline_year: i32) -> Overview {
    let baseline_filters = filters.clone().with_years([baseline_year]);
    Overview::from_records(&filter_records(series, &baseline_filters))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakYear {
    pub year: i32,
    pub total_wages: u64,
}

/// The year with the highest total wages; the earliest wins a tie.
pub fn peak_wage_year<T: YearlyWages>(series: &[T]) -> Option<PeakYear> {
    series
        .iter()
        .fold(None, |best: Option<PeakYear>, row| match best {
            Some(b) if b.total_wages >= row.total_wages() => Some(b),
            _ => Some(PeakYear {
                year: row.year(),
                total_wages: row.total_wages(),
            }),
        })
}

/// Compound annual growth of total wages between the first and last rows of
/// an ascending series, as a whole percentage.
pub fn wage_cagr<T: YearlyWages>(series: &[T]) -> Option<i64> {
    let first = series.first()?;
    let last = series.last()?;
    let years = last.year() - first.year();
    if years <= 0 || first.total_wages() == 0 {
        return None;
    }
    let ratio = last.total_wages() as f64 / first.total_wages() as f64;
    let rate = ratio.powf(1.0 / f64::from(years)) - 1.0;
    Some(round_half_up(rate * 100.0) as i64)
}

/// Formats an amount in crores (1 Cr = 10,000,000), one decimal.
pub fn format_crores(amount: u64) -> String {
    format!("{:.1} Cr", amount as f64 / 10_000_000.0)
}

/// Everything the summary view shows for one filtered collection.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub generated_at: DateTime<Utc>,
    pub filters: FilterState,
    pub overview: Overview,
    pub comparison: Comparison,
    pub peak_wage_year: Option<PeakYear>,
    pub wage_cagr_pct: Option<i64>,
    pub total_wages_display: String,
}

impl SummaryReport {
    /// Builds the report for the already filtered `current` records. The
    /// baseline comes from `series` under the same filters, so a snapshot
    /// view can be compared against the full series it was cut from.
    pub fn build(
        current: &[Record],
        series: &[Record],
        filters: FilterState,
        baseline_year: i32,
    ) -> Self {
        let overview = Overview::from_records(current);
        let baseline = baseline_overview(series, &filters, baseline_year);
        let yearly = by_year(current);

        SummaryReport {
            generated_at: Utc::now(),
            comparison: compare_to_baseline(&overview, &baseline, baseline_year),
            peak_wage_year: peak_wage_year(&yearly),
            wage_cagr_pct: wage_cagr(&yearly),
            total_wages_display: format_crores(overview.total_wages),
            overview,
            filters,
        }
    }
}
