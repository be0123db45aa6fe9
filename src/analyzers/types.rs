//! Typed rows produced by the aggregators.

use serde::{Deserialize, Serialize};

/// Per-year totals; the averages are simple (unweighted) means over rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    pub applied: u64,
    pub worked: u64,
    pub not_worked: u64,
    pub total_wages: u64,
    pub avg_days_worked: f64,
    pub avg_wage_rate: f64,
}

/// Per-district totals and completion rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictSummary {
    pub name: String,
    pub applied: u64,
    pub worked: u64,
    pub not_worked: u64,
    pub total_wages: u64,
    pub avg_days_worked: f64,
    /// `round(worked / applied * 100)`, 0 when nothing was applied for.
    pub work_completion_rate: u32,
}

/// Per-gender totals. `value` is the number of applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderSummary {
    pub name: String,
    pub value: u64,
    pub worked: u64,
    pub total_wages: u64,
    pub avg_days_worked: f64,
}

/// Per-year wage figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageSummary {
    pub year: i32,
    pub total_wages: u64,
    pub avg_wage_rate: f64,
    /// Sum of `days_worked * worked`.
    pub total_days: u64,
    /// Sum of `worked`.
    pub beneficiaries: u64,
    pub avg_days_per_beneficiary: f64,
}

/// A [`YearSummary`] with the trailing average of `avg_wage_rate` and a
/// missing-data flag attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTrend {
    #[serde(flatten)]
    pub summary: YearSummary,
    #[serde(rename = "rollingAvg_avg_wage_rate")]
    pub rolling_avg_wage_rate: Option<f64>,
    pub missing: bool,
}

/// A [`WageSummary`] with the same post-passes as [`YearlyTrend`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WageTrend {
    #[serde(flatten)]
    pub summary: WageSummary,
    #[serde(rename = "rollingAvg_avg_wage_rate")]
    pub rolling_avg_wage_rate: Option<f64>,
    pub missing: bool,
}

/// Rows that expose a year and total wages, for series-level insights.
pub trait YearlyWages {
    fn year(&self) -> i32;
    fn total_wages(&self) -> u64;
}

impl YearlyWages for YearSummary {
    fn year(&self) -> i32 {
        self.year
    }

    fn total_wages(&self) -> u64 {
        self.total_wages
    }
}

impl YearlyWages for WageSummary {
    fn year(&self) -> i32 {
        self.year
    }

    fn total_wages(&self) -> u64 {
        self.total_wages
    }
}

impl YearlyWages for YearlyTrend {
    fn year(&self) -> i32 {
        self.summary.year
    }

    fn total_wages(&self) -> u64 {
        self.summary.total_wages
    }
}

impl YearlyWages for WageTrend {
    fn year(&self) -> i32 {
        self.summary.year
    }

    fn total_wages(&self) -> u64 {
        self.summary.total_wages
    }
}
