//! District rankings and gender participation derived from aggregator output.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use crate::analyzers::types::{DistrictSummary, GenderSummary};
use crate::analyzers::utility::{pct, round_to, rounded_rate};

/// Number of districts shown in a ranking unless the caller asks otherwise.
pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistrictSort {
    /// Highest completion rate first.
    #[default]
    CompletionRate,
    /// Most average days worked first.
    AvgDaysWorked,
    /// Alphabetical.
    Name,
}

impl FromStr for DistrictSort {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work_completion_rate" | "completion" => Ok(DistrictSort::CompletionRate),
            "avg_days_worked" | "days" => Ok(DistrictSort::AvgDaysWorked),
            "name" => Ok(DistrictSort::Name),
            other => Err(anyhow::anyhow!("unknown district sort key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDistrict {
    pub rank: usize,
    #[serde(flatten)]
    pub summary: DistrictSummary,
    /// Mean of the completion rate and average days worked (both on a 0-100 scale).
    pub efficiency_score: f64,
}

pub fn efficiency_score(summary: &DistrictSummary) -> f64 {
    (f64::from(summary.work_completion_rate) + summary.avg_days_worked) / 2.0
}

/// Sorts districts by `sort_by` and keeps the first `top`. Ties keep input order.
pub fn rank_districts(
    summaries: &[DistrictSummary],
    sort_by: DistrictSort,
    top: usize,
) -> Vec<RankedDistrict> {
    let mut sorted: Vec<&DistrictSummary> = summaries.iter().collect();
    sorted.sort_by(|a, b| match sort_by {
        DistrictSort::CompletionRate => b.work_completion_rate.cmp(&a.work_completion_rate),
        DistrictSort::AvgDaysWorked => b
            .avg_days_worked
            .partial_cmp(&a.avg_days_worked)
            .unwrap_or(Ordering::Equal),
        DistrictSort::Name => a.name.cmp(&b.name),
    });

    sorted
        .into_iter()
        .take(top)
        .enumerate()
        .map(|(i, s)| RankedDistrict {
            rank: i + 1,
            summary: s.clone(),
            efficiency_score: efficiency_score(s),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderParticipation {
    #[serde(flatten)]
    pub summary: GenderSummary,
    /// Share of this group's applicants who received work, whole percent.
    pub participation_rate: u32,
    /// This group's applications as a percentage of all applications, one decimal.
    pub participation_share: f64,
}

pub fn gender_participation(summaries: &[GenderSummary]) -> Vec<GenderParticipation> {
    let total: u64 = summaries.iter().map(|g| g.value).sum();

    summaries
        .iter()
        .map(|g| GenderParticipation {
            summary: g.clone(),
            participation_rate: rounded_rate(g.worked, g.value),
            participation_share: round_to(pct(g.value, total), 1),
        })
        .collect()
}
