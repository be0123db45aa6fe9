use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::analyzers::rolling::{MissingData, rolling_average_display};
use crate::analyzers::types::{
    DistrictSummary, GenderSummary, WageSummary, WageTrend, YearSummary, YearlyTrend,
};
use crate::analyzers::utility::{round_half_up, rounded_mean, rounded_rate};
use crate::record::Record;

/// Window used for the wage-rate trailing average on the dashboard.
pub const DEFAULT_ROLLING_WINDOW: usize = 3;

/// Running sums for one group. `rows` is the divisor for the simple means.
/// Sums saturate at `u64::MAX` instead of overflowing.
#[derive(Debug, Default)]
struct Totals {
    rows: u64,
    applied: u64,
    worked: u64,
    not_worked: u64,
    total_wages: u64,
    days_worked: u64,
    wage_rate: u64,
    person_days: u64,
}

impl Totals {
    fn add(&mut self, r: &Record) {
        self.rows += 1;
        self.applied = self.applied.saturating_add(r.applied);
        self.worked = self.worked.saturating_add(r.worked);
        self.not_worked = self.not_worked.saturating_add(r.not_worked);
        self.total_wages = self.total_wages.saturating_add(r.total_wages);
        self.days_worked = self.days_worked.saturating_add(u64::from(r.days_worked));
        self.wage_rate = self.wage_rate.saturating_add(u64::from(r.wage_rate));
        self.person_days = self.person_days.saturating_add(r.person_days());
    }

    fn avg_days_worked(&self) -> f64 {
        rounded_mean(self.days_worked, self.rows)
    }

    fn avg_wage_rate(&self) -> f64 {
        rounded_mean(self.wage_rate, self.rows)
    }
}

fn group_by_year(records: &[Record]) -> BTreeMap<i32, Totals> {
    let mut groups: BTreeMap<i32, Totals> = BTreeMap::new();
    for r in records {
        groups.entry(r.year).or_default().add(r);
    }
    groups
}

/// Groups by a string key, keeping groups in order of first appearance.
fn group_by_name<'a, F>(records: &'a [Record], key: F) -> Vec<(&'a str, Totals)>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Totals)> = Vec::new();

    for r in records {
        let name = key(r);
        let slot = *index.entry(name).or_insert_with(|| {
            groups.push((name, Totals::default()));
            groups.len() - 1
        });
        groups[slot].1.add(r);
    }

    groups
}

/// One summary per distinct year, ascending.
pub fn by_year(records: &[Record]) -> Vec<YearSummary> {
    let out: Vec<YearSummary> = group_by_year(records)
        .into_iter()
        .map(|(year, t)| YearSummary {
            year,
            applied: t.applied,
            worked: t.worked,
            not_worked: t.not_worked,
            total_wages: t.total_wages,
            avg_days_worked: t.avg_days_worked(),
            avg_wage_rate: t.avg_wage_rate(),
        })
        .collect();

    debug!(records = records.len(), years = out.len(), "Aggregated by year");
    out
}

/// One summary per distinct district, in order of first appearance.
pub fn by_district(records: &[Record]) -> Vec<DistrictSummary> {
    let out: Vec<DistrictSummary> = group_by_name(records, |r| r.district.as_str())
        .into_iter()
        .map(|(name, t)| DistrictSummary {
            name: name.to_string(),
            applied: t.applied,
            worked: t.worked,
            not_worked: t.not_worked,
            total_wages: t.total_wages,
            avg_days_worked: t.avg_days_worked(),
            work_completion_rate: rounded_rate(t.worked, t.applied),
        })
        .collect();

    debug!(records = records.len(), districts = out.len(), "Aggregated by district");
    out
}

/// One summary per distinct gender value, in order of first appearance.
pub fn by_gender(records: &[Record]) -> Vec<GenderSummary> {
    let out: Vec<GenderSummary> = group_by_name(records, |r| r.gender.as_str())
        .into_iter()
        .map(|(name, t)| GenderSummary {
            name: name.to_string(),
            value: t.applied,
            worked: t.worked,
            total_wages: t.total_wages,
            avg_days_worked: t.avg_days_worked(),
        })
        .collect();

    debug!(records = records.len(), genders = out.len(), "Aggregated by gender");
    out
}

/// Wage figures per distinct year, ascending.
pub fn by_year_wage(records: &[Record]) -> Vec<WageSummary> {
    group_by_year(records)
        .into_iter()
        .map(|(year, t)| WageSummary {
            year,
            total_wages: t.total_wages,
            avg_wage_rate: t.avg_wage_rate(),
            total_days: t.person_days,
            beneficiaries: t.worked,
            avg_days_per_beneficiary: if t.worked > 0 {
                round_half_up(t.person_days as f64 / t.worked as f64)
            } else {
                0.0
            },
        })
        .collect()
}

/// [`by_year`] followed by the wage-rate trailing average and the missing-data flag.
pub fn yearly_trends(records: &[Record], window: usize) -> Vec<YearlyTrend> {
    let summaries = by_year(records);
    let rates: Vec<Option<f64>> = summaries.iter().map(|s| Some(s.avg_wage_rate)).collect();
    let rolling = rolling_average_display(&rates, window);

    summaries
        .into_iter()
        .zip(rolling)
        .map(|(summary, rolling_avg_wage_rate)| {
            let mut row = YearlyTrend {
                summary,
                rolling_avg_wage_rate,
                missing: false,
            };
            row.missing = row.has_missing();
            row
        })
        .collect()
}

/// [`by_year_wage`] followed by the same post-passes as [`yearly_trends`].
pub fn wage_analysis(records: &[Record], window: usize) -> Vec<WageTrend> {
    let summaries = by_year_wage(records);
    let rates: Vec<Option<f64>> = summaries.iter().map(|s| Some(s.avg_wage_rate)).collect();
    let rolling = rolling_average_display(&rates, window);

    summaries
        .into_iter()
        .zip(rolling)
        .map(|(summary, rolling_avg_wage_rate)| {
            let mut row = WageTrend {
                summary,
                rolling_avg_wage_rate,
                missing: false,
            };
            row.missing = row.has_missing();
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, district: &str, gender: &str, applied: u64, worked: u64) -> Record {
        Record {
            year,
            state: "Tamil Nadu".to_string(),
            district: district.to_string(),
            gender: gender.to_string(),
            applied,
            worked,
            not_worked: applied - worked,
            days_worked: 80,
            wage_rate: 100,
            total_wages: worked * 80 * 100,
        }
    }

    fn chennai_2005() -> Record {
        Record {
            year: 2005,
            state: "Tamil Nadu".to_string(),
            district: "Chennai".to_string(),
            gender: "Male".to_string(),
            applied: 100,
            worked: 90,
            not_worked: 10,
            days_worked: 80,
            wage_rate: 100,
            total_wages: 720000,
        }
    }

    #[test]
    fn test_by_year_single_record() {
        let out = by_year(&[chennai_2005()]);
        assert_eq!(
            out,
            vec![YearSummary {
                year: 2005,
                applied: 100,
                worked: 90,
                not_worked: 10,
                total_wages: 720000,
                avg_days_worked: 80.0,
                avg_wage_rate: 100.0,
            }]
        );
    }

    #[test]
    fn test_by_year_sorted_and_unique() {
        let records = vec![
            record(2007, "Salem", "Male", 10, 9),
            record(2005, "Salem", "Male", 10, 9),
            record(2006, "Salem", "Female", 10, 9),
            record(2005, "Erode", "Female", 10, 9),
        ];

        let years: Vec<i32> = by_year(&records).iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2005, 2006, 2007]);
    }

    #[test]
    fn test_by_year_uses_simple_mean() {
        let mut a = record(2005, "Salem", "Male", 1000, 900);
        a.days_worked = 60;
        a.wage_rate = 100;
        let mut b = record(2005, "Erode", "Male", 10, 9);
        b.days_worked = 91;
        b.wage_rate = 121;

        let out = by_year(&[a, b]);

        // unweighted: (60 + 91) / 2 = 75.5 -> 76, (100 + 121) / 2 = 110.5 -> 111
        assert_eq!(out[0].avg_days_worked, 76.0);
        assert_eq!(out[0].avg_wage_rate, 111.0);
    }

    #[test]
    fn test_huge_wage_totals_saturate() {
        let mut a = record(2005, "Salem", "Male", 10, 9);
        a.total_wages = u64::MAX / 2 + 1;
        let b = a.clone();

        let years = by_year(&[a.clone(), b.clone()]);
        assert_eq!(years[0].total_wages, u64::MAX);

        let districts = by_district(&[a, b]);
        assert_eq!(districts[0].total_wages, u64::MAX);
    }

    #[test]
    fn test_by_district_conserves_totals() {
        let records = vec![
            record(2005, "Salem", "Male", 120, 100),
            record(2006, "Salem", "Female", 80, 70),
            record(2005, "Erode", "Female", 55, 50),
            record(2005, "Chennai", "Male", 0, 0),
        ];

        let out = by_district(&records);
        let applied: u64 = out.iter().map(|d| d.applied).sum();

        assert_eq!(applied, records.iter().map(|r| r.applied).sum::<u64>());
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].name, "Salem");
        assert_eq!(out[0].applied, 200);
        assert_eq!(out[0].work_completion_rate, 85);
        assert_eq!(out[2].work_completion_rate, 0);
        assert!(out.iter().all(|d| d.work_completion_rate <= 100));
    }

    #[test]
    fn test_by_gender_values() {
        let records = vec![
            record(2005, "Salem", "Male", 100, 90),
            record(2005, "Salem", "Female", 120, 110),
        ];

        let out = by_gender(&records);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "Male");
        assert_eq!(out[0].value, 100);
        assert_eq!(out[1].name, "Female");
        assert_eq!(out[1].value, 120);
        assert_eq!(out[1].worked, 110);
    }

    #[test]
    fn test_by_year_wage() {
        let mut a = record(2005, "Salem", "Male", 100, 90);
        a.days_worked = 80;
        let mut b = record(2005, "Erode", "Male", 20, 10);
        b.days_worked = 90;
        b.wage_rate = 110;

        let out = by_year_wage(&[a, b]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].total_days, 90 * 80 + 10 * 90);
        assert_eq!(out[0].beneficiaries, 100);
        assert_eq!(out[0].avg_days_per_beneficiary, 81.0);
        assert_eq!(out[0].avg_wage_rate, 105.0);
    }

    #[test]
    fn test_by_year_wage_without_beneficiaries() {
        let out = by_year_wage(&[record(2005, "Salem", "Male", 10, 0)]);
        assert_eq!(out[0].avg_days_per_beneficiary, 0.0);
    }

    #[test]
    fn test_empty_input_produces_no_rows() {
        assert!(by_year(&[]).is_empty());
        assert!(by_district(&[]).is_empty());
        assert!(by_gender(&[]).is_empty());
        assert!(by_year_wage(&[]).is_empty());
        assert!(yearly_trends(&[], DEFAULT_ROLLING_WINDOW).is_empty());
    }

    #[test]
    fn test_yearly_trends_rolling_average() {
        let mut records = Vec::new();
        for (year, rate) in [(2005, 100), (2006, 110), (2007, 120), (2008, 130)] {
            let mut r = record(year, "Salem", "Male", 10, 9);
            r.wage_rate = rate;
            records.push(r);
        }

        let out = yearly_trends(&records, 3);

        let rolling: Vec<Option<f64>> = out.iter().map(|t| t.rolling_avg_wage_rate).collect();
        assert_eq!(rolling, vec![Some(100.0), Some(105.0), Some(110.0), Some(120.0)]);
        assert!(out.iter().all(|t| !t.missing));
    }

    #[test]
    fn test_wage_analysis_zero_window_flags_missing() {
        let out = wage_analysis(&[chennai_2005()], 0);
        assert_eq!(out[0].rolling_avg_wage_rate, None);
        assert!(out[0].missing);
    }

    #[test]
    fn test_yearly_trend_serializes_rolling_field() {
        let out = yearly_trends(&[chennai_2005()], 3);
        let json = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(json["rollingAvg_avg_wage_rate"], serde_json::json!(100.0));
        assert_eq!(json["year"], serde_json::json!(2005));
        assert_eq!(json["missing"], serde_json::json!(false));
    }
}
