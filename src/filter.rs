//! Row selection over a record collection.
//!
//! A [`FilterState`] is a plain value: every "change" produces a new state, and
//! [`filter_records`] never mutates its input.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::{FEMALE, MALE, Record};

/// A restriction on one dimension.
///
/// An empty selection is never stored as `Only`; it collapses to `Any`, so
/// "nothing selected" always means "match everything".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Restriction<T: Ord> {
    Any,
    Only(BTreeSet<T>),
}

impl<T: Ord> Default for Restriction<T> {
    fn default() -> Self {
        Restriction::Any
    }
}

impl<T: Ord> Restriction<T> {
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let set: BTreeSet<T> = values.into_iter().collect();
        if set.is_empty() {
            Restriction::Any
        } else {
            Restriction::Only(set)
        }
    }

    pub fn allows<Q>(&self, value: &Q) -> bool
    where
        T: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self {
            Restriction::Any => true,
            Restriction::Only(set) => set.is_empty() || set.contains(value),
        }
    }

    pub fn is_any(&self) -> bool {
        match self {
            Restriction::Any => true,
            Restriction::Only(set) => set.is_empty(),
        }
    }
}

impl<T: Ord> FromIterator<T> for Restriction<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

/// Gender selection: everyone, or one specific value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GenderFilter {
    #[default]
    All,
    Male,
    Female,
}

impl GenderFilter {
    /// A record gender that is neither `Male` nor `Female` only matches `All`.
    pub fn matches(&self, gender: &str) -> bool {
        match self {
            GenderFilter::All => true,
            GenderFilter::Male => gender == MALE,
            GenderFilter::Female => gender == FEMALE,
        }
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GenderFilter::All => "All",
            GenderFilter::Male => MALE,
            GenderFilter::Female => FEMALE,
        };
        f.write_str(s)
    }
}

impl FromStr for GenderFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" | "all" => Ok(GenderFilter::All),
            "Male" | "male" => Ok(GenderFilter::Male),
            "Female" | "female" => Ok(GenderFilter::Female),
            other => Err(anyhow::anyhow!(
                "unknown gender filter '{other}' (expected All, Male or Female)"
            )),
        }
    }
}

/// The user's current selection of years, districts and gender.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub years: Restriction<i32>,
    pub districts: Restriction<String>,
    pub gender: GenderFilter,
}

impl FilterState {
    /// Matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_years<I: IntoIterator<Item = i32>>(self, years: I) -> Self {
        Self {
            years: Restriction::from_values(years),
            ..self
        }
    }

    pub fn with_districts<I, S>(self, districts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            districts: districts.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_gender(self, gender: GenderFilter) -> Self {
        Self { gender, ..self }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.years.allows(&record.year)
            && self.districts.allows(record.district.as_str())
            && self.gender.matches(&record.gender)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.years.is_any() && self.districts.is_any() && self.gender == GenderFilter::All
    }
}

/// Returns the records matching `filters`, in input order.
pub fn filter_records(records: &[Record], filters: &FilterState) -> Vec<Record> {
    let out: Vec<Record> = records
        .iter()
        .filter(|r| filters.matches(r))
        .cloned()
        .collect();

    debug!(input = records.len(), matched = out.len(), "Records filtered");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, district: &str, gender: &str) -> Record {
        Record {
            year,
            state: "Tamil Nadu".to_string(),
            district: district.to_string(),
            gender: gender.to_string(),
            applied: 100,
            worked: 90,
            not_worked: 10,
            days_worked: 80,
            wage_rate: 100,
            total_wages: 720000,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record(2005, "Chennai", "Male"),
            record(2005, "Chennai", "Female"),
            record(2006, "Madurai", "Male"),
            record(2007, "Salem", "Female"),
            record(2007, "Madurai", "Other"),
        ]
    }

    #[test]
    fn test_unrestricted_filter_is_identity() {
        let records = sample();
        let out = filter_records(&records, &FilterState::all());
        assert_eq!(out, records);
    }

    #[test]
    fn test_empty_selection_means_match_all() {
        let records = sample();
        let filters = FilterState::all()
            .with_years(Vec::<i32>::new())
            .with_districts(Vec::<String>::new());

        assert!(filters.is_unrestricted());
        assert_eq!(filter_records(&records, &filters).len(), records.len());
    }

    #[test]
    fn test_explicit_empty_only_set_matches_all() {
        let filters = FilterState {
            years: Restriction::Only(BTreeSet::new()),
            ..FilterState::all()
        };
        assert_eq!(filter_records(&sample(), &filters).len(), 5);
    }

    #[test]
    fn test_filter_by_year() {
        let records = sample();
        for r in &records {
            let filters = FilterState::all().with_years([r.year]);
            let out = filter_records(&records, &filters);
            assert!(!out.is_empty());
            assert!(out.iter().all(|o| o.year == r.year));
        }
    }

    #[test]
    fn test_filter_combines_dimensions() {
        let filters = FilterState::all()
            .with_years([2005, 2006])
            .with_districts(["Chennai", "Madurai"])
            .with_gender(GenderFilter::Male);

        let out = filter_records(&sample(), &filters);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].district, "Chennai");
        assert_eq!(out[1].district, "Madurai");
    }

    #[test]
    fn test_unknown_gender_only_matches_all() {
        let records = sample();
        let male = filter_records(&records, &FilterState::all().with_gender(GenderFilter::Male));
        let female = filter_records(&records, &FilterState::all().with_gender(GenderFilter::Female));

        assert_eq!(male.len(), 2);
        assert_eq!(female.len(), 2);
        assert!(male.iter().chain(female.iter()).all(|r| r.gender != "Other"));
    }

    #[test]
    fn test_unknown_district_matches_nothing() {
        let filters = FilterState::all().with_districts(["Atlantis"]);
        assert!(filter_records(&sample(), &filters).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let filters = FilterState::all().with_years([2005]);
        assert!(filter_records(&[], &filters).is_empty());
    }

    #[test]
    fn test_gender_filter_parse() {
        assert_eq!("All".parse::<GenderFilter>().unwrap(), GenderFilter::All);
        assert_eq!("female".parse::<GenderFilter>().unwrap(), GenderFilter::Female);
        assert!("Both".parse::<GenderFilter>().is_err());
        assert_eq!(GenderFilter::Male.to_string(), "Male");
    }
}
