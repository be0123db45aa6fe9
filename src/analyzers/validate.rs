//! Opt-in integrity checks over raw records.
//!
//! Nothing in the aggregation path calls this; inconsistent rows are
//! aggregated as they are unless a caller asks for a report.

use serde::Serialize;
use tracing::{debug, warn};

use crate::record::{FIRST_YEAR, LAST_YEAR, Record, is_known_district, is_known_gender};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    WorkedExceedsApplied { applied: u64, worked: u64 },
    NotWorkedMismatch { expected: u64, actual: u64 },
    WagesMismatch { expected: u64, actual: u64 },
    YearOutOfRange,
    UnknownGender,
    UnknownDistrict,
}

/// A problem found in one record; `index` is its position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub index: usize,
    pub year: i32,
    pub district: String,
    pub gender: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

fn check(record: &Record) -> Vec<IssueKind> {
    let mut issues = Vec::new();

    if record.worked > record.applied {
        issues.push(IssueKind::WorkedExceedsApplied {
            applied: record.applied,
            worked: record.worked,
        });
    } else if record.not_worked != record.applied - record.worked {
        issues.push(IssueKind::NotWorkedMismatch {
            expected: record.applied - record.worked,
            actual: record.not_worked,
        });
    }

    let expected = record.expected_wages();
    if record.total_wages != expected {
        issues.push(IssueKind::WagesMismatch {
            expected,
            actual: record.total_wages,
        });
    }

    if !(FIRST_YEAR..=LAST_YEAR).contains(&record.year) {
        issues.push(IssueKind::YearOutOfRange);
    }

    if !is_known_gender(&record.gender) {
        issues.push(IssueKind::UnknownGender);
    }

    if !is_known_district(&record.district) {
        issues.push(IssueKind::UnknownDistrict);
    }

    issues
}

/// Checks every record and returns the problems found, in input order.
pub fn validate_records(records: &[Record]) -> Vec<ValidationIssue> {
    let issues: Vec<ValidationIssue> = records
        .iter()
        .enumerate()
        .flat_map(|(index, r)| {
            check(r).into_iter().map(move |kind| ValidationIssue {
                index,
                year: r.year,
                district: r.district.clone(),
                gender: r.gender.clone(),
                kind,
            })
        })
        .collect();

    if issues.is_empty() {
        debug!(records = records.len(), "All records passed validation");
    } else {
        warn!(records = records.len(), issues = issues.len(), "Dataset has inconsistent records");
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good() -> Record {
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
    fn test_consistent_record_passes() {
        assert!(validate_records(&[good()]).is_empty());
    }

    #[test]
    fn test_worked_exceeds_applied() {
        let mut r = good();
        r.worked = 120;
        r.total_wages = r.expected_wages();

        let issues = validate_records(&[r]);

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].kind,
            IssueKind::WorkedExceedsApplied {
                applied: 100,
                worked: 120
            }
        );
    }

    #[test]
    fn test_wage_and_not_worked_mismatch() {
        let mut r = good();
        r.not_worked = 5;
        r.total_wages = 1;

        let kinds: Vec<IssueKind> = validate_records(&[r]).into_iter().map(|i| i.kind).collect();

        assert_eq!(
            kinds,
            vec![
                IssueKind::NotWorkedMismatch {
                    expected: 10,
                    actual: 5
                },
                IssueKind::WagesMismatch {
                    expected: 720000,
                    actual: 1
                },
            ]
        );
    }

    #[test]
    fn test_unknown_values_and_year() {
        let mut r = good();
        r.year = 2030;
        r.gender = "Other".to_string();
        r.district = "Atlantis".to_string();

        let issues = validate_records(&[good(), r]);

        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.index == 1));
    }

    #[test]
    fn test_issue_serializes_with_kind_tag() {
        let mut r = good();
        r.year = 2004;
        let issues = validate_records(&[r]);
        let json = serde_json::to_value(&issues[0]).unwrap();

        assert_eq!(json["kind"], "year_out_of_range");
        assert_eq!(json["year"], 2004);
    }
}
