//! Sorting for the record table view.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Year,
    State,
    District,
    Gender,
    Applied,
    Worked,
    NotWorked,
    DaysWorked,
    WageRate,
    TotalWages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "year" => SortField::Year,
            "state" => SortField::State,
            "district" => SortField::District,
            "gender" => SortField::Gender,
            "applied" => SortField::Applied,
            "worked" => SortField::Worked,
            "not_worked" => SortField::NotWorked,
            "days_worked" => SortField::DaysWorked,
            "wage_rate" => SortField::WageRate,
            "total_wages" => SortField::TotalWages,
            other => anyhow::bail!("unknown sort field '{other}'"),
        })
    }
}

impl FromStr for SortDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => anyhow::bail!("unknown sort direction '{other}'"),
        }
    }
}

/// Current sort of the table. Starts at year, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            field: SortField::Year,
            direction: SortDirection::Desc,
        }
    }
}

impl TableSort {
    /// Clicking the active column flips the direction; any other column
    /// becomes active in ascending order.
    pub fn toggle(self, field: SortField) -> Self {
        if field == self.field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Asc,
            }
        }
    }

    /// Starts from the default sort, switches to `field` the way picking a
    /// new column does, then pins `direction` when one is given.
    pub fn chosen(field: Option<SortField>, direction: Option<SortDirection>) -> Self {
        let mut sort = Self::default();
        if let Some(field) = field.filter(|f| *f != sort.field) {
            sort = sort.toggle(field);
        }
        if let Some(direction) = direction {
            sort.direction = direction;
        }
        sort
    }

    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        sort_records(records, self.field, self.direction)
    }
}

fn compare(a: &Record, b: &Record, field: SortField) -> Ordering {
    match field {
        SortField::Year => a.year.cmp(&b.year),
        SortField::State => a.state.cmp(&b.state),
        SortField::District => a.district.cmp(&b.district),
        SortField::Gender => a.gender.cmp(&b.gender),
        SortField::Applied => a.applied.cmp(&b.applied),
        SortField::Worked => a.worked.cmp(&b.worked),
        SortField::NotWorked => a.not_worked.cmp(&b.not_worked),
        SortField::DaysWorked => a.days_worked.cmp(&b.days_worked),
        SortField::WageRate => a.wage_rate.cmp(&b.wage_rate),
        SortField::TotalWages => a.total_wages.cmp(&b.total_wages),
    }
}

/// Returns a sorted copy; rows that compare equal keep their input order.
pub fn sort_records(records: &[Record], field: SortField, direction: SortDirection) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| match direction {
        SortDirection::Asc => compare(a, b, field),
        SortDirection::Desc => compare(b, a, field),
    });
    sorted
}
