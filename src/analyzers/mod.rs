//! Job-card aggregation and derived series.
//!
//! Each aggregator groups a filtered record collection by one key (year,
//! district or gender) and returns freshly built typed rows. The yearly and
//! wage series get a trailing wage-rate average and a missing-data flag; the
//! remaining modules derive rankings, headline figures and integrity reports
//! from those rows.

pub mod aggregate;
pub mod ranking;
pub mod rolling;
pub mod summary;
pub mod types;
pub mod utility;
pub mod validate;
