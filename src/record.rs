//! The flat job-card record: one (year, district, gender) observation.

use serde::{Deserialize, Serialize};

/// State identifier carried by every record in the dataset.
pub const STATE: &str = "Tamil Nadu";

/// First and last year covered by the full series.
pub const FIRST_YEAR: i32 = 2005;
pub const LAST_YEAR: i32 = 2025;

pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";

/// Gender values present in the dataset.
pub const GENDERS: [&str; 2] = [MALE, FEMALE];

/// All 38 districts of Tamil Nadu, in alphabetical order.
pub const DISTRICTS: [&str; 38] = [
    "Ariyalur",
    "Chengalpattu",
    "Chennai",
    "Coimbatore",
    "Cuddalore",
    "Dharmapuri",
    "Dindigul",
    "Erode",
    "Kallakurichi",
    "Kanchipuram",
    "Kanniyakumari",
    "Karur",
    "Krishnagiri",
    "Madurai",
    "Mayiladuthurai",
    "Nagapattinam",
    "Namakkal",
    "Nilgiris",
    "Perambalur",
    "Pudukkottai",
    "Ramanathapuram",
    "Ranipet",
    "Salem",
    "Sivagangai",
    "Tenkasi",
    "Thanjavur",
    "Theni",
    "Thoothukudi",
    "Tiruchirappalli",
    "Tirunelveli",
    "Tirupathur",
    "Tiruppur",
    "Tiruvallur",
    "Tiruvannamalai",
    "Tiruvarur",
    "Vellore",
    "Villupuram",
    "Virudhunagar",
];

/// A single row of the job-card dataset.
///
/// `district` and `gender` are kept as strings so that a dataset carrying an
/// unexpected value still loads; such rows simply never match a specific
/// filter. Consistency between the count fields is not enforced here, see
/// [`crate::analyzers::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub year: i32,
    pub state: String,
    pub district: String,
    pub gender: String,
    pub applied: u64,
    pub worked: u64,
    pub not_worked: u64,
    /// Average days of employment per worked beneficiary in this group.
    pub days_worked: u32,
    /// Currency units per day.
    pub wage_rate: u32,
    pub total_wages: u64,
}

impl Record {
    /// `worked * days_worked * wage_rate`, the value `total_wages` is expected to approximate.
    pub fn expected_wages(&self) -> u64 {
        self.worked
            .saturating_mul(u64::from(self.days_worked))
            .saturating_mul(u64::from(self.wage_rate))
    }

    /// Person-days of employment represented by this row.
    pub fn person_days(&self) -> u64 {
        u64::from(self.days_worked).saturating_mul(self.worked)
    }
}

pub fn is_known_district(name: &str) -> bool {
    DISTRICTS.contains(&name)
}

pub fn is_known_gender(gender: &str) -> bool {
    GENDERS.contains(&gender)
}
