//! Aggregation periods
//!
//! A `Period` is the width of the window over which a statistic was
//! computed. Periods keep the unit they were expressed in: five minutes and
//! three hundred seconds cover the same span of time but they are _not_ the
//! same period and will never compare equal. Monitord keys its monitors on the
//! period as reported, so we do too.

use std::fmt;

/// The unit a `Period` is counted in.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    /// One second.
    Seconds,
    /// Sixty seconds.
    Minutes,
    /// Sixty minutes.
    Hours,
    /// Twenty-four hours.
    Days,
}

impl PeriodUnit {
    fn as_secs(&self) -> u64 {
        match *self {
            PeriodUnit::Seconds => 1,
            PeriodUnit::Minutes => 60,
            PeriodUnit::Hours => 3_600,
            PeriodUnit::Days => 86_400,
        }
    }
}

/// An aggregation period, some count of a `PeriodUnit`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    /// How many units make up the period.
    pub count: u32,
    /// The unit of the period.
    pub unit: PeriodUnit,
}

impl Period {
    /// Create a new `Period`
    pub fn new(count: u32, unit: PeriodUnit) -> Period {
        Period {
            count: count,
            unit: unit,
        }
    }

    /// A period of `count` seconds
    pub fn seconds(count: u32) -> Period {
        Period::new(count, PeriodUnit::Seconds)
    }

    /// A period of `count` minutes
    pub fn minutes(count: u32) -> Period {
        Period::new(count, PeriodUnit::Minutes)
    }

    /// A period of `count` hours
    pub fn hours(count: u32) -> Period {
        Period::new(count, PeriodUnit::Hours)
    }

    /// A period of `count` days
    pub fn days(count: u32) -> Period {
        Period::new(count, PeriodUnit::Days)
    }

    /// Total length of the period in seconds.
    pub fn as_secs(&self) -> u64 {
        u64::from(self.count).saturating_mul(self.unit.as_secs())
    }

    /// Determine if the period spans no time at all.
    pub fn is_zero(&self) -> bool {
        self.count == 0
    }
}

/// ISO-8601 duration rendering, ie. `PT5M` or `P1D`.
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.unit {
            PeriodUnit::Seconds => write!(f, "PT{}S", self.count),
            PeriodUnit::Minutes => write!(f, "PT{}M", self.count),
            PeriodUnit::Hours => write!(f, "PT{}H", self.count),
            PeriodUnit::Days => write!(f, "P{}D", self.count),
        }
    }
}
