use crate::consts::{FIRST_SEASON, JANUARY, LAST_SEASON, MAX_MONTH, SEASON_DAY};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A value that can occupy the month slot of a date: a calendar month or a
/// season. Each variant carries its EDTF code (`01`..`12`, `21`..`24`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Period {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
    Spring = 21,
    Summer = 22,
    Autumn = 23,
    Winter = 24,
}

impl Period {
    /// Calendar months in order.
    pub const MONTHS: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Seasons in code order.
    pub const SEASONS: [Self; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    /// The EDTF month-slot code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn is_season(self) -> bool {
        self.code() >= FIRST_SEASON
    }

    /// Looks up a period by its EDTF code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            JANUARY..=MAX_MONTH => Some(Self::MONTHS[(code - JANUARY) as usize]),
            FIRST_SEASON..=LAST_SEASON => Some(Self::SEASONS[(code - FIRST_SEASON) as usize]),
            _ => None,
        }
    }

    /// Representative (month, day) used when a date must be pinned to one
    /// calendar day. Seasons use the northern-hemisphere solstice/equinox
    /// on the 22nd; calendar months use their first day.
    pub const fn representative_day(self) -> (u8, u8) {
        match self {
            Self::Spring => (3, SEASON_DAY),
            Self::Summer => (6, SEASON_DAY),
            Self::Autumn => (9, SEASON_DAY),
            Self::Winter => (12, SEASON_DAY),
            month => (month.code(), 1),
        }
    }

    /// The two-digit form used in EDTF strings.
    pub fn padded(self) -> String {
        format!("{:02}", self.code())
    }
}

impl TryFrom<u8> for Period {
    type Error = crate::EdtfError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_code(value).ok_or_else(|| crate::EdtfError::InvalidMonth(value.to_string()))
    }
}

impl From<Period> for u8 {
    fn from(period: Period) -> Self {
        period.code()
    }
}
