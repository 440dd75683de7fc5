//! Type-safe service and year enumerations
//!
//! Service identifiers and service years are closed enums, so an unknown
//! service or year cannot reach the rule engine. Parsing from strings or
//! integers happens here, at the boundary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::BookingError;

/// Bookable service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum ServiceType {
    #[strum(serialize = "Photography")]
    Photography,
    #[strum(serialize = "VideoRecording")]
    VideoRecording,
    #[strum(serialize = "BlurayPackage")]
    BlurayPackage,
    #[strum(serialize = "TwoDayEvent")]
    TwoDayEvent,
    #[strum(serialize = "WeddingSession")]
    WeddingSession,
}

/// Which side of the main/additional partition a service sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ServiceCategory {
    /// Sellable on its own
    Main,
    /// Sellable only alongside a main service (WeddingSession aside)
    Additional,
}

impl ServiceType {
    /// Main services in declaration order
    pub const MAIN: [Self; 2] = [Self::Photography, Self::VideoRecording];

    /// Additional services in declaration order
    pub const ADDITIONAL: [Self; 3] = [Self::BlurayPackage, Self::TwoDayEvent, Self::WeddingSession];

    pub const fn category(self) -> ServiceCategory {
        match self {
            Self::Photography | Self::VideoRecording => ServiceCategory::Main,
            Self::BlurayPackage | Self::TwoDayEvent | Self::WeddingSession => {
                ServiceCategory::Additional
            }
        }
    }

    #[inline]
    pub const fn is_main(self) -> bool {
        matches!(self.category(), ServiceCategory::Main)
    }

    #[inline]
    pub const fn is_additional(self) -> bool {
        matches!(self.category(), ServiceCategory::Additional)
    }

    /// Human-readable label for listings
    pub const fn label(self) -> &'static str {
        match self {
            Self::Photography => "Photography",
            Self::VideoRecording => "Video recording",
            Self::BlurayPackage => "Blu-ray package",
            Self::TwoDayEvent => "Two-day event",
            Self::WeddingSession => "Wedding session",
        }
    }
}

/// Service year, selects the price-table column
///
/// Serialized as a plain integer (`2021`), displayed and parsed as digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(try_from = "u16", into = "u16")]
pub enum ServiceYear {
    #[strum(serialize = "2020")]
    Y2020,
    #[strum(serialize = "2021")]
    Y2021,
    #[strum(serialize = "2022")]
    Y2022,
}

impl ServiceYear {
    /// Column in a `pricing::tables::YearPrices` row
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Y2020 => 0,
            Self::Y2021 => 1,
            Self::Y2022 => 2,
        }
    }

    pub const fn as_u16(self) -> u16 {
        match self {
            Self::Y2020 => 2020,
            Self::Y2021 => 2021,
            Self::Y2022 => 2022,
        }
    }
}

impl TryFrom<u16> for ServiceYear {
    type Error = BookingError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2020 => Ok(Self::Y2020),
            2021 => Ok(Self::Y2021),
            2022 => Ok(Self::Y2022),
            other => Err(BookingError::invalid_input(format!(
                "unsupported service year {other} (expected 2020, 2021 or 2022)"
            ))),
        }
    }
}

impl From<ServiceYear> for u16 {
    fn from(year: ServiceYear) -> Self {
        year.as_u16()
    }
}
