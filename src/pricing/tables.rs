//! Price tables
//!
//! All prices are whole units of a single currency. Year-dependent prices
//! are `YearPrices` rows indexed by `ServiceYear::index()`.

use crate::types::ServiceYear;

/// Amount in whole currency units
pub type Price = u32;

/// One price per service year (2020, 2021, 2022)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearPrices([Price; 3]);

impl YearPrices {
    pub const fn new(y2020: Price, y2021: Price, y2022: Price) -> Self {
        Self([y2020, y2021, y2022])
    }

    #[inline]
    pub const fn get(self, year: ServiceYear) -> Price {
        self.0[year.index()]
    }
}

pub const PHOTOGRAPHY: YearPrices = YearPrices::new(1700, 1800, 1900);

pub const VIDEO_RECORDING: YearPrices = YearPrices::new(1700, 1800, 1900);

/// Photography + VideoRecording bundle, replaces both individual prices
pub const PACKAGE: YearPrices = YearPrices::new(2200, 2300, 2500);

/// Wedding session booked alongside a main service
pub const WEDDING_SESSION_DISCOUNTED: Price = 300;

/// Wedding session booked on its own
pub const WEDDING_SESSION_REGULAR: Price = 600;

/// Year in which a wedding session is free with Photography
pub const COMPLIMENTARY_WEDDING_SESSION_YEAR: ServiceYear = ServiceYear::Y2022;

pub const EXTRA_BLURAY: Price = 300;

pub const TWO_DAY_EVENT: Price = 400;
