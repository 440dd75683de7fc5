//! Price calculator
//!
//! - `tables`: year-indexed price constants
//! - `calculator`: base/final price and itemised lines

pub mod calculator;
pub mod tables;

use serde::{Deserialize, Serialize};

pub use calculator::{calculate_price, price_lines, PriceItem, PriceLine, PriceResult, PriceStage};
pub use tables::{Price, YearPrices};

use crate::selection::SelectedServices;
use crate::types::ServiceYear;

/// Everything a caller needs to render a price for one selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub year: ServiceYear,
    pub services: SelectedServices,
    pub price: PriceResult,
    pub lines: Vec<PriceLine>,
}

impl Quote {
    pub fn new(selected: &SelectedServices, year: ServiceYear) -> Self {
        Self {
            year,
            services: selected.clone(),
            price: calculate_price(selected, year),
            lines: price_lines(selected, year),
        }
    }
}
