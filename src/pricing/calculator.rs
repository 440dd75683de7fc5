//! Price calculation
//!
//! A selection is priced as a list of `PriceLine`s. Base lines cover the
//! main services and the wedding session; additional lines cover the
//! Blu-ray package and the two-day event. `calculate_price` sums the lines,
//! so the itemised breakdown and the totals always agree.
//!
//! # Wedding session tiers (first match wins)
//!
//! 1. Photography, year other than 2022 → discounted
//! 2. Photography, 2022 → complimentary
//! 3. VideoRecording without Photography → discounted
//! 4. no main service → regular

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::trace;

use super::tables::{self, Price};
use crate::selection::SelectedServices;
use crate::types::{ServiceType, ServiceYear};

/// Base and final price for a selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResult {
    pub base_price: Price,
    pub final_price: Price,
}

impl PriceResult {
    /// Sum of the additional-service lines
    pub fn additional_price(&self) -> Price {
        self.final_price - self.base_price
    }

    fn from_lines(lines: &[PriceLine]) -> Self {
        let base_price: Price = lines
            .iter()
            .filter(|l| l.stage == PriceStage::Base)
            .map(|l| l.amount)
            .sum();
        let additional: Price = lines
            .iter()
            .filter(|l| l.stage == PriceStage::Additional)
            .map(|l| l.amount)
            .sum();

        Self {
            base_price,
            final_price: base_price + additional,
        }
    }
}

/// What a price line charges for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum PriceItem {
    #[strum(serialize = "Photography + video package")]
    Package,
    #[strum(serialize = "Photography")]
    Photography,
    #[strum(serialize = "Video recording")]
    VideoRecording,
    #[strum(serialize = "Wedding session (discounted)")]
    WeddingSessionDiscounted,
    #[strum(serialize = "Wedding session (complimentary)")]
    WeddingSessionComplimentary,
    #[strum(serialize = "Wedding session")]
    WeddingSessionRegular,
    #[strum(serialize = "Blu-ray package")]
    BlurayPackage,
    #[strum(serialize = "Two-day event")]
    TwoDayEvent,
}

/// Whether a line counts towards the base price or only the final price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum PriceStage {
    Base,
    Additional,
}

/// One itemised charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    pub item: PriceItem,
    pub stage: PriceStage,
    pub amount: Price,
}

impl PriceLine {
    const fn base(item: PriceItem, amount: Price) -> Self {
        Self {
            item,
            stage: PriceStage::Base,
            amount,
        }
    }

    const fn additional(item: PriceItem, amount: Price) -> Self {
        Self {
            item,
            stage: PriceStage::Additional,
            amount,
        }
    }
}

/// Compute base and final price for a selection in a given year.
///
/// Total over every selection, including the empty one and selections not
/// reachable through the selection manager.
pub fn calculate_price(selected: &SelectedServices, year: ServiceYear) -> PriceResult {
    let result = PriceResult::from_lines(&price_lines(selected, year));
    trace!(
        %year,
        base = result.base_price,
        final_price = result.final_price,
        "price calculated"
    );
    result
}

/// Itemised price lines, base lines first.
pub fn price_lines(selected: &SelectedServices, year: ServiceYear) -> Vec<PriceLine> {
    let mut lines = base_lines(selected, year);
    lines.extend(additional_lines(selected));
    lines
}

fn base_lines(selected: &SelectedServices, year: ServiceYear) -> Vec<PriceLine> {
    let photography = selected.contains(ServiceType::Photography);
    let video = selected.contains(ServiceType::VideoRecording);
    let mut lines = Vec::with_capacity(3);

    if photography && video {
        lines.push(PriceLine::base(PriceItem::Package, tables::PACKAGE.get(year)));
    } else {
        if photography {
            lines.push(PriceLine::base(
                PriceItem::Photography,
                tables::PHOTOGRAPHY.get(year),
            ));
        }
        if video {
            lines.push(PriceLine::base(
                PriceItem::VideoRecording,
                tables::VIDEO_RECORDING.get(year),
            ));
        }
    }

    if selected.contains(ServiceType::WeddingSession) {
        lines.push(wedding_session_line(photography, video, year));
    }

    lines
}

fn wedding_session_line(photography: bool, video: bool, year: ServiceYear) -> PriceLine {
    let (item, amount) = if photography && year != tables::COMPLIMENTARY_WEDDING_SESSION_YEAR {
        (
            PriceItem::WeddingSessionDiscounted,
            tables::WEDDING_SESSION_DISCOUNTED,
        )
    } else if photography {
        (PriceItem::WeddingSessionComplimentary, 0)
    } else if video {
        (
            PriceItem::WeddingSessionDiscounted,
            tables::WEDDING_SESSION_DISCOUNTED,
        )
    } else {
        (
            PriceItem::WeddingSessionRegular,
            tables::WEDDING_SESSION_REGULAR,
        )
    };
    PriceLine::base(item, amount)
}

fn additional_lines(selected: &SelectedServices) -> Vec<PriceLine> {
    let mut lines = Vec::with_capacity(2);

    // Guards mirror the selection invariants; orphaned add-ons cost nothing.
    if selected.contains(ServiceType::BlurayPackage)
        && selected.contains(ServiceType::VideoRecording)
    {
        lines.push(PriceLine::additional(
            PriceItem::BlurayPackage,
            tables::EXTRA_BLURAY,
        ));
    }

    if selected.contains(ServiceType::TwoDayEvent) && selected.has_main_service() {
        lines.push(PriceLine::additional(
            PriceItem::TwoDayEvent,
            tables::TWO_DAY_EVENT,
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ServiceType::*;

    fn selected(services: &[ServiceType]) -> SelectedServices {
        services.iter().copied().collect()
    }

    #[test]
    fn test_empty_selection_is_free() {
        let result = calculate_price(&SelectedServices::new(), ServiceYear::Y2020);
        assert_eq!(result, PriceResult::default());
        assert!(price_lines(&SelectedServices::new(), ServiceYear::Y2020).is_empty());
    }

    #[test]
    fn test_single_main_service_prices() {
        let result = calculate_price(&selected(&[Photography]), ServiceYear::Y2022);
        assert_eq!(result.base_price, 1900);

        let result = calculate_price(&selected(&[VideoRecording]), ServiceYear::Y2020);
        assert_eq!(result.base_price, 1700);
    }

    #[test]
    fn test_package_replaces_individual_prices() {
        let lines = price_lines(&selected(&[Photography, VideoRecording]), ServiceYear::Y2022);
        assert_eq!(lines, vec![PriceLine::base(PriceItem::Package, 2500)]);
    }

    #[test]
    fn test_wedding_session_tiers() {
        let line = |services: &[ServiceType], year| {
            price_lines(&selected(services), year)
                .into_iter()
                .find(|l| l.item.to_string().starts_with("Wedding"))
                .map(|l| (l.item, l.amount))
        };

        assert_eq!(
            line(&[Photography, WeddingSession], ServiceYear::Y2021),
            Some((PriceItem::WeddingSessionDiscounted, 300))
        );
        assert_eq!(
            line(&[Photography, WeddingSession], ServiceYear::Y2022),
            Some((PriceItem::WeddingSessionComplimentary, 0))
        );
        assert_eq!(
            line(&[VideoRecording, WeddingSession], ServiceYear::Y2022),
            Some((PriceItem::WeddingSessionDiscounted, 300))
        );
        assert_eq!(
            line(&[WeddingSession], ServiceYear::Y2021),
            Some((PriceItem::WeddingSessionRegular, 600))
        );
        assert_eq!(line(&[Photography], ServiceYear::Y2021), None);
    }

    #[test]
    fn test_additional_services_only_in_final_price() {
        let result = calculate_price(
            &selected(&[VideoRecording, BlurayPackage, TwoDayEvent]),
            ServiceYear::Y2020,
        );
        assert_eq!(result.base_price, 1700);
        assert_eq!(result.final_price, 2400);
        assert_eq!(result.additional_price(), 700);
    }

    #[test]
    fn test_orphaned_additional_services_are_not_charged() {
        // Not reachable via the selection manager, but pricing stays total.
        let result = calculate_price(&selected(&[BlurayPackage, TwoDayEvent]), ServiceYear::Y2021);
        assert_eq!(result, PriceResult::default());
    }
}
