//! booking-rules library
//!
//! Eligibility and pricing rules for a photography/video booking
//! configurator. The selection manager decides which services can be
//! selected given the current selection; the price calculator prices a
//! selection for a service year. Both are pure functions over caller-owned
//! values.

pub mod cli;
pub mod error;
pub mod pricing;
pub mod scenario;
pub mod selection;
pub mod types;

pub use error::{BookingError, Result};
pub use pricing::{calculate_price, price_lines, PriceItem, PriceLine, PriceResult, Quote};
pub use scenario::{BookingScenario, ScenarioReplay, ScenarioStep};
pub use selection::{
    apply_action, apply_actions, evaluate_action, is_selectable, selectable_services,
    ActionEffect, ActionKind, RejectionReason, SelectedServices, SelectionAction,
    SelectionOutcome,
};
pub use types::{ServiceCategory, ServiceType, ServiceYear};
