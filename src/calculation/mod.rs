//! Rule tiers for the Benefits Entitlement Engine.
//!
//! This module contains the national benefit (Universal Credit) estimate, the
//! local council tax support and Southern Water overlay, the free school meals
//! cliff-edge warning, and the aggregation that runs them in order.

mod cliff_edge;
mod council_tax;
mod display;
mod engine;
mod national_benefit;
mod water_support;

pub use cliff_edge::{CliffEdgeResult, FSM_ANNUAL_VALUE, FSM_CLIFF_BAND_WIDTH, evaluate_cliff_edges};
pub use council_tax::{
    CouncilTaxSupportResult, CtsBranch, band_discount, evaluate_council_tax_support,
};
pub use engine::{assess, calculate_benefits};
pub use national_benefit::{
    HousingCapBand, MAX_CHILD_ELEMENTS, NationalBenefitResult, UC_NOISE_FLOOR,
    UniversalCreditEstimate, evaluate_national_benefit,
};
pub use water_support::{WaterSupportResult, evaluate_water_support};
