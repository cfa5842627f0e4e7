//! Household profile model and related types.
//!
//! This module defines the [`HouseholdProfile`] the engine assesses and the
//! [`Tenure`] enum describing how the household occupies its home.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest monthly rent or income a profile may carry.
///
/// Well above any real household, and small enough that annualising it can
/// never overflow `Decimal`.
pub const MAX_MONTHLY_AMOUNT: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// How the household occupies its home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tenure {
    /// Renting from a private landlord.
    RentPrivate,
    /// Renting from a council or housing association.
    RentSocial,
    /// Owns outright.
    Owner,
    /// Owns with a mortgage.
    Mortgage,
}

impl Tenure {
    /// Returns true for either kind of rented tenure.
    ///
    /// # Examples
    ///
    /// ```
    /// use entitlement_engine::models::Tenure;
    ///
    /// assert!(Tenure::RentSocial.is_renting());
    /// assert!(!Tenure::Mortgage.is_renting());
    /// ```
    pub fn is_renting(self) -> bool {
        matches!(self, Tenure::RentPrivate | Tenure::RentSocial)
    }
}

/// The claimant household supplied by the caller.
///
/// Fields the rule tiers read are required on the wire. Money fields are
/// written as JSON numbers and read from numbers or decimal strings. `childAges`,
/// `hasChildBenefit`, `isEnergyDebt` and `isPregnant` are carried for rules
/// that do not exist yet and default to empty/false when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdProfile {
    /// Postcode, informational only.
    pub postcode: String,
    /// Housing tenure.
    pub tenure: Tenure,
    /// Monthly rent.
    #[serde(with = "rust_decimal::serde::float")]
    pub rent_amount: Decimal,
    /// Number of adults in the household.
    pub adults: u32,
    /// Number of dependent children.
    pub children: u32,
    /// Ages of the children.
    #[serde(default)]
    pub child_ages: Vec<u32>,
    /// Whether anyone in the household is disabled.
    pub is_disabled: bool,
    /// Monthly take-home pay.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_monthly_income: Decimal,
    /// Whether the household already receives Universal Credit.
    #[serde(rename = "hasUC")]
    pub has_uc: bool,
    /// Whether the household already receives Child Benefit.
    #[serde(default)]
    pub has_child_benefit: bool,
    /// Whether the household is a Southern Water customer.
    pub is_southern_water: bool,
    /// Whether the household is in energy debt.
    #[serde(default)]
    pub is_energy_debt: bool,
    /// Whether anyone in the household is pregnant.
    #[serde(default)]
    pub is_pregnant: bool,
}

impl HouseholdProfile {
    /// Checks the caller-side preconditions on a profile.
    ///
    /// The engine never calls this. Callers that accept profiles from the
    /// outside world (the HTTP layer, the CLI) validate before assessing.
    pub fn validate(&self) -> EngineResult<()> {
        if self.adults == 0 {
            return Err(invalid("adults", "at least one adult is required"));
        }
        check_amount("rentAmount", self.rent_amount)?;
        check_amount("netMonthlyIncome", self.net_monthly_income)
    }
}

fn check_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, "must not be negative"));
    }
    if value > MAX_MONTHLY_AMOUNT {
        return Err(invalid(field, format!("must not exceed {} a month", MAX_MONTHLY_AMOUNT)));
    }
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidProfile {
        field: field.to_string(),
        message: message.into(),
    }
}
