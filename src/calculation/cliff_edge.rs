//! Benefits cliff-edge warnings.
//!
//! A cliff edge is a narrow income band just above a cutoff where a small
//! pay rise costs the household an in-kind benefit worth more than the rise.
//! The only cliff checked today is free school meals.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::PolicyConfig;
use crate::models::{Alert, AlertKind, AuditStep, HouseholdProfile, TierContribution};

use super::display::money;

/// Width of the warning band above the monthly free school meals threshold.
pub const FSM_CLIFF_BAND_WIDTH: Decimal = Decimal::from_parts(150, 0, 0, false, 0);

/// Annual value of free school meals for one child.
pub const FSM_ANNUAL_VALUE: Decimal = Decimal::from_parts(480, 0, 0, false, 0);

/// The result of the cliff-edge tier.
#[derive(Debug, Clone)]
pub struct CliffEdgeResult {
    /// Annual threshold / 12, rounded to the penny.
    pub monthly_threshold: Decimal,
    /// Whether income sits strictly inside the warning band.
    pub in_band: bool,
    /// The warning alert, if any.
    pub contribution: TierContribution,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
}

/// Runs the cliff-edge tier.
///
/// Warns when `threshold < netMonthlyIncome < threshold + 150`. Both bounds
/// are strict: income exactly at either edge produces no warning.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::evaluate_cliff_edges;
/// use entitlement_engine::config::PolicyConfig;
/// use entitlement_engine::models::{HouseholdProfile, Tenure};
/// use rust_decimal::Decimal;
///
/// let profile = HouseholdProfile {
///     postcode: "PO2 9QT".to_string(),
///     tenure: Tenure::RentSocial,
///     rent_amount: Decimal::from(480),
///     adults: 1,
///     children: 2,
///     child_ages: vec![6, 9],
///     is_disabled: false,
///     net_monthly_income: Decimal::new(70000, 2),
///     has_uc: true,
///     has_child_benefit: true,
///     is_southern_water: false,
///     is_energy_debt: false,
///     is_pregnant: false,
/// };
///
/// let result = evaluate_cliff_edges(&profile, &PolicyConfig::default(), 1);
/// assert!(result.in_band);
/// assert_eq!(result.monthly_threshold, Decimal::new(61667, 2));
/// ```
pub fn evaluate_cliff_edges(
    profile: &HouseholdProfile,
    policy: &PolicyConfig,
    step_number: u32,
) -> CliffEdgeResult {
    let monthly_threshold = (policy.fsm_earnings_threshold_annual / Decimal::from(12))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let upper = monthly_threshold + FSM_CLIFF_BAND_WIDTH;
    let income = profile.net_monthly_income;
    let in_band = income > monthly_threshold && income < upper;

    let mut contribution = TierContribution::default();
    if in_band {
        contribution.alerts.push(Alert {
            id: "fsm_cliff".to_string(),
            kind: AlertKind::Warning,
            title: "Free School Meals cliff edge".to_string(),
            message: format!(
                "Your take-home pay is just above the {} a month limit for Free School Meals. Losing them can cost around {} a year per child, more than a small pay rise brings in.",
                money(monthly_threshold),
                money(FSM_ANNUAL_VALUE)
            ),
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "fsm_cliff".to_string(),
        rule_name: "Free School Meals Cliff Edge".to_string(),
        policy_ref: "fsmEarningsThresholdAnnual".to_string(),
        input: serde_json::json!({
            "net_monthly_income": income.to_string()
        }),
        output: serde_json::json!({
            "monthly_threshold": monthly_threshold.to_string(),
            "band_upper": upper.to_string(),
            "in_band": in_band
        }),
        reasoning: if in_band {
            format!(
                "Income {} is between {} and {}",
                money(income),
                money(monthly_threshold),
                money(upper)
            )
        } else {
            format!(
                "Income {} is outside the band {} to {}",
                money(income),
                money(monthly_threshold),
                money(upper)
            )
        },
    };

    debug!(in_band, monthly_threshold = %monthly_threshold, "Cliff-edge tier evaluated");

    CliffEdgeResult {
        monthly_threshold,
        in_band,
        contribution,
        audit_step,
    }
}
