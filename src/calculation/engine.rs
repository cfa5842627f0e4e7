//! Assessment of a household against every rule tier.
//!
//! The tiers run unconditionally in a fixed order (national benefit, council
//! tax support, water support, cliff edges) and their contributions are
//! merged in that order, which callers rely on as display priority.

use tracing::debug;

use crate::config::PolicyConfig;
use crate::models::{AssessmentReport, AuditTrace, BenefitAssessment, HouseholdProfile};

use super::cliff_edge::evaluate_cliff_edges;
use super::council_tax::evaluate_council_tax_support;
use super::national_benefit::evaluate_national_benefit;
use super::water_support::evaluate_water_support;

/// Assesses a household and returns the assessment with its audit trace.
///
/// Pure and deterministic: the same profile and policy always produce the
/// same report.
pub fn assess(profile: &HouseholdProfile, policy: &PolicyConfig) -> AssessmentReport {
    let mut assessment = BenefitAssessment::default();
    let mut steps = Vec::new();
    let mut step_number: u32 = 1;

    // Tier 1: national benefit
    let national = evaluate_national_benefit(profile, policy, step_number);
    step_number += national.audit_steps.len() as u32;
    steps.extend(national.audit_steps);
    assessment.absorb(national.contribution);

    // Tier 2: local overlay
    let council_tax = evaluate_council_tax_support(profile, policy, step_number);
    step_number += 1;
    steps.push(council_tax.audit_step);
    assessment.absorb(council_tax.contribution);

    let water = evaluate_water_support(profile, policy, step_number);
    step_number += 1;
    steps.push(water.audit_step);
    assessment.absorb(water.contribution);

    // Tier 3: cliff edges
    let cliff = evaluate_cliff_edges(profile, policy, step_number);
    steps.push(cliff.audit_step);
    assessment.absorb(cliff.contribution);

    debug!(
        policy_version = %policy.version,
        monthly_shortfall = %assessment.monthly_shortfall,
        unclaimed_value = %assessment.unclaimed_value,
        recommendations = assessment.recommendations.len(),
        alerts = assessment.alerts.len(),
        "Assessment completed"
    );

    AssessmentReport {
        policy_version: policy.version.clone(),
        assessment,
        audit_trace: AuditTrace { steps },
    }
}

/// Assesses a household and returns only the [`BenefitAssessment`].
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::calculate_benefits;
/// use entitlement_engine::config::PolicyConfig;
/// use entitlement_engine::models::{HouseholdProfile, Tenure};
/// use rust_decimal::Decimal;
///
/// let profile = HouseholdProfile {
///     postcode: "PO1 2AL".to_string(),
///     tenure: Tenure::RentPrivate,
///     rent_amount: Decimal::from(700),
///     adults: 1,
///     children: 0,
///     child_ages: vec![],
///     is_disabled: false,
///     net_monthly_income: Decimal::from(1200),
///     has_uc: false,
///     has_child_benefit: false,
///     is_southern_water: false,
///     is_energy_debt: false,
///     is_pregnant: false,
/// };
///
/// let assessment = calculate_benefits(&profile, &PolicyConfig::default());
/// assert_eq!(assessment.monthly_shortfall, Decimal::from(75));
/// assert_eq!(assessment.recommendation_ids(), vec!["dhp", "uc_apply"]);
/// ```
pub fn calculate_benefits(profile: &HouseholdProfile, policy: &PolicyConfig) -> BenefitAssessment {
    assess(profile, policy).assessment
}
