//! Southern Water Essentials tariff eligibility.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PolicyConfig;
use crate::models::{AuditStep, HouseholdProfile, Priority, Recommendation, TierContribution};

use super::display::money;

/// The result of the water support rule.
#[derive(Debug, Clone)]
pub struct WaterSupportResult {
    /// Monthly income × 12.
    pub annual_income: Decimal,
    /// Whether the Essentials tariff is recommended.
    pub eligible: bool,
    /// Unclaimed value and recommendation from this rule.
    pub contribution: TierContribution,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
}

/// Runs the water support rule.
///
/// Southern Water customers with annual income strictly below the threshold
/// are recommended the Essentials tariff. This rule is independent of the
/// council tax outcome.
pub fn evaluate_water_support(
    profile: &HouseholdProfile,
    policy: &PolicyConfig,
    step_number: u32,
) -> WaterSupportResult {
    let annual_income = profile.net_monthly_income.saturating_mul(Decimal::from(12));
    let eligible =
        profile.is_southern_water && annual_income < policy.southern_water_income_threshold;

    let mut contribution = TierContribution::default();
    if eligible {
        contribution.unclaimed_value += policy.southern_water_saving_monthly;
        contribution
            .recommendations
            .push(essentials_tariff(policy.southern_water_saving_monthly));
    }

    let reasoning = if !profile.is_southern_water {
        "Household is not a Southern Water customer".to_string()
    } else if eligible {
        format!(
            "Annual income {} is below the {} threshold",
            money(annual_income),
            money(policy.southern_water_income_threshold)
        )
    } else {
        format!(
            "Annual income {} is not below the {} threshold",
            money(annual_income),
            money(policy.southern_water_income_threshold)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "water_essentials".to_string(),
        rule_name: "Southern Water Essentials Tariff".to_string(),
        policy_ref: "southernWaterIncomeThreshold, southernWaterSavingMonthly".to_string(),
        input: serde_json::json!({
            "is_southern_water": profile.is_southern_water,
            "annual_income": annual_income.to_string()
        }),
        output: serde_json::json!({
            "eligible": eligible
        }),
        reasoning,
    };

    debug!(eligible, annual_income = %annual_income, "Water support rule evaluated");

    WaterSupportResult {
        annual_income,
        eligible,
        contribution,
        audit_step,
    }
}

fn essentials_tariff(saving: Decimal) -> Recommendation {
    Recommendation {
        id: "water_essentials".to_string(),
        priority: Priority::High,
        title: "Apply for the Southern Water Essentials Tariff".to_string(),
        short_description: format!(
            "You could save around {} a month on your water bill.",
            money(saving)
        ),
        long_description: "Southern Water's Essentials Tariff reduces bills for customers on a low household income. Your income is below the qualifying threshold, so you are likely to be eligible."
            .to_string(),
        ordered_steps: vec![
            "Have your Southern Water account number and a recent bill to hand.".to_string(),
            "Gather proof of household income, such as payslips or benefit award letters."
                .to_string(),
            "Apply online through the Southern Water website or by phone.".to_string(),
            "Keep paying your current bill until Southern Water confirms the new tariff."
                .to_string(),
        ],
        external_link: Some(
            "https://www.southernwater.co.uk/account/help-with-paying-your-bill/essentials-tariff"
                .to_string(),
        ),
        issuing_authority: "Southern Water".to_string(),
    }
}
