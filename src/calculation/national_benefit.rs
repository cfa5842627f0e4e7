//! National benefit (Universal Credit) estimate.
//!
//! This module estimates a blended monthly Universal Credit award from the
//! standard allowance, the child element and the housing element, applies the
//! work allowance and taper, and decides whether to recommend a claim and/or
//! a Discretionary Housing Payment for a rent shortfall.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::{LhaCaps, PolicyConfig};
use crate::models::{AuditStep, HouseholdProfile, Priority, Recommendation, TierContribution};

use super::display::money;

/// Estimates at or below this amount are not worth recommending a claim for.
pub const UC_NOISE_FLOOR: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// The child element is paid for at most this many children.
pub const MAX_CHILD_ELEMENTS: u32 = 2;

/// Which Local Housing Allowance rate caps the household's rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingCapBand {
    /// One adult, no children.
    OneBedroom,
    /// Exactly one child, any number of adults.
    TwoBedroom,
    /// Two or more children.
    ThreeBedroomPlus,
    /// Every other shape, e.g. several adults and no children.
    Shared,
}

impl HousingCapBand {
    /// Selects the cap band for a household shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use entitlement_engine::calculation::HousingCapBand;
    ///
    /// assert_eq!(HousingCapBand::for_household(1, 0), HousingCapBand::OneBedroom);
    /// assert_eq!(HousingCapBand::for_household(2, 1), HousingCapBand::TwoBedroom);
    /// assert_eq!(HousingCapBand::for_household(1, 4), HousingCapBand::ThreeBedroomPlus);
    /// assert_eq!(HousingCapBand::for_household(2, 0), HousingCapBand::Shared);
    /// ```
    pub fn for_household(adults: u32, children: u32) -> Self {
        match (adults, children) {
            (1, 0) => Self::OneBedroom,
            (_, 1) => Self::TwoBedroom,
            (_, 2..) => Self::ThreeBedroomPlus,
            _ => Self::Shared,
        }
    }

    /// Returns the monthly cap for this band.
    pub fn cap(self, caps: &LhaCaps) -> Decimal {
        match self {
            Self::OneBedroom => caps.bed1,
            Self::TwoBedroom => caps.bed2,
            Self::ThreeBedroomPlus => caps.bed3_plus,
            Self::Shared => caps.shared,
        }
    }

    /// Returns the policy field the cap is read from.
    pub fn policy_ref(self) -> &'static str {
        match self {
            Self::OneBedroom => "lhaCaps.bed1",
            Self::TwoBedroom => "lhaCaps.bed2",
            Self::ThreeBedroomPlus => "lhaCaps.bed3Plus",
            Self::Shared => "lhaCaps.shared",
        }
    }
}

/// The intermediate figures of a Universal Credit estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversalCreditEstimate {
    /// Standard allowance (single or couple rate).
    pub base_allowance: Decimal,
    /// Child element after the two-child limit.
    pub child_element: Decimal,
    /// The cap band applied, if the household rents.
    pub cap_band: Option<HousingCapBand>,
    /// Eligible rent, capped.
    pub housing_element: Decimal,
    /// Rent above the cap.
    pub housing_shortfall: Decimal,
    /// Standard allowance + child element + housing element.
    pub max_entitlement: Decimal,
    /// Earnings disregarded before the taper.
    pub work_allowance: Decimal,
    /// Earnings above the work allowance.
    pub countable_earnings: Decimal,
    /// The tapered award, never negative.
    pub estimated_entitlement: Decimal,
}

/// The result of the national benefit tier.
#[derive(Debug, Clone)]
pub struct NationalBenefitResult {
    /// The figures behind the estimate.
    pub estimate: UniversalCreditEstimate,
    /// Shortfall, unclaimed value and recommendations from this tier.
    pub contribution: TierContribution,
    /// The audit steps recording each rule.
    pub audit_steps: Vec<AuditStep>,
}

/// Runs the national benefit tier.
///
/// The rules run in a fixed order with no early return:
/// 1. Standard allowance: single rate for one adult, couple rate otherwise
/// 2. Child element for at most [`MAX_CHILD_ELEMENTS`] children
/// 3. Housing element for renters, capped by household shape; any excess is
///    a shortfall and triggers a Discretionary Housing Payment recommendation
/// 4. Work allowance for households with children or a disabled member,
///    using the lower rate when housing costs are included
/// 5. Taper on earnings above the work allowance, floored at zero
/// 6. A claim recommendation when the household does not already receive
///    Universal Credit and the estimate exceeds [`UC_NOISE_FLOOR`]
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::evaluate_national_benefit;
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
/// let result = evaluate_national_benefit(&profile, &PolicyConfig::default(), 1);
/// assert_eq!(result.estimate.housing_element, Decimal::from(625));
/// assert_eq!(result.contribution.shortfall, Decimal::from(75));
/// ```
pub fn evaluate_national_benefit(
    profile: &HouseholdProfile,
    policy: &PolicyConfig,
    step_number: u32,
) -> NationalBenefitResult {
    let mut contribution = TierContribution::default();
    let mut audit_steps = Vec::with_capacity(4);
    let mut step = step_number;

    // Standard allowance and child element
    let base_allowance = if profile.adults == 1 {
        policy.uc_standard_allowance_single
    } else {
        policy.uc_standard_allowance_couple
    };
    let eligible_children = profile.children.min(MAX_CHILD_ELEMENTS);
    let child_element = if profile.children > 0 {
        policy.uc_child_element * Decimal::from(eligible_children)
    } else {
        Decimal::ZERO
    };

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "uc_standard_allowance".to_string(),
        rule_name: "Standard Allowance and Child Element".to_string(),
        policy_ref: "ucStandardAllowanceSingle, ucStandardAllowanceCouple, ucChildElement"
            .to_string(),
        input: serde_json::json!({
            "adults": profile.adults,
            "children": profile.children
        }),
        output: serde_json::json!({
            "base_allowance": base_allowance.to_string(),
            "child_element": child_element.to_string(),
            "children_counted": eligible_children
        }),
        reasoning: format!(
            "{} rate {} plus child element for {} of {} children: {}",
            if profile.adults == 1 { "Single" } else { "Couple" },
            money(base_allowance),
            eligible_children,
            profile.children,
            money(child_element)
        ),
    });
    step += 1;

    // Housing element
    let (cap_band, housing_element, housing_shortfall) = if profile.tenure.is_renting() {
        let band = HousingCapBand::for_household(profile.adults, profile.children);
        let cap = band.cap(&policy.lha_caps);
        let element = profile.rent_amount.min(cap);
        let shortfall = if profile.rent_amount > cap {
            profile.rent_amount - cap
        } else {
            Decimal::ZERO
        };

        audit_steps.push(AuditStep {
            step_number: step,
            rule_id: "uc_housing_element".to_string(),
            rule_name: "Housing Element".to_string(),
            policy_ref: band.policy_ref().to_string(),
            input: serde_json::json!({
                "rent_amount": profile.rent_amount.to_string(),
                "adults": profile.adults,
                "children": profile.children
            }),
            output: serde_json::json!({
                "cap_band": band,
                "cap": cap.to_string(),
                "housing_element": element.to_string(),
                "shortfall": shortfall.to_string()
            }),
            reasoning: if shortfall > Decimal::ZERO {
                format!(
                    "Rent {} exceeds the {} cap of {}: shortfall {}",
                    money(profile.rent_amount),
                    band.policy_ref(),
                    money(cap),
                    money(shortfall)
                )
            } else {
                format!(
                    "Rent {} is within the {} cap of {}",
                    money(profile.rent_amount),
                    band.policy_ref(),
                    money(cap)
                )
            },
        });
        step += 1;

        if shortfall > Decimal::ZERO {
            contribution.shortfall += shortfall;
            contribution
                .recommendations
                .push(discretionary_housing_payment(shortfall));
        }

        (Some(band), element, shortfall)
    } else {
        (None, Decimal::ZERO, Decimal::ZERO)
    };

    let max_entitlement = base_allowance + child_element + housing_element;

    // Work allowance and taper
    let work_allowance = if profile.children > 0 || profile.is_disabled {
        if housing_element > Decimal::ZERO {
            policy.uc_work_allowance_lower
        } else {
            policy.uc_work_allowance_higher
        }
    } else {
        Decimal::ZERO
    };
    // Saturating: the engine takes any Decimal, not only validated profiles
    let countable_earnings = profile
        .net_monthly_income
        .saturating_sub(work_allowance)
        .max(Decimal::ZERO);
    let estimated_entitlement = max_entitlement
        .saturating_sub(countable_earnings.saturating_mul(policy.uc_taper_rate))
        .max(Decimal::ZERO);

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "uc_taper".to_string(),
        rule_name: "Work Allowance and Taper".to_string(),
        policy_ref: "ucWorkAllowanceLower, ucWorkAllowanceHigher, ucTaperRate".to_string(),
        input: serde_json::json!({
            "net_monthly_income": profile.net_monthly_income.to_string(),
            "max_entitlement": max_entitlement.to_string(),
            "is_disabled": profile.is_disabled
        }),
        output: serde_json::json!({
            "work_allowance": work_allowance.to_string(),
            "countable_earnings": countable_earnings.to_string(),
            "estimated_entitlement": estimated_entitlement.to_string()
        }),
        reasoning: format!(
            "{} - ({} - {}) × {} = {}",
            money(max_entitlement),
            money(profile.net_monthly_income),
            money(work_allowance),
            policy.uc_taper_rate.normalize(),
            money(estimated_entitlement)
        ),
    });
    step += 1;

    // Claim recommendation
    let recommend_claim = !profile.has_uc && estimated_entitlement > UC_NOISE_FLOOR;
    if recommend_claim {
        contribution.unclaimed_value += estimated_entitlement;
        contribution
            .recommendations
            .push(universal_credit_claim(estimated_entitlement));
    }

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "uc_apply".to_string(),
        rule_name: "Universal Credit Claim".to_string(),
        policy_ref: String::new(),
        input: serde_json::json!({
            "has_uc": profile.has_uc,
            "estimated_entitlement": estimated_entitlement.to_string(),
            "noise_floor": UC_NOISE_FLOOR.to_string()
        }),
        output: serde_json::json!({
            "recommended": recommend_claim
        }),
        reasoning: if profile.has_uc {
            "Household already receives Universal Credit - no claim recommended".to_string()
        } else if recommend_claim {
            format!(
                "Estimate {} exceeds {} - claim recommended",
                money(estimated_entitlement),
                money(UC_NOISE_FLOOR)
            )
        } else {
            format!(
                "Estimate {} does not exceed {} - not worth pursuing",
                money(estimated_entitlement),
                money(UC_NOISE_FLOOR)
            )
        },
    });

    let estimate = UniversalCreditEstimate {
        base_allowance,
        child_element,
        cap_band,
        housing_element,
        housing_shortfall,
        max_entitlement,
        work_allowance,
        countable_earnings,
        estimated_entitlement,
    };

    debug!(
        max_entitlement = %estimate.max_entitlement,
        estimated_entitlement = %estimate.estimated_entitlement,
        housing_shortfall = %estimate.housing_shortfall,
        recommend_claim,
        "National benefit tier evaluated"
    );

    NationalBenefitResult {
        estimate,
        contribution,
        audit_steps,
    }
}

fn discretionary_housing_payment(shortfall: Decimal) -> Recommendation {
    Recommendation {
        id: "dhp".to_string(),
        priority: Priority::High,
        title: "Apply for a Discretionary Housing Payment".to_string(),
        short_description: format!(
            "Your rent is {} a month more than the Local Housing Allowance covers. The council may help bridge the gap.",
            money(shortfall)
        ),
        long_description: "Universal Credit and Housing Benefit only cover rent up to the Local Housing Allowance rate for your household size. Portsmouth City Council holds a Discretionary Housing Payment fund for tenants who cannot meet the difference. Awards are usually time-limited, so apply as soon as a shortfall appears."
            .to_string(),
        ordered_steps: vec![
            "Make sure you have claimed the housing costs element of Universal Credit or Housing Benefit first."
                .to_string(),
            "Gather your tenancy agreement, a recent rent statement and proof of income."
                .to_string(),
            "Complete the Discretionary Housing Payment application form on the Portsmouth City Council website."
                .to_string(),
            "Explain what you are doing to reduce the shortfall and any hardship it is causing."
                .to_string(),
        ],
        external_link: Some(
            "https://www.portsmouth.gov.uk/services/benefits-and-council-tax/benefits/discretionary-housing-payments/"
                .to_string(),
        ),
        issuing_authority: "Portsmouth City Council".to_string(),
    }
}

fn universal_credit_claim(estimate: Decimal) -> Recommendation {
    Recommendation {
        id: "uc_apply".to_string(),
        priority: Priority::High,
        title: "Check and claim Universal Credit".to_string(),
        short_description: format!(
            "You could be entitled to around {} a month in Universal Credit.",
            money(estimate)
        ),
        long_description: "Based on your household, housing costs and take-home pay, you appear to qualify for Universal Credit. This figure is a guide only: the Department for Work and Pensions will calculate your actual award from your circumstances when you claim."
            .to_string(),
        ordered_steps: vec![
            "Create a Universal Credit account on GOV.UK.".to_string(),
            "Gather your ID, bank details, tenancy agreement and recent payslips.".to_string(),
            "Complete and submit your claim online within 28 days of starting it.".to_string(),
            "Book and attend your Jobcentre Plus appointment to verify your identity.".to_string(),
        ],
        external_link: Some("https://www.gov.uk/apply-universal-credit".to_string()),
        issuing_authority: "Department for Work and Pensions".to_string(),
    }
}
