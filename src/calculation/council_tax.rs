//! Local council tax support estimate.
//!
//! This module converts monthly take-home pay to a weekly figure, applies the
//! flat work disregard, picks the band list for the household's composition
//! and reads the discount from the first band whose limit covers the income.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::{CtsBand, CtsBandedScheme, PolicyConfig};
use crate::models::{Alert, AlertKind, AuditStep, HouseholdProfile, TierContribution};

use super::display::{money, percent};

/// The band list a household is assessed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CtsBranch {
    /// One adult, no children.
    SingleNoChildren,
    /// One adult, one child.
    SingleOneChild,
    /// One adult, two or more children.
    SingleTwoPlusChildren,
    /// Two or more adults, no children.
    CoupleNoChildren,
    /// Two or more adults, one or more children.
    CoupleWithChildren,
}

impl CtsBranch {
    /// Selects the branch for a household shape.
    pub fn for_household(adults: u32, children: u32) -> Self {
        if adults == 1 {
            match children {
                0 => Self::SingleNoChildren,
                1 => Self::SingleOneChild,
                _ => Self::SingleTwoPlusChildren,
            }
        } else {
            match children {
                0 => Self::CoupleNoChildren,
                _ => Self::CoupleWithChildren,
            }
        }
    }

    /// Returns this branch's band list from the scheme.
    pub fn bands(self, scheme: &CtsBandedScheme) -> &[CtsBand] {
        match self {
            Self::SingleNoChildren => &scheme.single.no_children,
            Self::SingleOneChild => &scheme.single.one_child,
            Self::SingleTwoPlusChildren => &scheme.single.two_plus_children,
            Self::CoupleNoChildren => &scheme.couple.no_children,
            Self::CoupleWithChildren => &scheme.couple.with_children,
        }
    }

    /// Returns the policy field the band list is read from.
    pub fn policy_ref(self) -> &'static str {
        match self {
            Self::SingleNoChildren => "ctsBandedScheme.single.noChildren",
            Self::SingleOneChild => "ctsBandedScheme.single.oneChild",
            Self::SingleTwoPlusChildren => "ctsBandedScheme.single.twoPlusChildren",
            Self::CoupleNoChildren => "ctsBandedScheme.couple.noChildren",
            Self::CoupleWithChildren => "ctsBandedScheme.couple.withChildren",
        }
    }
}

/// Returns the discount of the first band whose limit is at or above the
/// weekly income, or zero when the income is above every band.
///
/// Bands are read in list order, which the policy loader guarantees is
/// ascending by limit.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::band_discount;
/// use entitlement_engine::config::PolicyConfig;
/// use rust_decimal::Decimal;
///
/// let policy = PolicyConfig::default();
/// let bands = &policy.cts_banded_scheme.single.no_children;
///
/// assert_eq!(band_discount(bands, Decimal::from(100)), Decimal::new(90, 2));
/// assert_eq!(band_discount(bands, Decimal::from(101)), Decimal::new(65, 2));
/// assert_eq!(band_discount(bands, Decimal::from(500)), Decimal::ZERO);
/// ```
pub fn band_discount(bands: &[CtsBand], weekly_income: Decimal) -> Decimal {
    bands
        .iter()
        .find(|band| band.limit >= weekly_income)
        .map(|band| band.discount)
        .unwrap_or(Decimal::ZERO)
}

/// The result of the council tax support rule.
#[derive(Debug, Clone)]
pub struct CouncilTaxSupportResult {
    /// Monthly income × 12 / 52.
    pub weekly_income: Decimal,
    /// Weekly income after the work disregard.
    pub assessed_income: Decimal,
    /// The band list used.
    pub branch: CtsBranch,
    /// Discount ratio in [0, 1].
    pub discount: Decimal,
    /// Unclaimed value and alert from this rule.
    pub contribution: TierContribution,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
}

/// Runs the council tax support rule.
///
/// The disregard applies only when there is some income; a household with
/// no income is assessed on a weekly income of zero. A non-zero discount adds
/// `averageBandBCouncilTaxMonthly × discount` to the unclaimed value and
/// emits an opportunity alert.
pub fn evaluate_council_tax_support(
    profile: &HouseholdProfile,
    policy: &PolicyConfig,
    step_number: u32,
) -> CouncilTaxSupportResult {
    let weekly_income =
        profile.net_monthly_income.saturating_mul(Decimal::from(12)) / Decimal::from(52);
    let assessed_income = if profile.net_monthly_income > Decimal::ZERO {
        (weekly_income - policy.cts_work_disregard).max(Decimal::ZERO)
    } else {
        weekly_income
    };

    let branch = CtsBranch::for_household(profile.adults, profile.children);
    let discount = band_discount(branch.bands(&policy.cts_banded_scheme), assessed_income);

    let mut contribution = TierContribution::default();
    let value = policy.average_band_b_council_tax_monthly * discount;

    if discount > Decimal::ZERO {
        contribution.unclaimed_value += value;
        contribution.alerts.push(Alert {
            id: "cts_discount".to_string(),
            kind: AlertKind::Opportunity,
            title: "Council Tax Support".to_string(),
            message: format!(
                "You may qualify for a {} reduction in your council tax through Portsmouth City Council's Council Tax Support scheme, worth about {} a month.",
                percent(discount),
                money(value)
            ),
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "cts_discount".to_string(),
        rule_name: "Council Tax Support".to_string(),
        policy_ref: format!(
            "{}, ctsWorkDisregard, averageBandBCouncilTaxMonthly",
            branch.policy_ref()
        ),
        input: serde_json::json!({
            "net_monthly_income": profile.net_monthly_income.to_string(),
            "adults": profile.adults,
            "children": profile.children
        }),
        output: serde_json::json!({
            "weekly_income": weekly_income.round_dp(2).to_string(),
            "assessed_income": assessed_income.round_dp(2).to_string(),
            "branch": branch,
            "discount": discount.to_string()
        }),
        reasoning: if discount > Decimal::ZERO {
            format!(
                "Weekly income {} after disregard matches a band of {}: {} discount worth {}",
                money(assessed_income),
                branch.policy_ref(),
                percent(discount),
                money(value)
            )
        } else {
            format!(
                "Weekly income {} after disregard is above every band of {}",
                money(assessed_income),
                branch.policy_ref()
            )
        },
    };

    debug!(
        weekly_income = %weekly_income,
        assessed_income = %assessed_income,
        discount = %discount,
        "Council tax support rule evaluated"
    );

    CouncilTaxSupportResult {
        weekly_income,
        assessed_income,
        branch,
        discount,
        contribution,
        audit_step,
    }
}
