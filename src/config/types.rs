//! Policy configuration types.
//!
//! This module contains the strongly-typed policy document that drives every
//! rule tier. Documents are deserialized strictly: every field is required and
//! unknown fields are rejected, so a malformed remote document can never
//! silently disable part of the ruleset.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Local Housing Allowance rent caps, monthly, by household size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LhaCaps {
    /// Shared accommodation rate.
    pub shared: Decimal,
    /// One bedroom rate.
    pub bed1: Decimal,
    /// Two bedroom rate.
    pub bed2: Decimal,
    /// Three or more bedrooms rate.
    pub bed3_plus: Decimal,
}

/// A single council tax support band.
///
/// The band applies when the applicant's weekly income (after the work
/// disregard) is at or below `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CtsBand {
    /// Upper weekly income limit for this band (inclusive).
    pub limit: Decimal,
    /// Discount ratio in [0, 1].
    pub discount: Decimal,
}

/// Band lists for single applicants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SingleBands {
    /// Single, no children.
    pub no_children: Vec<CtsBand>,
    /// Single, one child.
    pub one_child: Vec<CtsBand>,
    /// Single, two or more children.
    pub two_plus_children: Vec<CtsBand>,
}

/// Band lists for couples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CoupleBands {
    /// Couple, no children.
    pub no_children: Vec<CtsBand>,
    /// Couple, one or more children.
    pub with_children: Vec<CtsBand>,
}

/// The banded local council tax support scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CtsBandedScheme {
    /// Bands for single applicants.
    pub single: SingleBands,
    /// Bands for couples.
    pub couple: CoupleBands,
}

/// The complete, versioned policy parameter set.
///
/// All monetary amounts are monthly unless the field name says otherwise.
/// `ctsWorkDisregard` and the band limits are weekly; the Southern Water and
/// free school meal thresholds are annual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PolicyConfig {
    /// Human-readable policy version (e.g. "2024-25").
    pub version: String,
    /// The date this policy took effect.
    pub effective_from: NaiveDate,
    /// Universal Credit standard allowance for a single claimant.
    pub uc_standard_allowance_single: Decimal,
    /// Universal Credit standard allowance for joint claimants.
    pub uc_standard_allowance_couple: Decimal,
    /// Universal Credit child element, per child.
    pub uc_child_element: Decimal,
    /// Universal Credit taper rate in [0, 1].
    pub uc_taper_rate: Decimal,
    /// Work allowance when no housing costs are claimed.
    pub uc_work_allowance_higher: Decimal,
    /// Work allowance when housing costs are claimed.
    pub uc_work_allowance_lower: Decimal,
    /// Flat weekly earnings disregard for the council tax support scheme.
    pub cts_work_disregard: Decimal,
    /// Average Band B council tax, used as the base for the discount value.
    pub average_band_b_council_tax_monthly: Decimal,
    /// Local Housing Allowance caps.
    pub lha_caps: LhaCaps,
    /// Annual income below which the Southern Water Essentials tariff applies.
    pub southern_water_income_threshold: Decimal,
    /// Monthly saving from the Southern Water Essentials tariff.
    pub southern_water_saving_monthly: Decimal,
    /// Annual earnings threshold for free school meals under Universal Credit.
    pub fsm_earnings_threshold_annual: Decimal,
    /// Banded council tax support scheme.
    pub cts_banded_scheme: CtsBandedScheme,
}

fn bands(rows: &[(i64, i64)]) -> Vec<CtsBand> {
    rows.iter()
        .map(|&(limit, discount_pct)| CtsBand {
            limit: Decimal::from(limit),
            discount: Decimal::new(discount_pct, 2),
        })
        .collect()
}

impl Default for PolicyConfig {
    /// The compiled-in 2024-25 Portsmouth policy.
    ///
    /// Used whenever no policy document is available or the document fails
    /// to load. `config/policy.yaml` mirrors these values.
    fn default() -> Self {
        Self {
            version: "2024-25".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap_or_default(),
            uc_standard_allowance_single: Decimal::new(39345, 2),
            uc_standard_allowance_couple: Decimal::new(61760, 2),
            uc_child_element: Decimal::new(28792, 2),
            uc_taper_rate: Decimal::new(55, 2),
            uc_work_allowance_higher: Decimal::from(673),
            uc_work_allowance_lower: Decimal::from(404),
            cts_work_disregard: Decimal::from(25),
            average_band_b_council_tax_monthly: Decimal::new(13850, 2),
            lha_caps: LhaCaps {
                shared: Decimal::from(420),
                bed1: Decimal::from(625),
                bed2: Decimal::new(79781, 2),
                bed3_plus: Decimal::new(94740, 2),
            },
            southern_water_income_threshold: Decimal::from(21000),
            southern_water_saving_monthly: Decimal::from(30),
            fsm_earnings_threshold_annual: Decimal::from(7400),
            cts_banded_scheme: CtsBandedScheme {
                single: SingleBands {
                    no_children: bands(&[(100, 90), (180, 65), (220, 40), (260, 15)]),
                    one_child: bands(&[(160, 90), (240, 65), (280, 40), (320, 15)]),
                    two_plus_children: bands(&[(220, 90), (300, 65), (340, 40), (380, 15)]),
                },
                couple: CoupleBands {
                    no_children: bands(&[(150, 90), (230, 65), (270, 40), (310, 15)]),
                    with_children: bands(&[(250, 90), (330, 65), (370, 40), (410, 15)]),
                },
            },
        }
    }
}

impl PolicyConfig {
    /// Checks the policy against the structural rules the tiers rely on.
    ///
    /// Amounts must be non-negative, the taper rate and band discounts must
    /// lie in [0, 1], and band limits must be strictly ascending so that the
    /// "first band whose limit covers the income" rule is well defined.
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("ucStandardAllowanceSingle", self.uc_standard_allowance_single),
            ("ucStandardAllowanceCouple", self.uc_standard_allowance_couple),
            ("ucChildElement", self.uc_child_element),
            ("ucWorkAllowanceHigher", self.uc_work_allowance_higher),
            ("ucWorkAllowanceLower", self.uc_work_allowance_lower),
            ("ctsWorkDisregard", self.cts_work_disregard),
            (
                "averageBandBCouncilTaxMonthly",
                self.average_band_b_council_tax_monthly,
            ),
            ("lhaCaps.shared", self.lha_caps.shared),
            ("lhaCaps.bed1", self.lha_caps.bed1),
            ("lhaCaps.bed2", self.lha_caps.bed2),
            ("lhaCaps.bed3Plus", self.lha_caps.bed3_plus),
            (
                "southernWaterIncomeThreshold",
                self.southern_water_income_threshold,
            ),
            ("southernWaterSavingMonthly", self.southern_water_saving_monthly),
            ("fsmEarningsThresholdAnnual", self.fsm_earnings_threshold_annual),
        ];

        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(invalid(field, format!("must not be negative (got {})", value)));
            }
        }

        check_ratio("ucTaperRate", self.uc_taper_rate)?;

        let scheme = &self.cts_banded_scheme;
        check_bands("ctsBandedScheme.single.noChildren", &scheme.single.no_children)?;
        check_bands("ctsBandedScheme.single.oneChild", &scheme.single.one_child)?;
        check_bands(
            "ctsBandedScheme.single.twoPlusChildren",
            &scheme.single.two_plus_children,
        )?;
        check_bands("ctsBandedScheme.couple.noChildren", &scheme.couple.no_children)?;
        check_bands(
            "ctsBandedScheme.couple.withChildren",
            &scheme.couple.with_children,
        )?;

        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidPolicy {
        field: field.to_string(),
        message: message.into(),
    }
}

fn check_ratio(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(invalid(field, format!("must be between 0 and 1 (got {})", value)));
    }
    Ok(())
}

fn check_bands(field: &str, list: &[CtsBand]) -> EngineResult<()> {
    for (index, band) in list.iter().enumerate() {
        check_ratio(&format!("{}[{}].discount", field, index), band.discount)?;
    }

    for (index, pair) in list.windows(2).enumerate() {
        if pair[1].limit <= pair[0].limit {
            return Err(invalid(
                &format!("{}[{}].limit", field, index + 1),
                format!(
                    "band limits must be strictly ascending ({} follows {})",
                    pair[1].limit, pair[0].limit
                ),
            ));
        }
    }

    Ok(())
}
