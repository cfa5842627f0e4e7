//! Assessment result models for the Benefits Entitlement Engine.
//!
//! This module contains the [`BenefitAssessment`] returned to callers, the
//! alerts and recommendations it carries, the per-tier [`TierContribution`]
//! the aggregator merges, and the audit trace that explains each rule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display priority of a recommendation.
///
/// # Example
///
/// ```
/// use entitlement_engine::models::Priority;
///
/// let json = serde_json::to_string(&Priority::High).unwrap();
/// assert_eq!(json, "\"high\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Act on this first.
    High,
    /// Worth doing.
    Medium,
    /// Nice to have.
    Low,
}

/// The kind of banner an alert is shown as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Money the household is likely missing out on.
    Opportunity,
    /// A risk the household should know about.
    Warning,
}

/// An informational banner with no actionable steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Stable identifier for the alert.
    pub id: String,
    /// The banner kind.
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Short heading.
    pub title: String,
    /// Explanatory text.
    pub message: String,
}

/// An actionable recommendation with a step-by-step guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Stable identifier (e.g. "dhp", "uc_apply", "water_essentials").
    pub id: String,
    /// Display priority.
    pub priority: Priority,
    /// Short heading.
    pub title: String,
    /// One or two sentence summary, including the amount involved.
    pub short_description: String,
    /// Full explanation.
    pub long_description: String,
    /// What to do, in order.
    pub ordered_steps: Vec<String>,
    /// Where to apply, if online.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
    /// The body that runs the scheme.
    pub issuing_authority: String,
}

/// The partial result produced by a single rule tier.
///
/// Tiers never share mutable state. Each returns one of these and the
/// aggregator merges them in tier order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierContribution {
    /// Unmet housing cost added by this tier.
    pub shortfall: Decimal,
    /// Unclaimed monthly value added by this tier.
    pub unclaimed_value: Decimal,
    /// Alerts emitted by this tier, in emission order.
    pub alerts: Vec<Alert>,
    /// Recommendations emitted by this tier, in emission order.
    pub recommendations: Vec<Recommendation>,
}

/// The engine's answer for one household.
///
/// # Example
///
/// ```
/// use entitlement_engine::models::BenefitAssessment;
///
/// let assessment = BenefitAssessment::default();
/// assert!(assessment.recommendations.is_empty());
/// assert!(assessment.monthly_shortfall.is_zero());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitAssessment {
    /// Accumulated unmet housing cost, monthly.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_shortfall: Decimal,
    /// Accumulated estimated benefit not yet claimed, monthly.
    #[serde(with = "rust_decimal::serde::float")]
    pub unclaimed_value: Decimal,
    /// Informational and warning banners, in tier order.
    pub alerts: Vec<Alert>,
    /// Recommended actions, in tier order.
    pub recommendations: Vec<Recommendation>,
}

impl BenefitAssessment {
    /// Appends a tier's contribution after everything already merged.
    pub fn absorb(&mut self, contribution: TierContribution) {
        self.monthly_shortfall += contribution.shortfall;
        self.unclaimed_value += contribution.unclaimed_value;
        self.alerts.extend(contribution.alerts);
        self.recommendations.extend(contribution.recommendations);
    }

    /// Returns the recommendation ids in display order.
    pub fn recommendation_ids(&self) -> Vec<&str> {
        self.recommendations.iter().map(|r| r.id.as_str()).collect()
    }
}

/// A single step in the audit trace recording a rule decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The policy fields the rule read (e.g. "lhaCaps.bed1").
    pub policy_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for an assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of rule steps.
    pub steps: Vec<AuditStep>,
}

/// An assessment together with the trace that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    /// Version of the policy the assessment was made under.
    pub policy_version: String,
    /// The assessment.
    pub assessment: BenefitAssessment,
    /// Rule-by-rule explanation.
    pub audit_trace: AuditTrace,
}
