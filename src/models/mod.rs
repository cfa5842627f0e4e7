//! Core data models for the Benefits Entitlement Engine.
//!
//! This module contains the household input, the assessment output, and the
//! audit trace types used throughout the engine.

mod assessment;
mod household;

pub use assessment::{
    Alert, AlertKind, AssessmentReport, AuditStep, AuditTrace, BenefitAssessment, Priority,
    Recommendation, TierContribution,
};
pub use household::{HouseholdProfile, MAX_MONTHLY_AMOUNT, Tenure};
