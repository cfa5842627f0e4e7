//! Benefits Entitlement Engine for Portsmouth Connect
//!
//! This crate estimates what a household may be entitled to but not claiming.
//! It runs three rule tiers (national Universal Credit estimate, local council
//! tax and water support, and benefits-cliff warnings) against a versioned
//! policy configuration and returns a [`models::BenefitAssessment`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
