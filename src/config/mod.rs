//! Policy configuration for the Benefits Entitlement Engine.
//!
//! This module defines the versioned policy document (allowances, taper,
//! rent caps, council tax bands, utility and free school meal thresholds),
//! its compiled-in default, and the loader that reads a document from YAML or
//! JSON and falls back to the default when the document is unavailable.
//!
//! # Example
//!
//! ```no_run
//! use entitlement_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load_or_default(Some("./config/policy.yaml"));
//! println!("Active policy: {}", loader.policy().version);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, DocumentFormat, PolicyOrigin};
pub use types::{CoupleBands, CtsBand, CtsBandedScheme, LhaCaps, PolicyConfig, SingleBands};
