//! HTTP API module for the Benefits Entitlement Engine.
//!
//! Exposes household assessment over JSON so the eligibility calculator
//! front end can call the engine without linking it.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
