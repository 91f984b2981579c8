//! Analytics HTTP adapter module.
//!
//! Provides REST API endpoints for reliability, bias and adverse-impact
//! analytics. Every endpoint is scoped by the `x-organization-id` header.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::{AnalyticsApiError, AnalyticsAppState, OrganizationContext, ORGANIZATION_HEADER};
pub use routes::analytics_routes;
