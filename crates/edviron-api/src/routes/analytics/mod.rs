//! Analytics routes - Charts and summary totals
//!
//! Structure:
//! - api.rs: Report as JSON
//! - page.rs: Analytics page
//! - charts.rs: SVG chart rendering

pub mod api;
pub mod charts;
pub mod page;

pub use api::api_analytics;
pub use page::page_analytics;
