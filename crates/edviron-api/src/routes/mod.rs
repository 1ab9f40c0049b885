//! Route modules for the dashboard server
//!
//! - auth: Login, registration, logout
//! - home: Landing page and section dashboard
//! - transactions: Listing with filters, sorting and pagination
//! - schools: Transactions of one school
//! - status: Status lookup by custom order id
//! - payments: Payment collection requests
//! - analytics: Charts and summary totals
//! - theme: Dark mode toggle
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON endpoints, form submissions and HTMX fragments
//! - page.rs: Full page rendering

pub mod analytics;
pub mod auth;
pub mod home;
pub mod payments;
pub mod schools;
pub mod status;
pub mod theme;
pub mod transactions;
