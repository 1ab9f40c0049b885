//! School routes - Transactions of one school
//!
//! Structure:
//! - api.rs: School list (JSON) and results fragment
//! - page.rs: School picker page

pub mod api;
pub mod page;

pub use api::{api_schools, htmx_school_transactions};
pub use page::page_transactions_by_school;
