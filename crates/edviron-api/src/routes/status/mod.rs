//! Status routes - Lookup by custom order id
//!
//! Structure:
//! - api.rs: Lookup result fragment
//! - page.rs: Lookup form page

pub mod api;
pub mod page;

pub use api::htmx_status_lookup;
pub use page::page_transaction_status;
