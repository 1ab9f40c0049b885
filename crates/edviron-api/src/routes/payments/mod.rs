//! Payment routes - Payment collection requests
//!
//! Structure:
//! - api.rs: Form submission
//! - page.rs: Payment form page

pub mod api;
pub mod page;

pub use api::payment_submit;
pub use page::page_payment;
