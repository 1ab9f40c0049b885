//! Home routes - Landing page and section dashboard
//!
//! Structure:
//! - page.rs: Full page rendering

pub mod page;

pub use page::{index_page, page_dashboard};
