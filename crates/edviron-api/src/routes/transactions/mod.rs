//! Transaction routes - Listing with filters, sorting and pagination
//!
//! The query string is the state of the listing. Every link the table
//! renders (sort headers, pager, page sizes) carries the full query, and the
//! HTMX list fragment pushes it back into the browser URL.
//!
//! Structure:
//! - api.rs: JSON API and HTMX fragments
//! - page.rs: Full page and table rendering

pub mod api;
pub mod page;

pub use api::{api_transactions, htmx_filter_apply, htmx_filter_form, htmx_transactions_list};
pub use page::page_transactions;
