//! Authentication routes - Login, registration, logout
//!
//! Structure:
//! - api.rs: Form submissions and logout
//! - page.rs: Login and registration screens

pub mod api;
pub mod page;

pub use api::{login_submit, logout, register_submit};
pub use page::{page_login, page_register};
