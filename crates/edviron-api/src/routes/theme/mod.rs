//! Theme routes - Dark mode toggle
//!
//! The preference lives in a one-year cookie; pages read it on render and
//! fall back to `theme.default_dark`.

pub mod api;

pub use api::toggle_theme;
