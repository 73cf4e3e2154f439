//! Search, results and detail views for the launch search page.
//!
//! This crate provides:
//! - `LaunchApi`, the seam to the launch API, and its HTTP implementation
//! - The search session state model
//! - Views: search form, loading state, results list, launch details
//! - `Renderer`, which runs the fetch/render cycle against a shared document

pub mod api;
pub mod model;
pub mod renderer;
pub mod views;

// Re-export commonly used types
pub use api::{HttpLaunchApi, LaunchApi};
pub use model::{SearchPhase, SearchSession, SearchToken};
pub use renderer::{Renderer, SEARCH_STATE_ATTR};
pub use views::{
    back_link, launch_details, render_search_form, search_form, search_results, set_loading,
    set_not_loading, LoadingGuard,
};
