//! State model for the launch search page.
//!
//! The document shows this state; it is never read back from the document.

mod state;

pub use state::{SearchPhase, SearchSession, SearchToken};
