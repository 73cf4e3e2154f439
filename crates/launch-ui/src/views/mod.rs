//! Views for the launch search page.
//!
//! Element builders here are pure: they turn data into detached `Element`
//! trees. Only `loading` and `search_form` touch a mounted document.

mod detail;
mod loading;
mod results;
mod search_form;

pub use detail::{back_link, launch_details};
pub use loading::{set_loading, set_not_loading, LoadingGuard};
pub use results::search_results;
pub use search_form::{render_search_form, search_form};
