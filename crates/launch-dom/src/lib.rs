//! Element builder and document tree for the launch search page.
//!
//! This crate provides the small slice of a browser DOM the views need:
//! - `el` / `Element` for building detached node trees
//! - `Document`, an arena of mounted nodes with query and mutation helpers
//! - `Selector`, a compound selector (`tag.class[attr=value]`)
//! - Submit events and `SharedDocument` for async access

mod document;
mod element;
mod error;
mod event;
mod selector;
mod shared;

pub use document::{Document, NodeId};
pub use element::{el, Element, Node, NO_ATTRS};
pub use error::DomError;
pub use event::{SubmitEvent, SubmitHandler};
pub use selector::Selector;
pub use shared::SharedDocument;
