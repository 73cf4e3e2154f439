//! Error types for document operations.

use thiserror::Error;

use crate::NodeId;

/// Document errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The selector uses syntax that is not supported.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// The node was removed from the document.
    #[error("Node {0:?} is no longer in the document")]
    StaleNode(NodeId),

    /// Text nodes have no attributes or children.
    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// The document root cannot be removed.
    #[error("Cannot remove the document root")]
    RootRemoval,
}
