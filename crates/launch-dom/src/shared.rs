//! Shared access to a document from async tasks.
//!
//! The document is the only state shared between the page and in-flight
//! requests. Callers take the lock for a batch of mutations and must release
//! it before awaiting.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Document, DomError, NodeId};

/// Cloneable handle to one `Document`.
#[derive(Clone, Default)]
pub struct SharedDocument {
    inner: Arc<Mutex<Document>>,
}

impl SharedDocument {
    /// Create a handle around a fresh document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to the document.
    pub fn with<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// The `<body>` element.
    pub fn body(&self) -> NodeId {
        self.inner.lock().body()
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        let doc = self.inner.lock();
        doc.outer_html(doc.body())
    }

    /// Dispatch a submit event to a form's handlers.
    ///
    /// Handlers run after the lock is released, so they may use this handle.
    pub fn submit(&self, form: NodeId) -> Result<(), DomError> {
        let (event, handlers) = self.inner.lock().prepare_submit(form)?;
        tracing::debug!("Submitting {:?} to {} handler(s)", form, handlers.len());
        for handler in handlers {
            handler(&event);
        }
        Ok(())
    }

    /// Click a button.
    ///
    /// A disabled button does nothing. Otherwise the enclosing form, if any,
    /// is submitted. Returns whether a submit was dispatched.
    pub fn click(&self, button: NodeId) -> Result<bool, DomError> {
        let form = {
            let doc = self.inner.lock();
            if !doc.contains(button) {
                return Err(DomError::StaleNode(button));
            }
            if doc.has_attribute(button, "disabled") {
                tracing::debug!("Ignoring click on disabled button {:?}", button);
                return Ok(false);
            }
            doc.closest(button, "form")
        };

        match form {
            Some(form) => {
                self.submit(form)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl fmt::Debug for SharedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedDocument").field(&*self.inner.lock()).finish()
    }
}
