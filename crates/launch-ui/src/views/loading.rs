//! Loading state.
//!
//! While a request is in flight the container holds exactly one `.loading`
//! element and the form's button is disabled. Both toggles are no-ops when
//! the page is already in the requested state.

use launch_dom::{Document, DomError, Element, NodeId, SharedDocument};

/// Show the loading indicator in `container` and disable the form's button.
pub fn set_loading(
    doc: &mut Document,
    container: NodeId,
    form: Option<NodeId>,
    message: &str,
) -> Result<(), DomError> {
    if doc.query_selector(container, ".loading")?.is_none() {
        doc.append(container, Element::new("div").class("loading").child(message))?;
    }

    let Some(form) = form else {
        return Ok(());
    };

    if let Some(button) = doc.query_selector(form, "button")? {
        doc.set_attribute(button, "disabled", "disabled")?;
    }
    Ok(())
}

/// Remove the loading indicator from `container` and re-enable the form's
/// button.
pub fn set_not_loading(
    doc: &mut Document,
    container: NodeId,
    form: Option<NodeId>,
) -> Result<(), DomError> {
    if let Some(loading) = doc.query_selector(container, ".loading")? {
        doc.remove(loading)?;
    }

    let Some(form) = form else {
        return Ok(());
    };

    if let Some(button) = doc.query_selector(form, "button[disabled]")? {
        doc.remove_attribute(button, "disabled")?;
    }
    Ok(())
}

/// Holds the page in the loading state until dropped.
///
/// Dropping the guard leaves the loading state on every exit path, including
/// early returns and unwinding. `disarm` drops it without touching the page,
/// for a request that a newer one has superseded.
#[derive(Debug)]
pub struct LoadingGuard {
    doc: SharedDocument,
    container: NodeId,
    form: Option<NodeId>,
    armed: bool,
}

impl LoadingGuard {
    /// Enter the loading state.
    pub fn enter(
        doc: &SharedDocument,
        container: NodeId,
        form: Option<NodeId>,
        message: &str,
    ) -> Result<Self, DomError> {
        doc.with(|d| set_loading(d, container, form, message))?;
        Ok(Self {
            doc: doc.clone(),
            container,
            form,
            armed: true,
        })
    }

    /// Drop without leaving the loading state.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = self
            .doc
            .with(|d| set_not_loading(d, self.container, self.form))
        {
            tracing::warn!("Failed to clear loading state: {}", e);
        }
    }
}
