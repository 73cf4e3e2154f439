//! Submit events.

use std::sync::Arc;

use crate::NodeId;

/// Handler attached to a form's submit event.
pub type SubmitHandler = Arc<dyn Fn(&SubmitEvent) + Send + Sync>;

/// A form submission with the form's named input values at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    form: NodeId,
    values: Vec<(String, String)>,
}

impl SubmitEvent {
    pub fn new(form: NodeId, values: Vec<(String, String)>) -> Self {
        Self { form, values }
    }

    /// The submitted form.
    pub fn form(&self) -> NodeId {
        self.form
    }

    /// Value of the first input with the given name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
