//! Events
//!
//! The value delivered to listener callbacks. Transition-end events carry
//! the name of the CSS property that finished interpolating.

use crate::NodeRef;

/// Name of the transition-end event, as the rendering host spells it.
pub const TRANSITION_END: &str = "webkitTransitionEnd";

/// An event as seen by listener callbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event name ("click", "webkitTransitionEnd", ...)
    pub name: String,
    /// Node the event originated on; propagation does not change it
    pub target: NodeRef,
    /// Finished property name, for transition-end events
    pub property: Option<String>,
}

impl Event {
    /// Create a plain event targeting `node`
    pub fn new(name: &str, target: NodeRef) -> Self {
        Self {
            name: name.to_string(),
            target,
            property: None,
        }
    }

    /// Create a transition-end event for one finished property
    pub fn transition_end(target: NodeRef, property: &str) -> Self {
        Self {
            name: TRANSITION_END.to_string(),
            target,
            property: Some(property.to_string()),
        }
    }
}
