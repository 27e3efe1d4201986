//! ripple-events - Listener registry
//!
//! Remembers which callbacks were attached to which nodes so they can be
//! selectively removed later, and dispatches events through the capture
//! and bubble phases of the node's ancestor chain.

mod registry;

pub use registry::{ElementId, EventFn, ListenerKey, Registry};
