//! Environment trait
//!
//! What the utility crates need from a rendering host: style access, a
//! parent link for event propagation, notification hooks for native
//! listener attachment, and one-shot timers. Everything runs on a single
//! cooperative event loop, so the handle type is `Rc<RefCell<_>>` rather
//! than anything thread-aware.

use std::cell::RefCell;
use std::rc::Rc;

use crate::NodeRef;

/// One-shot timer callback
pub type TimerFn = dyn Fn();

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Shared handle to the host environment
pub type EnvHandle = Rc<RefCell<dyn DomEnv>>;

/// Host environment contract
///
/// Binding or styling a node the host does not know is permitted and must
/// not panic; hosts treat unknown nodes as detached and ignore them.
pub trait DomEnv {
    /// Parent of `node`, or `None` at the root or for detached nodes
    fn parent(&self, node: NodeRef) -> Option<NodeRef>;

    /// Write one inline style declaration
    fn set_style(&mut self, node: NodeRef, property: &str, value: &str);

    /// Remove one inline style declaration
    fn remove_style(&mut self, node: NodeRef, property: &str);

    /// Computed value of a style property, if the host has one
    fn computed_style(&self, node: NodeRef, property: &str) -> Option<String>;

    /// A listener was registered with the native event system
    fn attach(&mut self, node: NodeRef, event: &str, capture: bool);

    /// A listener was removed from the native event system
    fn detach(&mut self, node: NodeRef, event: &str, capture: bool);

    /// Schedule a one-shot timer `delay_ms` from now
    fn set_timer(&mut self, delay_ms: u64, callback: Rc<TimerFn>) -> TimerId;

    /// Cancel a scheduled timer; no-op if it already fired or was cleared
    fn clear_timer(&mut self, timer: TimerId);
}
