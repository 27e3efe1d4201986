//! ripple-dom - Host environment seam
//!
//! Handles, collections and the environment trait the ripple utility
//! crates are written against. The crate does not implement a document
//! model of its own; a real embedder supplies style access, native event
//! attachment and timers through [`DomEnv`]. [`MemoryDom`] is a
//! deterministic in-memory host for tests and headless use.

mod env;
mod event;
mod memory;
mod selection;

pub use env::{DomEnv, EnvHandle, TimerFn, TimerId};
pub use event::{Event, TRANSITION_END};
pub use memory::MemoryDom;
pub use selection::Selection;

/// Node handle issued by the host environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(pub u64);
