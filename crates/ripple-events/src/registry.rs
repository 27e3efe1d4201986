//! Listener registry
//!
//! Per-node tables of registered callbacks, keyed by a synthetic element
//! id assigned lazily on first bind. Entries live in a `BTreeMap` under a
//! stable sequence key, so removal by key never shifts the entries around
//! it and callbacks may bind or unbind re-entrantly during dispatch.
//!
//! Nodes the registry has seen are never proactively pruned: a node that
//! leaves the host document keeps its stale entries until they are
//! unbound. Callers that bind short-lived nodes unbind them themselves.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use ripple_dom::{DomEnv, EnvHandle, Event, NodeRef, Selection};

/// Listener callback
pub type EventFn = dyn Fn(&Event);

/// Synthetic id the registry assigns to each node it has seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

/// Stable key of one listener entry on one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerKey(u32);

struct ListenerEntry {
    event: String,
    callback: Rc<EventFn>,
    capture: bool,
}

#[derive(Default)]
struct Table {
    next_key: u32,
    entries: BTreeMap<u32, ListenerEntry>,
}

#[derive(Default)]
struct Inner {
    ids: HashMap<NodeRef, ElementId>,
    next_id: u64,
    tables: HashMap<ElementId, Table>,
}

impl Inner {
    fn id_of(&self, node: NodeRef) -> Option<ElementId> {
        self.ids.get(&node).copied()
    }

    fn assign_id(&mut self, node: NodeRef) -> ElementId {
        if let Some(id) = self.ids.get(&node) {
            return *id;
        }
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.ids.insert(node, id);
        id
    }
}

/// Shared, clonable registry handle
///
/// Owned by the embedding runtime and injected into whatever needs it;
/// independent registries stay fully isolated.
#[derive(Clone)]
pub struct Registry {
    env: EnvHandle,
    inner: Rc<RefCell<Inner>>,
}

impl Registry {
    /// Create a registry over the given host environment
    pub fn new(env: EnvHandle) -> Self {
        Self { env, inner: Rc::new(RefCell::new(Inner::default())) }
    }

    /// Synthetic id of `node`, if the registry has seen it
    pub fn element_id(&self, node: NodeRef) -> Option<ElementId> {
        self.inner.borrow().id_of(node)
    }

    /// Live listener entries currently held for `node`
    pub fn bound_count(&self, node: NodeRef) -> usize {
        let inner = self.inner.borrow();
        inner
            .id_of(node)
            .and_then(|id| inner.tables.get(&id))
            .map_or(0, |table| table.entries.len())
    }

    /// Bind `callback` to `event` on every node of the collection.
    ///
    /// Returns the collection so further calls can be chained.
    pub fn bind<'a, F>(
        &self,
        sel: &'a Selection,
        event: &str,
        callback: F,
        capture: bool,
    ) -> &'a Selection
    where
        F: Fn(&Event) + 'static,
    {
        let callback: Rc<EventFn> = Rc::new(callback);
        for node in sel {
            self.bind_one(node, event, callback.clone(), capture);
        }
        tracing::debug!("bound {} on {} node(s)", event, sel.len());
        sel
    }

    /// Bind a single callback to a single node, returning its removal key
    pub fn bind_one(
        &self,
        node: NodeRef,
        event: &str,
        callback: Rc<EventFn>,
        capture: bool,
    ) -> ListenerKey {
        let key = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.assign_id(node);
            let table = inner.tables.entry(id).or_default();
            let key = table.next_key;
            table.next_key += 1;
            table.entries.insert(
                key,
                ListenerEntry { event: event.to_string(), callback, capture },
            );
            ListenerKey(key)
        };
        self.env.borrow_mut().attach(node, event, capture);
        key
    }

    /// Remove listener entries from every node of the collection.
    ///
    /// With `Some(event)` only entries for that event are removed; with
    /// `None` all entries go. Nodes with nothing bound are skipped.
    pub fn unbind<'a>(&self, sel: &'a Selection, event: Option<&str>) -> &'a Selection {
        for node in sel {
            let removed = {
                let mut inner = self.inner.borrow_mut();
                let Some(id) = inner.id_of(node) else { continue };
                let Some(table) = inner.tables.get_mut(&id) else { continue };
                let keys: Vec<u32> = table
                    .entries
                    .iter()
                    .filter(|(_, entry)| event.is_none_or(|name| entry.event == name))
                    .map(|(key, _)| *key)
                    .collect();
                keys.into_iter()
                    .filter_map(|key| table.entries.remove(&key))
                    .collect::<Vec<_>>()
            };
            let mut env = self.env.borrow_mut();
            for entry in &removed {
                env.detach(node, &entry.event, entry.capture);
            }
        }
        tracing::debug!("unbound {} on {} node(s)", event.unwrap_or("*"), sel.len());
        sel
    }

    /// Remove one listener entry by its key; no-op if it is already gone
    pub fn unbind_key(&self, node: NodeRef, key: ListenerKey) {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            inner
                .id_of(node)
                .and_then(|id| inner.tables.get_mut(&id))
                .and_then(|table| table.entries.remove(&key.0))
        };
        if let Some(entry) = removed {
            self.env.borrow_mut().detach(node, &entry.event, entry.capture);
        }
    }

    /// Dispatch an event through the capture and bubble phases.
    ///
    /// Capture listeners on the target's ancestors run root-first, then
    /// every listener on the target in registration order, then bubble
    /// listeners ancestors-up. Callback sets are snapshotted per node
    /// before invocation, so re-entrant binds and unbinds are safe.
    pub fn dispatch(&self, event: &Event) {
        let path = self.path_to_root(event.target);

        for node in path.iter().rev() {
            if *node != event.target {
                self.deliver(*node, event, Some(true));
            }
        }
        self.deliver(event.target, event, None);
        for node in &path[1..] {
            self.deliver(*node, event, Some(false));
        }
    }

    /// Synthesize and dispatch `event` on every node of the collection
    pub fn trigger<'a>(&self, sel: &'a Selection, event: &str) -> &'a Selection {
        for node in sel {
            self.dispatch(&Event::new(event, node));
        }
        sel
    }

    /// Container-level binding: `callback` runs only for events whose
    /// target satisfies `filter` and sits inside the bound container.
    pub fn delegate<'a, F, C>(
        &self,
        sel: &'a Selection,
        event: &str,
        filter: F,
        callback: C,
    ) -> &'a Selection
    where
        F: Fn(NodeRef) -> bool + 'static,
        C: Fn(&Event) + 'static,
    {
        let filter: Rc<dyn Fn(NodeRef) -> bool> = Rc::new(filter);
        let callback: Rc<EventFn> = Rc::new(callback);
        for container in sel {
            let env = self.env.clone();
            let filter = filter.clone();
            let callback = callback.clone();
            let handler: Rc<EventFn> = Rc::new(move |evt: &Event| {
                if !filter(evt.target) {
                    return;
                }
                if contains(&env, container, evt.target) {
                    callback(evt);
                }
            });
            self.bind_one(container, event, handler, false);
        }
        sel
    }

    fn path_to_root(&self, node: NodeRef) -> Vec<NodeRef> {
        let env = self.env.borrow();
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = env.parent(current) {
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Invoke the callbacks registered on `node` for this event. `phase`
    /// selects capture or bubble entries; `None` (at-target) takes both.
    fn deliver(&self, node: NodeRef, event: &Event, phase: Option<bool>) {
        let callbacks: Vec<Rc<EventFn>> = {
            let inner = self.inner.borrow();
            let Some(id) = inner.id_of(node) else { return };
            let Some(table) = inner.tables.get(&id) else { return };
            table
                .entries
                .values()
                .filter(|entry| {
                    entry.event == event.name
                        && phase.is_none_or(|capture| entry.capture == capture)
                })
                .map(|entry| entry.callback.clone())
                .collect()
        };
        for callback in callbacks {
            callback(event);
        }
    }
}

fn contains(env: &EnvHandle, ancestor: NodeRef, node: NodeRef) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if n == ancestor {
            return true;
        }
        current = env.borrow().parent(n);
    }
    false
}
