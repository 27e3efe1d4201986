//! In-memory host environment
//!
//! A deterministic [`DomEnv`] for tests and headless embedding: a parent-link
//! tree, per-node inline styles, native-attachment bookkeeping and a
//! manual-clock timer queue driven by [`MemoryDom::advance`].
//!
//! Like a real rendering host, the computed value of the transform property
//! is normalized to the `matrix(a, b, c, d, tx, ty)` form regardless of the
//! declaration that was written.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::env::{DomEnv, TimerFn, TimerId};
use crate::NodeRef;

const TRANSFORM_PROPERTIES: [&str; 2] = ["-webkit-transform", "transform"];

struct TimerSlot {
    due: u64,
    callback: Rc<TimerFn>,
}

/// In-memory DOM-like host
#[derive(Default)]
pub struct MemoryDom {
    parents: HashMap<NodeRef, Option<NodeRef>>,
    styles: HashMap<NodeRef, BTreeMap<String, String>>,
    attached: HashMap<(NodeRef, String, bool), usize>,
    timers: BTreeMap<TimerId, TimerSlot>,
    next_node: u64,
    next_timer: u64,
    now: u64,
}

impl MemoryDom {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached root-level element
    pub fn create_element(&mut self) -> NodeRef {
        self.next_node += 1;
        let node = NodeRef(self.next_node);
        self.parents.insert(node, None);
        node
    }

    /// Create an element parented under `parent`
    pub fn create_child(&mut self, parent: NodeRef) -> NodeRef {
        let node = self.create_element();
        self.parents.insert(node, Some(parent));
        node
    }

    /// Raw inline style value, exactly as written
    pub fn style(&self, node: NodeRef, property: &str) -> Option<&str> {
        self.styles.get(&node)?.get(property).map(String::as_str)
    }

    /// Number of native listeners currently attached for `event` on `node`
    pub fn listener_count(&self, node: NodeRef, event: &str) -> usize {
        [false, true]
            .iter()
            .filter_map(|capture| {
                self.attached.get(&(node, event.to_string(), *capture))
            })
            .sum()
    }

    /// Timers scheduled but not yet fired or cleared
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Current value of the manual clock, in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Advance the manual clock, firing every timer that comes due.
    ///
    /// Takes the shared handle rather than `&mut self` so that timer
    /// callbacks can re-enter the host (schedule timers, write styles).
    pub fn advance(env: &Rc<RefCell<Self>>, ms: u64) {
        let due = {
            let mut host = env.borrow_mut();
            host.now += ms;
            let now = host.now;
            let ready: Vec<TimerId> = host
                .timers
                .iter()
                .filter(|(_, slot)| slot.due <= now)
                .map(|(id, _)| *id)
                .collect();
            let mut slots: Vec<TimerSlot> = ready
                .into_iter()
                .filter_map(|id| host.timers.remove(&id))
                .collect();
            slots.sort_by_key(|slot| slot.due);
            slots
        };
        for slot in due {
            (slot.callback)();
        }
    }
}

impl DomEnv for MemoryDom {
    fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.parents.get(&node).copied().flatten()
    }

    fn set_style(&mut self, node: NodeRef, property: &str, value: &str) {
        if !self.parents.contains_key(&node) {
            return;
        }
        self.styles
            .entry(node)
            .or_default()
            .insert(property.to_string(), value.to_string());
    }

    fn remove_style(&mut self, node: NodeRef, property: &str) {
        if let Some(styles) = self.styles.get_mut(&node) {
            styles.remove(property);
        }
    }

    fn computed_style(&self, node: NodeRef, property: &str) -> Option<String> {
        let styles = self.styles.get(&node)?;
        if TRANSFORM_PROPERTIES.contains(&property) {
            let declared = TRANSFORM_PROPERTIES
                .iter()
                .find_map(|key| styles.get(*key))?;
            return Some(
                Affine::from_declaration(declared)
                    .map(|m| m.css())
                    .unwrap_or_else(|| declared.clone()),
            );
        }
        styles.get(property).cloned()
    }

    fn attach(&mut self, node: NodeRef, event: &str, capture: bool) {
        *self
            .attached
            .entry((node, event.to_string(), capture))
            .or_insert(0) += 1;
    }

    fn detach(&mut self, node: NodeRef, event: &str, capture: bool) {
        if let Some(count) = self.attached.get_mut(&(node, event.to_string(), capture)) {
            *count = count.saturating_sub(1);
        }
    }

    fn set_timer(&mut self, delay_ms: u64, callback: Rc<TimerFn>) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        let due = self.now + delay_ms;
        self.timers.insert(id, TimerSlot { due, callback });
        tracing::trace!("timer {:?} armed for t={}", id, due);
        id
    }

    fn clear_timer(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }
}

/// 2D affine transform in CSS matrix component order
#[derive(Debug, Clone, Copy, PartialEq)]
struct Affine {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    tx: f64,
    ty: f64,
}

impl Affine {
    const IDENTITY: Affine = Affine { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 };

    fn translate(&mut self, x: f64, y: f64) {
        self.tx += self.a * x + self.c * y;
        self.ty += self.b * x + self.d * y;
    }

    fn scale(&mut self, x: f64, y: f64) {
        self.a *= x;
        self.b *= x;
        self.c *= y;
        self.d *= y;
    }

    /// Parse a transform declaration: either a matrix literal or a
    /// space-separated list of transform functions. `None` when any part
    /// is not understood.
    fn from_declaration(decl: &str) -> Option<Affine> {
        let decl = decl.trim();
        if decl == "none" || decl.is_empty() {
            return Some(Affine::IDENTITY);
        }

        let mut matrix = Affine::IDENTITY;
        for part in decl.split(')') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (name, args) = part.split_once('(')?;
            let args: Vec<f64> = args
                .split(',')
                .map(parse_component)
                .collect::<Option<Vec<f64>>>()?;
            match (name.trim(), args.as_slice()) {
                ("matrix", [a, b, c, d, tx, ty]) => {
                    matrix = Affine { a: *a, b: *b, c: *c, d: *d, tx: *tx, ty: *ty };
                }
                ("translate3d", [x, y, _z]) => matrix.translate(*x, *y),
                ("translate", [x, y]) => matrix.translate(*x, *y),
                ("translate", [x]) => matrix.translate(*x, 0.0),
                ("translateX", [x]) => matrix.translate(*x, 0.0),
                ("translateY", [y]) => matrix.translate(0.0, *y),
                ("scale", [x, y]) => matrix.scale(*x, *y),
                ("scale", [s]) => matrix.scale(*s, *s),
                ("scaleX", [x]) => matrix.scale(*x, 1.0),
                ("scaleY", [y]) => matrix.scale(1.0, *y),
                _ => return None,
            }
        }
        Some(matrix)
    }

    /// Computed-style textual form
    fn css(&self) -> String {
        format!(
            "matrix({}, {}, {}, {}, {}, {})",
            self.a, self.b, self.c, self.d, self.tx, self.ty
        )
    }
}

fn parse_component(raw: &str) -> Option<f64> {
    raw.trim().trim_end_matches("px").parse().ok()
}
