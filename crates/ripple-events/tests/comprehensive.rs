//! Comprehensive tests for ripple-events
//!
//! Bind/unbind bookkeeping, dispatch phases, triggering and delegation
//! against the in-memory host.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ripple_dom::{Event, MemoryDom, NodeRef, Selection};
use ripple_events::Registry;

fn setup() -> (Rc<RefCell<MemoryDom>>, Registry) {
    let dom = Rc::new(RefCell::new(MemoryDom::new()));
    let registry = Registry::new(dom.clone());
    (dom, registry)
}

fn counter() -> (Rc<Cell<u32>>, impl Fn(&Event)) {
    let count = Rc::new(Cell::new(0));
    let cb = {
        let count = count.clone();
        move |_: &Event| count.set(count.get() + 1)
    };
    (count, cb)
}

#[test]
fn test_bind_and_dispatch() {
    let (dom, registry) = setup();
    let button = dom.borrow_mut().create_element();
    let sel = Selection::one(button);
    let (count, cb) = counter();

    registry.bind(&sel, "click", cb, false);
    assert_eq!(dom.borrow().listener_count(button, "click"), 1);

    registry.dispatch(&Event::new("click", button));
    registry.dispatch(&Event::new("click", button));
    assert_eq!(count.get(), 2);

    // Unrelated events do not reach the callback
    registry.dispatch(&Event::new("focus", button));
    assert_eq!(count.get(), 2);
}

#[test]
fn test_bind_over_collection() {
    let (dom, registry) = setup();
    let nodes: Vec<NodeRef> = {
        let mut d = dom.borrow_mut();
        (0..3).map(|_| d.create_element()).collect()
    };
    let sel: Selection = nodes.iter().copied().collect();
    let (count, cb) = counter();

    registry.bind(&sel, "click", cb, false);
    for node in &nodes {
        registry.dispatch(&Event::new("click", *node));
    }
    assert_eq!(count.get(), 3, "one invocation per node");
}

#[test]
fn test_selective_unbind_keeps_other_events() {
    let (dom, registry) = setup();
    let button = dom.borrow_mut().create_element();
    let sel = Selection::one(button);
    let (clicks, click_cb) = counter();
    let (focuses, focus_cb) = counter();

    registry.bind(&sel, "click", click_cb, false);
    registry.bind(&sel, "focus", focus_cb, false);

    registry.unbind(&sel, Some("click"));
    assert_eq!(dom.borrow().listener_count(button, "click"), 0);
    assert_eq!(dom.borrow().listener_count(button, "focus"), 1);

    registry.dispatch(&Event::new("click", button));
    registry.dispatch(&Event::new("focus", button));
    assert_eq!(clicks.get(), 0, "unbound event must not fire");
    assert_eq!(focuses.get(), 1, "other events remain dispatchable");
}

#[test]
fn test_unbind_all() {
    let (dom, registry) = setup();
    let button = dom.borrow_mut().create_element();
    let sel = Selection::one(button);
    let (count, cb) = counter();
    let (count2, cb2) = counter();

    registry.bind(&sel, "click", cb, false);
    registry.bind(&sel, "focus", cb2, true);

    registry.unbind(&sel, None);
    assert_eq!(registry.bound_count(button), 0);

    registry.dispatch(&Event::new("click", button));
    registry.dispatch(&Event::new("focus", button));
    assert_eq!(count.get(), 0);
    assert_eq!(count2.get(), 0);
}

#[test]
fn test_trigger_synthesizes_events() {
    let (dom, registry) = setup();
    let nodes: Vec<NodeRef> = {
        let mut d = dom.borrow_mut();
        (0..2).map(|_| d.create_element()).collect()
    };
    let sel: Selection = nodes.iter().copied().collect();

    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        registry.bind(&sel, "swipeleft", move |evt| seen.borrow_mut().push(evt.target), false);
    }

    registry.trigger(&sel, "swipeleft");
    assert_eq!(*seen.borrow(), nodes);
}

#[test]
fn test_bubble_reaches_ancestors() {
    let (dom, registry) = setup();
    let (body, button) = {
        let mut d = dom.borrow_mut();
        let body = d.create_element();
        let button = d.create_child(body);
        (body, button)
    };
    let (count, cb) = counter();

    registry.bind(&Selection::one(body), "click", cb, false);
    registry.dispatch(&Event::new("click", button));
    assert_eq!(count.get(), 1, "bubble phase must reach the parent");
}

#[test]
fn test_capture_runs_before_target() {
    let (dom, registry) = setup();
    let (body, button) = {
        let mut d = dom.borrow_mut();
        let body = d.create_element();
        let button = d.create_child(body);
        (body, button)
    };

    let order = Rc::new(RefCell::new(Vec::new()));
    {
        let order = order.clone();
        registry.bind(&Selection::one(body), "click", move |_| order.borrow_mut().push("capture"), true);
    }
    {
        let order = order.clone();
        registry.bind(&Selection::one(button), "click", move |_| order.borrow_mut().push("target"), false);
    }
    {
        let order = order.clone();
        registry.bind(&Selection::one(body), "click", move |_| order.borrow_mut().push("bubble"), false);
    }

    registry.dispatch(&Event::new("click", button));
    assert_eq!(*order.borrow(), vec!["capture", "target", "bubble"]);
}

#[test]
fn test_delegate_filters_by_target_and_containment() {
    let (dom, registry) = setup();
    let (body, inside, outside) = {
        let mut d = dom.borrow_mut();
        let body = d.create_element();
        let inside = d.create_child(body);
        let outside = d.create_element();
        (body, inside, outside)
    };

    let hits = Rc::new(RefCell::new(Vec::new()));
    {
        let hits = hits.clone();
        registry.delegate(
            &Selection::one(body),
            "click",
            move |target| target == inside || target == outside,
            move |evt| hits.borrow_mut().push(evt.target),
        );
    }

    registry.dispatch(&Event::new("click", inside));
    registry.dispatch(&Event::new("click", outside));
    registry.dispatch(&Event::new("click", body));

    assert_eq!(*hits.borrow(), vec![inside], "only contained, matching targets");
}

#[test]
fn test_callback_may_unbind_itself_during_dispatch() {
    let (dom, registry) = setup();
    let button = dom.borrow_mut().create_element();
    let sel = Selection::one(button);
    let count = Rc::new(Cell::new(0));

    {
        let count = count.clone();
        let registry2 = registry.clone();
        let sel2 = sel.clone();
        registry.bind(
            &sel,
            "click",
            move |_| {
                count.set(count.get() + 1);
                registry2.unbind(&sel2, Some("click"));
            },
            false,
        );
    }

    registry.dispatch(&Event::new("click", button));
    registry.dispatch(&Event::new("click", button));
    assert_eq!(count.get(), 1, "self-unbinding callback runs once");
    assert_eq!(registry.bound_count(button), 0);
}

#[test]
fn test_callback_may_bind_during_dispatch() {
    let (dom, registry) = setup();
    let button = dom.borrow_mut().create_element();
    let sel = Selection::one(button);
    let (nested, nested_cb) = counter();
    let nested_cb = Rc::new(nested_cb);

    {
        let registry2 = registry.clone();
        let sel2 = sel.clone();
        registry.bind(
            &sel,
            "click",
            move |_| {
                let nested_cb = nested_cb.clone();
                registry2.bind(&sel2, "focus", move |e| nested_cb(e), false);
            },
            false,
        );
    }

    registry.dispatch(&Event::new("click", button));
    registry.dispatch(&Event::new("focus", button));
    assert_eq!(nested.get(), 1);
}

#[test]
fn test_binding_detached_node_is_permitted() {
    let (_dom, registry) = setup();
    let ghost = NodeRef(1234);
    let sel = Selection::one(ghost);
    let (count, cb) = counter();

    registry.bind(&sel, "click", cb, false);
    assert_eq!(registry.bound_count(ghost), 1, "entry exists even for unknown nodes");

    registry.dispatch(&Event::new("click", ghost));
    assert_eq!(count.get(), 1);
}
