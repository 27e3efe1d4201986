//! Animation driver
//!
//! Writes transition declarations and target values, then watches for
//! completion. Each node gets its own watcher: a transition-end listener
//! counting signal arrivals up to the node's expected count, paired with
//! a fallback timer for the cases where the host never delivers the
//! signal (identical start and end values, visibility changes). The
//! first of the two to complete wins and cancels the other. A shared
//! gauge counts node completions and fires the caller's callback exactly
//! once, no matter how many excess signals arrive.

use std::cell::RefCell;
use std::rc::Rc;

use ripple_dom::{DomEnv, EnvHandle, Event, NodeRef, Selection};
use ripple_events::Registry;

use crate::css;
use crate::duration::Duration;
use crate::easing::Easing;
use crate::properties::PropertySet;
use crate::transform::{get_scale, get_translate};

/// Completion callback for one animate call
pub type CompletionFn = dyn Fn();

/// Extra wait past the declared duration before a watcher gives up on
/// the native signal, in milliseconds.
const TIMEOUT_SLACK_MS: u64 = 200;

/// Options for one animate call
#[derive(Clone, Default)]
pub struct AnimateOptions {
    pub duration: Duration,
    pub easing: Easing,
    pub callback: Option<Rc<CompletionFn>>,
    /// Transform origin written before animating, when set
    pub origin: Option<String>,
}

impl AnimateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, duration: impl Into<Duration>) -> Self {
        self.duration = duration.into();
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_callback<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.callback = Some(Rc::new(callback));
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Exactly-once completion state for one animate call
struct Gauge {
    expected: usize,
    observed: usize,
    fired: bool,
    callback: Rc<CompletionFn>,
}

impl Gauge {
    /// One node completed. Fires the callback at the moment the last
    /// node reports in and never again; borrow is released first so the
    /// callback may start another animation.
    fn node_done(gauge: &Rc<RefCell<Gauge>>) {
        let ready = {
            let mut g = gauge.borrow_mut();
            g.observed += 1;
            if g.observed == g.expected && !g.fired {
                g.fired = true;
                Some(g.callback.clone())
            } else {
                None
            }
        };
        if let Some(callback) = ready {
            callback();
        }
    }
}

/// Per-node watcher state
struct Watcher {
    expected: usize,
    seen: usize,
    done: bool,
    key: Option<ripple_events::ListenerKey>,
    timer: Option<ripple_dom::TimerId>,
}

/// Drives CSS-transition animations over a host environment
#[derive(Clone)]
pub struct Animator {
    env: EnvHandle,
    registry: Registry,
}

impl Animator {
    /// Create an animator over the given environment and registry
    pub fn new(env: EnvHandle, registry: Registry) -> Self {
        Self { env, registry }
    }

    /// Animate every node of the collection toward `props`.
    ///
    /// The transition declaration and the target values are written
    /// together, so the host interpolates from current state. With a
    /// callback set, one watcher per node aggregates completions; with
    /// an empty property set nothing is written or armed and a supplied
    /// callback never fires.
    pub fn animate(&self, sel: &Selection, props: PropertySet, opts: AnimateOptions) {
        if props.expected_signals() == 0 {
            tracing::debug!("empty property set, nothing to animate");
            return;
        }
        self.animate_each(sel, move |_| props.clone(), opts, None);
    }

    /// Animate with a per-node property set, used by the relative
    /// operations where each node's target depends on its own state.
    fn animate_each<P>(
        &self,
        sel: &Selection,
        props_for: P,
        opts: AnimateOptions,
        hook: Option<Rc<dyn Fn(NodeRef)>>,
    ) where
        P: Fn(NodeRef) -> PropertySet,
    {
        let gauge = opts.callback.clone().map(|callback| {
            Rc::new(RefCell::new(Gauge {
                expected: sel.len(),
                observed: 0,
                fired: false,
                callback,
            }))
        });
        let declaration = format!("{} {}", opts.duration.css(), opts.easing.css());
        tracing::debug!(
            "animating {} node(s), transition {:?}",
            sel.len(),
            declaration
        );

        for node in sel {
            let props = props_for(node);
            let expected = props.expected_signals();
            if expected == 0 {
                continue;
            }

            {
                let mut env = self.env.borrow_mut();
                if let Some(origin) = &opts.origin {
                    env.set_style(node, css::TRANSFORM_ORIGIN, origin);
                }
                env.set_style(node, css::TRANSITION, &declaration);
                match &props {
                    PropertySet::Transform(functions) => {
                        env.set_style(node, css::TRANSFORM, &functions.join(" "));
                        env.set_style(node, css::BACKFACE_VISIBILITY, "hidden");
                        env.set_style(node, css::PERSPECTIVE, "1000");
                    }
                    PropertySet::Styles(pairs) => {
                        for (property, value) in pairs {
                            env.set_style(node, property, value);
                        }
                    }
                }
            }

            if gauge.is_some() || hook.is_some() {
                self.arm_watcher(node, expected, opts.duration, gauge.clone(), hook.clone());
            }
        }
    }

    /// Arm one completion watcher: a transition-end listener counting
    /// arrivals plus a fallback timer. Whichever completes first cancels
    /// the other and unbinds only its own listener entry.
    fn arm_watcher(
        &self,
        node: NodeRef,
        expected: usize,
        duration: Duration,
        gauge: Option<Rc<RefCell<Gauge>>>,
        hook: Option<Rc<dyn Fn(NodeRef)>>,
    ) {
        let state = Rc::new(RefCell::new(Watcher {
            expected,
            seen: 0,
            done: false,
            key: None,
            timer: None,
        }));

        let finish: Rc<dyn Fn()> = {
            let state = state.clone();
            let env = self.env.clone();
            let registry = self.registry.clone();
            Rc::new(move || {
                let (key, timer) = {
                    let mut watcher = state.borrow_mut();
                    if watcher.done {
                        return;
                    }
                    watcher.done = true;
                    (watcher.key.take(), watcher.timer.take())
                };
                if let Some(timer) = timer {
                    env.borrow_mut().clear_timer(timer);
                }
                if let Some(key) = key {
                    registry.unbind_key(node, key);
                }
                if let Some(hook) = &hook {
                    hook(node);
                }
                if let Some(gauge) = &gauge {
                    Gauge::node_done(gauge);
                }
            })
        };

        let key = {
            let state = state.clone();
            let finish = finish.clone();
            self.registry.bind_one(
                node,
                css::TRANSITION_END,
                Rc::new(move |_: &Event| {
                    let complete = {
                        let mut watcher = state.borrow_mut();
                        if watcher.done {
                            false
                        } else {
                            watcher.seen += 1;
                            watcher.seen >= watcher.expected
                        }
                    };
                    if complete {
                        finish();
                    }
                }),
                false,
            )
        };
        let timer = {
            let finish = finish.clone();
            let delay = duration.millis() as u64 + TIMEOUT_SLACK_MS;
            self.env.borrow_mut().set_timer(delay, Rc::new(move || finish()))
        };

        let mut watcher = state.borrow_mut();
        watcher.key = Some(key);
        watcher.timer = Some(timer);
    }

    // Transform request-builders. Value shapes here are the host wire
    // contract: translate3d keeps compositing on the GPU path.

    /// Animate to absolute scale factors
    pub fn scale(&self, sel: &Selection, x: f64, y: f64, opts: AnimateOptions) {
        self.animate(sel, PropertySet::transform([format!("scale({},{})", x, y)]), opts);
    }

    /// Animate the horizontal scale factor only
    pub fn scale_x(&self, sel: &Selection, x: f64, opts: AnimateOptions) {
        self.animate(sel, PropertySet::transform([format!("scaleX({})", x)]), opts);
    }

    /// Animate the vertical scale factor only
    pub fn scale_y(&self, sel: &Selection, y: f64, opts: AnimateOptions) {
        self.animate(sel, PropertySet::transform([format!("scaleY({})", y)]), opts);
    }

    /// Multiply each node's current scale by the given factors
    pub fn scale_by(&self, sel: &Selection, fx: f64, fy: f64, opts: AnimateOptions) {
        let env = self.env.clone();
        self.animate_each(
            sel,
            move |node| {
                let current = get_scale(&env, node);
                PropertySet::transform([format!("scale({},{})", current.x * fx, current.y * fy)])
            },
            opts,
            None,
        );
    }

    /// Multiply each node's current horizontal scale by `fx`
    pub fn scale_x_by(&self, sel: &Selection, fx: f64, opts: AnimateOptions) {
        let env = self.env.clone();
        self.animate_each(
            sel,
            move |node| {
                let current = get_scale(&env, node);
                PropertySet::transform([format!("scale({},{})", current.x * fx, current.y)])
            },
            opts,
            None,
        );
    }

    /// Multiply each node's current vertical scale by `fy`
    pub fn scale_y_by(&self, sel: &Selection, fy: f64, opts: AnimateOptions) {
        let env = self.env.clone();
        self.animate_each(
            sel,
            move |node| {
                let current = get_scale(&env, node);
                PropertySet::transform([format!("scale({},{})", current.x, current.y * fy)])
            },
            opts,
            None,
        );
    }

    /// Animate to an absolute translation, in pixels
    pub fn translate(&self, sel: &Selection, x: f64, y: f64, opts: AnimateOptions) {
        self.animate(
            sel,
            PropertySet::transform([format!("translate3d({}px,{}px,0)", x, y)]),
            opts,
        );
    }

    /// Animate the horizontal translation only
    pub fn translate_x(&self, sel: &Selection, x: f64, opts: AnimateOptions) {
        self.animate(
            sel,
            PropertySet::transform([format!("translate3d({}px,0,0)", x)]),
            opts,
        );
    }

    /// Animate the vertical translation only
    pub fn translate_y(&self, sel: &Selection, y: f64, opts: AnimateOptions) {
        self.animate(
            sel,
            PropertySet::transform([format!("translate3d(0,{}px,0)", y)]),
            opts,
        );
    }

    /// Shift each node by the given deltas from its current translation
    pub fn translate_by(&self, sel: &Selection, dx: f64, dy: f64, opts: AnimateOptions) {
        let env = self.env.clone();
        self.animate_each(
            sel,
            move |node| {
                let current = get_translate(&env, node);
                PropertySet::transform([format!(
                    "translate3d({}px,{}px,0)",
                    current.x + dx,
                    current.y + dy
                )])
            },
            opts,
            None,
        );
    }

    /// Shift each node horizontally by `dx` from its current translation
    pub fn translate_x_by(&self, sel: &Selection, dx: f64, opts: AnimateOptions) {
        self.translate_by(sel, dx, 0.0, opts);
    }

    /// Shift each node vertically by `dy` from its current translation
    pub fn translate_y_by(&self, sel: &Selection, dy: f64, opts: AnimateOptions) {
        self.translate_by(sel, 0.0, dy, opts);
    }

    /// Un-hide the nodes, then animate opacity to 1
    pub fn fade_in(&self, sel: &Selection, opts: AnimateOptions) {
        self.show(sel);
        self.animate(sel, PropertySet::styles([("opacity", "1")]), opts);
    }

    /// Animate opacity to 0, hiding each node as it completes.
    ///
    /// The hide is a continuation on the node's own completion watcher,
    /// so it happens whether the native signal or the timeout wins, and
    /// before the aggregate callback fires.
    pub fn fade_out(&self, sel: &Selection, opts: AnimateOptions) {
        let env = self.env.clone();
        let hide: Rc<dyn Fn(NodeRef)> = Rc::new(move |node| {
            env.borrow_mut().set_style(node, "display", "none");
        });
        self.animate_each(
            sel,
            |_| PropertySet::styles([("opacity", "0")]),
            opts,
            Some(hide),
        );
    }

    /// Make the nodes visible immediately
    pub fn show(&self, sel: &Selection) {
        let mut env = self.env.borrow_mut();
        for node in sel {
            env.remove_style(node, "display");
        }
    }

    /// Hide the nodes immediately
    pub fn hide(&self, sel: &Selection) {
        let mut env = self.env.borrow_mut();
        for node in sel {
            env.set_style(node, "display", "none");
        }
    }
}
