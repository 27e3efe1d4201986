//! Transform state reader
//!
//! Recovers the current translate/scale offsets from a node's computed
//! transform matrix so relative operations can compose new targets on top
//! of them. Pure reads: an unset transform, or one that does not match
//! the `matrix(a, b, c, d, tx, ty)` pattern, is equivalent to identity
//! and degrades to the identity default rather than erroring.

use ripple_dom::{DomEnv, EnvHandle, NodeRef};

use crate::css;

/// A pair of per-axis components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// Current translation offsets of `node`; `{0, 0}` when unset
pub fn get_translate(env: &EnvHandle, node: NodeRef) -> Vec2 {
    match matrix_components(env, node) {
        Some(m) => Vec2 { x: m[4], y: m[5] },
        None => Vec2 { x: 0.0, y: 0.0 },
    }
}

/// Current scale factors of `node`; `{1, 1}` when unset
pub fn get_scale(env: &EnvHandle, node: NodeRef) -> Vec2 {
    match matrix_components(env, node) {
        Some(m) => Vec2 { x: m[0], y: m[3] },
        None => Vec2 { x: 1.0, y: 1.0 },
    }
}

fn matrix_components(env: &EnvHandle, node: NodeRef) -> Option<[f64; 6]> {
    let value = {
        let env = env.borrow();
        env.computed_style(node, css::TRANSFORM)
            .or_else(|| env.computed_style(node, "transform"))?
    };
    let inner = value.trim().strip_prefix("matrix(")?.strip_suffix(')')?;
    let components: Vec<f64> = inner
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect::<Option<_>>()?;
    components.try_into().ok()
}
