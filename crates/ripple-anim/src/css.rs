//! Style property names written to the rendering host.
//!
//! These spellings, together with the value shapes
//! `"<duration> <easing>"`, `"translate3d(Xpx,Ypx,0)"` and `"scale(X,Y)"`,
//! are the wire contract with the host and must match it exactly.

pub use ripple_dom::TRANSITION_END;

pub const TRANSITION: &str = "-webkit-transition";
pub const TRANSFORM: &str = "-webkit-transform";
pub const TRANSFORM_ORIGIN: &str = "-webkit-transform-origin";
pub const BACKFACE_VISIBILITY: &str = "-webkit-backface-visibility";
pub const PERSPECTIVE: &str = "-webkit-perspective";
