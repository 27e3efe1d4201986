//! ripple-anim - CSS-transition animation driver
//!
//! Applies style-transition declarations to node collections and reports
//! exactly-once completion: each node owes one transition-end signal per
//! animated property (or exactly one for a combined transform), a shared
//! gauge counts node completions, and a fallback timer covers hosts that
//! never deliver the native signal. A transform state reader recovers the
//! current translate/scale offsets for the relative operations.

pub mod css;

mod driver;
mod duration;
mod easing;
mod properties;
mod transform;

pub use driver::{AnimateOptions, Animator, CompletionFn};
pub use duration::{Duration, DurationError};
pub use easing::Easing;
pub use properties::PropertySet;
pub use transform::{Vec2, get_scale, get_translate};
