// extensions/mod.rs
//
// Animation helpers layered on top of the stage.
// The controller drives them; the mapper never sees them.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, ease};
pub use tween::{Channel, Transition, Tween, TweenLoop, TweenState};
