//! Headless animation primitives.
//!
//! Nothing in here knows about the terminal. Values are interpolated over
//! wall-clock time and sampled by whoever renders them.

mod easing;
mod lerp;
mod transition;

pub use easing::Easing;
pub use lerp::{Lerp, Point, Rgb};
pub use transition::Transition;
