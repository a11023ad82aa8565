//! Plain visual state for the button and the status banner.
//!
//! These are the values the sequencer animates. They carry no terminal
//! types; the UI layer turns them into cells.

use crate::anim::{Lerp, Point, Rgb};

pub const BUTTON_IDLE_COLOR: Rgb = Rgb::new(0.63, 0.84, 0.35);
pub const BUTTON_BUSY_COLOR: Rgb = Rgb::new(0.85, 0.83, 0.45);
pub const STATUS_TEXT_COLOR: Rgb = Rgb::new(0.89, 0.38, 0.0);

/// Extra columns the button grows by while a login is in progress
pub const BUSY_EXTRA_WIDTH: f64 = 8.0;
/// Rows the button drops by while a login is in progress
pub const BUSY_DROP: f64 = 2.0;

const SPINNER_HIDDEN_X: f64 = -2.0;
const SPINNER_BUSY_X: f64 = 2.0;

/// Login button, relative to its resting layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonVisual {
    pub extra_width: f64,
    pub drop: f64,
    pub color: Rgb,
    /// Spinner column relative to the button's left edge
    pub spinner_x: f64,
    pub spinner_alpha: f64,
}

impl ButtonVisual {
    pub fn idle() -> Self {
        Self {
            extra_width: 0.0,
            drop: 0.0,
            color: BUTTON_IDLE_COLOR,
            spinner_x: SPINNER_HIDDEN_X,
            spinner_alpha: 0.0,
        }
    }

    pub fn busy(&self) -> Self {
        Self {
            extra_width: self.extra_width + BUSY_EXTRA_WIDTH,
            drop: self.drop + BUSY_DROP,
            color: BUTTON_BUSY_COLOR,
            spinner_x: SPINNER_BUSY_X,
            spinner_alpha: 1.0,
        }
    }

    pub fn spinner_visible(&self) -> bool {
        self.spinner_alpha > 0.5 && self.spinner_x >= 0.0
    }
}

impl Default for ButtonVisual {
    fn default() -> Self {
        Self::idle()
    }
}

impl Lerp for ButtonVisual {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            extra_width: self.extra_width.lerp(&to.extra_width, t),
            drop: self.drop.lerp(&to.drop, t),
            color: self.color.lerp(&to.color, t),
            spinner_x: self.spinner_x.lerp(&to.spinner_x, t),
            spinner_alpha: self.spinner_alpha.lerp(&to.spinner_alpha, t).clamp(0.0, 1.0),
        }
    }
}

/// Status banner in absolute screen cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerVisual {
    pub center: Point,
    /// Flip progress, 0.0 = folded away, 1.0 = fully shown
    pub reveal: f64,
    pub alpha: f64,
}

impl BannerVisual {
    pub fn hidden_at(anchor: Point) -> Self {
        Self {
            center: anchor,
            reveal: 0.0,
            alpha: 1.0,
        }
    }

    pub fn shown_at(anchor: Point) -> Self {
        Self {
            center: anchor,
            reveal: 1.0,
            alpha: 1.0,
        }
    }

    pub fn slid_by(&self, dx: f64) -> Self {
        Self {
            center: self.center.offset(dx, 0.0),
            ..*self
        }
    }

    pub fn faded_at(anchor: Point) -> Self {
        Self {
            center: anchor,
            reveal: 1.0,
            alpha: 0.0,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.reveal <= 0.0 || self.alpha <= 0.0
    }
}

impl Lerp for BannerVisual {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            center: self.center.lerp(&to.center, t),
            reveal: self.reveal.lerp(&to.reveal, t).clamp(0.0, 1.0),
            alpha: self.alpha.lerp(&to.alpha, t).clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_then_idle_round_trips() {
        let idle = ButtonVisual::idle();
        let busy = idle.busy();
        assert_eq!(busy.extra_width, BUSY_EXTRA_WIDTH);
        assert_eq!(busy.drop, BUSY_DROP);
        assert_eq!(busy.color, BUTTON_BUSY_COLOR);
        assert!(busy.spinner_visible());
        assert!(!idle.spinner_visible());

        assert_eq!(busy.lerp(&ButtonVisual::idle(), 1.0), idle);
    }

    #[test]
    fn test_banner_slide_keeps_row() {
        let anchor = Point::new(40.0, 18.0);
        let slid = BannerVisual::shown_at(anchor).slid_by(80.0);
        assert_eq!(slid.center, Point::new(120.0, 18.0));
        assert!(!slid.is_hidden());
    }

    #[test]
    fn test_banner_hidden_states() {
        let anchor = Point::new(1.0, 2.0);
        assert!(BannerVisual::hidden_at(anchor).is_hidden());
        assert!(BannerVisual::faded_at(anchor).is_hidden());
        assert!(!BannerVisual::shown_at(anchor).is_hidden());
    }
}
