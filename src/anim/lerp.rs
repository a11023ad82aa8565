/// Linear interpolation between two values of the same type.
///
/// `t` is animation progress and may leave `0.0..=1.0` when a spring
/// overshoots; implementors decide whether to extrapolate or clamp.
pub trait Lerp: Clone {
    fn lerp(&self, to: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *to;
        }
        self + (to - self) * t
    }
}

/// A point in screen cells. Fractional so that motion stays smooth between
/// whole cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Lerp for Point {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&to.x, t), self.y.lerp(&to.y, t))
    }
}

/// Colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn to_u8(&self) -> (u8, u8, u8) {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

impl Lerp for Rgb {
    // Colours clamp: a spring overshoot must not produce out-of-gamut values.
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Rgb::new(
            self.r.lerp(&to.r, t).clamp(0.0, 1.0),
            self.g.lerp(&to.g, t).clamp(0.0, 1.0),
            self.b.lerp(&to.b, t).clamp(0.0, 1.0),
        )
    }
}
