use std::f64::consts::PI;

/// Natural frequency of the spring response, in radians per unit of
/// normalized time. High enough that every damping we use has settled to
/// within a few percent by the end of the transition.
const SPRING_FREQUENCY: f64 = 4.0 * PI;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseOut,
    /// Damped oscillation around the target; may overshoot.
    Spring { damping: f64 },
}

impl Easing {
    /// Map normalized time `t` to animation progress.
    ///
    /// `t` is clamped to `0.0..=1.0`. Every curve starts at exactly 0.0 and
    /// ends at exactly 1.0.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Spring { damping } => spring(t, damping),
        }
    }
}

fn spring(t: f64, damping: f64) -> f64 {
    let zeta = damping.clamp(0.05, 0.99);
    let damped = SPRING_FREQUENCY * (1.0 - zeta * zeta).sqrt();
    let decay = (-zeta * SPRING_FREQUENCY * t).exp();
    1.0 - decay * ((damped * t).cos() + zeta * SPRING_FREQUENCY / damped * (damped * t).sin())
}
