use super::{Easing, Lerp};
use std::time::{Duration, Instant};

/// A value animating from `from` to `to`, starting `delay` after `start`.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    pub from: T,
    pub to: T,
    pub start: Instant,
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl<T: Lerp> Transition<T> {
    pub fn new(from: T, to: T, start: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            delay: Duration::ZERO,
            duration,
            easing,
        }
    }

    /// A transition that is already at rest on `value`.
    pub fn settled(value: T, at: Instant) -> Self {
        Self::new(value.clone(), value, at, Duration::ZERO, Easing::Linear)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Instant at which the value reaches `to`.
    pub fn end(&self) -> Instant {
        self.start + self.delay + self.duration
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.end()
    }

    pub fn progress(&self, now: Instant) -> f64 {
        let begin = self.start + self.delay;
        if now <= begin {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.duration_since(begin).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn sample(&self, now: Instant) -> T {
        if self.is_finished(now) {
            return self.to.clone();
        }
        let t = self.progress(now);
        if t <= 0.0 {
            return self.from.clone();
        }
        self.from.lerp(&self.to, self.easing.apply(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_holds_from_until_delay_passes() {
        let t0 = Instant::now();
        let tr = Transition::new(0.0, 10.0, t0, secs(1.0), Easing::Linear).with_delay(secs(0.5));

        assert_eq!(tr.sample(t0), 0.0);
        assert_eq!(tr.sample(t0 + secs(0.5)), 0.0);
        assert!((tr.sample(t0 + secs(1.0)) - 5.0).abs() < 1e-6);
        assert_eq!(tr.sample(t0 + secs(1.5)), 10.0);
        assert_eq!(tr.end(), t0 + secs(1.5));
    }

    #[test]
    fn test_lands_exactly_on_target() {
        let t0 = Instant::now();
        let tr = Transition::new(-3.7, 91.3, t0, secs(0.33), Easing::Spring { damping: 0.7 });
        assert_eq!(tr.sample(t0 + secs(0.33)), 91.3);
        assert_eq!(tr.sample(t0 + secs(60.0)), 91.3);
        assert!(tr.is_finished(t0 + secs(0.33)));
        assert!(!tr.is_finished(t0 + secs(0.32)));
    }

    #[test]
    fn test_zero_duration_jumps() {
        let t0 = Instant::now();
        let tr = Transition::new(1.0, 2.0, t0, Duration::ZERO, Easing::EaseOut);
        assert_eq!(tr.sample(t0), 2.0);
        assert!(tr.is_finished(t0));
    }

    #[test]
    fn test_settled_never_moves() {
        let t0 = Instant::now();
        let tr = Transition::settled(4.0, t0);
        assert_eq!(tr.sample(t0), 4.0);
        assert_eq!(tr.sample(t0 + secs(3.0)), 4.0);
    }
}
