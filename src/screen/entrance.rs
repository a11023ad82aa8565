use crate::anim::{Easing, Transition};
use crate::config::EntranceConfig;
use std::time::{Duration, Instant};

const CLOUD_FADE_EASING: Easing = Easing::EaseOut;

/// Offsets and opacities applied on top of the resting layout while the
/// screen animates in.
#[derive(Debug, Clone, PartialEq)]
pub struct EntranceFrame {
    pub heading_dx: f64,
    pub username_dx: f64,
    pub password_dx: f64,
    pub button_dy: f64,
    pub button_alpha: f64,
    pub cloud_alpha: Vec<f64>,
}

impl EntranceFrame {
    /// Everything at rest, as if the entrance had already played.
    pub fn settled(clouds: usize) -> Self {
        Self {
            heading_dx: 0.0,
            username_dx: 0.0,
            password_dx: 0.0,
            button_dy: 0.0,
            button_alpha: 1.0,
            cloud_alpha: vec![1.0; clouds],
        }
    }
}

/// One-shot intro: each element has its own delay and none waits on another.
pub struct Entrance {
    heading: Transition<f64>,
    username: Transition<f64>,
    password: Transition<f64>,
    button_rise: Transition<f64>,
    button_fade: Transition<f64>,
    clouds: Vec<Transition<f64>>,
}

impl Entrance {
    pub fn new(
        presented_at: Instant,
        screen_width: f64,
        config: &EntranceConfig,
        cloud_delays: &[f64],
    ) -> Self {
        let secs = Duration::from_secs_f64;
        let duration = secs(config.duration);
        let field_spring = Easing::Spring { damping: config.field_damping };
        let button_spring = Easing::Spring { damping: config.button_damping };

        let slide_in = |delay: f64, easing: Easing| {
            Transition::new(-screen_width, 0.0, presented_at, duration, easing)
                .with_delay(secs(delay))
        };

        let clouds = cloud_delays
            .iter()
            .map(|&delay| {
                Transition::new(
                    0.0,
                    1.0,
                    presented_at,
                    secs(config.cloud_fade),
                    CLOUD_FADE_EASING,
                )
                .with_delay(secs(delay))
            })
            .collect();

        Self {
            heading: slide_in(config.heading_delay, Easing::EaseOut),
            username: slide_in(config.username_delay, field_spring),
            password: slide_in(config.password_delay, field_spring),
            button_rise: Transition::new(config.button_rise, 0.0, presented_at, duration, button_spring)
                .with_delay(secs(config.button_delay)),
            button_fade: Transition::new(0.0, 1.0, presented_at, duration, button_spring)
                .with_delay(secs(config.button_delay)),
            clouds,
        }
    }

    pub fn frame(&self, now: Instant) -> EntranceFrame {
        EntranceFrame {
            heading_dx: self.heading.sample(now),
            username_dx: self.username.sample(now),
            password_dx: self.password.sample(now),
            button_dy: self.button_rise.sample(now),
            button_alpha: self.button_fade.sample(now).clamp(0.0, 1.0),
            cloud_alpha: self.clouds.iter().map(|c| c.sample(now)).collect(),
        }
    }

    pub fn started_at(&self) -> Instant {
        self.heading.start
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.end() <= now
    }

    /// Instant the last element comes to rest.
    pub fn end(&self) -> Instant {
        [
            &self.heading,
            &self.username,
            &self.password,
            &self.button_rise,
            &self.button_fade,
        ]
        .into_iter()
        .chain(self.clouds.iter())
        .map(Transition::end)
        .max()
        .unwrap_or(self.started_at())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn entrance(t0: Instant) -> Entrance {
        Entrance::new(t0, 80.0, &EntranceConfig::default(), &[0.5, 0.7, 0.9, 1.1])
    }

    #[test]
    fn test_starts_offscreen_and_hidden() {
        let t0 = Instant::now();
        let frame = entrance(t0).frame(t0);
        assert_eq!(frame.heading_dx, -80.0);
        assert_eq!(frame.username_dx, -80.0);
        assert_eq!(frame.password_dx, -80.0);
        assert_eq!(frame.button_dy, 3.0);
        assert_eq!(frame.button_alpha, 0.0);
        assert_eq!(frame.cloud_alpha, vec![0.0; 4]);
    }

    #[test]
    fn test_staggered_delays() {
        let t0 = Instant::now();
        let e = entrance(t0);

        // Heading moves first; the fields are still waiting.
        let early = e.frame(t0 + secs(0.2));
        assert!(early.heading_dx > -80.0);
        assert_eq!(early.username_dx, -80.0);
        assert_eq!(early.password_dx, -80.0);

        let mid = e.frame(t0 + secs(0.35));
        assert!(mid.username_dx > -80.0);
        assert_eq!(mid.password_dx, -80.0);

        let clouds = e.frame(t0 + secs(0.8)).cloud_alpha;
        assert!(clouds[0] > 0.0);
        assert!(clouds[1] > 0.0);
        assert_eq!(clouds[2], 0.0);
        assert_eq!(clouds[3], 0.0);
    }

    #[test]
    fn test_settles_after_last_cloud() {
        let t0 = Instant::now();
        let e = entrance(t0);
        let end = t0 + secs(1.6);

        assert_eq!(e.end(), end);
        assert!(!e.is_finished(end - secs(0.01)));
        assert!(e.is_finished(end));
        assert_eq!(e.frame(end), EntranceFrame::settled(4));
    }

    #[test]
    fn test_no_clouds() {
        let t0 = Instant::now();
        let e = Entrance::new(t0, 80.0, &EntranceConfig::default(), &[]);
        assert_eq!(e.end(), t0 + secs(1.0));
        assert!(e.frame(t0).cloud_alpha.is_empty());
    }
}
