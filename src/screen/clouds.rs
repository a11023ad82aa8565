use crate::event::Event;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Columns occupied by one cloud sprite
pub const CLOUD_WIDTH: f64 = 12.0;

/// Time to travel from `x` to the right edge at `secs_per_cell`.
///
/// Proportional to the remaining distance so every traversal moves at the
/// same visual speed wherever it starts.
pub fn traversal_duration(screen_width: f64, x: f64, secs_per_cell: f64) -> Duration {
    let secs = (screen_width - x) * secs_per_cell;
    if secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

/// Seconds per cell such that a full crossing of `screen_width` takes
/// `crossing_secs`.
pub fn speed_factor(screen_width: f64, crossing_secs: f64) -> f64 {
    if screen_width > 0.0 {
        crossing_secs / screen_width
    } else {
        0.0
    }
}

/// Position model for one cloud. The loop itself lives in [`spawn_drift`];
/// this only answers "where is the cloud now".
#[derive(Debug, Clone)]
pub struct CloudDrift {
    pub width: f64,
    pub y: f64,
    screen_width: f64,
    secs_per_cell: f64,
    from_x: f64,
    started_at: Instant,
    duration: Duration,
}

impl CloudDrift {
    pub fn new(x: f64, y: f64, screen_width: f64, secs_per_cell: f64, now: Instant) -> Self {
        Self {
            width: CLOUD_WIDTH,
            y,
            screen_width,
            secs_per_cell,
            from_x: x,
            started_at: now,
            duration: traversal_duration(screen_width, x, secs_per_cell),
        }
    }

    /// Length of the traversal in progress.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Length of every traversal after a wrap.
    pub fn full_duration(&self) -> Duration {
        traversal_duration(self.screen_width, -self.width, self.secs_per_cell)
    }

    pub fn x_at(&self, now: Instant) -> f64 {
        if now <= self.started_at {
            return self.from_x;
        }
        if self.duration.is_zero() {
            return self.screen_width;
        }
        let t = now.duration_since(self.started_at).as_secs_f64() / self.duration.as_secs_f64();
        if t >= 1.0 {
            return self.screen_width;
        }
        self.from_x + (self.screen_width - self.from_x) * t
    }

    /// Put the cloud just off the left edge and start the next traversal.
    pub fn wrap(&mut self, now: Instant) {
        self.from_x = -self.width;
        self.started_at = now;
        self.duration = self.full_duration();
    }

    /// Continue from the current position on a resized screen.
    pub fn retarget(&mut self, screen_width: f64, secs_per_cell: f64, y: f64, now: Instant) {
        let x = self.x_at(now).min(screen_width);
        self.screen_width = screen_width;
        self.secs_per_cell = secs_per_cell;
        self.y = y;
        self.from_x = x;
        self.started_at = now;
        self.duration = traversal_duration(screen_width, x, secs_per_cell);
    }
}

/// Handle to a running drift loop.
pub struct DriftTask {
    pub cancel: CancellationToken,
    pub handle: JoinHandle<()>,
}

/// Repeat traversals forever, posting `Event::CloudWrapped` each time one
/// completes, until `cancel` fires or the receiver goes away.
///
/// `generation` is echoed back so the screen can drop events from loops it
/// has already replaced.
pub fn spawn_drift(
    index: usize,
    generation: u64,
    first: Duration,
    repeat: Duration,
    tx: UnboundedSender<Event>,
    cancel: CancellationToken,
) -> DriftTask {
    let token = cancel.clone();
    let handle = tokio::spawn(async move {
        debug!("Cloud {} drifting, first traversal {:?}", index, first);
        let mut next = first;
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Cloud {} drift cancelled", index);
                    break;
                }
                _ = tokio::time::sleep(next) => {
                    if tx.send(Event::CloudWrapped { index, generation }).is_err() {
                        break;
                    }
                    next = repeat;
                }
            }
        }
    });

    DriftTask { cancel, handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_duration_proportional_to_remaining_distance() {
        let w = 120.0;
        let k = 0.5;
        for x in [-12.0, 0.0, 30.0, 119.0] {
            assert_eq!(
                traversal_duration(w, x, k),
                Duration::from_secs_f64((w - x) * k),
                "x = {}",
                x
            );
        }
        assert_eq!(traversal_duration(w, 150.0, k), Duration::ZERO);
        assert_eq!(traversal_duration(w, 0.0, f64::INFINITY), Duration::MAX);
        assert_eq!(traversal_duration(w, 0.0, f64::NAN), Duration::ZERO);
    }

    #[test]
    fn test_full_crossing_matches_configured_time() {
        let k = speed_factor(80.0, 60.0);
        assert_eq!(traversal_duration(80.0, 0.0, k), Duration::from_secs(60));
        assert_eq!(speed_factor(0.0, 60.0), 0.0);
    }

    #[test]
    fn test_wrap_is_exact() {
        let t0 = Instant::now();
        let mut cloud = CloudDrift::new(33.3, 4.0, 100.0, 0.6, t0);
        let done = t0 + cloud.duration();
        assert_eq!(cloud.x_at(done), 100.0);

        cloud.wrap(done);
        assert_eq!(cloud.x_at(done), -CLOUD_WIDTH);
        assert_eq!(cloud.duration(), traversal_duration(100.0, -CLOUD_WIDTH, 0.6));
    }

    #[test]
    fn test_moves_linearly() {
        let t0 = Instant::now();
        let cloud = CloudDrift::new(0.0, 0.0, 100.0, 0.1, t0);
        assert_eq!(cloud.duration(), Duration::from_secs(10));
        let x = cloud.x_at(t0 + Duration::from_secs(5));
        assert!((x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_retarget_keeps_position() {
        let t0 = Instant::now();
        let mut cloud = CloudDrift::new(0.0, 2.0, 100.0, 0.1, t0);
        let now = t0 + Duration::from_secs(2);
        cloud.retarget(60.0, 0.2, 5.0, now);

        assert!((cloud.x_at(now) - 20.0).abs() < 1e-9);
        assert_eq!(cloud.y, 5.0);
        assert_eq!(cloud.duration(), traversal_duration(60.0, cloud.x_at(now), 0.2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drift_reports_each_traversal() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = spawn_drift(
            2,
            7,
            Duration::from_secs(3),
            Duration::from_secs(10),
            tx,
            CancellationToken::new(),
        );

        let start = tokio::time::Instant::now();
        assert!(matches!(
            rx.recv().await,
            Some(Event::CloudWrapped { index: 2, generation: 7 })
        ));
        assert_eq!(start.elapsed(), Duration::from_secs(3));
        assert!(matches!(
            rx.recv().await,
            Some(Event::CloudWrapped { index: 2, generation: 7 })
        ));
        assert_eq!(start.elapsed(), Duration::from_secs(13));

        task.cancel.cancel();
        task.handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_loop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = spawn_drift(
            0,
            0,
            Duration::from_secs(5),
            Duration::from_secs(5),
            tx,
            CancellationToken::new(),
        );

        task.cancel.cancel();
        task.handle.await.unwrap();
        // Sender dropped with the task, nothing was ever sent.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_ends_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = spawn_drift(
            1,
            0,
            Duration::from_secs(1),
            Duration::from_secs(1),
            tx,
            CancellationToken::new(),
        );
        drop(rx);
        task.handle.await.unwrap();
        assert!(!task.cancel.is_cancelled());
    }
}
