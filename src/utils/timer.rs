use std::time::{Duration, Instant};

/// Accumulates wall-clock time over repeated start/stop laps.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Timer {
    pub total_time: Duration,
    pub laps: u32,
    curr: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self { total_time: Duration::ZERO, laps: 0, curr: Instant::now() }
    }
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn start(&mut self) {
        self.curr = Instant::now();
    }

    /// Ends the current lap and returns its length.
    #[inline(always)]
    pub fn stop(&mut self) -> Duration {
        let diff = self.curr.elapsed();
        self.total_time += diff;
        self.laps += 1;
        diff
    }

    pub fn mean(&self) -> Duration {
        if self.laps == 0 {
            return Duration::ZERO;
        }
        self.total_time / self.laps
    }

    /// Bytes per second over all laps, given `bytes` processed per lap.
    pub fn throughput(&self, bytes: usize) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        (bytes as f64 * self.laps as f64) / secs
    }
}

#[test]
fn test_timer() {
    use std::thread;

    let mut timer = Timer::new();

    for _ in 0..2 {
        timer.start();
        thread::sleep(Duration::from_millis(20));
        timer.stop();
    }

    assert_eq!(timer.laps, 2);
    assert!(timer.total_time >= Duration::from_millis(40));
    assert!(timer.mean() >= Duration::from_millis(20));
    assert!(timer.throughput(1000) > 0.0);
}

#[test]
fn test_timer_without_laps() {
    let timer = Timer::new();
    assert_eq!(timer.mean(), Duration::ZERO);
    assert_eq!(timer.throughput(10), 0.0);
}
