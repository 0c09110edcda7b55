use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rolling average of the time between successive `measure` calls.
///
/// The first call only records a timestamp and returns `None`; every later
/// call returns the mean of the last `capacity` intervals.
#[derive(Debug, Clone)]
pub struct IntervalCounter {
    intervals: VecDeque<Duration>,
    capacity: usize,
    last: Option<Instant>,
}

impl IntervalCounter {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            intervals: VecDeque::with_capacity(capacity),
            capacity,
            last: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn measure(&mut self) -> Option<Duration> {
        self.measure_at(Instant::now())
    }

    /// `measure` with an explicit clock reading.
    pub fn measure_at(&mut self, now: Instant) -> Option<Duration> {
        let previous = self.last.replace(now)?;
        if self.intervals.len() == self.capacity {
            self.intervals.pop_front();
        }
        self.intervals.push_back(now.saturating_duration_since(previous));
        let total: Duration = self.intervals.iter().sum();
        Some(total / self.intervals.len() as u32)
    }

    pub fn reset(&mut self) {
        self.intervals.clear();
        self.last = None;
    }
}

/// Frames per second for an interval; `None` for a zero interval.
pub fn fps_from_interval(interval: Duration) -> Option<f32> {
    let secs = interval.as_secs_f32();
    if secs > 0.0 { Some(1.0 / secs) } else { None }
}
