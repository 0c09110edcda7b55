use std::time::{Duration, Instant};
use vista_base::{IntervalCounter, fps_from_interval};

#[test]
fn test_first_measure_has_no_interval() {
    let mut counter = IntervalCounter::new(10);
    assert_eq!(counter.measure_at(Instant::now()), None);
}

#[test]
fn test_second_measure_returns_elapsed() {
    let start = Instant::now();
    let mut counter = IntervalCounter::new(10);
    counter.measure_at(start);
    let interval = counter.measure_at(start + Duration::from_millis(40));
    assert_eq!(interval, Some(Duration::from_millis(40)));
}

#[test]
fn test_average_over_window() {
    let start = Instant::now();
    let mut counter = IntervalCounter::new(2);
    counter.measure_at(start);
    counter.measure_at(start + Duration::from_millis(10));
    counter.measure_at(start + Duration::from_millis(40));
    // 10ms drops out, leaving 30ms and 50ms
    assert_eq!(
        counter.measure_at(start + Duration::from_millis(90)),
        Some(Duration::from_millis(40))
    );
}

#[test]
fn test_zero_capacity_is_clamped() {
    let counter = IntervalCounter::new(0);
    assert_eq!(counter.capacity(), 1);
}

#[test]
fn test_reset_forgets_last_timestamp() {
    let start = Instant::now();
    let mut counter = IntervalCounter::new(4);
    counter.measure_at(start);
    counter.measure_at(start + Duration::from_millis(5));
    counter.reset();
    assert_eq!(counter.measure_at(start + Duration::from_millis(10)), None);
}

#[test]
fn test_fps_is_reciprocal_of_interval() {
    let fps = fps_from_interval(Duration::from_millis(40)).unwrap();
    assert!((fps - 25.0).abs() < 1e-3);
    assert_eq!(fps_from_interval(Duration::ZERO), None);
}
