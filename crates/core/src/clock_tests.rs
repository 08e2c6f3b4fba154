// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_returns_increasing_time() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.now();
    assert!(t2 > t1);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    clock.advance(Duration::from_secs(60));
    let t2 = clock.now();
    assert_eq!(t2.duration_since(t1), Duration::from_secs(60));
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    let t2 = clock1.now();
    assert_eq!(t2.duration_since(t1), Duration::from_secs(30));
}

#[test]
fn fake_clock_set_overrides_current_time() {
    let clock = FakeClock::new();
    let target = clock.now() + Duration::from_secs(3600);
    clock.set(target);
    assert_eq!(clock.now(), target);
}

#[tokio::test(start_paused = true)]
async fn system_clock_follows_paused_tokio_time() {
    let clock = SystemClock;
    let t1 = clock.now();
    tokio::time::advance(Duration::from_secs(24 * 3600)).await;
    assert!(clock.now().duration_since(t1) >= Duration::from_secs(24 * 3600));
}
