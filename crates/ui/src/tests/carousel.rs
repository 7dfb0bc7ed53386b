// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::{AutoAdvance, Carousel, REVIEW_INTERVAL, SharedCarousel};

#[test]
fn test_n_ticks_return_to_start() {
    let mut carousel: Carousel = Carousel::new(4);

    let positions: Vec<usize> = (0..4).map(|_| carousel.tick()).collect();

    assert_eq!(positions, vec![1, 2, 3, 0]);
}

#[test]
fn test_paused_carousel_does_not_tick() {
    let mut carousel: Carousel = Carousel::new(3);
    carousel.pause();

    for _ in 0..10 {
        carousel.tick();
    }
    assert_eq!(carousel.current(), 0);

    carousel.resume();
    assert_eq!(carousel.tick(), 1);
}

#[test]
fn test_manual_navigation_ignores_pause() {
    let mut carousel: Carousel = Carousel::new(3);
    carousel.pause();

    assert_eq!(carousel.prev(), 2);
    assert_eq!(carousel.next(), 0);
    assert_eq!(carousel.next(), 1);
    assert!(!carousel.is_auto_advancing());
}

#[test]
fn test_go_to_rejects_out_of_range() {
    let mut carousel: Carousel = Carousel::new(3);

    assert!(carousel.go_to(2));
    assert_eq!(carousel.current(), 2);
    assert!(!carousel.go_to(3));
    assert_eq!(carousel.current(), 2);
}

#[test]
fn test_empty_carousel_never_moves() {
    let mut carousel: Carousel = Carousel::new(0);

    assert_eq!(carousel.tick(), 0);
    assert_eq!(carousel.next(), 0);
    assert_eq!(carousel.prev(), 0);
    assert!(!carousel.go_to(0));
    assert!(carousel.is_empty());
}

#[test]
fn test_set_len_clamps_position() {
    let mut carousel: Carousel = Carousel::new(5);
    carousel.go_to(4);

    carousel.set_len(2);
    assert_eq!(carousel.current(), 0);
    assert_eq!(carousel.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_auto_advance_follows_interval() {
    let carousel: SharedCarousel = Arc::new(Mutex::new(Carousel::new(3)));
    let timer: AutoAdvance = AutoAdvance::spawn(Arc::clone(&carousel), REVIEW_INTERVAL);

    tokio::time::sleep(Duration::from_millis(3_900)).await;
    assert_eq!(carousel.lock().await.current(), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(carousel.lock().await.current(), 1);

    tokio::time::sleep(REVIEW_INTERVAL * 2).await;
    assert_eq!(carousel.lock().await.current(), 0);
    assert!(timer.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_auto_advance_respects_pause() {
    let carousel: SharedCarousel = Arc::new(Mutex::new(Carousel::new(3)));
    let _timer: AutoAdvance = AutoAdvance::spawn(Arc::clone(&carousel), REVIEW_INTERVAL);

    carousel.lock().await.pause();
    tokio::time::sleep(REVIEW_INTERVAL * 5).await;
    assert_eq!(carousel.lock().await.current(), 0);

    carousel.lock().await.resume();
    tokio::time::sleep(REVIEW_INTERVAL).await;
    assert_eq!(carousel.lock().await.current(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_timer_stops_ticks() {
    let carousel: SharedCarousel = Arc::new(Mutex::new(Carousel::new(3)));
    let timer: AutoAdvance = AutoAdvance::spawn(Arc::clone(&carousel), REVIEW_INTERVAL);

    tokio::time::sleep(REVIEW_INTERVAL + Duration::from_millis(100)).await;
    assert_eq!(carousel.lock().await.current(), 1);

    drop(timer);
    tokio::time::sleep(REVIEW_INTERVAL * 3).await;
    assert_eq!(carousel.lock().await.current(), 1);
}
