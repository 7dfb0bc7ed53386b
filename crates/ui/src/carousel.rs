// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

/// Hero banner slide interval.
pub const HERO_INTERVAL: Duration = Duration::from_secs(5);
/// Upcoming workshops slide interval.
pub const WORKSHOP_INTERVAL: Duration = Duration::from_secs(5);
/// Reviews slide interval.
pub const REVIEW_INTERVAL: Duration = Duration::from_secs(4);

/// Slide position for a list of items.
///
/// The timer calls [`Carousel::tick`], which only moves while auto-advance
/// is on. The arrow buttons call [`Carousel::next`] and [`Carousel::prev`],
/// which always move. An empty carousel stays at index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
    auto_advance: bool,
}

impl Carousel {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            len,
            current: 0,
            auto_advance: true,
        }
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn is_auto_advancing(&self) -> bool {
        self.auto_advance
    }

    /// Timer step. Advances by one, wrapping, unless paused.
    pub const fn tick(&mut self) -> usize {
        if self.auto_advance {
            self.next();
        }
        self.current
    }

    pub const fn next(&mut self) -> usize {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
        self.current
    }

    /// Steps back, wrapping from the first slide to the last.
    pub const fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.current = if self.current == 0 {
                self.len - 1
            } else {
                self.current - 1
            };
        }
        self.current
    }

    /// Jumps to `index`. Returns `false` and stays put if it is out of range.
    pub const fn go_to(&mut self, index: usize) -> bool {
        if index < self.len {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Pointer entered a navigation control.
    pub const fn pause(&mut self) {
        self.auto_advance = false;
    }

    /// Pointer left a navigation control.
    pub const fn resume(&mut self) {
        self.auto_advance = true;
    }

    /// Replaces the item count after a reload, clamping the position.
    pub const fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.current >= len {
            self.current = 0;
        }
    }
}

/// A carousel shared between a component and its timer.
pub type SharedCarousel = Arc<Mutex<Carousel>>;

/// Background timer ticking a carousel.
///
/// The task runs until the handle is dropped, which is when the owning
/// component is torn down.
#[derive(Debug)]
pub struct AutoAdvance {
    handle: JoinHandle<()>,
}

impl AutoAdvance {
    /// Starts ticking `carousel` every `period`. The first tick comes one
    /// full period after the call.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(carousel: SharedCarousel, period: Duration) -> Self {
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;
                let index: usize = carousel.lock().await.tick();
                debug!(index, "Carousel tick");
            }
        });

        Self { handle }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
