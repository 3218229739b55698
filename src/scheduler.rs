//! Scheduling of delayed time bar messages.
//!
//! A time bar never sleeps or spawns on its own. Every delayed activity (the
//! animation frames, the countdown ticks, the completion) is handed to a
//! [`Scheduler`] as a [`ScheduledMsg`] to be fed back into the bar's
//! `update` once it is due.
//!
//! - [`TeaScheduler`] turns each request into a bubbletea-rs `tick` command,
//!   which is what a running program wants.
//! - [`ManualScheduler`] is a virtual clock. Nothing is delivered until the
//!   caller advances it, so tests can step through a 21 second run instantly.
//!
//! Cancellation is cooperative: a time bar stamps every message with the tag of
//! the run that scheduled it and ignores messages carrying an older tag, so a
//! scheduler that cannot withdraw an in-flight command is still correct.
//! [`Scheduler::cancel`] lets schedulers that can drop pending work do so.
//!
//! # Driving a bar with the virtual clock
//!
//! ```rust
//! use bubbletea_timebar::scheduler::ManualScheduler;
//! use bubbletea_timebar::timebar::{self, with_label, with_scheduler, with_size};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = ManualScheduler::new();
//! let mut bar = timebar::new(&[
//!     with_size(20, 10),
//!     with_label(),
//!     with_scheduler(Arc::new(clock.clone())),
//! ]);
//!
//! bar.start_timer(Duration::from_secs(5), Duration::ZERO);
//! clock.advance(Duration::from_secs(2), |msg| {
//!     bar.update(msg);
//! });
//! assert_eq!(bar.label_text(), Some("3"));
//! ```

use crate::timebar::ScheduledMsg;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Delivers time bar messages after a delay.
pub trait Scheduler: fmt::Debug + Send + Sync {
    /// Arranges for `msg` to reach the time bar's `update` after `after`.
    ///
    /// Returns the command the host must run to make that happen, or `None`
    /// when the scheduler delivers messages by other means.
    fn schedule_once(&self, after: Duration, msg: ScheduledMsg) -> Option<Cmd>;

    /// Drops any pending messages for run `tag` of time bar `id`.
    ///
    /// The default does nothing; stale messages are filtered by the time bar.
    fn cancel(&self, id: i64, tag: i64) {
        let _ = (id, tag);
    }
}

/// Scheduler backed by bubbletea-rs `tick` commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeaScheduler;

impl Scheduler for TeaScheduler {
    fn schedule_once(&self, after: Duration, msg: ScheduledMsg) -> Option<Cmd> {
        Some(bubbletea_tick(after, move |_| msg.into_msg()))
    }
}

#[derive(Debug)]
struct Pending {
    due: Duration,
    seq: u64,
    msg: ScheduledMsg,
}

#[derive(Debug, Default)]
struct Inner {
    now: Duration,
    next_seq: u64,
    queue: Vec<Pending>,
}

/// Virtual clock scheduler.
///
/// Clones share the same clock and queue, so a test can keep one handle while
/// the time bar owns another. Messages due at the same instant are delivered
/// in the order they were scheduled.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<Inner>>,
}

impl ManualScheduler {
    /// Creates a clock at time zero with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of messages waiting to be delivered.
    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    /// Time at which the next message is due, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.lock().queue.iter().map(|p| p.due).min()
    }

    /// Moves the clock forward by `by`, handing every message that falls due
    /// to `deliver` in time order.
    ///
    /// Messages scheduled by `deliver` itself are picked up in the same call
    /// if they fall due before the new time.
    pub fn advance<F>(&self, by: Duration, mut deliver: F)
    where
        F: FnMut(Msg),
    {
        let target = self.now().saturating_add(by);
        while let Some(msg) = self.pop_due(target) {
            deliver(msg);
        }
        self.lock().now = target;
    }

    fn pop_due(&self, target: Duration) -> Option<Msg> {
        let mut inner = self.lock();
        let idx = inner
            .queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(idx, _)| idx)?;
        let pending = inner.queue.swap_remove(idx);
        inner.now = inner.now.max(pending.due);
        Some(pending.msg.into_msg())
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, after: Duration, msg: ScheduledMsg) -> Option<Cmd> {
        let mut inner = self.lock();
        let due = inner.now.saturating_add(after);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.queue.push(Pending { due, seq, msg });
        None
    }

    fn cancel(&self, id: i64, tag: i64) {
        self.lock()
            .queue
            .retain(|p| !(p.msg.id() == id && p.msg.tag() == tag));
    }
}
