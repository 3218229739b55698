//! Messages and callback types used by the time bar.

use bubbletea_rs::Msg;

/// Message that advances the shrink animation by one frame.
///
/// The first frame of a run is delivered after the run's delay; each frame
/// schedules the next until the fill has collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMsg {
    /// Identifier of the time bar this frame belongs to.
    pub id: i64,
    /// Run the frame belongs to. Frames from earlier runs are ignored.
    pub(crate) tag: i64,
}

/// Message that decrements the countdown label by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMsg {
    /// Identifier of the time bar this tick belongs to.
    pub id: i64,
    /// Run the tick belongs to. Ticks from earlier runs are ignored.
    pub(crate) tag: i64,
}

/// Message that ends a run and notifies the completion delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishMsg {
    /// Identifier of the time bar that finished.
    pub id: i64,
    /// Run that finished. Finish messages from earlier runs are ignored.
    pub(crate) tag: i64,
}

/// Any message a time bar hands to its [`Scheduler`](crate::scheduler::Scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledMsg {
    /// An animation frame.
    Frame(FrameMsg),
    /// A countdown tick.
    Tick(TickMsg),
    /// The end of a run.
    Finish(FinishMsg),
}

impl ScheduledMsg {
    /// Identifier of the time bar that scheduled the message.
    pub fn id(&self) -> i64 {
        match self {
            ScheduledMsg::Frame(m) => m.id,
            ScheduledMsg::Tick(m) => m.id,
            ScheduledMsg::Finish(m) => m.id,
        }
    }

    /// Run the message was scheduled for.
    pub fn tag(&self) -> i64 {
        match self {
            ScheduledMsg::Frame(m) => m.tag,
            ScheduledMsg::Tick(m) => m.tag,
            ScheduledMsg::Finish(m) => m.tag,
        }
    }

    /// Boxes the inner message for delivery through `update`.
    pub fn into_msg(self) -> Msg {
        match self {
            ScheduledMsg::Frame(m) => Box::new(m) as Msg,
            ScheduledMsg::Tick(m) => Box::new(m) as Msg,
            ScheduledMsg::Finish(m) => Box::new(m) as Msg,
        }
    }
}

/// Observer notified when a time bar finishes its run.
///
/// The time bar only keeps a weak reference to its delegate, so the host owns
/// it and may drop it at any time; a dropped delegate is simply not called.
///
/// # Examples
///
/// ```rust
/// use bubbletea_timebar::timebar::{self, CompletionDelegate};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// struct Screen {
///     done: AtomicBool,
/// }
///
/// impl CompletionDelegate for Screen {
///     fn on_timer_finished(&self) {
///         self.done.store(true, Ordering::SeqCst);
///     }
/// }
///
/// let screen = Arc::new(Screen { done: AtomicBool::new(false) });
/// let mut bar = timebar::new(&[]);
/// bar.set_delegate(&screen);
/// ```
pub trait CompletionDelegate: Send + Sync {
    /// Called once when the shrink animation's duration has elapsed.
    fn on_timer_finished(&self);
}

/// Timing curve of the shrink animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and slow finish.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress in `0.0..=1.0` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}
