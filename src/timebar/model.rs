//! The time bar model: configuration, runs, and message handling.

use super::config::{
    with_label, with_size, Config, TimebarOption, DEFAULT_BOUNDARY_COLOR,
    DEFAULT_BOUNDARY_WIDTH, DEFAULT_FILL_COLOR, DEFAULT_LABEL_COLOR, DEFAULT_PADDING,
    DEFAULT_PADDING_COLOR,
};
use super::layout::{Edge, Frames, Layout, Rect, Region};
use super::types::{CompletionDelegate, Easing, FinishMsg, FrameMsg, ScheduledMsg, TickMsg};
use crate::scheduler::{Scheduler, TeaScheduler};
use bubbletea_rs::{batch, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, trace};

// Internal ID management for time bar instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const FPS: u32 = 60;
const TICK_INTERVAL: Duration = Duration::from_secs(1);

// Runs with a longer delay than this start the countdown one second early.
const LABEL_LEAD_THRESHOLD: Duration = Duration::from_secs(2);
const LABEL_LEAD: Duration = Duration::from_secs(1);

/// Time between animation frames.
pub fn frame_interval() -> Duration {
    Duration::from_nanos(1_000_000_000 / FPS as u64)
}

/// How long after `start_timer` the countdown sequence begins.
///
/// Delays strictly greater than two seconds start the countdown one second
/// before the delay ends; anything else starts it straight away. A delay of
/// exactly two seconds therefore starts immediately.
///
/// ```rust
/// use bubbletea_timebar::timebar::countdown_start_delay;
/// use std::time::Duration;
///
/// assert_eq!(countdown_start_delay(Duration::from_secs(2)), Duration::ZERO);
/// assert_eq!(countdown_start_delay(Duration::from_secs(5)), Duration::from_secs(4));
/// ```
pub fn countdown_start_delay(delay: Duration) -> Duration {
    if delay > LABEL_LEAD_THRESHOLD {
        delay - LABEL_LEAD
    } else {
        Duration::ZERO
    }
}

fn clamp_inset(value: i32) -> u16 {
    if value < 0 {
        trace!(value, "negative inset clamped to zero");
    }
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    } else {
        if secs != 0.0 {
            trace!(secs, "unusable duration treated as zero");
        }
        Duration::ZERO
    }
}

fn batch_cmds(cmds: Vec<Option<Cmd>>) -> Option<Cmd> {
    let mut cmds: Vec<Cmd> = cmds.into_iter().flatten().collect();
    match cmds.len() {
        0 => None,
        1 => cmds.pop(),
        _ => Some(batch(cmds)),
    }
}

/// State of one `start_timer` call.
#[derive(Debug, Clone, Copy)]
struct Run {
    duration: Duration,
    /// Fill top inset when the shrink begins.
    start_top: u16,
    /// Fill top inset at which the fill has no height left.
    target_top: u16,
    /// Animation time covered so far, not counting the delay.
    elapsed: Duration,
    animating: bool,
    completion_pending: bool,
}

/// A countdown bar made of three nested regions.
///
/// The outer area is painted in the boundary color, the padding region inside
/// it in the padding color, and the fill inside that in the fill color. A run
/// started with [`Model::start_timer`] shrinks the fill from the top down to
/// nothing, optionally counting the remaining seconds in a label pinned to the
/// fill's bottom edge, and tells the [`CompletionDelegate`] when the duration
/// is up.
///
/// # Examples
///
/// ```rust
/// use bubbletea_timebar::timebar::{new, with_label, with_size};
/// use std::time::Duration;
///
/// let mut bar = new(&[with_size(20, 10), with_label()]);
/// let cmd = bar.start_timer(Duration::from_secs(21), Duration::from_secs(2));
/// assert!(cmd.is_some());
/// assert_eq!(bar.label_text(), Some("21"));
/// assert!(bar.is_running());
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// An identifier to keep us from receiving messages intended for other
    /// time bars.
    id: i64,

    /// Bumped on every start and stop so messages from older runs are dropped.
    tag: i64,

    /// Widget width in cells, as assigned by the host.
    pub width: u16,
    /// Widget height in cells, as assigned by the host.
    pub height: u16,

    boundary_color: String,
    padding_color: String,
    fill_color: String,
    label_color: String,

    boundary_width: u16,
    padding: u16,
    layout: Layout,
    easing: Easing,

    /// Fill top inset set by the animation, kept across padding changes.
    fill_top: Option<u16>,
    run: Option<Run>,

    remaining: u64,
    ticking: bool,
    label_text: String,

    scheduler: Arc<dyn Scheduler>,
    delegate: Option<Weak<dyn CompletionDelegate>>,
}

/// Creates a time bar with the default look and the given options applied.
///
/// Defaults: a 1 cell `#0000FF` boundary, a 1 cell `#FFFFFF` padding ring, a
/// `#FF0000` fill, a `#FFFFFF` label (hidden), zero size, ease-in-out
/// animation and the [`TeaScheduler`].
///
/// # Examples
///
/// ```rust
/// use bubbletea_timebar::timebar::{new, with_padding, with_size};
///
/// let bar = new(&[with_size(10, 5), with_padding(-4)]);
/// assert_eq!(bar.padding(), 0);
/// assert_eq!(bar.fill_rect().width, 8);
/// ```
pub fn new(opts: &[TimebarOption]) -> Model {
    let mut m = Model {
        id: next_id(),
        tag: 0,
        width: 0,
        height: 0,
        boundary_color: DEFAULT_BOUNDARY_COLOR.to_string(),
        padding_color: DEFAULT_PADDING_COLOR.to_string(),
        fill_color: DEFAULT_FILL_COLOR.to_string(),
        label_color: DEFAULT_LABEL_COLOR.to_string(),
        boundary_width: DEFAULT_BOUNDARY_WIDTH,
        padding: DEFAULT_PADDING,
        layout: Layout::new(DEFAULT_BOUNDARY_WIDTH, DEFAULT_PADDING),
        easing: Easing::default(),
        fill_top: None,
        run: None,
        remaining: 0,
        ticking: false,
        label_text: String::new(),
        scheduler: Arc::new(TeaScheduler),
        delegate: None,
    };

    for opt in opts {
        m.apply_option(opt);
    }

    m
}

/// Creates a time bar from a layout description.
///
/// This goes through [`new`], so a bar built from a [`Config`] is configured
/// exactly like one built from the equivalent options.
pub fn from_config(config: &Config) -> Model {
    new(&config.to_options())
}

impl Model {
    fn apply_option(&mut self, opt: &TimebarOption) {
        match opt {
            TimebarOption::WithBoundaryColor(c) => self.set_boundary_color(c.clone()),
            TimebarOption::WithPaddingColor(c) => self.set_padding_color(c.clone()),
            TimebarOption::WithFillColor(c) => self.set_fill_color(c.clone()),
            TimebarOption::WithLabelColor(c) => self.set_label_color(c.clone()),
            TimebarOption::WithBoundaryWidth(w) => self.set_boundary_width(*w),
            TimebarOption::WithPadding(p) => self.set_padding(*p),
            TimebarOption::WithLabel(show) => self.set_label_visible(*show),
            TimebarOption::WithSize(w, h) => self.set_size(*w, *h),
            TimebarOption::WithEasing(e) => self.easing = *e,
            TimebarOption::WithScheduler(s) => self.scheduler = Arc::clone(s),
        }
    }

    /// Unique identifier of this time bar.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Outer frame color.
    pub fn boundary_color(&self) -> &str {
        &self.boundary_color
    }

    /// Sets the outer frame color. Geometry is unaffected.
    pub fn set_boundary_color(&mut self, color: impl Into<String>) {
        self.boundary_color = color.into();
    }

    /// Padding ring color.
    pub fn padding_color(&self) -> &str {
        &self.padding_color
    }

    /// Sets the padding ring color. Geometry is unaffected.
    pub fn set_padding_color(&mut self, color: impl Into<String>) {
        self.padding_color = color.into();
    }

    /// Fill color.
    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }

    /// Sets the fill color. Geometry is unaffected.
    pub fn set_fill_color(&mut self, color: impl Into<String>) {
        self.fill_color = color.into();
    }

    /// Label text color.
    pub fn label_color(&self) -> &str {
        &self.label_color
    }

    /// Sets the label text color. Geometry is unaffected.
    pub fn set_label_color(&mut self, color: impl Into<String>) {
        self.label_color = color.into();
    }

    /// Width of the outer frame in cells.
    pub fn boundary_width(&self) -> u16 {
        self.boundary_width
    }

    /// Sets the inset between the outer area and the padding region on all
    /// four sides. Negative widths are treated as zero.
    pub fn set_boundary_width(&mut self, width: i32) {
        self.boundary_width = clamp_inset(width);
        self.layout.set_boundary_width(self.boundary_width);
    }

    /// Width of the padding ring in cells.
    pub fn padding(&self) -> u16 {
        self.padding
    }

    /// Sets the inset between the padding region and the fill on all four
    /// sides, and the label's horizontal inset. Negative values are treated as
    /// zero.
    ///
    /// A running animation keeps the target it computed when it started; the
    /// new padding applies to every other edge immediately.
    pub fn set_padding(&mut self, padding: i32) {
        self.padding = clamp_inset(padding);
        self.layout.set_padding(self.padding);
        if let Some(top) = self.fill_top {
            self.layout.set_edge(Region::Fill, Edge::Top, top);
        }
    }

    /// Whether the countdown label is shown.
    pub fn label_visible(&self) -> bool {
        self.layout.show_label()
    }

    /// Shows or hides the countdown label.
    pub fn set_label_visible(&mut self, show: bool) {
        self.layout.set_show_label(show);
    }

    /// Timing curve of the shrink animation.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Sets the timing curve used by subsequent frames.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Replaces the scheduler used for runs started from now on.
    pub fn set_scheduler(&mut self, scheduler: Arc<dyn Scheduler>) {
        self.scheduler = scheduler;
    }

    /// Assigns the widget's size in cells.
    ///
    /// The size must be set before [`Model::start_timer`] is meaningful: the
    /// shrink target is measured from it when the run starts.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Registers the observer notified when a run finishes.
    ///
    /// Only a weak reference is kept; once the host drops its `Arc`, the
    /// delegate is silently skipped.
    pub fn set_delegate<D>(&mut self, delegate: &Arc<D>)
    where
        D: CompletionDelegate + 'static,
    {
        let weak: Weak<dyn CompletionDelegate> = Arc::downgrade(delegate) as Weak<D>;
        self.delegate = Some(weak);
    }

    /// Removes the completion observer.
    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// The widget's full area.
    pub fn outer(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Current rectangles of every region.
    pub fn frames(&self) -> Frames {
        self.layout.apply(self.outer())
    }

    /// Current rectangle of the fill.
    pub fn fill_rect(&self) -> Rect {
        self.frames().fill
    }

    /// Text shown in the label, or `None` when the label is hidden.
    pub fn label_text(&self) -> Option<&str> {
        self.label_visible().then_some(self.label_text.as_str())
    }

    /// Seconds left on the countdown sequence.
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining
    }

    /// Whether the shrink animation has frames left to draw.
    pub fn is_animating(&self) -> bool {
        self.run.is_some_and(|run| run.animating)
    }

    /// Whether the countdown sequence is still ticking.
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Whether any part of a run (animation, countdown or completion) is
    /// still outstanding.
    pub fn is_running(&self) -> bool {
        self.run.is_some() || self.ticking
    }

    /// Starts shrinking the fill to nothing over `duration`, beginning after
    /// `delay`.
    ///
    /// The fill is reset to full height and its target is measured from the
    /// current size of the padding region, so the host must have sized the
    /// widget first; an unsized widget produces an empty animation rather
    /// than an error. The completion delegate is notified once `duration` has
    /// elapsed from this call. When the label is shown it immediately reads
    /// the whole seconds of `duration` and counts down once per second, see
    /// [`countdown_start_delay`].
    ///
    /// Starting again while a run is in progress cancels that run first, so
    /// there is never more than one pending notification or countdown.
    ///
    /// Returns the command that drives the run when a
    /// [`TeaScheduler`] is in use.
    pub fn start_timer(&mut self, duration: Duration, delay: Duration) -> Option<Cmd> {
        self.stop();

        self.fill_top = None;
        self.layout.set_edge(Region::Fill, Edge::Top, self.padding);

        let measured = self.frames().padding;
        let target_top = measured
            .height
            .saturating_sub(self.padding)
            .max(self.padding);

        self.run = Some(Run {
            duration,
            start_top: self.padding,
            target_top,
            elapsed: Duration::ZERO,
            animating: true,
            completion_pending: true,
        });

        debug!(
            id = self.id,
            tag = self.tag,
            duration_ms = duration.as_millis() as u64,
            delay_ms = delay.as_millis() as u64,
            "time bar started"
        );

        let (id, tag) = (self.id, self.tag);
        let mut cmds = vec![
            self.scheduler
                .schedule_once(delay, ScheduledMsg::Frame(FrameMsg { id, tag })),
            self.scheduler
                .schedule_once(duration, ScheduledMsg::Finish(FinishMsg { id, tag })),
        ];

        if self.label_visible() {
            self.remaining = duration.as_secs();
            self.label_text = self.remaining.to_string();
            if self.remaining > 0 {
                self.ticking = true;
                let first_tick = countdown_start_delay(delay).saturating_add(TICK_INTERVAL);
                cmds.push(
                    self.scheduler
                        .schedule_once(first_tick, ScheduledMsg::Tick(TickMsg { id, tag })),
                );
            }
        }

        batch_cmds(cmds)
    }

    /// Like [`Model::start_timer`], with durations in seconds.
    ///
    /// Negative, NaN and infinite values are treated as zero.
    pub fn start_timer_secs(&mut self, duration: f64, delay: f64) -> Option<Cmd> {
        self.start_timer(secs_to_duration(duration), secs_to_duration(delay))
    }

    /// Cancels the current run, if any, without notifying the delegate.
    ///
    /// The fill and label keep whatever they were showing. Messages already
    /// scheduled for the cancelled run are ignored when they arrive.
    pub fn stop(&mut self) {
        if self.is_running() {
            debug!(id = self.id, tag = self.tag, "time bar run cancelled");
        }
        self.scheduler.cancel(self.id, self.tag);
        self.run = None;
        self.ticking = false;
        self.tag += 1;
    }

    /// Handles animation frames, countdown ticks and completion.
    ///
    /// Messages for other time bars or for cancelled runs are ignored.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(frame) = msg.downcast_ref::<FrameMsg>() {
            if frame.id != self.id || frame.tag != self.tag {
                return None;
            }
            return self.next_frame();
        }

        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if tick.id != self.id || tick.tag != self.tag {
                return None;
            }
            return self.next_tick();
        }

        if let Some(finish) = msg.downcast_ref::<FinishMsg>() {
            if finish.id == self.id && finish.tag == self.tag {
                self.finish();
            }
        }

        None
    }

    fn next_frame(&mut self) -> Option<Cmd> {
        let mut run = self.run.filter(|run| run.animating)?;

        let t = if run.duration.is_zero() {
            1.0
        } else {
            run.elapsed.as_secs_f64() / run.duration.as_secs_f64()
        };
        let travel = f64::from(run.target_top - run.start_top) * self.easing.apply(t);
        let top = run.start_top + (travel.round() as u16).min(run.target_top - run.start_top);

        self.fill_top = Some(top);
        self.layout.set_edge(Region::Fill, Edge::Top, top);

        if run.elapsed >= run.duration {
            run.animating = false;
            self.run = Some(run);
            trace!(id = self.id, "time bar animation complete");
            self.settle();
            return None;
        }

        let step = frame_interval().min(run.duration - run.elapsed);
        run.elapsed += step;
        self.run = Some(run);

        let (id, tag) = (self.id, self.tag);
        self.scheduler
            .schedule_once(step, ScheduledMsg::Frame(FrameMsg { id, tag }))
    }

    fn next_tick(&mut self) -> Option<Cmd> {
        // A tick that outlived its sequence is a no-op.
        if !self.ticking {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        self.label_text = self.remaining.to_string();
        trace!(id = self.id, remaining = self.remaining, "time bar tick");

        if self.remaining == 0 {
            self.ticking = false;
            self.settle();
            return None;
        }

        let (id, tag) = (self.id, self.tag);
        self.scheduler
            .schedule_once(TICK_INTERVAL, ScheduledMsg::Tick(TickMsg { id, tag }))
    }

    fn finish(&mut self) {
        let Some(mut run) = self.run.filter(|run| run.completion_pending) else {
            return;
        };
        run.completion_pending = false;
        self.run = Some(run);

        debug!(id = self.id, tag = self.tag, "time bar finished");
        if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
            delegate.on_timer_finished();
        }
        self.settle();
    }

    /// Forgets the run once nothing about it is outstanding.
    fn settle(&mut self) {
        if let Some(run) = self.run {
            if !run.animating && !run.completion_pending && !self.ticking {
                self.run = None;
            }
        }
    }
}

impl BubbleTeaModel for Model {
    /// A standalone 20x10 labelled bar counting down 21 seconds after a two
    /// second delay.
    fn init() -> (Self, Option<Cmd>) {
        let mut model = new(&[with_size(20, 10), with_label()]);
        let cmd = model.start_timer(Duration::from_secs(21), Duration::from_secs(2));
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}
