//! Construction options for the time bar.
//!
//! There are two ways to describe a time bar: a list of [`TimebarOption`]s
//! passed to [`new`](super::new), or a [`Config`] layout description (which
//! can be deserialized with serde) passed to [`from_config`](super::from_config).
//! Both go through the same one-time setup.

use super::types::Easing;
use crate::scheduler::Scheduler;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub(crate) const DEFAULT_BOUNDARY_COLOR: &str = "#0000FF";
pub(crate) const DEFAULT_PADDING_COLOR: &str = "#FFFFFF";
pub(crate) const DEFAULT_FILL_COLOR: &str = "#FF0000";
pub(crate) const DEFAULT_LABEL_COLOR: &str = "#FFFFFF";
pub(crate) const DEFAULT_BOUNDARY_WIDTH: u16 = 1;
pub(crate) const DEFAULT_PADDING: u16 = 1;

/// Configuration options for a time bar.
///
/// # Examples
///
/// ```rust
/// use bubbletea_timebar::timebar::{new, with_boundary_width, with_fill_color, with_label, with_size};
///
/// let bar = new(&[
///     with_size(30, 8),
///     with_boundary_width(2),
///     with_fill_color("#00ff00"),
///     with_label(),
/// ]);
/// assert_eq!(bar.boundary_width(), 2);
/// ```
pub enum TimebarOption {
    /// Background of the outer frame.
    WithBoundaryColor(String),
    /// Background of the padding ring.
    WithPaddingColor(String),
    /// Background of the shrinking fill.
    WithFillColor(String),
    /// Foreground of the countdown label.
    WithLabelColor(String),
    /// Width of the outer frame in cells. Negative values are treated as zero.
    WithBoundaryWidth(i32),
    /// Width of the padding ring in cells. Negative values are treated as zero.
    WithPadding(i32),
    /// Shows or hides the countdown label.
    WithLabel(bool),
    /// Size of the whole widget in cells.
    WithSize(u16, u16),
    /// Timing curve of the shrink.
    WithEasing(Easing),
    /// Where delayed messages are scheduled.
    WithScheduler(Arc<dyn Scheduler>),
}

impl fmt::Debug for TimebarOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimebarOption::WithBoundaryColor(c) => f.debug_tuple("WithBoundaryColor").field(c).finish(),
            TimebarOption::WithPaddingColor(c) => f.debug_tuple("WithPaddingColor").field(c).finish(),
            TimebarOption::WithFillColor(c) => f.debug_tuple("WithFillColor").field(c).finish(),
            TimebarOption::WithLabelColor(c) => f.debug_tuple("WithLabelColor").field(c).finish(),
            TimebarOption::WithBoundaryWidth(w) => f.debug_tuple("WithBoundaryWidth").field(w).finish(),
            TimebarOption::WithPadding(p) => f.debug_tuple("WithPadding").field(p).finish(),
            TimebarOption::WithLabel(l) => f.debug_tuple("WithLabel").field(l).finish(),
            TimebarOption::WithSize(w, h) => f.debug_tuple("WithSize").field(w).field(h).finish(),
            TimebarOption::WithEasing(e) => f.debug_tuple("WithEasing").field(e).finish(),
            TimebarOption::WithScheduler(s) => f.debug_tuple("WithScheduler").field(s).finish(),
        }
    }
}

/// Sets the outer frame color.
pub fn with_boundary_color(color: impl Into<String>) -> TimebarOption {
    TimebarOption::WithBoundaryColor(color.into())
}

/// Sets the padding ring color.
pub fn with_padding_color(color: impl Into<String>) -> TimebarOption {
    TimebarOption::WithPaddingColor(color.into())
}

/// Sets the fill color.
pub fn with_fill_color(color: impl Into<String>) -> TimebarOption {
    TimebarOption::WithFillColor(color.into())
}

/// Sets the label text color.
pub fn with_label_color(color: impl Into<String>) -> TimebarOption {
    TimebarOption::WithLabelColor(color.into())
}

/// Sets the outer frame width.
pub fn with_boundary_width(width: i32) -> TimebarOption {
    TimebarOption::WithBoundaryWidth(width)
}

/// Sets the padding ring width.
pub fn with_padding(padding: i32) -> TimebarOption {
    TimebarOption::WithPadding(padding)
}

/// Shows the countdown label.
pub fn with_label() -> TimebarOption {
    TimebarOption::WithLabel(true)
}

/// Hides the countdown label. This is the default.
pub fn without_label() -> TimebarOption {
    TimebarOption::WithLabel(false)
}

/// Sets the widget size in cells.
pub fn with_size(width: u16, height: u16) -> TimebarOption {
    TimebarOption::WithSize(width, height)
}

/// Sets the timing curve of the shrink.
pub fn with_easing(easing: Easing) -> TimebarOption {
    TimebarOption::WithEasing(easing)
}

/// Replaces the default [`TeaScheduler`](crate::scheduler::TeaScheduler).
pub fn with_scheduler(scheduler: Arc<dyn Scheduler>) -> TimebarOption {
    TimebarOption::WithScheduler(scheduler)
}

/// Layout description of a time bar.
///
/// Missing fields take their defaults, so a host only has to spell out what
/// it changes.
///
/// # Examples
///
/// ```rust
/// use bubbletea_timebar::timebar::{from_config, Config};
///
/// let config = Config {
///     padding: 2,
///     show_label: true,
///     width: 24,
///     height: 6,
///     ..Config::default()
/// };
/// let bar = from_config(&config);
/// assert_eq!(bar.padding(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Background of the outer frame.
    pub boundary_color: String,
    /// Background of the padding ring.
    pub padding_color: String,
    /// Background of the shrinking fill.
    pub fill_color: String,
    /// Foreground of the countdown label.
    pub label_color: String,
    /// Width of the outer frame in cells. Negative values are treated as zero.
    pub boundary_width: i32,
    /// Width of the padding ring in cells. Negative values are treated as zero.
    pub padding: i32,
    /// Whether the countdown label is shown.
    pub show_label: bool,
    /// Widget width in cells.
    pub width: u16,
    /// Widget height in cells.
    pub height: u16,
    /// Timing curve of the shrink.
    pub easing: Easing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boundary_color: DEFAULT_BOUNDARY_COLOR.to_string(),
            padding_color: DEFAULT_PADDING_COLOR.to_string(),
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            label_color: DEFAULT_LABEL_COLOR.to_string(),
            boundary_width: i32::from(DEFAULT_BOUNDARY_WIDTH),
            padding: i32::from(DEFAULT_PADDING),
            show_label: false,
            width: 0,
            height: 0,
            easing: Easing::default(),
        }
    }
}

impl Config {
    /// Expresses the description as construction options.
    pub fn to_options(&self) -> Vec<TimebarOption> {
        vec![
            with_boundary_color(self.boundary_color.clone()),
            with_padding_color(self.padding_color.clone()),
            with_fill_color(self.fill_color.clone()),
            with_label_color(self.label_color.clone()),
            with_boundary_width(self.boundary_width),
            with_padding(self.padding),
            TimebarOption::WithLabel(self.show_label),
            with_size(self.width, self.height),
            with_easing(self.easing),
        ]
    }
}
