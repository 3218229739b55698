#![warn(missing_docs)]

//! # bubbletea-timebar
//!
//! A shrinking countdown bar for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The time bar is three nested rectangles: an outer frame in the boundary
//! color, a padding ring, and a fill that shrinks from the top until nothing is
//! left once [`timebar::Model::start_timer`] is called. An optional label at
//! the bottom of the fill counts down the remaining seconds, and a
//! [`CompletionDelegate`](timebar::CompletionDelegate) is notified when the
//! time is up.
//!
//! Like the other bubbletea-rs components, the time bar follows the Elm
//! Architecture: it is driven through `update()` and drawn with `view()`.
//! All delayed work goes through a [`Scheduler`](scheduler::Scheduler), which
//! is bubbletea-rs `tick` commands in a running program and a virtual clock in
//! tests.
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_timebar::prelude::*;
//! use std::time::Duration;
//!
//! let mut bar = timebar_new(&[with_size(20, 10), with_label()]);
//! let _cmd = bar.start_timer(Duration::from_secs(21), Duration::from_secs(2));
//! assert_eq!(bar.label_text(), Some("21"));
//! ```
//!
//! ## Configuration
//!
//! | Option | Default | Effect |
//! |--------|---------|--------|
//! | `with_boundary_color` | `#0000FF` | Outer frame background |
//! | `with_padding_color` | `#FFFFFF` | Padding ring background |
//! | `with_fill_color` | `#FF0000` | Fill background |
//! | `with_label_color` | `#FFFFFF` | Countdown text color |
//! | `with_boundary_width` | `1` | Frame width in cells |
//! | `with_padding` | `1` | Ring width in cells |
//! | `with_label` | hidden | Shows the countdown label |
//! | `with_size` | `0x0` | Widget size in cells |
//! | `with_easing` | ease-in-out | Shrink timing curve |
//! | `with_scheduler` | `TeaScheduler` | Where delayed messages go |

pub mod scheduler;
pub mod timebar;

pub use scheduler::{ManualScheduler, Scheduler, TeaScheduler};
pub use timebar::{
    from_config as timebar_from_config, new as timebar_new, CompletionDelegate, Config,
    Easing, FinishMsg as TimebarFinishMsg, FrameMsg as TimebarFrameMsg, Model as Timebar,
    TickMsg as TimebarTickMsg, TimebarOption,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_timebar::prelude::*;
///
/// let bar: Timebar = timebar_new(&[with_size(10, 4), with_padding(2)]);
/// assert_eq!(bar.padding(), 2);
/// ```
pub mod prelude {
    pub use crate::scheduler::{ManualScheduler, Scheduler, TeaScheduler};
    pub use crate::timebar::{
        from_config as timebar_from_config, new as timebar_new, with_boundary_color,
        with_boundary_width, with_easing, with_fill_color, with_label, with_label_color,
        with_padding, with_padding_color, with_scheduler, with_size, without_label,
        CompletionDelegate, Config, Easing, Model as Timebar, TimebarOption,
    };
}
