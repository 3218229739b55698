//! Time bar component for Bubble Tea applications.
//!
//! A time bar is a countdown drawn as three nested rectangles: an outer frame
//! in the boundary color, a padding ring, and a fill that shrinks from the top
//! until nothing is left. An optional label pinned to the bottom of the fill
//! counts the remaining seconds, and a [`CompletionDelegate`] can be told when
//! the time is up.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_timebar::timebar::{new, with_label, with_padding, with_size};
//! use std::time::Duration;
//!
//! let mut bar = new(&[with_size(20, 10), with_padding(2), with_label()]);
//! let cmd = bar.start_timer(Duration::from_secs(21), Duration::from_secs(2));
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use bubbletea_timebar::timebar::{self, with_label, with_size, CompletionDelegate};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! struct Alarm;
//!
//! impl CompletionDelegate for Alarm {
//!     fn on_timer_finished(&self) {
//!         // Time's up.
//!     }
//! }
//!
//! struct App {
//!     bar: timebar::Model,
//!     _alarm: Arc<Alarm>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let alarm = Arc::new(Alarm);
//!         let mut bar = timebar::new(&[with_size(30, 8), with_label()]);
//!         bar.set_delegate(&alarm);
//!         let cmd = bar.start_timer(Duration::from_secs(10), Duration::ZERO);
//!         (Self { bar, _alarm: alarm }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.bar.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.bar.view()
//!     }
//! }
//! ```

pub mod config;
pub mod layout;
pub mod model;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use config::{
    with_boundary_color, with_boundary_width, with_easing, with_fill_color, with_label,
    with_label_color, with_padding, with_padding_color, with_scheduler, with_size, without_label,
    Config, TimebarOption,
};
pub use layout::{Edge, Frames, Layout, Rect, Region, Sides, LABEL_HEIGHT};
pub use model::{countdown_start_delay, frame_interval, from_config, new, Model};
pub use types::{CompletionDelegate, Easing, FinishMsg, FrameMsg, ScheduledMsg, TickMsg};
