//! Countdown component for Bubble Tea applications.
//!
//! A countdown with nine digit fields (`HH:MM:SS.mmm`) and start, pause and
//! reset controls. The user types digits into the focused field, focus moves
//! right after each digit, and the start control becomes usable as soon as
//! the fields add up to more than zero.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::countdown::{Config, Model};
//! use bubbletea_countdown::digits::Field;
//! use std::time::Duration;
//!
//! let mut countdown = Model::with_config(
//!     Config::default().with_fixed_tick(Duration::from_millis(20)),
//! );
//! countdown.edit_digit(Field::SecondTens, 3);
//! let first_tick = countdown.start().expect("30 seconds to count down");
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use bubbletea_countdown::countdown::{Model, TimeUpMsg};
//!
//! struct App {
//!     countdown: Model,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         (Self { countdown: Model::new() }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(done) = msg.downcast_ref::<TimeUpMsg>() {
//!             if done.id == self.countdown.id() {
//!                 // ring a bell, show a notification...
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```
//!
//! # Ticks
//!
//! Each start draws a tick period from [`Config`] (10-50 ms by default) and
//! gets a fresh ticker tag. A [`TickMsg`] whose tag is not the active one was
//! scheduled before a pause or reset and is dropped.

pub mod config;
pub mod keymap;
pub mod model;
pub mod panel;
pub mod view;


pub use config::{Config, DEFAULT_MAX_TICK, DEFAULT_MIN_TICK};
pub use keymap::KeyMap;
pub use model::{new, Action, ControlMsg, Model, TickMsg, TimeUpMsg};
pub use panel::Panel;
pub use view::Styles;
