//! # bubbletea-countdown
//!
//! A digit-entry countdown timer for terminal applications built with
//! [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs).
//!
//! The crate is split into a pure core and a component:
//!
//! - [`digits`]: conversion between milliseconds and the nine display digits
//!   (`HH:MM:SS.mmm`).
//! - [`machine`]: the running / paused / idle state machine, reporting to a
//!   [`machine::TimerView`] collaborator.
//! - [`countdown`]: the bubbletea-rs component that implements the view,
//!   turns key presses into edits and owns the tick command.
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//!
//! let mut countdown = Countdown::new();
//! countdown.edit_digit(Field::SecondOnes, 5);
//! assert_eq!(countdown.remaining_ms(), 5_000);
//! assert_eq!(countdown.digits().to_string(), "00:00:05.000");
//! ```
//!
//! The core can also be driven without a terminal by implementing
//! [`machine::TimerView`] for any type.

#![warn(missing_docs)]

pub mod countdown;
pub mod digits;
pub mod error;
pub mod key;
pub mod machine;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused component receives key presses; a blurred one ignores them and
/// should render in an inactive state.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let mut countdown = Countdown::new();
/// assert!(countdown.focused());
///
/// Component::blur(&mut countdown);
/// assert!(!Component::focused(&countdown));
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command to run on focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use countdown::{
    new as countdown_new, Action as CountdownAction, Config as CountdownConfig,
    ControlMsg as CountdownControlMsg, Model as Countdown, TickMsg as CountdownTickMsg,
    TimeUpMsg as CountdownTimeUpMsg,
};
pub use digits::{format, from_digits, to_digits, DigitSet, Field, FocusTarget, Separator};
pub use error::TimerError;
pub use machine::{Control, Phase, StateMachine, TimerState, TimerView};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
/// ```
pub mod prelude {
    pub use crate::countdown::{
        new as countdown_new, Action as CountdownAction, Config as CountdownConfig,
        KeyMap as CountdownKeyMap, Model as Countdown, Styles as CountdownStyles,
        TickMsg as CountdownTickMsg, TimeUpMsg as CountdownTimeUpMsg,
    };
    pub use crate::digits::{to_digits, DigitSet, Field, FocusTarget, Separator};
    pub use crate::error::TimerError;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::machine::{Control, EditOutcome, Phase, StateMachine, TimerState, TimerView};
    pub use crate::Component;
}
