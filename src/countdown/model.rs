//! The countdown component model and its messages.

use super::config::Config;
use super::keymap::KeyMap;
use super::panel::Panel;
use super::view::Styles;
use crate::digits::{Digit, DigitSet, Field, FocusTarget};
use crate::error::TimerError;
use crate::machine::{
    Control, EditOutcome, Phase, StateMachine, TickOutcome, Ticker, TimerView,
};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::KeyCode;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// One countdown tick, delivered after the tick period has elapsed.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The countdown this tick belongs to.
    pub id: i64,
    /// Time to subtract from the remaining time.
    pub elapsed: Duration,
    tag: u64,
}

/// Sent once when a countdown reaches zero.
#[derive(Debug, Clone)]
pub struct TimeUpMsg {
    /// The countdown that finished.
    pub id: i64,
}

/// Control action requested through [`ControlMsg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start or resume.
    Start,
    /// Pause.
    Pause,
    /// Reset to zero.
    Reset,
}

/// Drives a countdown's controls from outside the component.
#[derive(Debug, Clone)]
pub struct ControlMsg {
    /// Target countdown; `0` addresses every countdown.
    pub id: i64,
    /// What to do.
    pub action: Action,
}

/// A countdown timer with nine editable digit fields.
///
/// Type digits into the focused field to set the time, then start. While
/// running the fields are locked and show the time left; pausing unlocks
/// them again.
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::countdown::Model;
/// use bubbletea_countdown::digits::Field;
///
/// let mut countdown = Model::new();
/// countdown.edit_digit(Field::MinuteOnes, 5);
/// assert_eq!(countdown.remaining_ms(), 300_000);
/// assert!(countdown.start().is_ok());
/// assert!(countdown.running());
/// ```
#[derive(Debug)]
pub struct Model {
    /// Tick period and display options.
    pub config: Config,
    /// Key bindings.
    pub keymap: KeyMap,
    /// Rendering styles.
    pub styles: Styles,

    id: i64,
    focused: bool,
    machine: StateMachine<Panel>,
    rng: StdRng,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an idle, focused countdown with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an idle, focused countdown.
    pub fn with_config(config: Config) -> Self {
        let rng = config.rng();
        Self {
            config,
            keymap: KeyMap::default(),
            styles: Styles::default(),
            id: next_id(),
            focused: true,
            machine: StateMachine::new(Panel::default()),
            rng,
        }
    }

    /// Unique id used to route messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current state kind.
    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Whether the countdown is running.
    pub fn running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Milliseconds left.
    pub fn remaining_ms(&self) -> u64 {
        self.machine.remaining_ms()
    }

    /// Digits currently shown.
    pub fn digits(&self) -> DigitSet {
        self.machine.digits()
    }

    /// Display state: digits, controls, focus.
    pub fn panel(&self) -> &Panel {
        self.machine.view()
    }

    /// Sets one digit field; see [`StateMachine::edit_digit`].
    pub fn edit_digit(&mut self, field: Field, value: u8) -> EditOutcome {
        let outcome = self.machine.edit_digit(field, value);
        if outcome == EditOutcome::Applied {
            self.machine.view_mut().clear_timed_out();
        }
        outcome
    }

    /// Starts the countdown and returns the command for the first tick.
    ///
    /// # Errors
    ///
    /// [`TimerError::IllegalTransition`] unless paused with time left.
    pub fn start(&mut self) -> Result<Cmd, TimerError> {
        let period = self.config.pick_period(&mut self.rng);
        let ticker = self.machine.start(period)?;
        self.machine.view_mut().clear_timed_out();
        Ok(self.tick(ticker))
    }

    /// Pauses a running countdown.
    ///
    /// # Errors
    ///
    /// [`TimerError::IllegalTransition`] unless running.
    pub fn pause(&mut self) -> Result<(), TimerError> {
        self.machine.pause()
    }

    /// Clears the remaining time.
    ///
    /// # Errors
    ///
    /// [`TimerError::IllegalTransition`] when already idle.
    pub fn reset(&mut self) -> Result<(), TimerError> {
        self.machine.reset()
    }

    /// The tick message the active ticker will deliver next, if running.
    pub fn tick_msg(&self) -> Option<TickMsg> {
        self.machine.active_ticker().map(|ticker| TickMsg {
            id: self.id,
            elapsed: ticker.period,
            tag: ticker.tag,
        })
    }

    /// Command that sends a [`ControlMsg`] for this countdown.
    pub fn control(&self, action: Action) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(ControlMsg { id, action }) as Msg
        })
    }

    fn tick(&self, ticker: Ticker) -> Cmd {
        let id = self.id;
        let tag = ticker.tag;
        let elapsed = ticker.period;

        bubbletea_tick(ticker.period, move |_| {
            Box::new(TickMsg { id, elapsed, tag }) as Msg
        })
    }

    fn time_up(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(TimeUpMsg { id }) as Msg
        })
    }

    fn perform(&mut self, action: Action) -> Option<Cmd> {
        let result = match action {
            Action::Start => self.start().map(Some),
            Action::Pause => self.pause().map(|()| None),
            Action::Reset => self.reset().map(|()| None),
        };
        result.unwrap_or_else(|err| {
            debug!(%err, ?action, "control ignored");
            None
        })
    }

    fn set_focus(&mut self, target: FocusTarget) {
        self.machine.view_mut().focus(target);
    }

    /// Handles key presses, ticks and control messages.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(control) = msg.downcast_ref::<ControlMsg>() {
            if control.id != 0 && control.id != self.id {
                return None;
            }
            return self.perform(control.action);
        }

        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != self.id {
                return None;
            }

            // Ticks from a cancelled source carry an old tag.
            let Some(ticker) = self.machine.active_ticker() else {
                trace!(tag = tick_msg.tag, "tick while not running");
                return None;
            };
            if ticker.tag != tick_msg.tag {
                trace!(tag = tick_msg.tag, active = ticker.tag, "stale tick");
                return None;
            }

            let elapsed_ms = u64::try_from(tick_msg.elapsed.as_millis()).unwrap_or(u64::MAX);
            return match self.machine.tick(elapsed_ms) {
                Ok(TickOutcome::Continue) => Some(self.tick(ticker)),
                Ok(TickOutcome::Finished) => Some(self.time_up()),
                Err(err) => {
                    debug!(%err, "tick dropped");
                    None
                }
            };
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if !self.focused {
                return None;
            }
            return self.handle_key(key_msg);
        }

        None
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        let focus = self.panel().focus_target();

        if let KeyCode::Char(c) = key_msg.key {
            if let (Ok(digit), FocusTarget::Field(field)) = (Digit::try_from(c), focus) {
                self.edit_digit(field, digit.value());
                return None;
            }
        }

        if self.keymap.next_field.matches(key_msg) {
            self.set_focus(focus.forward());
        } else if self.keymap.prev_field.matches(key_msg) {
            self.set_focus(focus.backward());
        } else if self.keymap.start.matches(key_msg)
            || (key_msg.key == KeyCode::Enter && focus == FocusTarget::StartControl)
        {
            if self.panel().control_enabled(Control::Start) {
                return self.perform(Action::Start);
            }
        } else if self.keymap.pause.matches(key_msg) {
            if self.panel().control_enabled(Control::Pause) {
                return self.perform(Action::Pause);
            }
        } else if self.keymap.reset.matches(key_msg) {
            if self.panel().control_enabled(Control::Reset) {
                return self.perform(Action::Reset);
            }
        }
        None
    }

    /// Focuses the component so it receives key presses.
    pub fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    /// Stops the component from receiving key presses.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Whether the component receives key presses.
    pub fn focused(&self) -> bool {
        self.focused
    }
}

impl crate::Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        Model::focus(self)
    }

    fn blur(&mut self) {
        Model::blur(self)
    }

    fn focused(&self) -> bool {
        Model::focused(self)
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

/// Creates a countdown with the default configuration.
pub fn new() -> Model {
    Model::new()
}
