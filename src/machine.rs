//! The countdown state machine.
//!
//! [`StateMachine`] owns the single live [`TimerState`] and the view
//! collaborator it reports to. Every operation runs to completion before the
//! next one starts, and every transition out of `Running` drops the active
//! [`Ticker`] together with the `Running` variant that held it, so a paused
//! or reset timer can never be advanced by a leftover tick.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_countdown::digits::{DigitSet, Field, FocusTarget};
//! use bubbletea_countdown::machine::{Control, Phase, StateMachine, TimerView};
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct Silent;
//!
//! impl TimerView for Silent {
//!     fn render(&mut self, _digits: &DigitSet) {}
//!     fn set_control_enabled(&mut self, _control: Control, _enabled: bool) {}
//!     fn focus(&mut self, _target: FocusTarget) {}
//!     fn time_up(&mut self) {}
//! }
//!
//! let mut timer = StateMachine::new(Silent);
//! timer.edit_digit(Field::SecondOnes, 2);
//! assert_eq!(timer.remaining_ms(), 2_000);
//!
//! timer.start(Duration::from_millis(50)).unwrap();
//! while timer.phase() == Phase::Running {
//!     timer.tick(50).unwrap();
//! }
//! assert_eq!(timer.phase(), Phase::Idle);
//! ```

use crate::digits::{to_digits, Digit, DigitSet, Field, FocusTarget};
use crate::error::{Operation, TimerError};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, trace};

/// One of the three widget controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Begins or resumes the countdown.
    Start,
    /// Pauses a running countdown.
    Pause,
    /// Clears the remaining time.
    Reset,
}

impl Control {
    /// All controls in display order.
    pub const ALL: [Control; 3] = [Control::Start, Control::Pause, Control::Reset];
}

/// The presentation side of the timer.
///
/// The state machine calls these methods as side effects of its
/// transitions; implementors decide how digits, controls and focus are shown.
pub trait TimerView {
    /// Shows the given digits.
    fn render(&mut self, digits: &DigitSet);

    /// Enables or disables one control.
    fn set_control_enabled(&mut self, control: Control, enabled: bool);

    /// Moves keyboard focus.
    fn focus(&mut self, target: FocusTarget);

    /// The countdown reached zero.
    fn time_up(&mut self);

    /// Allows or forbids editing the digit fields.
    fn set_inputs_editable(&mut self, _editable: bool) {}
}

/// The periodic tick source of a running timer.
///
/// A new ticker, with a new tag, is created on every start. Tick messages
/// carrying any other tag belong to a source that has since been cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    /// Identifies this tick source.
    pub tag: u64,
    /// Time between ticks.
    pub period: Duration,
}

/// The live state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Counting down; `ticker` is the only active tick source.
    Running {
        /// Milliseconds left.
        remaining_ms: u64,
        /// The active tick source.
        ticker: Ticker,
    },
    /// Not counting down, holding the time left.
    PausedWithTime {
        /// Milliseconds left.
        remaining_ms: u64,
    },
    /// No time left and not running.
    Idle,
}

impl TimerState {
    /// The variant without its data.
    pub fn phase(&self) -> Phase {
        match self {
            TimerState::Running { .. } => Phase::Running,
            TimerState::PausedWithTime { .. } => Phase::PausedWithTime,
            TimerState::Idle => Phase::Idle,
        }
    }
}

/// The kind of a [`TimerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// See [`TimerState::Running`].
    Running,
    /// See [`TimerState::PausedWithTime`].
    PausedWithTime,
    /// See [`TimerState::Idle`].
    Idle,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Running => "running",
            Phase::PausedWithTime => "not_running_with_time_remaining",
            Phase::Idle => "not_running_no_time_remaining",
        })
    }
}

/// Result of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running; schedule the next tick.
    Continue,
    /// Reached zero; the ticker has been cancelled.
    Finished,
}

/// Result of a digit edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The digit was stored and the remaining time recomputed.
    Applied,
    /// The timer is running; the edit was dropped.
    Ignored,
    /// The value was not a decimal digit; the edit was dropped.
    Rejected,
}

/// Countdown state machine reporting to a [`TimerView`].
#[derive(Debug)]
pub struct StateMachine<V: TimerView> {
    state: TimerState,
    fields: DigitSet,
    next_tag: u64,
    view: V,
}

impl<V: TimerView> StateMachine<V> {
    /// Creates an idle timer, rendering zero with every control disabled.
    pub fn new(mut view: V) -> Self {
        view.render(&DigitSet::ZERO);
        disable_controls(&mut view);
        Self {
            state: TimerState::Idle,
            fields: DigitSet::ZERO,
            next_tag: 0,
            view,
        }
    }

    /// The live state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// The kind of the live state.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Milliseconds left; zero when idle.
    pub fn remaining_ms(&self) -> u64 {
        match self.state {
            TimerState::Running { remaining_ms, .. }
            | TimerState::PausedWithTime { remaining_ms } => remaining_ms,
            TimerState::Idle => 0,
        }
    }

    /// The digits currently shown in the fields.
    pub fn digits(&self) -> DigitSet {
        self.fields
    }

    /// The active tick source, present only while running.
    pub fn active_ticker(&self) -> Option<Ticker> {
        match self.state {
            TimerState::Running { ticker, .. } => Some(ticker),
            _ => None,
        }
    }

    /// The view collaborator.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view collaborator.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Starts counting down with a tick every `tick_period`.
    ///
    /// Only a paused timer with time left can start.
    ///
    /// # Errors
    ///
    /// [`TimerError::IllegalTransition`] when idle, running, or paused at zero.
    pub fn start(&mut self, tick_period: Duration) -> Result<Ticker, TimerError> {
        let remaining_ms = match self.state {
            TimerState::PausedWithTime { remaining_ms } if remaining_ms > 0 => remaining_ms,
            _ => return Err(self.illegal(Operation::Start)),
        };

        self.next_tag += 1;
        let ticker = Ticker {
            tag: self.next_tag,
            period: tick_period,
        };
        self.state = TimerState::Running {
            remaining_ms,
            ticker,
        };
        debug!(remaining_ms, tag = ticker.tag, period = ?tick_period, "timer started");

        self.view.set_control_enabled(Control::Start, false);
        self.view.set_control_enabled(Control::Pause, true);
        self.view.set_control_enabled(Control::Reset, true);
        self.view.set_inputs_editable(false);
        Ok(ticker)
    }

    /// Subtracts `elapsed_ms` from the remaining time.
    ///
    /// # Errors
    ///
    /// [`TimerError::IllegalTransition`] unless running.
    pub fn tick(&mut self, elapsed_ms: u64) -> Result<TickOutcome, TimerError> {
        let (remaining_ms, ticker) = match self.state {
            TimerState::Running {
                remaining_ms,
                ticker,
            } => (remaining_ms, ticker),
            _ => return Err(self.illegal(Operation::Tick)),
        };

        if elapsed_ms >= remaining_ms {
            self.state = TimerState::Idle;
            self.fields = DigitSet::ZERO;
            info!(tag = ticker.tag, "time's up");

            self.view.render(&self.fields);
            disable_controls(&mut self.view);
            self.view.set_inputs_editable(true);
            self.view.time_up();
            return Ok(TickOutcome::Finished);
        }

        let remaining_ms = remaining_ms - elapsed_ms;
        self.state = TimerState::Running {
            remaining_ms,
            ticker,
        };
        self.fields = to_digits(remaining_ms);
        trace!(remaining_ms, "tick");
        self.view.render(&self.fields);
        Ok(TickOutcome::Continue)
    }

    /// Stops counting down, keeping the remaining time.
    ///
    /// # Errors
    ///
    /// [`TimerError::IllegalTransition`] unless running.
    pub fn pause(&mut self) -> Result<(), TimerError> {
        let TimerState::Running { remaining_ms, .. } = self.state else {
            return Err(self.illegal(Operation::Pause));
        };

        self.state = TimerState::PausedWithTime { remaining_ms };
        debug!(remaining_ms, "timer paused");

        self.view.set_control_enabled(Control::Start, true);
        self.view.set_control_enabled(Control::Pause, false);
        self.view.set_inputs_editable(true);
        Ok(())
    }

    /// Clears the remaining time and returns to idle.
    ///
    /// # Errors
    ///
    /// [`TimerError::IllegalTransition`] when already idle.
    pub fn reset(&mut self) -> Result<(), TimerError> {
        match self.state {
            TimerState::Running { .. } | TimerState::PausedWithTime { .. } => {}
            TimerState::Idle => return Err(self.illegal(Operation::Reset)),
        }

        self.state = TimerState::Idle;
        self.fields = DigitSet::ZERO;
        debug!("timer reset");

        self.view.render(&self.fields);
        self.view.set_inputs_editable(true);
        disable_controls(&mut self.view);
        Ok(())
    }

    /// Sets one field and recomputes the remaining time from all nine.
    ///
    /// Edits while running and values outside 0-9 are dropped without
    /// touching any state.
    pub fn edit_digit(&mut self, field: Field, value: u8) -> EditOutcome {
        if self.phase() == Phase::Running {
            debug!(%field, "timer is running, ignoring input");
            return EditOutcome::Ignored;
        }
        let digit = match Digit::try_from(value) {
            Ok(digit) => digit,
            Err(err) => {
                trace!(%field, %err, "dropping edit");
                return EditOutcome::Rejected;
            }
        };

        self.fields.set(field, digit);
        let remaining_ms = self.fields.to_millis();
        self.state = TimerState::PausedWithTime { remaining_ms };
        debug!(%field, value, remaining_ms, "digit edited");

        self.view.render(&self.fields);
        self.view.focus(field.next());
        self.view.set_control_enabled(Control::Start, true);
        if remaining_ms == 0 {
            disable_controls(&mut self.view);
        }
        EditOutcome::Applied
    }

    fn illegal(&self, operation: Operation) -> TimerError {
        let state = self.phase();
        debug!(%operation, %state, "rejected transition");
        TimerError::IllegalTransition { operation, state }
    }
}

fn disable_controls<V: TimerView>(view: &mut V) {
    for control in Control::ALL {
        view.set_control_enabled(control, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Render(DigitSet),
        Control(Control, bool),
        Focus(FocusTarget),
        TimeUp,
        Editable(bool),
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn take(&mut self) -> Vec<Call> {
            std::mem::take(&mut self.calls)
        }

        fn time_ups(&self) -> usize {
            self.calls.iter().filter(|c| **c == Call::TimeUp).count()
        }
    }

    impl TimerView for Recorder {
        fn render(&mut self, digits: &DigitSet) {
            self.calls.push(Call::Render(*digits));
        }
        fn set_control_enabled(&mut self, control: Control, enabled: bool) {
            self.calls.push(Call::Control(control, enabled));
        }
        fn focus(&mut self, target: FocusTarget) {
            self.calls.push(Call::Focus(target));
        }
        fn time_up(&mut self) {
            self.calls.push(Call::TimeUp);
        }
        fn set_inputs_editable(&mut self, editable: bool) {
            self.calls.push(Call::Editable(editable));
        }
    }

    fn all_disabled() -> Vec<Call> {
        vec![
            Call::Control(Control::Start, false),
            Call::Control(Control::Pause, false),
            Call::Control(Control::Reset, false),
        ]
    }

    fn machine_with(field: Field, value: u8) -> StateMachine<Recorder> {
        let mut m = StateMachine::new(Recorder::default());
        assert_eq!(m.edit_digit(field, value), EditOutcome::Applied);
        m.view_mut().take();
        m
    }

    const PERIOD: Duration = Duration::from_millis(50);

    #[test]
    fn test_new_renders_zero_and_disables_controls() {
        let mut m = StateMachine::new(Recorder::default());
        assert_eq!(m.state(), TimerState::Idle);
        let mut expected = vec![Call::Render(DigitSet::ZERO)];
        expected.extend(all_disabled());
        assert_eq!(m.view_mut().take(), expected);
    }

    #[test]
    fn test_edit_from_idle_moves_to_paused() {
        let mut m = StateMachine::new(Recorder::default());
        m.view_mut().take();

        assert_eq!(m.edit_digit(Field::MinuteOnes, 3), EditOutcome::Applied);
        assert_eq!(
            m.state(),
            TimerState::PausedWithTime {
                remaining_ms: 180_000
            }
        );
        let calls = m.view_mut().take();
        assert_eq!(calls[1], Call::Focus(FocusTarget::Field(Field::SecondTens)));
        assert_eq!(calls[2], Call::Control(Control::Start, true));
        assert_eq!(calls.len(), 3);
    }

    #[test]
    fn test_edit_recomputes_from_all_fields() {
        let mut m = machine_with(Field::SecondOnes, 5);
        m.edit_digit(Field::SecondOnes, 2);
        assert_eq!(m.remaining_ms(), 2_000);
        m.edit_digit(Field::HourOnes, 1);
        assert_eq!(m.remaining_ms(), 3_602_000);
        m.edit_digit(Field::MillisOnes, 7);
        assert_eq!(m.remaining_ms(), 3_602_007);
        assert_eq!(m.digits().to_string(), "01:00:02.007");
    }

    #[test]
    fn test_edit_last_field_focuses_start_control() {
        let mut m = machine_with(Field::MillisOnes, 1);
        m.edit_digit(Field::MillisOnes, 4);
        assert!(m
            .view_mut()
            .take()
            .contains(&Call::Focus(FocusTarget::StartControl)));
    }

    #[test]
    fn test_edit_to_zero_disables_all_controls() {
        let mut m = machine_with(Field::SecondOnes, 5);
        assert_eq!(m.edit_digit(Field::SecondOnes, 0), EditOutcome::Applied);
        assert_eq!(m.state(), TimerState::PausedWithTime { remaining_ms: 0 });

        let calls = m.view_mut().take();
        assert_eq!(calls[2], Call::Control(Control::Start, true));
        assert_eq!(calls[3..].to_vec(), all_disabled());

        assert!(matches!(
            m.start(PERIOD),
            Err(TimerError::IllegalTransition {
                operation: Operation::Start,
                state: Phase::PausedWithTime
            })
        ));
    }

    #[test]
    fn test_edit_while_running_is_ignored() {
        let mut m = machine_with(Field::SecondOnes, 5);
        m.start(PERIOD).unwrap();
        m.tick(50).unwrap();
        let before = (m.state(), m.digits());
        m.view_mut().take();

        assert_eq!(m.edit_digit(Field::HourTens, 9), EditOutcome::Ignored);
        assert_eq!((m.state(), m.digits()), before);
        assert!(m.view_mut().take().is_empty());
    }

    #[test]
    fn test_out_of_range_digit_is_rejected() {
        let mut m = StateMachine::new(Recorder::default());
        m.view_mut().take();
        assert_eq!(m.edit_digit(Field::SecondOnes, 10), EditOutcome::Rejected);
        assert_eq!(m.state(), TimerState::Idle);
        assert!(m.view_mut().take().is_empty());
    }

    #[test]
    fn test_start_from_idle_is_rejected() {
        let mut m = StateMachine::new(Recorder::default());
        m.view_mut().take();
        let err = m.start(PERIOD).unwrap_err();
        assert_eq!(
            err,
            TimerError::IllegalTransition {
                operation: Operation::Start,
                state: Phase::Idle
            }
        );
        assert_eq!(
            err.to_string(),
            "cannot start timer in state not_running_no_time_remaining"
        );
        assert!(m.view_mut().take().is_empty());
    }

    #[test]
    fn test_start_sets_button_states() {
        let mut m = machine_with(Field::SecondOnes, 5);
        let ticker = m.start(PERIOD).unwrap();
        assert_eq!(ticker.period, PERIOD);
        assert_eq!(m.active_ticker(), Some(ticker));
        assert_eq!(
            m.view_mut().take(),
            vec![
                Call::Control(Control::Start, false),
                Call::Control(Control::Pause, true),
                Call::Control(Control::Reset, true),
                Call::Editable(false),
            ]
        );
    }

    #[test]
    fn test_start_while_running_keeps_single_ticker() {
        let mut m = machine_with(Field::SecondOnes, 5);
        let ticker = m.start(PERIOD).unwrap();
        assert!(m.start(PERIOD).is_err());
        assert_eq!(m.active_ticker(), Some(ticker));
    }

    #[test]
    fn test_each_start_gets_a_new_tag() {
        let mut m = machine_with(Field::SecondOnes, 5);
        let first = m.start(PERIOD).unwrap();
        m.pause().unwrap();
        let second = m.start(PERIOD).unwrap();
        assert_ne!(first.tag, second.tag);
    }

    #[test]
    fn test_tick_renders_remaining_digits() {
        let mut m = machine_with(Field::SecondOnes, 2);
        m.start(PERIOD).unwrap();
        m.view_mut().take();

        assert_eq!(m.tick(50), Ok(TickOutcome::Continue));
        assert_eq!(m.remaining_ms(), 1_950);
        assert_eq!(m.view_mut().take(), vec![Call::Render(to_digits(1_950))]);
    }

    #[test]
    fn test_run_to_zero_finishes_once() {
        let mut m = machine_with(Field::SecondOnes, 2);
        m.start(PERIOD).unwrap();

        let mut elapsed = 0;
        let outcome = loop {
            elapsed += 50;
            match m.tick(50).unwrap() {
                TickOutcome::Continue => continue,
                TickOutcome::Finished => break elapsed,
            }
        };
        assert_eq!(outcome, 2_000);
        assert_eq!(m.state(), TimerState::Idle);
        assert_eq!(m.active_ticker(), None);
        assert_eq!(m.digits().to_string(), "00:00:00.000");

        let calls = m.view_mut().take();
        assert_eq!(calls.iter().filter(|c| **c == Call::TimeUp).count(), 1);
        let tail = &calls[calls.len() - 6..];
        assert_eq!(tail[0], Call::Render(DigitSet::ZERO));
        assert_eq!(tail[1..4].to_vec(), all_disabled());
        assert_eq!(tail[4], Call::Editable(true));
        assert_eq!(tail[5], Call::TimeUp);

        // Terminal state: further ticks change nothing.
        assert!(m.tick(50).is_err());
        assert_eq!(m.state(), TimerState::Idle);
        assert_eq!(m.view().time_ups(), 0);
    }

    #[test]
    fn test_tick_larger_than_remaining_clamps_to_zero() {
        let mut m = machine_with(Field::MillisTens, 3);
        m.start(PERIOD).unwrap();
        assert_eq!(m.tick(47), Ok(TickOutcome::Finished));
        assert_eq!(m.remaining_ms(), 0);
        assert_eq!(m.view().time_ups(), 1);
    }

    #[test]
    fn test_pause_holds_remaining_time() {
        let mut m = machine_with(Field::SecondOnes, 5);
        m.start(PERIOD).unwrap();
        m.view_mut().take();
        m.pause().unwrap();

        assert_eq!(
            m.state(),
            TimerState::PausedWithTime {
                remaining_ms: 5_000
            }
        );
        assert_eq!(m.active_ticker(), None);
        assert_eq!(
            m.view_mut().take(),
            vec![
                Call::Control(Control::Start, true),
                Call::Control(Control::Pause, false),
                Call::Editable(true),
            ]
        );

        for _ in 0..10 {
            assert!(m.tick(50).is_err());
        }
        assert_eq!(m.remaining_ms(), 5_000);
    }

    #[test]
    fn test_resume_continues_from_paused_value() {
        let mut m = machine_with(Field::SecondOnes, 1);
        m.start(PERIOD).unwrap();
        m.tick(300).unwrap();
        m.pause().unwrap();
        m.start(PERIOD).unwrap();
        m.tick(200).unwrap();
        assert_eq!(m.remaining_ms(), 500);
    }

    #[test]
    fn test_pause_when_not_running_is_rejected() {
        let mut m = machine_with(Field::SecondOnes, 1);
        assert_eq!(
            m.pause(),
            Err(TimerError::IllegalTransition {
                operation: Operation::Pause,
                state: Phase::PausedWithTime
            })
        );
        m.reset().unwrap();
        assert!(m.pause().is_err());
    }

    #[test]
    fn test_reset_from_running() {
        let mut m = machine_with(Field::SecondOnes, 5);
        m.start(PERIOD).unwrap();
        m.tick(50).unwrap();
        m.view_mut().take();

        m.reset().unwrap();
        assert_eq!(m.state(), TimerState::Idle);
        assert_eq!(m.remaining_ms(), 0);
        assert_eq!(m.active_ticker(), None);

        let mut expected = vec![Call::Render(DigitSet::ZERO), Call::Editable(true)];
        expected.extend(all_disabled());
        assert_eq!(m.view_mut().take(), expected);
        assert_eq!(m.view().time_ups(), 0);
    }

    #[test]
    fn test_reset_from_paused() {
        let mut m = machine_with(Field::MinuteTens, 2);
        m.reset().unwrap();
        assert_eq!(m.state(), TimerState::Idle);
        assert_eq!(m.digits(), DigitSet::ZERO);
    }

    #[test]
    fn test_reset_from_idle_is_rejected() {
        let mut m = StateMachine::new(Recorder::default());
        m.view_mut().take();
        assert_eq!(
            m.reset(),
            Err(TimerError::IllegalTransition {
                operation: Operation::Reset,
                state: Phase::Idle
            })
        );
        assert!(m.view_mut().take().is_empty());
    }

    #[test]
    fn test_edit_after_finish_starts_fresh() {
        let mut m = machine_with(Field::MillisOnes, 5);
        m.start(PERIOD).unwrap();
        m.tick(50).unwrap();
        assert_eq!(m.phase(), Phase::Idle);

        m.edit_digit(Field::SecondOnes, 3);
        assert_eq!(m.remaining_ms(), 3_000);
        assert_eq!(m.phase(), Phase::PausedWithTime);
    }
}
