//! In-memory display state the state machine reports to.

use crate::digits::{DigitSet, Field, FocusTarget};
use crate::machine::{Control, TimerView};

/// What the countdown component currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    digits: DigitSet,
    start_enabled: bool,
    pause_enabled: bool,
    reset_enabled: bool,
    focus: FocusTarget,
    inputs_editable: bool,
    timed_out: bool,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            digits: DigitSet::ZERO,
            start_enabled: false,
            pause_enabled: false,
            reset_enabled: false,
            focus: FocusTarget::Field(Field::HourTens),
            inputs_editable: true,
            timed_out: false,
        }
    }
}

impl Panel {
    /// Digits last rendered.
    pub fn digits(&self) -> &DigitSet {
        &self.digits
    }

    /// Whether `control` is enabled.
    pub fn control_enabled(&self, control: Control) -> bool {
        match control {
            Control::Start => self.start_enabled,
            Control::Pause => self.pause_enabled,
            Control::Reset => self.reset_enabled,
        }
    }

    /// The focused field or control.
    pub fn focus_target(&self) -> FocusTarget {
        self.focus
    }

    /// Whether the digit fields accept edits.
    pub fn inputs_editable(&self) -> bool {
        self.inputs_editable
    }

    /// Whether the last run ended by reaching zero.
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    pub(crate) fn clear_timed_out(&mut self) {
        self.timed_out = false;
    }
}

impl TimerView for Panel {
    fn render(&mut self, digits: &DigitSet) {
        self.digits = *digits;
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        match control {
            Control::Start => self.start_enabled = enabled,
            Control::Pause => self.pause_enabled = enabled,
            Control::Reset => self.reset_enabled = enabled,
        }
    }

    fn focus(&mut self, target: FocusTarget) {
        self.focus = target;
    }

    fn time_up(&mut self) {
        self.timed_out = true;
    }

    fn set_inputs_editable(&mut self, editable: bool) {
        self.inputs_editable = editable;
    }
}
