//! Key bindings for the countdown component.

use crate::key::{self, Binding};
use crossterm::event::KeyCode;

/// Key bindings for moving between digit fields and driving the controls.
///
/// Digit keys are not listed here: `0`-`9` always edit the focused field.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Move focus one field right, then on to the start control.
    pub next_field: Binding,
    /// Move focus one field left.
    pub prev_field: Binding,
    /// Start the countdown. `enter` also starts when the start control is focused.
    pub start: Binding,
    /// Pause the countdown.
    pub pause: Binding,
    /// Clear the remaining time.
    pub reset: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            next_field: Binding::new(vec![KeyCode::Tab, KeyCode::Right]).with_help("→/tab", "next"),
            prev_field: Binding::new(vec![KeyCode::BackTab, KeyCode::Left])
                .with_help("←/shift+tab", "prev"),
            start: Binding::new(vec![KeyCode::Char('s')]).with_help("s", "start"),
            pause: Binding::new(vec![KeyCode::Char('p')]).with_help("p", "pause"),
            reset: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
        }
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.next_field,
            &self.prev_field,
            &self.start,
            &self.pause,
            &self.reset,
        ]
    }
}
