//! Key bindings and help text for component key maps.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// Short key label and description shown in help views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// The key as displayed, e.g. `"tab/→"`.
    pub key: String,
    /// What the key does.
    pub desc: String,
}

/// A set of keys that trigger one action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Keys that trigger the binding.
    pub keys: Vec<KeyCode>,
    /// Help text for the binding.
    pub help: Help,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding for `keys` with no help text.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: Help::default(),
            enabled: true,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Enables or disables the binding. Disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the binding is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// True when the binding is enabled and the key is one of its keys.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        self.enabled && self.keys.contains(&key_msg.key)
    }
}

/// Key maps that can describe themselves in a help view.
pub trait KeyMap {
    /// Bindings shown in the single-line help.
    fn short_help(&self) -> Vec<&Binding>;
}
