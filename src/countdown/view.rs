//! Rendering for the countdown component.

use super::model::Model;
use crate::digits::{Field, FocusTarget};
use crate::key::KeyMap as _;
use crate::machine::Control;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles used by [`Model::view`].
#[derive(Debug, Clone)]
pub struct Styles {
    /// An editable digit.
    pub digit: Style,
    /// The digit that receives typed input.
    pub focused_digit: Style,
    /// Digits while the countdown is running.
    pub locked_digit: Style,
    /// `:` and `.` between digit groups.
    pub separator: Style,
    /// An enabled control.
    pub control: Style,
    /// The control that `enter` activates.
    pub focused_control: Style,
    /// A control that cannot be used right now.
    pub disabled_control: Style,
    /// The message shown once the countdown reaches zero.
    pub time_up: Style,
    /// Key labels in the help line.
    pub help_key: Style,
    /// Descriptions in the help line.
    pub help_desc: Style,
}

fn subtle() -> lipgloss::AdaptiveColor {
    lipgloss::AdaptiveColor {
        Light: "#B2B2B2",
        Dark: "#4A4A4A",
    }
}

fn muted() -> lipgloss::AdaptiveColor {
    lipgloss::AdaptiveColor {
        Light: "#909090",
        Dark: "#626262",
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            digit: Style::new().bold(true),
            focused_digit: Style::new().bold(true).reverse(true),
            locked_digit: Style::new().foreground(lipgloss::Color::from("#FF5F87")),
            separator: Style::new().foreground(muted()),
            control: Style::new().bold(true),
            focused_control: Style::new().bold(true).underline(true),
            disabled_control: Style::new().faint(true).foreground(subtle()),
            time_up: Style::new().bold(true).foreground(lipgloss::Color::from("#FF5F87")),
            help_key: Style::new().foreground(muted()),
            help_desc: Style::new().foreground(subtle()),
        }
    }
}

impl Model {
    /// Renders the digits, the controls and a help line.
    ///
    /// ```text
    /// 00:01:30.000
    /// [start] [pause] [reset]
    /// →/tab next • ←/shift+tab prev • s start • p pause • r reset
    /// ```
    pub fn view(&self) -> String {
        let mut lines = vec![self.digits_view(), self.controls_view()];
        if self.panel().timed_out() {
            lines.push(self.styles.time_up.render("Time's up!"));
        }
        lines.push(self.help_view());
        lines.join("\n")
    }

    fn digits_view(&self) -> String {
        let panel = self.panel();
        let mut s = String::new();
        for (field, value) in panel.digits().iter() {
            let style = if !panel.inputs_editable() {
                &self.styles.locked_digit
            } else if self.focused() && panel.focus_target() == FocusTarget::Field(field) {
                &self.styles.focused_digit
            } else {
                &self.styles.digit
            };
            s.push_str(&style.render(&value.to_string()));

            let separator = match field {
                Field::HourOnes | Field::MinuteOnes => Some(':'),
                Field::SecondOnes => Some(self.config.separator.as_char()),
                _ => None,
            };
            if let Some(sep) = separator {
                s.push_str(&self.styles.separator.render(&sep.to_string()));
            }
        }
        s
    }

    fn controls_view(&self) -> String {
        let panel = self.panel();
        Control::ALL
            .iter()
            .map(|control| {
                let label = match control {
                    Control::Start => "[start]",
                    Control::Pause => "[pause]",
                    Control::Reset => "[reset]",
                };
                let style = if !panel.control_enabled(*control) {
                    &self.styles.disabled_control
                } else if *control == Control::Start
                    && self.focused()
                    && panel.focus_target() == FocusTarget::StartControl
                {
                    &self.styles.focused_control
                } else {
                    &self.styles.control
                };
                style.render(label)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn help_view(&self) -> String {
        self.keymap
            .short_help()
            .iter()
            .map(|binding| {
                format!(
                    "{} {}",
                    self.styles.help_key.render(&binding.help.key),
                    self.styles.help_desc.render(&binding.help.desc)
                )
            })
            .collect::<Vec<_>>()
            .join(" • ")
    }
}
