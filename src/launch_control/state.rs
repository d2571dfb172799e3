//! Per-control value memory
//!
//! Knobs remember their last absolute position. Pads keep
//! `|previous - incoming|`, which flips between 0 and 127 on each press
//! because the device only reports presses on the pad address (releases
//! arrive as Note Off on a different status byte). The rule is probably an
//! accidental toggle rather than a documented hardware semantic; the tests
//! pin it exactly.

use crate::launch_control::control::{Control, CONTROL_COUNT};

/// Value a pad holds while toggled on
pub const PAD_ON: u8 = 127;

/// Last stored value byte for each real control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    values: [u8; CONTROL_COUNT],
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value, `None` for `Control::Unknown`
    pub fn get(&self, control: Control) -> Option<u8> {
        self.values.get(control.ordinal() as usize).copied()
    }

    /// Overwrite a stored value, ignored for `Control::Unknown`
    pub fn set(&mut self, control: Control, value: u8) {
        if let Some(slot) = self.values.get_mut(control.ordinal() as usize) {
            *slot = value;
        }
    }

    /// Fold an observed value into the state and return the new stored value
    pub fn apply(&mut self, control: Control, value: u8) -> Option<u8> {
        let slot = self.values.get_mut(control.ordinal() as usize)?;

        *slot = if control.is_pad() {
            slot.abs_diff(value)
        } else {
            value
        };

        Some(*slot)
    }

    /// Whether a pad is currently toggled on
    pub fn is_on(&self, control: Control) -> bool {
        control.is_pad() && self.get(control) == Some(PAD_ON)
    }

    /// Stored values in control order
    pub fn iter(&self) -> impl Iterator<Item = (Control, u8)> + '_ {
        Control::ALL.into_iter().zip(self.values.iter().copied())
    }
}
