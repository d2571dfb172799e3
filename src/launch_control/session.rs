//! Decoding session
//!
//! Owns the registry and the per-control state for one connected device.
//! All classification goes through a single `Session`, so state updates are
//! serialized by whoever holds it.

use crate::error::ProtocolError;
use crate::launch_control::codec::{self, ControlEvent};
use crate::launch_control::control::ColorBrightness;
use crate::launch_control::registry::ControlRegistry;
use crate::launch_control::state::{ControlState, PAD_ON};

#[derive(Debug, Clone)]
pub struct Session {
    registry: ControlRegistry,
    state: ControlState,
    /// Color a toggled-on pad is lit with, `None` disables toggle mode
    toggle_color: Option<ColorBrightness>,
}

impl Session {
    /// Session on factory template 1, fails if its table is not injective
    pub fn new(toggle_color: Option<ColorBrightness>) -> Result<Self, ProtocolError> {
        Ok(Self {
            registry: ControlRegistry::factory_template()?,
            state: ControlState::new(),
            toggle_color,
        })
    }

    pub fn classify(&mut self, raw: &[u8], timestamp: u64) -> Result<ControlEvent, ProtocolError> {
        codec::classify(&self.registry, &mut self.state, raw, timestamp)
    }

    /// LED message mirroring a pad's toggle state, when toggle mode is on
    pub fn feedback_for(&self, event: &ControlEvent) -> Option<Vec<u8>> {
        let on_color = self.toggle_color?;
        let pad = event.control.pad_index()?;

        let color = match self.state.get(event.control)? {
            PAD_ON => on_color,
            0 => ColorBrightness::Off,
            _ => return None,
        };

        Some(codec::encode_set_led(pad, color))
    }

    pub fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    pub fn toggle_mode(&self) -> bool {
        self.toggle_color.is_some()
    }
}
