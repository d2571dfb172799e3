//! Launch Control protocol codec
//!
//! Classifies inbound channel messages against a [`ControlRegistry`] and
//! builds the outbound LED, template and reset messages.
//!
//! Outbound SysEx layout (Novation, manufacturer `00 20 29`):
//!
//! ```text
//! LED set:          F0 00 20 29 02 0A 78 <template> <index> <color> F7
//! Template select:  F0 00 20 29 02 0A 77 <template> F7
//! Reset:            (B0 + template) 00 00          (plain CC, not SysEx)
//! ```
//!
//! Templates 0-7 are the user templates, 8-15 the factory templates.
//! LED indices 0-7 are the pads, 8-11 the buttons.

use crate::error::ProtocolError;
use crate::launch_control::control::{Address, ColorBrightness, Control};
use crate::launch_control::registry::ControlRegistry;
use crate::launch_control::state::ControlState;
use crate::midi::{sysex_frame, sysex_payload, NOVATION_ID};

/// Factory template 1, the layout the registry describes
pub const FACTORY_TEMPLATE_1: u8 = 0x08;

/// Fixed header shared by Launch Control SysEx commands
const COMMAND_HEADER: [u8; 2] = [0x02, 0x0A];

const CMD_SET_LED: u8 = 0x78;
const CMD_SET_TEMPLATE: u8 = 0x77;

/// A decoded inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEvent {
    /// Timestamp handed over by the transport (microseconds)
    pub timestamp: u64,
    pub control: Control,
    /// Value byte as observed on the wire
    pub value: u8,
}

impl ControlEvent {
    pub fn is_unknown(&self) -> bool {
        self.control == Control::Unknown
    }
}

/// Classify a raw channel message and fold its value into `state`
///
/// Only the first two bytes select the control; the third is the value.
/// An unregistered address yields `Control::Unknown` and leaves `state`
/// untouched.
pub fn classify(
    registry: &ControlRegistry,
    state: &mut ControlState,
    raw: &[u8],
    timestamp: u64,
) -> Result<ControlEvent, ProtocolError> {
    let (status, data1, value) = match *raw {
        [status, data1, value] => (status, data1, value),
        _ if raw.len() > 3 => return Err(ProtocolError::NotAChannelMessage { len: raw.len() }),
        _ => return Err(ProtocolError::MalformedMessage { len: raw.len() }),
    };

    let control = registry.control_of(Address::new(status, data1));
    state.apply(control, value);

    Ok(ControlEvent {
        timestamp,
        control,
        value,
    })
}

/// Human-readable label of a control
pub fn name_of(control: Control) -> String {
    control.name()
}

/// Set a pad or button LED on factory template 1
pub fn encode_set_led(index: u8, color: ColorBrightness) -> Vec<u8> {
    encode_set_led_in_template(FACTORY_TEMPLATE_1, index, color)
}

/// Set a pad or button LED on any template, whether or not it is active
///
/// Indices outside 0-11 are sent as-is; the device decides what they mean.
pub fn encode_set_led_in_template(template: u8, index: u8, color: ColorBrightness) -> Vec<u8> {
    let payload = [
        COMMAND_HEADER[0],
        COMMAND_HEADER[1],
        CMD_SET_LED,
        template,
        index,
        color.as_byte(),
    ];
    sysex_frame(NOVATION_ID, &payload)
}

/// Switch the active template
pub fn encode_set_template(template: u8) -> Vec<u8> {
    let payload = [COMMAND_HEADER[0], COMMAND_HEADER[1], CMD_SET_TEMPLATE, template];
    sysex_frame(NOVATION_ID, &payload)
}

/// Turn all LEDs off and restore the default duty cycle for a template
///
/// The template selects the MIDI channel, so it is masked to 0-15.
pub fn encode_reset(template: u8) -> [u8; 3] {
    [0xB0 + (template & 0x0F), 0x00, 0x00]
}

/// Template number from the device's "template changed" SysEx
pub fn decode_template_changed(data: &[u8]) -> Option<u8> {
    match *sysex_payload(NOVATION_ID, data)? {
        [0x02, 0x0A, CMD_SET_TEMPLATE, template] => Some(template),
        _ => None,
    }
}
