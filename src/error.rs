//! Error types
//!
//! Protocol errors come from the codec and registry, transport errors from
//! the MIDI port layer. The two are kept apart so callers can tell a bad
//! message from a missing device.

use thiserror::Error;

use crate::launch_control::control::{Address, Control};

/// Errors raised while decoding or mapping Launch Control messages
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A channel message needs three bytes to carry a value
    #[error("malformed message: need 3 bytes, got {len}")]
    MalformedMessage { len: usize },

    /// SysEx and other long messages are not classified as controls
    #[error("not a channel message: {len} bytes")]
    NotAChannelMessage { len: usize },

    /// Program-logic error, e.g. asking for the address of `Control::Unknown`
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("address {0} is mapped more than once")]
    DuplicateAddress(Address),

    #[error("control {0} is mapped more than once")]
    DuplicateControl(Control),
}

/// Errors raised by the MIDI transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no MIDI port matching '{pattern}' found, make sure the Launch Control is connected")]
    DeviceNotFound { pattern: String },

    #[error("not connected to the output port")]
    NotConnected,

    #[error("failed to initialize MIDI client: {0}")]
    Init(#[from] midir::InitError),

    #[error("failed to connect to port: {0}")]
    Connect(String),

    #[error("failed to send MIDI message: {0}")]
    Send(#[from] midir::SendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_display() {
        let err = ProtocolError::MalformedMessage { len: 2 };
        assert_eq!(err.to_string(), "malformed message: need 3 bytes, got 2");

        let err = ProtocolError::DuplicateAddress(Address::new(0x98, 9));
        assert_eq!(err.to_string(), "address 98 09 is mapped more than once");

        let err = ProtocolError::DuplicateControl(Control::Knob9);
        assert_eq!(err.to_string(), "control KNOB 9 is mapped more than once");
    }

    #[test]
    fn test_device_not_found_display() {
        let err = TransportError::DeviceNotFound {
            pattern: "Launch Control".to_string(),
        };
        assert!(err.to_string().contains("'Launch Control'"));
    }
}
