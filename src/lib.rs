//! Launch Control GW
//!
//! Protocol codec and MIDI gateway for the Novation Launch Control.
//!
//! ```
//! use launch_control_gw::launch_control::codec::encode_set_led;
//! use launch_control_gw::launch_control::control::{ColorBrightness, Control};
//! use launch_control_gw::launch_control::session::Session;
//!
//! let mut session = Session::new(Some(ColorBrightness::RedFull)).unwrap();
//! let event = session.classify(&[0x98, 11, 127], 0).unwrap();
//! assert_eq!(event.control, Control::Pad3);
//! assert_eq!(session.feedback_for(&event), Some(encode_set_led(2, ColorBrightness::RedFull)));
//! ```

pub mod config;
pub mod error;
pub mod launch_control;
pub mod midi;
pub mod sniffer;

pub use error::{ProtocolError, TransportError};
pub use launch_control::codec::{
    classify, encode_reset, encode_set_led, encode_set_template, name_of, ControlEvent,
};
pub use launch_control::control::{Address, ColorBrightness, Control};
pub use launch_control::registry::ControlRegistry;
pub use launch_control::session::Session;
pub use launch_control::state::ControlState;
