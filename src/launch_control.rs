//! Novation Launch Control driver
//!
//! Handles MIDI communication with the Launch Control. The protocol itself
//! (controls, registry, codec) lives in the submodules; this module only
//! moves bytes between midir and the rest of the application.

pub mod codec;
pub mod control;
pub mod registry;
pub mod session;
pub mod state;

use midir::{Ignore, MidiIO, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::TransportError;
use crate::midi::format_hex;
use self::control::ColorBrightness;

/// Raw message delivered by the input port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// Driver timestamp in microseconds
    pub timestamp: u64,
    pub data: Vec<u8>,
}

/// Launch Control driver for hardware communication
pub struct LaunchControlDriver {
    /// MIDI input connection
    input_conn: Option<MidiInputConnection<()>>,

    /// MIDI output connection
    output_conn: Option<Arc<Mutex<MidiOutputConnection>>>,

    /// Event sender for incoming MIDI
    event_tx: mpsc::Sender<RawEvent>,

    /// Event receiver
    event_rx: Option<mpsc::Receiver<RawEvent>>,

    /// Input port name pattern
    input_port_name: String,

    /// Output port name pattern
    output_port_name: String,
}

impl LaunchControlDriver {
    /// Create a new driver
    pub fn new(config: &AppConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel(1000);

        Self {
            input_conn: None,
            output_conn: None,
            event_tx,
            event_rx: Some(event_rx),
            input_port_name: config.input_pattern().to_string(),
            output_port_name: config.output_pattern().to_string(),
        }
    }

    /// Connect to the Launch Control MIDI ports
    ///
    /// Both ports are looked up before either is opened, so a failure leaves
    /// the driver disconnected.
    pub fn connect(&mut self) -> Result<(), TransportError> {
        // Disconnect existing connections
        self.disconnect();

        info!(
            "Connecting to Launch Control - Input: '{}', Output: '{}'",
            self.input_port_name, self.output_port_name
        );

        let mut midi_in = MidiInput::new("LaunchControl-GW-Input")?;
        // SysEx carries template changes, keep everything
        midi_in.ignore(Ignore::None);
        debug!("Found {} MIDI input ports", midi_in.port_count());

        let midi_out = MidiOutput::new("LaunchControl-GW-Output")?;
        debug!("Found {} MIDI output ports", midi_out.port_count());

        let (in_port, in_name) = find_port(&midi_in, &self.input_port_name).ok_or_else(|| {
            TransportError::DeviceNotFound {
                pattern: self.input_port_name.clone(),
            }
        })?;
        let (out_port, out_name) =
            find_port(&midi_out, &self.output_port_name).ok_or_else(|| {
                TransportError::DeviceNotFound {
                    pattern: self.output_port_name.clone(),
                }
            })?;

        info!("Connecting to input port: {}", in_name);

        let event_tx = self.event_tx.clone();
        let input_conn = midi_in
            .connect(
                &in_port,
                "LaunchControl-GW",
                move |timestamp, data, _| {
                    forward_input(&event_tx, timestamp, data);
                },
                (),
            )
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        info!("Connecting to output port: {}", out_name);

        // Dropping `input_conn` on error closes the input again
        let output_conn = midi_out
            .connect(&out_port, "LaunchControl-GW")
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        self.input_conn = Some(input_conn);
        self.output_conn = Some(Arc::new(Mutex::new(output_conn)));

        info!("Launch Control connected successfully");
        Ok(())
    }

    /// Disconnect from MIDI ports
    pub fn disconnect(&mut self) {
        let was_connected = self.input_conn.is_some() || self.output_conn.is_some();
        self.input_conn = None;
        self.output_conn = None;

        if was_connected {
            info!("Launch Control disconnected");
        }
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.input_conn.is_some() && self.output_conn.is_some()
    }

    /// Send raw MIDI bytes to the device
    pub fn send_raw(&self, data: &[u8]) -> Result<(), TransportError> {
        let output = self
            .output_conn
            .as_ref()
            .ok_or(TransportError::NotConnected)?;

        output.lock().send(data)?;
        debug!("Sent: {}", format_hex(data));

        Ok(())
    }

    /// Light a pad (0-7) or button (8-11) on factory template 1
    pub fn set_pad_color(&self, index: u8, color: ColorBrightness) -> Result<(), TransportError> {
        self.send_raw(&codec::encode_set_led(index, color))
    }

    /// Select the active template
    pub fn set_template(&self, template: u8) -> Result<(), TransportError> {
        self.send_raw(&codec::encode_set_template(template))
    }

    /// Turn off all LEDs of a template
    pub fn reset(&self, template: u8) -> Result<(), TransportError> {
        self.send_raw(&codec::encode_reset(template))
    }

    /// Take the event receiver (for the main loop to consume)
    pub fn take_event_receiver(&mut self) -> Option<mpsc::Receiver<RawEvent>> {
        self.event_rx.take()
    }
}

/// Queue an input message without blocking the midir thread
///
/// Returns `false` when the channel is full or closed and the message was
/// dropped.
pub(crate) fn forward_input(
    event_tx: &mpsc::Sender<RawEvent>,
    timestamp: u64,
    data: &[u8],
) -> bool {
    let event = RawEvent {
        timestamp,
        data: data.to_vec(),
    };
    if event_tx.try_send(event).is_err() {
        debug!("Dropped MIDI input: {}", format_hex(data));
        return false;
    }
    true
}

/// Case-insensitive substring match used for port lookup
pub fn port_matches(name: &str, pattern: &str) -> bool {
    name.to_lowercase().contains(&pattern.to_lowercase())
}

/// Find the first port whose name contains `pattern`
pub fn find_port<T: MidiIO>(io: &T, pattern: &str) -> Option<(T::Port, String)> {
    io.ports().into_iter().find_map(|port| {
        let name = io.port_name(&port).ok()?;
        if port_matches(&name, pattern) {
            debug!("Found port '{}' matching pattern '{}'", name, pattern);
            Some((port, name))
        } else {
            None
        }
    })
}

/// Port discovery utilities
pub mod discovery {
    use super::*;

    /// Information about a MIDI port
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PortInfo {
        pub index: usize,
        pub name: String,
        pub is_virtual: bool,
    }

    impl PortInfo {
        pub fn new(index: usize, name: String) -> Self {
            let is_virtual = is_virtual_port(&name);
            Self {
                index,
                name,
                is_virtual,
            }
        }
    }

    /// Heuristic for software loopback ports
    pub fn is_virtual_port(name: &str) -> bool {
        name.contains("Virtual") || name.contains("loopMIDI") || name.contains("IAC")
    }

    fn describe_ports<T: MidiIO>(io: &T) -> Vec<PortInfo> {
        io.ports()
            .iter()
            .enumerate()
            .filter_map(|(index, port)| {
                io.port_name(port)
                    .ok()
                    .map(|name| PortInfo::new(index, name))
            })
            .collect()
    }

    /// Discover all available MIDI ports
    pub fn discover_all_ports() -> Result<(Vec<PortInfo>, Vec<PortInfo>), TransportError> {
        Ok((discover_input_ports()?, discover_output_ports()?))
    }

    /// Discover input ports
    pub fn discover_input_ports() -> Result<Vec<PortInfo>, TransportError> {
        let midi_in = MidiInput::new("LaunchControl-GW-Discovery")?;
        Ok(describe_ports(&midi_in))
    }

    /// Discover output ports
    pub fn discover_output_ports() -> Result<Vec<PortInfo>, TransportError> {
        let midi_out = MidiOutput::new("LaunchControl-GW-Discovery")?;
        Ok(describe_ports(&midi_out))
    }

    /// Pick the first physical input/output pair matching `pattern`
    pub fn select_pair(
        inputs: &[PortInfo],
        outputs: &[PortInfo],
        pattern: &str,
    ) -> Option<(String, String)> {
        let find = |ports: &[PortInfo]| {
            ports
                .iter()
                .find(|p| !p.is_virtual && port_matches(&p.name, pattern))
                .map(|p| p.name.clone())
        };

        Some((find(inputs)?, find(outputs)?))
    }

    /// Find Launch Control ports automatically
    pub fn find_launch_control_ports(pattern: &str) -> Option<(String, String)> {
        let (inputs, outputs) = discover_all_ports().ok()?;
        select_pair(&inputs, &outputs, pattern)
    }
}
