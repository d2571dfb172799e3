//! MIDI sniffer for debugging and development
//!
//! Prints every message the Launch Control sends, decoded against the
//! factory template.

use anyhow::{Context, Result};
use colored::*;
use midir::{Ignore, MidiInput, MidiInputConnection};
use tokio::sync::mpsc;
use tracing::info;

use crate::launch_control::codec::{decode_template_changed, ControlEvent};
use crate::launch_control::session::Session;
use crate::launch_control::{discovery, find_port, forward_input, RawEvent};
use crate::midi::{channel_of, format_hex, is_sysex, status_kind};

/// Decoded form of one sniffed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Control(ControlEvent),
    TemplateChanged(u8),
    /// Channel message outside the registry, or any other SysEx
    Other(String),
    Invalid(String),
}

impl Decoded {
    /// Classify a raw message, updating the session state
    pub fn from_raw(session: &mut Session, event: &RawEvent) -> Self {
        if is_sysex(&event.data) {
            return match decode_template_changed(&event.data) {
                Some(template) => Decoded::TemplateChanged(template),
                None => Decoded::Other(format!("SysEx {} bytes", event.data.len())),
            };
        }

        match session.classify(&event.data, event.timestamp) {
            Ok(ev) if ev.is_unknown() => Decoded::Other(describe_channel_message(&event.data)),
            Ok(ev) => Decoded::Control(ev),
            Err(e) => Decoded::Invalid(e.to_string()),
        }
    }

    fn display(&self) -> ColoredString {
        match self {
            Decoded::Control(ev) if ev.control.is_pad() => {
                format!("{} = {}", ev.control, ev.value).bright_green()
            }
            Decoded::Control(ev) => format!("{} = {}", ev.control, ev.value).bright_yellow(),
            Decoded::TemplateChanged(t) => format!("TEMPLATE {}", t).bright_magenta(),
            Decoded::Other(text) => text.normal(),
            Decoded::Invalid(reason) => reason.bright_red(),
        }
    }
}

fn describe_channel_message(data: &[u8]) -> String {
    let Some(&status) = data.first() else {
        return "empty".to_string();
    };

    match channel_of(status) {
        Some(channel) => format!("{} ch:{}", status_kind(status), channel),
        None => status_kind(status).to_string(),
    }
}

/// CLI MIDI sniffer
pub async fn run_cli_sniffer(pattern: &str) -> Result<()> {
    println!("{}", "=== Launch Control Sniffer ===".bold().cyan());
    println!("Press Ctrl+C to exit\n");

    let mut sniffer = CliSniffer::new()?;
    sniffer.connect_input(pattern)?;

    println!("\n{}", "Monitoring MIDI traffic...".green());
    println!(
        "{}",
        "Format: [timestamp] DIR PORT | HEX => DECODED".dimmed()
    );
    println!("{}\n", "─".repeat(80).dimmed());

    sniffer.run().await
}

/// CLI sniffer implementation
struct CliSniffer {
    /// Kept alive for the duration of the sniffer
    _connection: Option<MidiInputConnection<()>>,
    port_name: String,
    event_rx: mpsc::Receiver<RawEvent>,
    event_tx: mpsc::Sender<RawEvent>,
    session: Session,
}

impl CliSniffer {
    fn new() -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel(1000);

        Ok(Self {
            _connection: None,
            port_name: String::new(),
            event_rx,
            event_tx,
            session: Session::new(None)?,
        })
    }

    fn connect_input(&mut self, pattern: &str) -> Result<()> {
        let mut midi_in = MidiInput::new("LaunchControl-Sniffer")?;
        midi_in.ignore(Ignore::None);

        let (port, name) = find_port(&midi_in, pattern)
            .with_context(|| format!("No port found matching pattern: {}", pattern))?;

        info!("Connecting to: {}", name);

        let event_tx = self.event_tx.clone();
        let conn = midi_in
            .connect(
                &port,
                "Sniffer",
                move |timestamp, data, _| {
                    forward_input(&event_tx, timestamp, data);
                },
                (),
            )
            .map_err(|e| anyhow::anyhow!("Failed to connect to {}: {}", name, e))?;

        self._connection = Some(conn);
        self.port_name = name;
        Ok(())
    }

    async fn run(mut self) -> Result<()> {
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    let decoded = Decoded::from_raw(&mut self.session, &event);
                    self.print_event(&event, &decoded);
                }
                _ = &mut shutdown => break,
            }
        }

        println!("\n{}", "Sniffer stopped".yellow());
        Ok(())
    }

    fn print_event(&self, event: &RawEvent, decoded: &Decoded) {
        let port = if self.port_name.chars().count() > 20 {
            format!("{}...", self.port_name.chars().take(17).collect::<String>())
        } else {
            self.port_name.clone()
        };

        println!(
            "[{}us] {} {:20} | {} => {}",
            format!("{:012}", event.timestamp).dimmed(),
            "IN ".green(),
            port.white(),
            format_hex(&event.data),
            decoded.display()
        );
    }
}

/// List all ports in a formatted way
pub fn list_ports_formatted(pattern: &str) {
    println!("\n{}", "=== Available MIDI Ports ===".bold().cyan());

    let print_group = |title: &str, ports: Vec<discovery::PortInfo>| {
        println!("\n{}", title.bold());
        if ports.is_empty() {
            println!("  {}", "No ports found".dimmed());
        }
        for port in ports {
            let marker = if port.is_virtual {
                "[VIRTUAL]".yellow()
            } else {
                "[PHYSICAL]".green()
            };
            println!("  {} {}", marker, port.name);
        }
    };

    match discovery::discover_all_ports() {
        Ok((inputs, outputs)) => {
            print_group("Input Ports:", inputs);
            print_group("Output Ports:", outputs);
        }
        Err(e) => println!("  {}", e.to_string().red()),
    }

    if let Some((input, output)) = discovery::find_launch_control_ports(pattern) {
        println!("\n{}", "Auto-detected Launch Control:".bold().bright_green());
        println!("  Input:  {}", input.bright_white());
        println!("  Output: {}", output.bright_white());
    }

    println!();
}
