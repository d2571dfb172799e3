//! Launch Control GW
//!
//! Drives a Novation Launch Control: resets it, plays a short LED demo,
//! then decodes every pad and knob message and mirrors pad toggles on the
//! pad LEDs.

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use launch_control_gw::config::AppConfig;
use launch_control_gw::launch_control::codec::decode_template_changed;
use launch_control_gw::launch_control::control::ColorBrightness;
use launch_control_gw::launch_control::session::Session;
use launch_control_gw::launch_control::{LaunchControlDriver, RawEvent};
use launch_control_gw::midi::format_hex;
use launch_control_gw::sniffer;

/// Launch Control GW - decode and light up a Novation Launch Control
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// List available MIDI ports
    #[arg(long)]
    list_ports: bool,

    /// Print decoded input without driving the LEDs
    #[arg(long)]
    monitor: bool,

    /// Skip the startup LED demo
    #[arg(long)]
    no_demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Starting Launch Control GW...");
    info!("Configuration file: {}", args.config);

    let mut config = AppConfig::load_or_default(&args.config).await?;
    if args.no_demo {
        config.demo.enabled = false;
    }

    if args.list_ports {
        sniffer::list_ports_formatted(&config.midi.device_name);
        return Ok(());
    }

    if args.monitor {
        sniffer::run_cli_sniffer(config.input_pattern()).await?;
        return Ok(());
    }

    run_app(config, shutdown_signal()).await?;

    info!("Launch Control GW shutdown complete");
    Ok(())
}

async fn run_app(config: AppConfig, shutdown: impl std::future::Future<Output = ()>) -> Result<()> {
    let template = config.launch_control.template;

    let mut driver = LaunchControlDriver::new(&config);
    driver.connect().context("Failed to connect to Launch Control")?;

    let mut events = driver
        .take_event_receiver()
        .context("Failed to get Launch Control event receiver")?;

    info!("Resetting Launch Control (template {})", template);
    driver.reset(template)?;
    driver.set_template(template)?;

    if config.demo.enabled {
        run_demo(&driver, &config).await?;
    }

    let mut session =
        Session::new(config.toggle_color()).context("Invalid Launch Control address table")?;
    info!(
        "Ready to process MIDI events (toggle mode: {})",
        if session.toggle_mode() { "on" } else { "off" }
    );

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                handle_event(&mut session, &driver, &event);
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received, stopping event loop");
                break;
            }
        }
    }

    // Leave the device dark
    info!("Shutting down...");
    if let Err(e) = driver.reset(template) {
        warn!("Failed to reset Launch Control: {}", e);
    }
    driver.disconnect();

    Ok(())
}

/// Flash each pad in turn, stepping through the palette every 8 pads
async fn run_demo(driver: &LaunchControlDriver, config: &AppConfig) -> Result<()> {
    info!("Running LED demo ({} steps)", config.demo.steps);
    let interval = Duration::from_millis(config.demo.interval_ms);
    let palette = ColorBrightness::PALETTE;

    for step in 0..config.demo.steps {
        let pad = (step % 8) as u8;
        let color = palette[(step as usize / 8) % palette.len()];

        debug!("Demo step {}: pad {} -> {:?}", step, pad, color);
        driver.set_pad_color(pad, color)?;
        tokio::time::sleep(interval).await;
    }

    Ok(())
}

fn handle_event(session: &mut Session, driver: &LaunchControlDriver, event: &RawEvent) {
    if event.data.len() > 3 {
        match decode_template_changed(&event.data) {
            Some(template) => info!("Template changed on device: {}", template),
            None => debug!("Ignoring long message: {}", format_hex(&event.data)),
        }
        return;
    }

    let decoded = match session.classify(&event.data, event.timestamp) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("Skipping {}: {}", format_hex(&event.data), e);
            return;
        }
    };

    if decoded.is_unknown() {
        debug!("Unmapped message: {}", format_hex(&event.data));
        return;
    }

    info!(
        "{} = {} (stored {:?})",
        decoded.control,
        decoded.value,
        session.state().get(decoded.control)
    );

    if let Some(feedback) = session.feedback_for(&decoded) {
        if let Err(e) = driver.send_raw(&feedback) {
            warn!("Failed to update LED for {}: {}", decoded.control, e);
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
