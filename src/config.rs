//! Configuration management for Launch Control GW
//!
//! Handles loading, parsing and validation of the YAML configuration file.
//! Every section is optional; a missing file yields the defaults.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::launch_control::codec::FACTORY_TEMPLATE_1;
use crate::launch_control::control::ColorBrightness;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub midi: MidiConfig,
    pub launch_control: LaunchControlConfig,
    pub demo: DemoConfig,
}

/// MIDI port configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MidiConfig {
    /// Substring matched against port names, case-insensitive
    #[serde(default = "default_device_name")]
    pub device_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_port: Option<String>,
}

/// Device behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LaunchControlConfig {
    /// Template selected at startup; only factory template 1 (8) is
    /// decoded and lit, since the address table describes that layout
    #[serde(default = "default_template")]
    pub template: u8,
    /// Light each pad while its toggle state is on
    #[serde(default = "default_true")]
    pub toggle_mode: bool,
    #[serde(default = "default_toggle_color")]
    pub toggle_color: ColorBrightness,
}

/// Startup LED animation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_demo_steps")]
    pub steps: u32,
    #[serde(default = "default_demo_interval")]
    pub interval_ms: u64,
}

impl AppConfig {
    /// Load configuration from file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if fs::try_exists(path).await.unwrap_or(false) {
            Self::load(path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document is valid and means "all defaults"
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig =
            serde_yaml::from_str(contents).context("Failed to parse YAML config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.launch_control.template != FACTORY_TEMPLATE_1 {
            bail!(
                "launch_control.template must be {} (factory template 1), got {}",
                FACTORY_TEMPLATE_1,
                self.launch_control.template
            );
        }
        if self.demo.enabled && self.demo.interval_ms == 0 {
            bail!("demo.interval_ms must be greater than 0");
        }
        Ok(())
    }

    /// Port pattern for the input connection
    pub fn input_pattern(&self) -> &str {
        self.midi.input_port.as_deref().unwrap_or(&self.midi.device_name)
    }

    /// Port pattern for the output connection
    pub fn output_pattern(&self) -> &str {
        self.midi.output_port.as_deref().unwrap_or(&self.midi.device_name)
    }

    /// Toggle color when toggle mode is enabled
    pub fn toggle_color(&self) -> Option<ColorBrightness> {
        self.launch_control
            .toggle_mode
            .then_some(self.launch_control.toggle_color)
    }
}

impl Default for MidiConfig {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            input_port: None,
            output_port: None,
        }
    }
}

impl Default for LaunchControlConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            toggle_mode: true,
            toggle_color: default_toggle_color(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            steps: default_demo_steps(),
            interval_ms: default_demo_interval(),
        }
    }
}

// Default value functions
fn default_device_name() -> String { "Launch Control".to_string() }
fn default_template() -> u8 { FACTORY_TEMPLATE_1 }
fn default_toggle_color() -> ColorBrightness { ColorBrightness::RedFull }
fn default_true() -> bool { true }
fn default_demo_steps() -> u32 { 16 }
fn default_demo_interval() -> u64 { 100 }
