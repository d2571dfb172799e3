//! Logical controls, addresses and LED colors of the Launch Control
//!
//! Ordinals follow the LED indices the device expects in SysEx:
//! pads are 0-7, knobs 8-23, and `Unknown` sits past the end.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of real controls (8 pads + 16 knobs)
pub const CONTROL_COUNT: usize = 24;

/// A physical control on factory template 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Control {
    Pad1 = 0,
    Pad2,
    Pad3,
    Pad4,
    Pad5,
    Pad6,
    Pad7,
    Pad8,
    Knob1,
    Knob2,
    Knob3,
    Knob4,
    Knob5,
    Knob6,
    Knob7,
    Knob8,
    Knob9,
    Knob10,
    Knob11,
    Knob12,
    Knob13,
    Knob14,
    Knob15,
    Knob16,
    Unknown,
}

impl Control {
    /// All real controls in ordinal order
    pub const ALL: [Control; CONTROL_COUNT] = [
        Control::Pad1,
        Control::Pad2,
        Control::Pad3,
        Control::Pad4,
        Control::Pad5,
        Control::Pad6,
        Control::Pad7,
        Control::Pad8,
        Control::Knob1,
        Control::Knob2,
        Control::Knob3,
        Control::Knob4,
        Control::Knob5,
        Control::Knob6,
        Control::Knob7,
        Control::Knob8,
        Control::Knob9,
        Control::Knob10,
        Control::Knob11,
        Control::Knob12,
        Control::Knob13,
        Control::Knob14,
        Control::Knob15,
        Control::Knob16,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn is_pad(self) -> bool {
        self.ordinal() < 8
    }

    pub fn is_knob(self) -> bool {
        (8..CONTROL_COUNT as u8).contains(&self.ordinal())
    }

    /// Index of a pad for LED messages (0-7)
    pub fn pad_index(self) -> Option<u8> {
        self.is_pad().then(|| self.ordinal())
    }

    /// 1-based knob number, lower bank first
    pub fn knob_number(self) -> Option<u8> {
        self.is_knob().then(|| self.ordinal() - 7)
    }

    /// Human-readable label: "PAD 3", "KNOB 9" or "UNKNOWN"
    pub fn name(self) -> String {
        if self.is_pad() {
            format!("PAD {}", self.ordinal() + 1)
        } else if let Some(number) = self.knob_number() {
            format!("KNOB {}", number)
        } else {
            "UNKNOWN".to_string()
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Message prefix identifying a control: status byte and first data byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    pub status: u8,
    pub data1: u8,
}

impl Address {
    pub const fn new(status: u8, data1: u8) -> Self {
        Self { status, data1 }
    }
}

impl From<(u8, u8)> for Address {
    fn from((status, data1): (u8, u8)) -> Self {
        Self::new(status, data1)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {:02X}", self.status, self.data1)
    }
}

/// LED color and brightness, sent as the velocity byte of an LED-set message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ColorBrightness {
    Off = 0x0C,
    RedLow = 0x0D,
    RedFull = 0x0F,
    AmberLow = 0x1D,
    AmberFull = 0x3F,
    YellowFull = 0x3E,
    GreenLow = 0x1C,
    GreenFull = 0x3C,
}

impl ColorBrightness {
    /// Every color, dark to bright through green, amber and red
    pub const PALETTE: [ColorBrightness; 8] = [
        ColorBrightness::Off,
        ColorBrightness::GreenLow,
        ColorBrightness::GreenFull,
        ColorBrightness::AmberLow,
        ColorBrightness::AmberFull,
        ColorBrightness::YellowFull,
        ColorBrightness::RedLow,
        ColorBrightness::RedFull,
    ];

    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl From<ColorBrightness> for u8 {
    fn from(color: ColorBrightness) -> Self {
        color.as_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_ranges() {
        assert!(Control::ALL[..8].iter().all(|c| c.is_pad() && !c.is_knob()));
        assert!(Control::ALL[8..].iter().all(|c| c.is_knob() && !c.is_pad()));
        assert!(!Control::Unknown.is_pad());
        assert!(!Control::Unknown.is_knob());
        assert_eq!(Control::Unknown.ordinal(), 24);
    }

    #[test]
    fn test_names() {
        assert_eq!(Control::Pad1.name(), "PAD 1");
        assert_eq!(Control::Pad3.name(), "PAD 3");
        assert_eq!(Control::Pad8.name(), "PAD 8");
        assert_eq!(Control::Knob1.name(), "KNOB 1");
        assert_eq!(Control::Knob9.name(), "KNOB 9");
        assert_eq!(Control::Knob16.name(), "KNOB 16");
        assert_eq!(Control::Unknown.name(), "UNKNOWN");
        assert_eq!(Control::Knob12.to_string(), "KNOB 12");
    }

    #[test]
    fn test_pad_index_and_knob_number() {
        assert_eq!(Control::Pad5.pad_index(), Some(4));
        assert_eq!(Control::Knob1.pad_index(), None);
        assert_eq!(Control::Knob16.knob_number(), Some(16));
        assert_eq!(Control::Pad1.knob_number(), None);
        assert_eq!(Control::Unknown.knob_number(), None);
    }

    #[test]
    fn test_color_bytes() {
        assert_eq!(ColorBrightness::Off.as_byte(), 0x0C);
        assert_eq!(ColorBrightness::RedFull.as_byte(), 0x0F);
        assert_eq!(ColorBrightness::AmberFull.as_byte(), 0x3F);
        assert_eq!(u8::from(ColorBrightness::GreenFull), 0x3C);
    }

    #[test]
    fn test_color_deserialize() {
        let color: ColorBrightness = serde_yaml::from_str("amber_low").unwrap();
        assert_eq!(color, ColorBrightness::AmberLow);
    }
}
