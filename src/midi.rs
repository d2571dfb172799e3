//! MIDI framing utilities
//!
//! SysEx framing, channel-message helpers and hex formatting shared by the
//! codec, the driver and the monitor.

/// SysEx start byte
pub const SYSEX_START: u8 = 0xF0;

/// SysEx end byte
pub const SYSEX_END: u8 = 0xF7;

/// Three-byte SysEx manufacturer ID
pub type ManufacturerId = [u8; 3];

/// Focusrite/Novation manufacturer ID
pub const NOVATION_ID: ManufacturerId = [0x00, 0x20, 0x29];

/// Wrap a payload in a SysEx frame: `F0 id0 id1 id2 payload... F7`
pub fn sysex_frame(manufacturer_id: ManufacturerId, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(payload.len() + 5);
    frame.push(SYSEX_START);
    frame.extend_from_slice(&manufacturer_id);
    frame.extend_from_slice(payload);
    frame.push(SYSEX_END);
    frame
}

/// Strip the SysEx frame, `None` if the header, manufacturer or trailer differ
pub fn sysex_payload(manufacturer_id: ManufacturerId, data: &[u8]) -> Option<&[u8]> {
    let inner = data.strip_prefix(&[SYSEX_START])?.strip_suffix(&[SYSEX_END])?;
    inner.strip_prefix(&manufacturer_id[..])
}

/// Whether the bytes look like a complete SysEx message
pub fn is_sysex(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == SYSEX_START && data[data.len() - 1] == SYSEX_END
}

/// Short label for the message type of a status byte
pub fn status_kind(status: u8) -> &'static str {
    match status & 0xF0 {
        0x80 => "NoteOff",
        0x90 => "NoteOn",
        0xA0 => "PolyPressure",
        0xB0 => "CC",
        0xC0 => "ProgramChange",
        0xD0 => "ChannelPressure",
        0xE0 => "PitchBend",
        _ if status == SYSEX_START => "SysEx",
        _ => "System",
    }
}

/// 1-based MIDI channel of a channel message status byte
pub fn channel_of(status: u8) -> Option<u8> {
    (0x80..0xF0).contains(&status).then(|| (status & 0x0F) + 1)
}

/// Format MIDI bytes as hex string for debugging
pub fn format_hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sysex_frame() {
        let frame = sysex_frame(NOVATION_ID, &[0x02, 0x0A, 0x77, 0x08]);
        assert_eq!(frame, vec![0xF0, 0x00, 0x20, 0x29, 0x02, 0x0A, 0x77, 0x08, 0xF7]);
    }

    #[test]
    fn test_empty_payload_still_framed() {
        assert_eq!(sysex_frame(NOVATION_ID, &[]), vec![0xF0, 0x00, 0x20, 0x29, 0xF7]);
        assert_eq!(
            sysex_payload(NOVATION_ID, &[0xF0, 0x00, 0x20, 0x29, 0xF7]),
            Some(&[][..])
        );
    }

    #[test]
    fn test_sysex_payload_rejects_foreign_frames() {
        // Wrong manufacturer
        assert_eq!(sysex_payload(NOVATION_ID, &[0xF0, 0x00, 0x00, 0x66, 0x14, 0xF7]), None);
        // Missing trailer
        assert_eq!(sysex_payload(NOVATION_ID, &[0xF0, 0x00, 0x20, 0x29, 0x02]), None);
        // Channel message
        assert_eq!(sysex_payload(NOVATION_ID, &[0xB8, 0x00, 0x00]), None);
    }

    #[test]
    fn test_is_sysex() {
        assert!(is_sysex(&[0xF0, 0xF7]));
        assert!(!is_sysex(&[0xF0]));
        assert!(!is_sysex(&[0x98, 9, 127]));
    }

    #[test]
    fn test_status_kind_and_channel() {
        assert_eq!(status_kind(0x98), "NoteOn");
        assert_eq!(status_kind(0x88), "NoteOff");
        assert_eq!(status_kind(0xB8), "CC");
        assert_eq!(status_kind(0xF0), "SysEx");
        assert_eq!(status_kind(0xF8), "System");
        assert_eq!(channel_of(0x98), Some(9));
        assert_eq!(channel_of(0xB0), Some(1));
        assert_eq!(channel_of(0xF0), None);
        assert_eq!(channel_of(0x10), None);
    }

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex(&[0xF0, 0x00, 0x20, 0x29, 0xF7]), "F0 00 20 29 F7");
        assert_eq!(format_hex(&[]), "");
    }

    proptest! {
        #[test]
        fn test_frame_then_strip_recovers_payload(
            id in any::<[u8; 3]>(),
            payload in proptest::collection::vec(0u8..0x80, 0..32),
        ) {
            let frame = sysex_frame(id, &payload);
            prop_assert_eq!(frame.len(), payload.len() + 5);
            prop_assert_eq!(sysex_payload(id, &frame), Some(&payload[..]));
        }
    }
}
