//! Control registry
//!
//! Maps message addresses to logical controls and back. The factory table
//! covers template 1; pads and knobs use disjoint address ranges.

use std::collections::HashMap;

use crate::error::ProtocolError;
use crate::launch_control::control::{Address, Control, CONTROL_COUNT};

/// Note On, MIDI channel 9 (factory template 1)
pub const PAD_STATUS: u8 = 0x98;

/// Control Change, MIDI channel 9 (factory template 1)
pub const KNOB_STATUS: u8 = 0xB8;

/// Pad note numbers, in pad order (not contiguous)
pub const PAD_NOTES: [u8; 8] = [9, 10, 11, 12, 25, 26, 27, 28];

/// CC numbers of the lower knob row (KNOB 1-8)
pub const LOWER_KNOB_CCS: [u8; 8] = [41, 42, 43, 44, 45, 46, 47, 48];

/// CC numbers of the upper knob row (KNOB 9-16)
pub const UPPER_KNOB_CCS: [u8; 8] = [21, 22, 23, 24, 25, 26, 27, 28];

/// Address/control pairs of factory template 1, in control order
pub fn factory_entries() -> impl Iterator<Item = (Address, Control)> {
    let pads = PAD_NOTES
        .into_iter()
        .map(|note| Address::new(PAD_STATUS, note));
    let knobs = LOWER_KNOB_CCS
        .into_iter()
        .chain(UPPER_KNOB_CCS)
        .map(|cc| Address::new(KNOB_STATUS, cc));

    pads.chain(knobs).zip(Control::ALL)
}

/// Immutable two-way mapping between addresses and controls
#[derive(Debug, Clone)]
pub struct ControlRegistry {
    by_address: HashMap<Address, Control>,
    by_control: [Option<Address>; CONTROL_COUNT],
}

impl ControlRegistry {
    /// Registry for factory template 1, checked like any other table
    pub fn factory_template() -> Result<Self, ProtocolError> {
        Self::from_entries(factory_entries())
    }

    /// Build a registry, rejecting any address or control mapped twice
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Address, Control)>,
    ) -> Result<Self, ProtocolError> {
        let mut by_address = HashMap::with_capacity(CONTROL_COUNT);
        let mut by_control = [None; CONTROL_COUNT];

        for (address, control) in entries {
            if control == Control::Unknown {
                return Err(ProtocolError::PreconditionViolation(format!(
                    "cannot register UNKNOWN at {}",
                    address
                )));
            }

            let slot = &mut by_control[control.ordinal() as usize];
            if slot.is_some() {
                return Err(ProtocolError::DuplicateControl(control));
            }
            if by_address.insert(address, control).is_some() {
                return Err(ProtocolError::DuplicateAddress(address));
            }
            *slot = Some(address);
        }

        Ok(Self {
            by_address,
            by_control,
        })
    }

    /// Address a control sends from and is addressed by
    pub fn address_of(&self, control: Control) -> Result<Address, ProtocolError> {
        self.by_control
            .get(control.ordinal() as usize)
            .copied()
            .flatten()
            .ok_or_else(|| {
                ProtocolError::PreconditionViolation(format!(
                    "{} has no registered address",
                    control
                ))
            })
    }

    /// Control at an address, `Control::Unknown` if none is registered
    pub fn control_of(&self, address: impl Into<Address>) -> Control {
        self.by_address
            .get(&address.into())
            .copied()
            .unwrap_or(Control::Unknown)
    }

    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }

    /// Registered entries in control order
    pub fn iter(&self) -> impl Iterator<Item = (Control, Address)> + '_ {
        Control::ALL
            .into_iter()
            .filter_map(move |c| self.by_control[c.ordinal() as usize].map(|a| (c, a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_factory_table() {
        let registry = ControlRegistry::factory_template().unwrap();
        assert_eq!(registry.len(), 24);

        assert_eq!(registry.control_of((152, 9)), Control::Pad1);
        assert_eq!(registry.control_of((152, 12)), Control::Pad4);
        assert_eq!(registry.control_of((152, 25)), Control::Pad5);
        assert_eq!(registry.control_of((152, 28)), Control::Pad8);
        assert_eq!(registry.control_of((184, 41)), Control::Knob1);
        assert_eq!(registry.control_of((184, 48)), Control::Knob8);
        assert_eq!(registry.control_of((184, 21)), Control::Knob9);
        assert_eq!(registry.control_of((184, 28)), Control::Knob16);
    }

    #[test]
    fn test_factory_table_is_injective() {
        let registry = ControlRegistry::factory_template().unwrap();
        assert_eq!(registry.len(), CONTROL_COUNT);
        assert_eq!(registry.iter().count(), CONTROL_COUNT);
    }

    #[test]
    fn test_factory_entries_with_duplicate_rejected() {
        // Same check the factory table goes through
        let doubled = factory_entries().chain([(Address::new(PAD_STATUS, 9), Control::Knob1)]);
        assert_eq!(
            ControlRegistry::from_entries(doubled).unwrap_err(),
            ProtocolError::DuplicateControl(Control::Knob1)
        );
    }

    #[test]
    fn test_round_trip_all_controls() {
        let registry = ControlRegistry::factory_template().unwrap();
        for control in Control::ALL {
            let address = registry.address_of(control).unwrap();
            assert_eq!(registry.control_of(address), control);
        }
    }

    #[test]
    fn test_unknown_addresses() {
        let registry = ControlRegistry::factory_template().unwrap();
        // Pad note on a knob status and vice versa
        assert_eq!(registry.control_of((184, 9)), Control::Unknown);
        assert_eq!(registry.control_of((152, 41)), Control::Unknown);
        // Note Off from a pad release
        assert_eq!(registry.control_of((136, 9)), Control::Unknown);
        assert_eq!(registry.control_of((0, 0)), Control::Unknown);
    }

    #[test]
    fn test_address_of_unknown_is_precondition_violation() {
        let registry = ControlRegistry::factory_template().unwrap();
        assert!(matches!(
            registry.address_of(Control::Unknown),
            Err(ProtocolError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_duplicate_address_rejected() {
        let result = ControlRegistry::from_entries([
            (Address::new(0x98, 9), Control::Pad1),
            (Address::new(0x98, 9), Control::Pad2),
        ]);
        assert_eq!(
            result.unwrap_err(),
            ProtocolError::DuplicateAddress(Address::new(0x98, 9))
        );
    }

    #[test]
    fn test_duplicate_control_rejected() {
        let result = ControlRegistry::from_entries([
            (Address::new(0x98, 9), Control::Pad1),
            (Address::new(0x98, 10), Control::Pad1),
        ]);
        assert_eq!(result.unwrap_err(), ProtocolError::DuplicateControl(Control::Pad1));
    }

    #[test]
    fn test_partial_registry() {
        let registry =
            ControlRegistry::from_entries([(Address::new(0xB0, 1), Control::Knob1)]).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.control_of((0xB0, 1)), Control::Knob1);
        assert!(registry.address_of(Control::Pad1).is_err());
        assert_eq!(registry.iter().count(), 1);
    }

    #[test]
    fn test_iter_in_control_order() {
        let registry = ControlRegistry::factory_template().unwrap();
        let controls: Vec<Control> = registry.iter().map(|(c, _)| c).collect();
        assert_eq!(controls, Control::ALL.to_vec());
    }

    proptest! {
        #[test]
        fn test_lookup_is_consistent(status in any::<u8>(), data1 in any::<u8>()) {
            let registry = ControlRegistry::factory_template().unwrap();
            let control = registry.control_of((status, data1));
            if control != Control::Unknown {
                prop_assert_eq!(registry.address_of(control).unwrap(), Address::new(status, data1));
            }
        }
    }
}
