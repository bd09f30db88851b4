//! In-memory representation of an SAE J1939 / NMEA 2000 CAN frame.
use embedded_can::{ExtendedId, Frame, Id};

use crate::protocol::transport::can_id::CanId;

/// Data length of every frame this crate emits.
pub const FRAME_LEN: usize = 8;

/// Padding byte for unused trailing data.
pub const PADDING: u8 = 0xFF;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Raw NMEA 2000 frame, ready to hand to a CAN driver or gateway.
pub struct CanFrame {
    /// Full 29-bit CAN identifier stored inside a `u32`.
    pub id: CanId,
    /// Payload buffer. Classic CAN frames always provide eight bytes.
    pub data: [u8; 8],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
}

impl CanFrame {
    /// Valid bytes of the frame.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len.min(FRAME_LEN)]
    }
}

/// Interoperability with `embedded-can` drivers. Only extended data frames
/// exist on NMEA 2000.
impl Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let Id::Extended(id) = id.into() else {
            return None;
        };
        if data.len() > FRAME_LEN {
            return None;
        }
        let mut buffer = [PADDING; FRAME_LEN];
        buffer[..data.len()].copy_from_slice(data);
        Some(Self {
            id: CanId(id.as_raw()),
            data: buffer,
            len: data.len(),
        })
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        true
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        // Identifiers are built masked to 29 bits.
        match ExtendedId::new(self.id.0 & ExtendedId::MAX.as_raw()) {
            Some(id) => Id::Extended(id),
            None => Id::Extended(ExtendedId::ZERO),
        }
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
