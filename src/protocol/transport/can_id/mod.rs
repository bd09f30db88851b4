//! Creation and extraction of the 29-bit CAN identifiers used by
//! NMEA 2000 (derived from the SAE J1939 specification).
//!
//! Bit layout:
//!
//! ```text
//!  28..26    25   24   23..16   15..8   7..0
//! priority   R    DP     PF      PS      SA
//! ```
//!
//! `PF < 240` is PDU1 (PS holds a destination address), `PF >= 240` is PDU2
//! (PS is the low byte of the PGN, the message is always broadcast).
use crate::error::CanIdBuildError;

/// Global (broadcast) destination address.
pub const GLOBAL_ADDRESS: u8 = 255;

/// First PDU format value of the broadcast-only PDU2 range.
pub const PDU2_THRESHOLD: u8 = 240;

/// Default priority for PGNs without a dedicated one.
pub const DEFAULT_PRIORITY: u8 = 6;

//==================================================================================CAN_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Encapsulates an extended CAN identifier (29 bits) and exposes accessors
/// for priority, PGN, destination, and source.
pub struct CanId(pub u32);

impl CanId {
    /// Creates a pre-configured `CanIdBuilder` for a PGN and source address.
    pub fn builder(pgn: u32, source_address: u8) -> CanIdBuilder {
        CanIdBuilder::new(pgn, source_address)
    }

    /// Returns the priority (3 bits, value 0-7) encoded in the CAN ID.
    pub fn priority(&self) -> u8 {
        ((self.0 >> 26) & 0x07) as u8
    }

    /// Data page bit.
    pub fn data_page(&self) -> u8 {
        ((self.0 >> 24) & 0x01) as u8
    }

    /// PDU format byte.
    pub fn pdu_format(&self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// PDU specific byte: destination (PDU1) or PGN low byte (PDU2).
    pub fn pdu_specific(&self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Extracts the 18-bit PGN, handling the PDU1/PDU2 distinction.
    pub fn pgn(&self) -> u32 {
        let ps = self.pdu_specific() as u32;
        let pf = self.pdu_format();
        let dp = self.data_page() as u32;
        let r = (self.0 >> 25) & 0x01;

        if pf >= PDU2_THRESHOLD {
            (r << 17) | (dp << 16) | ((pf as u32) << 8) | ps
        } else {
            (r << 17) | (dp << 16) | ((pf as u32) << 8)
        }
    }

    /// Returns the destination address (PDU1), `None` for PDU2 broadcasts.
    pub fn destination(&self) -> Option<u8> {
        if self.pdu_format() >= PDU2_THRESHOLD {
            None
        } else {
            Some(self.pdu_specific())
        }
    }

    /// Eight-bit source address (logical node identifier on the N2K network).
    pub fn source_address(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

//==================================================================================CAN_ID_BUILDER
#[derive(Debug, Clone, Copy)]
/// Fluent builder that enforces the PDU1/PDU2 rules.
pub struct CanIdBuilder {
    pub priority: u8,
    pub pgn: u32,
    pub source_address: u8,
    pub destination: Option<u8>,
}

impl CanIdBuilder {
    /// Initializes the builder for a given PGN and source address.
    pub fn new(pgn: u32, source_address: u8) -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            pgn,
            source_address,
            destination: None,
        }
    }

    /// Sets the priority (3 bits) to use during construction.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority & 0x07;
        self
    }

    /// Assigns a destination address. Only valid for PDU1 PGNs.
    pub fn to_destination(mut self, destination_address: u8) -> Self {
        self.destination = Some(destination_address);
        self
    }

    /// Builds the identifier:
    ///
    /// `id = prio << 26 | DP << 24 | PF << 16 | PS << 8 | SA`
    ///
    /// - PF >= 240 (PDU2): PS is the PGN low byte; a destination is an error.
    /// - PF < 240 (PDU1): PS is the destination, [`GLOBAL_ADDRESS`] when none
    ///   was given; the PGN low byte must be zero.
    pub fn build(self) -> Result<CanId, CanIdBuildError> {
        let dp = (self.pgn >> 16) & 0x01;
        let pf = ((self.pgn >> 8) & 0xFF) as u8;
        let pgn_low = (self.pgn & 0xFF) as u8;

        let ps = if pf >= PDU2_THRESHOLD {
            if self.destination.is_some() {
                return Err(CanIdBuildError::InvalidForFocusedMessage { pf });
            }
            pgn_low
        } else {
            if pgn_low != 0 {
                return Err(CanIdBuildError::PsFocusMessageMustBeNull);
            }
            self.destination.unwrap_or(GLOBAL_ADDRESS)
        };

        let id = ((self.priority as u32 & 0x07) << 26)
            | (dp << 24)
            | ((pf as u32) << 16)
            | ((ps as u32) << 8)
            | (self.source_address as u32);
        Ok(CanId(id))
    }
}
