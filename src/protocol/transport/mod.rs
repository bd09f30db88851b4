//! NMEA 2000 transport layer: CAN frame representation, 29-bit identifier
//! packing, Fast Packet encoding, and bus abstraction traits.

pub mod can_frame;
pub mod can_id;
pub mod fast_packet;
pub mod traits;

/// Delay between two frames of the same Fast Packet message (ms).
///
/// The NMEA 2000 specification permits back-to-back frames, yet a 1–2 ms gap
/// keeps USB gateways and small CAN TX buffers from dropping frames.
pub const FAST_PACKET_INTER_FRAME_DELAY_MS: u32 = 2;
