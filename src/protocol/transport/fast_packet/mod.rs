//! NMEA 2000 Fast Packet support: splits payloads larger than eight bytes
//! across successive CAN frames sharing one sequence identifier.
//!
//! ```text
//! frame 0 : [seq << 5 | 0] [total_len] [6 payload bytes]
//! frame i : [seq << 5 | i] [7 payload bytes]
//! ```
//!
//! Every frame is eight bytes long; unused trailing bytes are `0xFF`.

/// Maximum payload a Fast Packet can transport once reassembled.
pub const MAX_FAST_PACKET_PAYLOAD: usize = 223;

/// Payload bytes carried by the first frame.
pub const FIRST_FRAME_DATA: usize = 6;

/// Payload bytes carried by each following frame.
pub const NEXT_FRAME_DATA: usize = 7;

pub mod builder;
pub mod sequence;

pub use builder::{segment_to_frames, FastPacketBuilder};
pub use sequence::SequenceCounter;
