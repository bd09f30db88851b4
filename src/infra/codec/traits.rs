//! Public traits exposed by the codec layer. They decouple PGN structures
//! from the transport so the sender only needs a PGN number and a payload.
use crate::error::SerializationError;

//==================================================================================PGN_PAYLOAD
/// Implemented by every PGN structure this crate can transmit.
pub trait PgnPayload {
    /// Parameter Group Number of the message.
    const PGN: u32;
    /// Default transmission priority (0 = highest, 7 = lowest).
    const PRIORITY: u8;

    /// Exact serialized size in bytes.
    fn payload_len(&self) -> usize;

    /// Serialize the instance into the provided buffer and return the number
    /// of bytes written.
    fn to_payload(&self, buffer: &mut [u8]) -> Result<usize, SerializationError>;
}
