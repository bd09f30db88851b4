//! CAN frame generator for Fast Packet messages. Builds the required frame
//! sequence (single or multi-packet) from an application payload.
use crate::error::CanIdBuildError;
use crate::protocol::transport::can_frame::{CanFrame, FRAME_LEN, PADDING};
use crate::protocol::transport::can_id::{CanId, DEFAULT_PRIORITY};
use crate::protocol::transport::fast_packet::{
    SequenceCounter, FIRST_FRAME_DATA, MAX_FAST_PACKET_PAYLOAD, NEXT_FRAME_DATA,
};

#[derive(Debug, Clone, Copy)]
/// Shared parameters for all frames composing a Fast Packet message.
pub struct FastPacketBuilder<'a> {
    pgn: u32,
    source_address: u8,
    priority: u8,
    destination: Option<u8>,
    payload: &'a [u8],
    sequence_id: u8,
}

/// Lazy iterator returning frames one by one as they are encoded.
pub struct FrameIterator<'a> {
    builder: FastPacketBuilder<'a>,
    frame_index: u8,
    bytes_sent: usize,
    done: bool,
}

impl<'a> FrameIterator<'a> {
    fn fail(&mut self, err: CanIdBuildError) -> Option<Result<CanFrame, CanIdBuildError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for FrameIterator<'a> {
    type Item = Result<CanFrame, CanIdBuildError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let payload = self.builder.payload;
        let total_len = payload.len();

        if total_len == 0 {
            return self.fail(CanIdBuildError::EmptyPayload);
        }
        if total_len > MAX_FAST_PACKET_PAYLOAD {
            return self.fail(CanIdBuildError::InvalidData);
        }
        if self.bytes_sent >= total_len {
            self.done = true;
            return None;
        }

        let mut id_builder = CanId::builder(self.builder.pgn, self.builder.source_address)
            .with_priority(self.builder.priority);
        if let Some(destination) = self.builder.destination {
            id_builder = id_builder.to_destination(destination);
        }
        let id = match id_builder.build() {
            Ok(id) => id,
            Err(e) => return self.fail(e),
        };

        let mut data = [PADDING; FRAME_LEN];

        // Payload ≤ 8 bytes: single-frame message (no Fast Packet header).
        if total_len <= FRAME_LEN {
            data[..total_len].copy_from_slice(payload);
            self.bytes_sent = total_len;
            return Some(Ok(CanFrame {
                id,
                data,
                len: FRAME_LEN,
            }));
        }

        data[0] = ((self.builder.sequence_id & 0x07) << 5) | (self.frame_index & 0x1F);
        if self.bytes_sent == 0 {
            data[1] = total_len as u8;
            data[2..2 + FIRST_FRAME_DATA].copy_from_slice(&payload[..FIRST_FRAME_DATA]);
            self.bytes_sent = FIRST_FRAME_DATA;
        } else {
            let chunk = NEXT_FRAME_DATA.min(total_len - self.bytes_sent);
            data[1..1 + chunk].copy_from_slice(&payload[self.bytes_sent..self.bytes_sent + chunk]);
            self.bytes_sent += chunk;
        }

        self.frame_index = self.frame_index.wrapping_add(1);

        Some(Ok(CanFrame {
            id,
            data,
            len: FRAME_LEN,
        }))
    }
}

impl<'a> FastPacketBuilder<'a> {
    /// Prepare the frames of one message. Priority defaults to 6, the
    /// sequence identifier to 0, the destination to broadcast.
    pub fn new(pgn: u32, source_address: u8, payload: &'a [u8]) -> Self {
        Self {
            pgn,
            source_address,
            priority: DEFAULT_PRIORITY,
            destination: None,
            payload,
            sequence_id: 0,
        }
    }

    /// CAN priority of every frame (3 bits).
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority & 0x07;
        self
    }

    /// Address the message to a single node. PDU1 PGNs only.
    pub fn to_destination(mut self, destination: u8) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Set the 3-bit Fast Packet sequence identifier.
    ///
    /// In production draw it from a [`SequenceCounter`], once per message.
    pub fn with_sequence_id(mut self, sequence_id: u8) -> Self {
        self.sequence_id = sequence_id & 0x07;
        self
    }

    /// Start the iteration; each call to `next` yields the next frame.
    pub fn build(self) -> FrameIterator<'a> {
        FrameIterator {
            builder: self,
            frame_index: 0,
            bytes_sent: 0,
            done: false,
        }
    }
}

/// Encode one broadcast message, drawing exactly one sequence identifier
/// from `counter` regardless of the number of frames produced.
pub fn segment_to_frames(
    counter: &SequenceCounter,
    pgn: u32,
    source_address: u8,
    priority: u8,
    payload: &[u8],
) -> Result<Vec<CanFrame>, CanIdBuildError> {
    FastPacketBuilder::new(pgn, source_address, payload)
        .with_priority(priority)
        .with_sequence_id(counter.next())
        .build()
        .collect()
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
