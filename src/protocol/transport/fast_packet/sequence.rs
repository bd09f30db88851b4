//! Fast Packet sequence identifier shared by every record a node emits.
use core::sync::atomic::{AtomicU8, Ordering};

/// Wrapping 3-bit counter. One value is drawn per message, never per frame.
///
/// Owned by whoever encodes messages and shared by reference (or `Arc`) with
/// the activities that transmit.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    next: AtomicU8,
}

impl SequenceCounter {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Counter whose first drawn value is `sequence_id & 0x07`.
    pub const fn starting_at(sequence_id: u8) -> Self {
        Self {
            next: AtomicU8::new(sequence_id & 0x07),
        }
    }

    /// Return the current identifier and advance modulo 8.
    pub fn next(&self) -> u8 {
        let previous = match self
            .next
            .fetch_update(Ordering::AcqRel, Ordering::Relaxed, |prev| {
                Some((prev + 1) & 0x07)
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        previous & 0x07
    }

    /// Identifier the next call to [`next`](Self::next) will return.
    pub fn peek(&self) -> u8 {
        self.next.load(Ordering::Acquire) & 0x07
    }
}
