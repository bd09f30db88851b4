//! Low-level bit writer for NMEA 2000 payloads.
//!
//! Fields are laid out least-significant bit first, which makes every
//! byte-aligned integer land in little-endian order. Fields that are not
//! available are written with the NMEA 2000 "data not available" marker:
//! all ones for unsigned fields, the maximum positive value for signed ones.
use crate::error::BitWriterError;

/// Generic writer able to lay bit segments into a `&mut [u8]`
/// without assuming byte alignment.
pub struct BitWriter<'a> {
    /// Target buffer (typically the PGN payload under construction).
    buffer: &'a mut [u8],
    /// Current position expressed in bits written.
    bit_cursor: usize,
}

impl<'a> BitWriter<'a> {
    /// Create a writer positioned at the start of the buffer.
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            bit_cursor: 0,
        }
    }

    /// Expose the cursor position in bits (useful to derive final length).
    pub fn bit_cursor(&self) -> usize {
        self.bit_cursor
    }

    /// Number of bytes touched so far, rounding a partial byte up.
    pub fn bytes_written(&self) -> usize {
        self.bit_cursor.div_ceil(8)
    }

    /// Write `num_bits` bits from the provided `u64`.
    pub fn write_u64(&mut self, value: u64, num_bits: u8) -> Result<(), BitWriterError> {
        if !(1..=64).contains(&num_bits) {
            return Err(BitWriterError::TooLongForType {
                max: 64,
                asked: num_bits,
            });
        }

        let buffer_len_bits = self.buffer.len() * 8;
        if self.bit_cursor + num_bits as usize > buffer_len_bits {
            return Err(BitWriterError::OutOfBounds {
                asked: num_bits as usize,
                available: buffer_len_bits - self.bit_cursor,
            });
        }

        let mut remaining = value;
        let mut written = 0usize;
        let total = num_bits as usize;

        while written < total {
            let byte_index = (self.bit_cursor + written) / 8;
            let bit_offset = (self.bit_cursor + written) % 8;
            let chunk = (8 - bit_offset).min(total - written);

            let mask = ((1u16 << chunk) - 1) as u8;
            self.buffer[byte_index] &= !(mask << bit_offset);
            self.buffer[byte_index] |= (remaining as u8 & mask) << bit_offset;

            remaining = remaining.checked_shr(chunk as u32).unwrap_or(0);
            written += chunk;
        }

        self.bit_cursor += total;
        Ok(())
    }

    /// Convenience helper to write up to 8 bits.
    pub fn write_u8(&mut self, value: u8, num_bits: u8) -> Result<(), BitWriterError> {
        Self::check_width(num_bits, 8)?;
        self.write_u64(value as u64, num_bits)
    }

    /// Convenience helper to write up to 16 bits.
    pub fn write_u16(&mut self, value: u16, num_bits: u8) -> Result<(), BitWriterError> {
        Self::check_width(num_bits, 16)?;
        self.write_u64(value as u64, num_bits)
    }

    /// Convenience helper to write up to 32 bits.
    pub fn write_u32(&mut self, value: u32, num_bits: u8) -> Result<(), BitWriterError> {
        Self::check_width(num_bits, 32)?;
        self.write_u64(value as u64, num_bits)
    }

    /// Two's complement write of a signed field.
    pub fn write_i64(&mut self, value: i64, num_bits: u8) -> Result<(), BitWriterError> {
        self.write_u64(value as u64, num_bits)
    }

    /// Unsigned field, `None` becomes the all-ones marker.
    pub fn write_unsigned_or_na(
        &mut self,
        value: Option<u64>,
        num_bits: u8,
    ) -> Result<(), BitWriterError> {
        let marker = u64::MAX.checked_shr(64 - num_bits as u32).unwrap_or(0);
        self.write_u64(value.unwrap_or(marker), num_bits)
    }

    /// Signed field, `None` becomes the maximum positive value (`0x7F`, `0x7FFF`...).
    pub fn write_signed_or_na(
        &mut self,
        value: Option<i64>,
        num_bits: u8,
    ) -> Result<(), BitWriterError> {
        let marker = (1i64 << (num_bits.saturating_sub(1) as u32)).wrapping_sub(1);
        self.write_i64(value.unwrap_or(marker), num_bits)
    }

    /// Reserved bits are always transmitted as ones.
    pub fn write_reserved(&mut self, num_bits: usize) -> Result<(), BitWriterError> {
        let mut left = num_bits;
        while left > 0 {
            let chunk = left.min(64) as u8;
            self.write_u64(u64::MAX, chunk)?;
            left -= chunk as usize;
        }
        Ok(())
    }

    fn check_width(num_bits: u8, max: u8) -> Result<(), BitWriterError> {
        if num_bits > max {
            return Err(BitWriterError::TooLongForType {
                max,
                asked: num_bits,
            });
        }
        Ok(())
    }
}
