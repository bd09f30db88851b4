//! PGN 127489 "Engine Parameters, Dynamic" (Fast Packet, 26 bytes).
//!
//! | Offset | Size | Field                | Not available |
//! |-------:|-----:|----------------------|---------------|
//! | 0      | 1    | engine instance      |               |
//! | 1      | 2    | oil pressure         | `0xFFFF`      |
//! | 3      | 2    | oil temperature      | `0xFFFF`      |
//! | 5      | 2    | engine temperature   | `0xFFFF`      |
//! | 7      | 2    | alternator potential | `0xFFFF`      |
//! | 9      | 2    | fuel rate (signed)   | `0x7FFF`      |
//! | 11     | 4    | total engine hours   | `0xFFFFFFFF`  |
//! | 15     | 2    | coolant pressure     | `0xFFFF`      |
//! | 17     | 2    | fuel pressure        | `0xFFFF`      |
//! | 19     | 4    | reserved             | `0xFF` fill   |
//! | 23     | 1    | discrete status      |               |
//! | 24     | 1    | engine load %        | `0x7F`        |
//! | 25     | 1    | engine torque %      | `0x7F`        |
//!
//! All multi-byte fields are little-endian. Displays that understand engine
//! load show the sailing efficiency without any custom PGN.
use crate::error::SerializationError;
use crate::infra::codec::bits::BitWriter;
use crate::infra::codec::traits::PgnPayload;

/// Serialized size of the record.
pub const ENGINE_DYNAMIC_LEN: usize = 26;

/// Highest engine load accepted by displays (%).
pub const MAX_ENGINE_LOAD: f64 = 125.0;

/// Engine telemetry record. Raw values use the NMEA 2000 resolutions
/// noted on each field; `None` is sent as "not available".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineParametersDynamic {
    pub instance: u8,
    /// 100 Pa.
    pub oil_pressure: Option<u16>,
    /// 0.1 K.
    pub oil_temperature: Option<u16>,
    /// 0.01 K.
    pub engine_temperature: Option<u16>,
    /// 0.01 V.
    pub alternator_potential: Option<u16>,
    /// 0.1 L/h.
    pub fuel_rate: Option<i16>,
    /// Seconds.
    pub total_engine_hours: Option<u32>,
    /// 100 Pa.
    pub coolant_pressure: Option<u16>,
    /// 1000 Pa.
    pub fuel_pressure: Option<u16>,
    /// Warning bits, `0` = no warnings.
    pub discrete_status: u8,
    /// Percent.
    pub engine_load: Option<i8>,
    /// Percent.
    pub engine_torque: Option<i8>,
}

impl EngineParametersDynamic {
    /// Record carrying only an engine load, every other field unavailable.
    ///
    /// The load is clamped to `[0, 125]` and truncated; NaN becomes `0`.
    pub fn with_load(instance: u8, load_percent: f64) -> Self {
        let load = if load_percent.is_nan() {
            0
        } else {
            load_percent.clamp(0.0, MAX_ENGINE_LOAD) as i8
        };
        Self {
            instance,
            engine_load: Some(load),
            ..Self::default()
        }
    }
}

impl PgnPayload for EngineParametersDynamic {
    const PGN: u32 = 127489;
    const PRIORITY: u8 = 6;

    fn payload_len(&self) -> usize {
        ENGINE_DYNAMIC_LEN
    }

    fn to_payload(&self, buffer: &mut [u8]) -> Result<usize, SerializationError> {
        if buffer.len() < ENGINE_DYNAMIC_LEN {
            return Err(SerializationError::BufferTooSmall {
                needed: ENGINE_DYNAMIC_LEN,
                available: buffer.len(),
            });
        }

        let mut writer = BitWriter::new(&mut buffer[..ENGINE_DYNAMIC_LEN]);
        writer.write_u8(self.instance, 8)?;
        writer.write_unsigned_or_na(self.oil_pressure.map(u64::from), 16)?;
        writer.write_unsigned_or_na(self.oil_temperature.map(u64::from), 16)?;
        writer.write_unsigned_or_na(self.engine_temperature.map(u64::from), 16)?;
        writer.write_unsigned_or_na(self.alternator_potential.map(u64::from), 16)?;
        writer.write_signed_or_na(self.fuel_rate.map(i64::from), 16)?;
        writer.write_unsigned_or_na(self.total_engine_hours.map(u64::from), 32)?;
        writer.write_unsigned_or_na(self.coolant_pressure.map(u64::from), 16)?;
        writer.write_unsigned_or_na(self.fuel_pressure.map(u64::from), 16)?;
        writer.write_reserved(32)?;
        writer.write_u8(self.discrete_status, 8)?;
        writer.write_signed_or_na(self.engine_load.map(i64::from), 8)?;
        writer.write_signed_or_na(self.engine_torque.map(i64::from), 8)?;

        Ok(writer.bytes_written())
    }
}
