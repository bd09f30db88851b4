//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (CAN ID construction,
//! payload serialization, polar model construction, feed and gateway I/O).
//!
//! Recoverable runtime conditions (bad feed messages, send failures) are
//! reported through these types but never terminate the service; construction
//! errors indicate a defect in static data or configuration.
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur while building a 29-bit CAN identifier.
pub enum CanIdBuildError {
    /// Provided parameters do not produce a valid identifier.
    #[error("Invalid data")]
    InvalidData,
    /// Attempt to address a broadcast-only (PDU2) PGN to a single node.
    #[error("Invalid for addressed message: PF is too high: {pf}")]
    InvalidForFocusedMessage { pf: u8 },
    /// In PDU1 the lower 8 bits of the PGN must remain zero.
    #[error("PDU1 PGNs require PS = 0")]
    PsFocusMessageMustBeNull,
    /// No payload available to build the frame.
    #[error("Payload is empty: unable to build")]
    EmptyPayload,
}

//================================================================================CODEC_ERROR

#[derive(Debug, Error, PartialEq, Eq)]
/// Issues encountered while serializing a PGN into a buffer.
pub enum SerializationError {
    /// Provided buffer is too small for the payload.
    #[error("Buffer too small: need {needed}, got {available}")]
    BufferTooSmall { needed: usize, available: usize },
    /// Failed while writing bits into the output buffer.
    #[error("BitWrite error: {err}")]
    BitWriteError { err: BitWriterError },
}

impl From<BitWriterError> for SerializationError {
    fn from(err: BitWriterError) -> Self {
        SerializationError::BitWriteError { err }
    }
}

//==================================================================================BITWRITER_ERRORS
#[derive(Debug, Error, PartialEq, Eq)]
/// Errors raised during bitwise writes into a buffer.
pub enum BitWriterError {
    /// Attempted to write beyond the provided capacity.
    #[error("Attempted to write out of bounds -> asked: {asked}, available: {available}")]
    OutOfBounds { asked: usize, available: usize },
    /// Field is too large for the provided type.
    #[error("Cannot write more than {max} bits. Requested: {asked}")]
    TooLongForType { max: u8, asked: u8 },
}

//==================================================================================SEND_ERROR
#[derive(Debug, Error)]
/// Errors encountered when sending a PGN (build + transmit).
pub enum SendPgnError<E: core::fmt::Debug> {
    /// PGN serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(SerializationError),
    /// CAN identifier could not be built.
    #[error("Frame build failed: {0:?}")]
    Build(CanIdBuildError),
    /// CAN layer refused or failed to send the frame.
    #[error("CAN bus send error: {0:?}")]
    Send(E),
}

//==================================================================================MODEL_ERRORS
#[derive(Debug, Error, PartialEq)]
/// Failures while triangulating a scattered sample set.
pub enum InterpolationError {
    /// A sample carries a NaN or infinite coordinate or value.
    #[error("Non-finite sample at index {index}")]
    NonFiniteSample { index: usize },
    /// Less than three distinct points remain after de-duplication.
    #[error("Not enough distinct points: {count}")]
    NotEnoughPoints { count: usize },
    /// Every point lies on one line: no triangle can be formed.
    #[error("All points are collinear")]
    Collinear,
}

#[derive(Debug, Error, PartialEq)]
/// Malformed polar reference table or model parameters.
pub enum PolarError {
    /// The table has no wind speed column.
    #[error("Polar table is empty")]
    EmptyTable,
    /// A row does not provide one value per wind speed column.
    #[error("Row {row} has {found} values, expected {expected}")]
    RowLength {
        row: &'static str,
        found: usize,
        expected: usize,
    },
    /// Wind speed columns must be finite and strictly increasing.
    #[error("Wind speed columns must be strictly increasing (column {column})")]
    UnorderedWindSpeeds { column: usize },
    /// An angle lies outside [0, 180] degrees.
    #[error("Angle {angle} out of range in row {row}")]
    AngleOutOfRange { row: &'static str, angle: f64 },
    /// A speed or VMG figure is negative or not finite.
    #[error("Invalid speed {speed} in row {row}")]
    InvalidSpeed { row: &'static str, speed: f64 },
    /// Two derived points of the same column share an angle.
    #[error("Duplicate angle {angle} for wind speed {tws}")]
    DuplicateAngle { tws: f64, angle: f64 },
    /// A model constant is outside its admissible range.
    #[error("Invalid model parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    /// Triangulation of the derived points failed.
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}

//==================================================================================IO_ERRORS
#[derive(Debug, Error)]
/// Errors raised by the inbound telemetry feed.
pub enum FeedError {
    /// Could not reach the feed endpoint.
    #[error("Feed connection failed: {0}")]
    Connect(#[source] std::io::Error),
    /// The connection dropped or a read failed.
    #[error("Feed receive error: {0}")]
    Receive(#[source] std::io::Error),
    /// Writing the subscription request failed.
    #[error("Feed subscribe error: {0}")]
    Subscribe(#[source] std::io::Error),
    /// The remote end closed the stream.
    #[error("Feed closed by peer")]
    Closed,
}

#[derive(Debug, Error)]
/// Errors raised by the RAW-mode serial gateway.
pub enum GatewayError {
    /// Serial device could not be opened.
    #[error("Serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),
    /// Writing to or draining the gateway failed.
    #[error("Gateway I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
/// Configuration loading and validation failures.
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Cannot read configuration: {0}")]
    Read(#[from] std::io::Error),
    /// The configuration file is not valid JSON for [`MonitorConfig`](crate::config::MonitorConfig).
    #[error("Cannot parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its admissible range.
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
