//! `korri-efficiency`: rates a sailing yacht against its polar diagram and
//! broadcasts the result on NMEA 2000 as engine load (PGN 127489), so any
//! engine display on board shows the sailing efficiency.
//!
//! The crate exposes the infrastructure modules (bit codec, scattered-data
//! interpolation), the polar performance model, the protocol layer (CAN
//! identifiers, Fast Packet, RAW gateway), and the monitor service tying a
//! telemetry feed to the bus.
//==================================================================================
/// Streaming sample window shared by the ingest and transmit activities.
pub mod aggregator;
/// Runtime configuration (JSON file, defaults, validation).
pub mod config;
/// Data types and unit conversions shared across modules.
pub mod core;
/// Domain and low-level errors (CAN identifier construction, serialization,
/// model construction, feed and gateway I/O).
pub mod error;
/// Telemetry feed decoding and connection seam.
pub mod feed;
/// Bit-level codec and interpolation engine.
pub mod infra;
/// Ingest and transmit activities.
pub mod monitor;
/// Polar reference data and target-speed model.
pub mod performance;
/// NMEA 2000 protocol implementation: messages, CAN transport, fast packets,
/// and the serial gateway.
pub mod protocol;
//==================================================================================
