//! NMEA 2000 protocol components: message structures, CAN/Fast Packet
//! transport, and the serial gateway carrying frames to the bus.
pub mod gateway;
pub mod messages;
pub mod transport;
