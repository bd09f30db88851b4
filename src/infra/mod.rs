//! Infrastructure shared by the protocol and performance layers: bit-level
//! payload codec and the scattered-data interpolation engine.
pub mod codec;
pub mod interpolation;
