//! Payload codec: bit writer and the trait implemented by every PGN the crate emits.
pub mod bits;
pub mod traits;
