//! PGN structures emitted by this crate.
pub mod engine_dynamic;

pub use engine_dynamic::EngineParametersDynamic;
