//! Sailing performance: polar reference table and the interpolated model that
//! turns true wind into a target boat speed and an efficiency percentage.
pub mod polar;
pub mod table;
