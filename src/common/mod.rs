//! Utilities shared by the part templates.

pub mod unit;
pub mod xml;
