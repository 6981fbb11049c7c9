//! Report output formats

pub mod csv;
pub mod json;
