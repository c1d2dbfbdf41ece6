//! Adapters between external file formats and the domain types.

pub mod csv;
pub mod json;
