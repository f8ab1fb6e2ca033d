//! Landsat MTL metadata handling
//!
//! Parsing of the flat MTL text format and the solar zenith check built on it.

pub mod parser;
pub mod solar;
#[cfg(test)]
mod tests;

pub use parser::{MtlDocument, MtlGroup, MtlValue};
pub use solar::{check_solar_zenith, classify_solar_zenith, SceneInfo, SolarGeometry, Verdict};
