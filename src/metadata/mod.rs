//! ESPA XML metadata handling
//!
//! This module provides the metadata document model, the band rename table
//! and the band rewriting operations built on them.

pub mod errors;
pub mod document;
pub mod band_table;
pub mod rewriter;

pub use errors::{MetadataError, MetadataResult};
pub use document::{Band, MetadataDocument};
pub use band_table::{BandMapping, RenameTable, DEFAULT_TARGET_PRODUCT};
pub use rewriter::{remove_bands_with_product, BandRewriter, RewriteReport};
