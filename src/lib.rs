pub mod utils;
pub mod metadata;
pub mod mtl;
pub mod commands;
pub mod cli;

pub use metadata::{BandRewriter, MetadataDocument, MetadataError, MetadataResult, RenameTable, RewriteReport};
pub use mtl::{check_solar_zenith, MtlDocument, Verdict};
