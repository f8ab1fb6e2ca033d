//! Band rename table
//!
//! Maps ESPA surface reflectance band names to the names and product tag
//! used by HLS. The standard table is compiled in from `bands.toml`.

use std::collections::HashSet;
use std::str::FromStr;

use lazy_static::lazy_static;

use crate::metadata::errors::{MetadataError, MetadataResult};

/// Product tag written to every renamed band
pub const DEFAULT_TARGET_PRODUCT: &str = "hls";

lazy_static! {
    // Parse the embedded table once on first use
    static ref STANDARD_TABLE: RenameTable = {
        let content = include_str!("../../bands.toml");
        content.parse::<RenameTable>().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse band rename table: {}", e);
            RenameTable::empty(DEFAULT_TARGET_PRODUCT)
        })
    };
}

/// One row of the rename table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandMapping {
    /// Band name as written by ESPA
    pub from: String,
    /// Band name after rewriting
    pub to: String,
    /// Product tag after rewriting
    pub product: String,
}

impl BandMapping {
    pub fn new(from: &str, to: &str, product: &str) -> Self {
        BandMapping {
            from: from.to_string(),
            to: to.to_string(),
            product: product.to_string(),
        }
    }
}

/// Ordered old-name → (new name, product) mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTable {
    target_product: String,
    mappings: Vec<BandMapping>,
}

impl RenameTable {
    /// Build a table from explicit mappings
    ///
    /// # Errors
    /// `ParseError` if two mappings share the same source name.
    pub fn new(target_product: &str, mappings: Vec<BandMapping>) -> MetadataResult<Self> {
        let mut seen = HashSet::new();
        for mapping in &mappings {
            if !seen.insert(mapping.from.as_str()) {
                return Err(MetadataError::ParseError(format!(
                    "duplicate band '{}' in rename table",
                    mapping.from
                )));
            }
        }

        Ok(RenameTable {
            target_product: target_product.to_string(),
            mappings,
        })
    }

    /// A table with no mappings; rewriting with it removes every band
    pub fn empty(target_product: &str) -> Self {
        RenameTable {
            target_product: target_product.to_string(),
            mappings: Vec::new(),
        }
    }

    /// The table shipped with the crate
    pub fn standard() -> &'static RenameTable {
        &STANDARD_TABLE
    }

    /// Product tag that marks a band as already rewritten
    pub fn target_product(&self) -> &str {
        &self.target_product
    }

    /// Mappings in scan order
    pub fn mappings(&self) -> &[BandMapping] {
        &self.mappings
    }

    /// Find the mapping for a band name, first match in scan order
    pub fn lookup(&self, name: &str) -> Option<&BandMapping> {
        self.mappings.iter().find(|m| m.from == name)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl FromStr for RenameTable {
    type Err = MetadataError;

    /// Parse a rename table from TOML
    ///
    /// ```toml
    /// target_product = "hls"
    ///
    /// [[band]]
    /// from = "sr_band1"
    /// to = "band01"
    /// ```
    ///
    /// A `[[band]]` entry may carry its own `product`; otherwise the table's
    /// `target_product` is used.
    fn from_str(content: &str) -> MetadataResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(MetadataError::ParseError(format!("Failed to parse TOML: {}", e))),
        };

        let target_product = match toml_value.get("target_product") {
            None => DEFAULT_TARGET_PRODUCT,
            Some(v) => v.as_str().ok_or_else(|| {
                MetadataError::ParseError("target_product must be a string".to_string())
            })?,
        };

        let mut mappings = Vec::new();
        if let Some(entries) = toml_value.get("band").and_then(|v| v.as_array()) {
            for (index, entry) in entries.iter().enumerate() {
                let from = string_field(entry, index, "from")?.ok_or_else(|| missing_field(index, "from"))?;
                let to = string_field(entry, index, "to")?.ok_or_else(|| missing_field(index, "to"))?;
                let product = string_field(entry, index, "product")?.unwrap_or(target_product);
                mappings.push(BandMapping::new(from, to, product));
            }
        }

        RenameTable::new(target_product, mappings)
    }
}

/// Read an optional string field from a `[[band]]` entry
fn string_field<'a>(entry: &'a toml::Value, index: usize, key: &str) -> MetadataResult<Option<&'a str>> {
    match entry.get(key) {
        None => Ok(None),
        Some(v) => v.as_str().map(Some).ok_or_else(|| {
            MetadataError::ParseError(format!("band entry {}: '{}' must be a string", index, key))
        }),
    }
}

fn missing_field(index: usize, key: &str) -> MetadataError {
    MetadataError::ParseError(format!("band entry {}: missing '{}'", index, key))
}
