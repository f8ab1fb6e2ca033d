//! Band rewriting
//!
//! Renames bands through a [`RenameTable`] and prunes the ones that were not
//! renamed. The two passes are kept separate: pruning looks at the product
//! tag after renaming, so a band that already carried the target tag before
//! the rewrite is kept even if its name is not in the table.

use log::{debug, info};

use crate::metadata::band_table::RenameTable;
use crate::metadata::document::{Band, MetadataDocument};

/// What a rewrite changed, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// (old name, new name) for every renamed band
    pub renamed: Vec<(String, String)>,
    /// Names of removed bands
    pub removed: Vec<String>,
}

/// Applies a rename table to a metadata document
pub struct BandRewriter<'a> {
    table: &'a RenameTable,
}

impl<'a> BandRewriter<'a> {
    /// Create a rewriter for the given table
    pub fn new(table: &'a RenameTable) -> Self {
        BandRewriter { table }
    }

    /// Rewriter using the table shipped with the crate
    pub fn standard() -> BandRewriter<'static> {
        BandRewriter::new(RenameTable::standard())
    }

    /// Rename every band found in the table and retag its product
    ///
    /// Bands not in the table are left untouched.
    ///
    /// # Returns
    /// (old name, new name) pairs in document order
    pub fn rename(&self, doc: &mut MetadataDocument) -> Vec<(String, String)> {
        let mut renamed = Vec::new();

        for band in doc.bands_mut() {
            let Some(name) = band.name() else {
                continue;
            };
            if let Some(mapping) = self.table.lookup(&name) {
                debug!("Renaming band {} -> {} (product {})", name, mapping.to, mapping.product);
                band.set_name(&mapping.to);
                band.set_product(&mapping.product);
                renamed.push((name, mapping.to.clone()));
            }
        }

        renamed
    }

    /// Remove every band whose product is not the table's target product
    ///
    /// # Returns
    /// The removed bands in document order
    pub fn prune(&self, doc: &mut MetadataDocument) -> Vec<Band> {
        let target = self.table.target_product();
        doc.remove_bands_where(|band| band.product().as_deref() != Some(target))
    }

    /// Rename then prune
    pub fn rewrite(&self, doc: &mut MetadataDocument) -> RewriteReport {
        let renamed = self.rename(doc);
        let removed: Vec<String> = self.prune(doc).iter().map(Band::display_name).collect();

        info!(
            "Rewrote {} band(s), removed {}, {} remaining",
            renamed.len(),
            removed.len(),
            doc.band_count()
        );

        RewriteReport { renamed, removed }
    }
}

/// Remove every band whose `product` attribute equals `product`
///
/// Bands without a `product` attribute are kept.
///
/// # Returns
/// The removed bands in document order
pub fn remove_bands_with_product(doc: &mut MetadataDocument, product: &str) -> Vec<Band> {
    let removed = doc.remove_bands_where(|band| band.product().as_deref() == Some(product));
    info!("Removed {} band(s) with product {}", removed.len(), product);
    removed
}
