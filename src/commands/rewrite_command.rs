//! Band rewrite command
//!
//! Renames ESPA surface reflectance bands to their HLS names and removes
//! every band that was not renamed.

use std::io::Write;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::metadata::{BandRewriter, MetadataDocument, MetadataError, MetadataResult, RenameTable};

/// Command for rewriting band names in an ESPA XML file
pub struct RewriteCommand {
    /// Path to the input file
    input_file: String,
    /// Path to the output file
    output_file: String,
    /// Table used for renaming
    table: &'static RenameTable,
}

impl RewriteCommand {
    /// Create a new rewrite command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new RewriteCommand instance or an error
    pub fn new(args: &ArgMatches) -> MetadataResult<Self> {
        let input_file = args.get_one::<String>("inputxmlfile")
            .ok_or_else(|| MetadataError::GenericError("Missing input XML file".to_string()))?
            .clone();

        let output_file = args.get_one::<String>("outputxmlfile")
            .ok_or_else(|| MetadataError::GenericError("Missing output XML file".to_string()))?
            .clone();

        Ok(RewriteCommand {
            input_file,
            output_file,
            table: RenameTable::standard(),
        })
    }
}

impl Command for RewriteCommand {
    fn run(&self, out: &mut dyn Write) -> MetadataResult<()> {
        info!("Rewriting bands of {} into {} ({} table entries)",
              self.input_file, self.output_file, self.table.len());

        let mut doc = MetadataDocument::from_file(&self.input_file)?;
        let report = BandRewriter::new(self.table).rewrite(&mut doc);

        for name in &report.removed {
            writeln!(out, "{}", name)?;
        }

        doc.write_file(&self.output_file)?;
        info!("Band rewrite successful");
        Ok(())
    }
}
