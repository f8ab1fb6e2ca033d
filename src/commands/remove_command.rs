//! Band removal command

use std::io::Write;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::metadata::{remove_bands_with_product, MetadataDocument, MetadataError, MetadataResult};

/// Command for removing all bands with a given product tag
pub struct RemoveCommand {
    input_file: String,
    output_file: String,
    /// Bands carrying this product tag are removed
    product: String,
}

impl RemoveCommand {
    /// Create a new remove command from CLI arguments
    pub fn new(args: &ArgMatches) -> MetadataResult<Self> {
        let input_file = args.get_one::<String>("inputxmlfile")
            .ok_or_else(|| MetadataError::GenericError("Missing input XML file".to_string()))?
            .clone();

        let output_file = args.get_one::<String>("outputxmlfile")
            .ok_or_else(|| MetadataError::GenericError("Missing output XML file".to_string()))?
            .clone();

        let product = args.get_one::<String>("product")
            .ok_or_else(|| MetadataError::GenericError("Missing product tag".to_string()))?
            .clone();

        Ok(RemoveCommand {
            input_file,
            output_file,
            product,
        })
    }
}

impl Command for RemoveCommand {
    fn run(&self, out: &mut dyn Write) -> MetadataResult<()> {
        info!("Removing {} bands from {} into {}",
              self.product, self.input_file, self.output_file);

        let mut doc = MetadataDocument::from_file(&self.input_file)?;
        for band in remove_bands_with_product(&mut doc, &self.product) {
            writeln!(out, "{}", band.display_name())?;
        }

        doc.write_file(&self.output_file)?;
        Ok(())
    }
}
