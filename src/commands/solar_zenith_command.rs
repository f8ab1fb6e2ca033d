//! Solar zenith check command
//!
//! Prints `valid` or `invalid` for an MTL file, with no trailing newline.

use std::io::Write;

use clap::ArgMatches;

use crate::commands::command_traits::Command;
use crate::metadata::{MetadataError, MetadataResult};
use crate::mtl::check_solar_zenith;

/// Command for checking the solar zenith of a scene
pub struct SolarZenithCommand {
    /// Path to the MTL file
    input_file: String,
}

impl SolarZenithCommand {
    /// Create a new solar zenith command from CLI arguments
    pub fn new(args: &ArgMatches) -> MetadataResult<Self> {
        let input_file = args.get_one::<String>("input_file")
            .ok_or_else(|| MetadataError::GenericError("Missing input MTL file".to_string()))?
            .clone();

        Ok(SolarZenithCommand { input_file })
    }
}

impl Command for SolarZenithCommand {
    fn run(&self, out: &mut dyn Write) -> MetadataResult<()> {
        let verdict = check_solar_zenith(&self.input_file)?;
        write!(out, "{}", verdict)?;
        Ok(())
    }
}
