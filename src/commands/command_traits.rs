//! Command pattern interfaces
//!
//! This module defines the core Command pattern interface
//! shared by the bandkit tools.

use std::io::{self, Write};

use crate::metadata::errors::MetadataResult;

/// Represents an executable command in the application
///
/// Command objects encapsulate the logic for a specific CLI operation.
/// Anything the tool prints for its caller goes to `out`; diagnostics go
/// through the `log` crate.
pub trait Command {
    /// Run the command, writing tool output to `out`
    fn run(&self, out: &mut dyn Write) -> MetadataResult<()>;

    /// Run the command against stdout
    fn execute(&self) -> MetadataResult<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.run(&mut handle)?;
        handle.flush()?;
        Ok(())
    }
}
