//! CLI command implementations
//!
//! This module contains the commands behind the bandkit binaries,
//! using the Command pattern.

pub mod command_traits;
pub mod rewrite_command;
pub mod remove_command;
pub mod solar_zenith_command;

pub use command_traits::Command;
pub use rewrite_command::RewriteCommand;
pub use remove_command::RemoveCommand;
pub use solar_zenith_command::SolarZenithCommand;
