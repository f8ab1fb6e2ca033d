//! Command-line definitions for the bandkit tools
//!
//! Each binary builds its parser from here so the flag set can be tested
//! without spawning processes. Parsing failures exit with status 2 and
//! `-h`/`--help` exits with status 0, as clap does by default.

use std::io;

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};

use crate::utils::logger::Logger;

/// Add the logging flags shared by every tool
fn with_logging_args(command: ClapCommand) -> ClapCommand {
    command
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Also write log records to this file")
                .value_name("FILE")
                .required(false),
        )
}

/// Parser for `alter_sr_band_names`
pub fn rewrite_cli() -> ClapCommand {
    with_logging_args(
        ClapCommand::new("alter_sr_band_names")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Rename ESPA surface reflectance bands to HLS names and drop all other bands")
            .override_usage("alter_sr_band_names -i <inputfile> -o <outputfile>")
            .arg(
                Arg::new("inputxmlfile")
                    .short('i')
                    .long("inputxmlfile")
                    .help("ESPA XML metadata file to read")
                    .value_name("FILE")
                    .required(true),
            )
            .arg(
                Arg::new("outputxmlfile")
                    .short('o')
                    .long("outputxmlfile")
                    .help("Path of the rewritten XML metadata file")
                    .value_name("FILE")
                    .required(true),
            ),
    )
}

/// Parser for `remove_bands`
pub fn remove_cli() -> ClapCommand {
    with_logging_args(
        ClapCommand::new("remove_bands")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Remove every band with a given product from an ESPA XML metadata file")
            .arg(
                Arg::new("inputxmlfile")
                    .short('i')
                    .long("inputxmlfile")
                    .help("ESPA XML metadata file to read")
                    .value_name("FILE")
                    .required(true),
            )
            .arg(
                Arg::new("outputxmlfile")
                    .short('o')
                    .long("outputxmlfile")
                    .help("Path of the output XML metadata file")
                    .value_name("FILE")
                    .default_value("test_out.xml"),
            )
            .arg(
                Arg::new("product")
                    .short('p')
                    .long("product")
                    .help("Product tag of the bands to remove")
                    .value_name("PRODUCT")
                    .default_value("L1TP"),
            ),
    )
}

/// Parser for `check_solar_zenith`
pub fn solar_zenith_cli() -> ClapCommand {
    with_logging_args(
        ClapCommand::new("check_solar_zenith")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Print 'valid' or 'invalid' depending on the scene's solar zenith")
            .override_usage("check_solar_zenith -i _MTL.txt")
            .arg(
                Arg::new("input_file")
                    .short('i')
                    .long("input_file")
                    .help("Landsat MTL metadata file")
                    .value_name("FILE")
                    .required(true),
            ),
    )
}

/// Install the global logger from the shared logging flags
pub fn init_logging(args: &ArgMatches) -> io::Result<()> {
    let verbose = args.get_flag("verbose");
    let log_file = args.get_one::<String>("log-file").map(String::as_str);
    Logger::init_global_logger(log_file, verbose)
}
