use std::process;

use bandkit::cli::{solar_zenith_cli, init_logging};
use bandkit::commands::{Command, SolarZenithCommand};

fn main() {
    let matches = solar_zenith_cli().get_matches();

    if let Err(e) = init_logging(&matches) {
        eprintln!("Error setting up logger: {}", e);
        process::exit(1);
    }

    let command = match SolarZenithCommand::new(&matches) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = command.execute() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
