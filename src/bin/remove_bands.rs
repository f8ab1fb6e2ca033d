use std::process;

use bandkit::cli::{remove_cli, init_logging};
use bandkit::commands::{Command, RemoveCommand};

fn main() {
    let matches = remove_cli().get_matches();

    if let Err(e) = init_logging(&matches) {
        eprintln!("Error setting up logger: {}", e);
        process::exit(1);
    }

    let command = match RemoveCommand::new(&matches) {
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
