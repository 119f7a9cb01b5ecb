use std::env::args_os;
use std::process;

use cfa_demosaic::{convert_pgm_to_ppm, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match convert_pgm_to_ppm(&arguments) {
        Ok(_) => println!("Conversion successful"),
        Err(e) => {
            eprintln!("Conversion failed because of: {}", e);
            process::exit(e.exit_code());
        }
    }
}
