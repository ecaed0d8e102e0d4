use std::env::args_os;

use mosaic_sampler::{extract_mosaic, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match extract_mosaic(&arguments) {
        Ok(written) => println!("Sampling successful, wrote {} file(s)", written.len()),
        Err(e) => {
            eprintln!("Sampling failed because of: {}", e);
            std::process::exit(1);
        }
    }
}
