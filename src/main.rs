//! star-hex CLI entry point
//!
//! Hexagonal star charts for any place and time

use star_hex::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
