//! Split Engine CLI
//!
//! Loads a bill from a JSON file and prints its summary.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- bill.json            # summary as pretty JSON
//! cargo run -- bill.json --text     # summary as shareable text
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use split_engine::{build_summary, Bill, EngineError, Result};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(EngineError::MissingArgument);
    }

    let input_path = &args[1];
    let as_text = args.iter().skip(2).any(|a| a == "--text");

    let file = File::open(input_path)?;
    let reader = BufReader::new(file);
    let bill: Bill = serde_json::from_reader(reader)?;

    let summary = build_summary(&bill)?;

    if as_text {
        print!("{}", summary.to_text());
    } else {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &summary)?;
        println!();
    }

    Ok(())
}
