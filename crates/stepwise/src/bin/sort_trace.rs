//! `sort-trace` — run a sorting engine and print its step trace.
//!
//! Usage:
//!   sort-trace <algorithm> <values…>
//!
//! `algorithm` is one of bubble, selection, insertion, merge, heap or
//! radix. Steps stream to stdout as JSON lines, ending with the sorted
//! array (or the engine's tagged rejection).

use std::io::{self, Write};

use stepwise::cli::sort_trace;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let algorithm = match args.get(1) {
        Some(a) => a.clone(),
        None => {
            eprintln!(
                "First argument must be a sorting algorithm: bubble, selection, insertion, merge, heap or radix."
            );
            std::process::exit(1);
        }
    };

    match sort_trace(&algorithm, &args[2..]) {
        Ok(out) => {
            io::stdout().write_all(out.as_bytes()).unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
