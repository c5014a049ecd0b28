//! `graph-trace` — run a graph algorithm and print its step trace.
//!
//! Usage:
//!   graph-trace bfs <start> [target] <a-b:w …>
//!   graph-trace dfs <start> [target] <a-b:w …>
//!   graph-trace dijkstra <start> <target> <a-b:w …>
//!   graph-trace prim <start> <a-b:w …>
//!   graph-trace kruskal <a-b:w …>
//!
//! Each `a-b:w` triple is one undirected edge of weight `w`; nodes are
//! registered in first-appearance order. Steps stream to stdout as JSON
//! lines after a one-line graph summary.

use std::io::{self, Write};

use stepwise::cli::graph_trace;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let algorithm = match args.get(1) {
        Some(a) => a.clone(),
        None => {
            eprintln!(
                "First argument must be a graph algorithm: bfs, dfs, dijkstra, prim or kruskal."
            );
            std::process::exit(1);
        }
    };

    match graph_trace(&algorithm, &args[2..]) {
        Ok(out) => {
            io::stdout().write_all(out.as_bytes()).unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
