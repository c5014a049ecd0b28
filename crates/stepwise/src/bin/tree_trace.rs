//! `tree-trace` — run one tree engine operation and print its step trace.
//!
//! Usage:
//!   tree-trace <variant> <op> <values…>
//!
//! `variant` is one of bst, avl, red-black, splay, b-tree, b-plus or trie;
//! `op` is insert, search or delete. `insert` inserts every value in order;
//! `search` and `delete` seed the tree from all values but the last and run
//! on the last one. Steps stream to stdout as JSON lines.

use std::io::{self, Write};

use stepwise::cli::tree_trace;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let variant = match args.get(1) {
        Some(v) => v.clone(),
        None => {
            eprintln!(
                "First argument must be a tree variant: bst, avl, red-black, splay, b-tree, b-plus or trie."
            );
            std::process::exit(1);
        }
    };
    let op = match args.get(2) {
        Some(o) => o.clone(),
        None => {
            eprintln!("Second argument must be an operation: insert, search or delete.");
            std::process::exit(1);
        }
    };

    match tree_trace(&variant, &op, &args[3..]) {
        Ok(out) => {
            io::stdout().write_all(out.as_bytes()).unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
