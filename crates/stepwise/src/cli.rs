//! Command-line front ends for the trace engines.
//!
//! Provides the core logic used by the binary entry points:
//! - `tree-trace`  — run one tree engine operation and print its steps
//! - `sort-trace`  — run a sorting engine over an integer array
//! - `graph-trace` — run a graph algorithm over an `a-b:w` edge list
//!
//! Output is JSON lines: one step per line in operation order, then a
//! `{"result": …}` or `{"error": …}` line carrying the tagged outcome, and
//! for the tree commands a closing `{"summary": …}` line describing the
//! final structure. Only usage problems leave through [`CliError`];
//! conditions the engines tag in-band (duplicates, misses, disconnection)
//! are part of the printed trace.

use serde::Serialize;
use serde_json::{json, Value};

use step_forest::{AvlTree, BPlusTree, BTree, BstTree, RbTree, SplayTree, Trie};
use stepwise_array::{
    bubble_sort, heap_sort, insertion_sort, merge_sort, radix_sort, selection_sort,
};
use stepwise_core::Report;
use stepwise_graph::Graph;

/// Order for the multiway engines; small enough that a handful of inserts
/// already shows splits.
const MULTIWAY_ORDER: usize = 3;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Json(serde_json::Error),
    Usage(String),
    Value(String),
    Edge(String),
    Engine(String),
    Op(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Json(e)   => write!(f, "{e}"),
            CliError::Usage(e)  => write!(f, "{e}"),
            CliError::Value(e)  => write!(f, "not an integer: {e}"),
            CliError::Edge(e)   => write!(f, "not an a-b:w edge: {e}"),
            CliError::Engine(e) => write!(f, "unknown engine: {e}"),
            CliError::Op(e)     => write!(f, "unknown operation: {e}"),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

// ── Output shape ──────────────────────────────────────────────────────────

/// One step per line, then the tagged outcome.
fn render<T: Serialize>(report: &Report<T>) -> Result<String, CliError> {
    let mut out = String::new();
    for step in &report.steps {
        out.push_str(&serde_json::to_string(step)?);
        out.push('\n');
    }
    let tail = match &report.outcome {
        Ok(value) => json!({ "result": value }),
        Err(error) => json!({ "error": error }),
    };
    out.push_str(&serde_json::to_string(&tail)?);
    out.push('\n');
    Ok(out)
}

fn line(value: &Value) -> Result<String, CliError> {
    Ok(format!("{}\n", serde_json::to_string(value)?))
}

fn parse_keys(raw: &[String]) -> Result<Vec<i64>, CliError> {
    raw.iter()
        .map(|tok| tok.parse().map_err(|_| CliError::Value(tok.clone())))
        .collect()
}

// ── tree-trace ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
enum TreeOp {
    Insert,
    Search,
    Delete,
}

impl TreeOp {
    fn parse(op: &str) -> Result<Self, CliError> {
        match op.to_lowercase().as_str() {
            "insert" => Ok(TreeOp::Insert),
            "search" => Ok(TreeOp::Search),
            "delete" => Ok(TreeOp::Delete),
            other => Err(CliError::Op(other.to_string())),
        }
    }
}

/// Uniform driver surface over the keyed tree engines.
trait KeyedTree {
    fn insert_key(&mut self, key: i64) -> Result<String, CliError>;
    fn search_key(&mut self, key: i64) -> Result<String, CliError>;
    fn delete_key(&mut self, key: i64) -> Result<String, CliError>;
    fn seed(&mut self, key: i64);
    fn summary(&self) -> Value;
}

macro_rules! keyed_tree {
    ($($engine:ty),* $(,)?) => {
        $(
            impl KeyedTree for $engine {
                fn insert_key(&mut self, key: i64) -> Result<String, CliError> {
                    render(&self.insert(key))
                }
                fn search_key(&mut self, key: i64) -> Result<String, CliError> {
                    render(&self.search(&key))
                }
                fn delete_key(&mut self, key: i64) -> Result<String, CliError> {
                    render(&self.delete(&key))
                }
                fn seed(&mut self, key: i64) {
                    let _ = self.insert(key);
                }
                fn summary(&self) -> Value {
                    json!({
                        "len": self.len(),
                        "height": self.height(),
                        "sorted": self.to_sorted_vec(),
                    })
                }
            }
        )*
    };
}

keyed_tree!(
    BstTree<i64>,
    AvlTree<i64>,
    RbTree<i64>,
    SplayTree<i64>,
    BTree<i64>,
    BPlusTree<i64>,
);

/// Run one operation against a tree engine.
///
/// `insert` inserts every value in order and prints each trace. `search`
/// and `delete` seed the tree silently from all values but the last, then
/// run the operation on the last value. A `summary` line with the final
/// structure closes the output either way.
pub fn tree_trace(variant: &str, op: &str, values: &[String]) -> Result<String, CliError> {
    let op = TreeOp::parse(op)?;
    if values.is_empty() {
        return Err(CliError::Usage("at least one value is required".to_string()));
    }
    match variant.to_lowercase().as_str() {
        "trie" => run_trie(op, values),
        other => {
            let keys = parse_keys(values)?;
            match other {
                "bst" => run_keyed(BstTree::new(), op, &keys),
                "avl" => run_keyed(AvlTree::new(), op, &keys),
                "red-black" | "rb" => run_keyed(RbTree::new(), op, &keys),
                "splay" => run_keyed(SplayTree::new(), op, &keys),
                "b-tree" | "btree" => {
                    let tree = BTree::new(MULTIWAY_ORDER)
                        .map_err(|e| CliError::Usage(e.to_string()))?;
                    run_keyed(tree, op, &keys)
                }
                "b-plus" | "bplus" => {
                    let tree = BPlusTree::new(MULTIWAY_ORDER)
                        .map_err(|e| CliError::Usage(e.to_string()))?;
                    run_keyed(tree, op, &keys)
                }
                _ => Err(CliError::Engine(format!("tree variant {other}"))),
            }
        }
    }
}

fn run_keyed(mut tree: impl KeyedTree, op: TreeOp, keys: &[i64]) -> Result<String, CliError> {
    let mut out = String::new();
    match op {
        TreeOp::Insert => {
            for &key in keys {
                out.push_str(&tree.insert_key(key)?);
            }
        }
        TreeOp::Search | TreeOp::Delete => {
            let (&last, seeds) = keys
                .split_last()
                .ok_or_else(|| CliError::Usage("at least one value is required".to_string()))?;
            for &key in seeds {
                tree.seed(key);
            }
            out.push_str(&match op {
                TreeOp::Search => tree.search_key(last)?,
                _ => tree.delete_key(last)?,
            });
        }
    }
    out.push_str(&line(&json!({ "summary": tree.summary() }))?);
    Ok(out)
}

fn run_trie(op: TreeOp, words: &[String]) -> Result<String, CliError> {
    let mut trie = Trie::new();
    let mut out = String::new();
    match op {
        TreeOp::Insert => {
            for word in words {
                out.push_str(&render(&trie.insert(word))?);
            }
        }
        TreeOp::Search | TreeOp::Delete => {
            let (last, seeds) = words
                .split_last()
                .ok_or_else(|| CliError::Usage("at least one value is required".to_string()))?;
            for word in seeds {
                let _ = trie.insert(word);
            }
            out.push_str(&match op {
                TreeOp::Search => render(&trie.search(last))?,
                _ => render(&trie.delete(last))?,
            });
        }
    }
    out.push_str(&line(&json!({
        "summary": { "len": trie.len(), "words": trie.words() }
    }))?);
    Ok(out)
}

// ── sort-trace ────────────────────────────────────────────────────────────

/// Run one sorting engine over the given integers and print its trace.
pub fn sort_trace(algorithm: &str, values: &[String]) -> Result<String, CliError> {
    let data = parse_keys(values)?;
    let report = match algorithm.to_lowercase().as_str() {
        "bubble" => bubble_sort(&data),
        "selection" => selection_sort(&data),
        "insertion" => insertion_sort(&data),
        "merge" => merge_sort(&data),
        "heap" => heap_sort(&data),
        "radix" => radix_sort(&data),
        other => return Err(CliError::Engine(format!("sorting algorithm {other}"))),
    };
    render(&report)
}

// ── graph-trace ───────────────────────────────────────────────────────────

fn parse_edge(tok: &str) -> Result<(u32, u32, i64), CliError> {
    let bad = || CliError::Edge(tok.to_string());
    let (pair, weight) = tok.split_once(':').ok_or_else(bad)?;
    let (a, b) = pair.split_once('-').ok_or_else(bad)?;
    Ok((
        a.parse().map_err(|_| bad())?,
        b.parse().map_err(|_| bad())?,
        weight.parse().map_err(|_| bad())?,
    ))
}

/// Nodes enter the registry in first-appearance order, the same order a
/// host reading the edge list aloud would add them.
fn build_graph(edges: &[(u32, u32, i64)]) -> Result<Graph, CliError> {
    let mut g = Graph::new();
    for &(a, b, w) in edges {
        for id in [a, b] {
            if !g.has_node(id) {
                g.add_node(id).map_err(|e| CliError::Usage(e.to_string()))?;
            }
        }
        g.add_edge(a, b, w).map_err(|e| CliError::Usage(e.to_string()))?;
    }
    Ok(g)
}

/// Run one graph algorithm over an edge list.
///
/// Plain integer arguments anchor the run (start and, where one applies,
/// target); `a-b:w` triples are the undirected weighted edges. The output
/// opens with a one-line graph summary.
pub fn graph_trace(algorithm: &str, args: &[String]) -> Result<String, CliError> {
    let mut anchors = Vec::new();
    let mut edges = Vec::new();
    for tok in args {
        if tok.contains('-') || tok.contains(':') {
            edges.push(parse_edge(tok)?);
        } else {
            anchors.push(tok.parse::<u32>().map_err(|_| CliError::Value(tok.clone()))?);
        }
    }
    if edges.is_empty() {
        return Err(CliError::Usage(
            "at least one a-b:w edge is required".to_string(),
        ));
    }
    let g = build_graph(&edges)?;

    let traced = match (algorithm.to_lowercase().as_str(), anchors.as_slice()) {
        ("bfs", [start]) => render(&g.bfs(*start, None))?,
        ("bfs", [start, target]) => render(&g.bfs(*start, Some(*target)))?,
        ("dfs", [start]) => render(&g.dfs(*start, None))?,
        ("dfs", [start, target]) => render(&g.dfs(*start, Some(*target)))?,
        ("dijkstra", [start, target]) => render(&g.dijkstra(*start, *target))?,
        ("prim", [start]) => render(&g.prim(*start))?,
        ("kruskal", []) => render(&g.kruskal())?,
        ("bfs" | "dfs", _) => {
            return Err(CliError::Usage(
                "bfs and dfs take a start node and an optional target".to_string(),
            ))
        }
        ("dijkstra", _) => {
            return Err(CliError::Usage(
                "dijkstra takes a start node and a target".to_string(),
            ))
        }
        ("prim", _) => return Err(CliError::Usage("prim takes a start node".to_string())),
        ("kruskal", _) => {
            return Err(CliError::Usage(
                "kruskal takes only the edge list".to_string(),
            ))
        }
        (other, _) => return Err(CliError::Engine(format!("graph algorithm {other}"))),
    };

    let mut out = line(&json!({
        "graph": { "nodes": g.node_count(), "edges": g.edge_count() }
    }))?;
    out.push_str(&traced);
    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────
