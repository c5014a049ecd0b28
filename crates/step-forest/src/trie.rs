//! Lowercase trie engine.
//!
//! Each node fans out over a fixed `a-z` alphabet and carries a terminal
//! flag; a stored word is a root-to-terminal path. Deleting a word
//! unmarks its terminal and prunes the now-useless suffix nodes, so the
//! reachable tree never keeps a childless non-terminal node.

use serde::{Deserialize, Serialize};
use stepwise_core::{EngineError, NodeId, Report, SearchOutcome, StepKind, Trace};

const ALPHABET: usize = 26;

#[derive(Clone, Debug)]
struct TrieNode {
    p: Option<NodeId>,
    label: Option<char>,
    children: [Option<NodeId>; ALPHABET],
    terminal: bool,
}

/// One trie node in level order, for hosts that draw the structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieEntry {
    pub id: NodeId,
    pub label: Option<char>,
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub terminal: bool,
}

#[derive(Clone, Debug)]
pub struct Trie {
    arena: Vec<TrieNode>,
    root: NodeId,
    len: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a word onto child slots, rejecting anything outside `a-z`.
fn letter_slots(word: &str) -> Result<Vec<usize>, EngineError> {
    if word.is_empty() {
        return Err(EngineError::InvalidInput(
            "word must not be empty".to_string(),
        ));
    }
    word.chars()
        .map(|c| {
            if c.is_ascii_lowercase() {
                Ok(c as usize - 'a' as usize)
            } else {
                Err(EngineError::InvalidInput(format!(
                    "only lowercase a-z is supported, got {c:?}"
                )))
            }
        })
        .collect()
}

fn letter(slot: usize) -> char {
    (b'a' + slot as u8) as char
}

impl Trie {
    pub fn new() -> Self {
        Self {
            arena: vec![TrieNode {
                p: None,
                label: None,
                children: [None; ALPHABET],
                terminal: false,
            }],
            root: 0,
            len: 0,
        }
    }

    fn alloc(&mut self, label: char, parent: NodeId) -> NodeId {
        let id = self.arena.len() as NodeId;
        self.arena.push(TrieNode {
            p: Some(parent),
            label: Some(label),
            children: [None; ALPHABET],
            terminal: false,
        });
        id
    }

    /// Store `word`, reusing any existing prefix path. Returns the id of
    /// the word-end node.
    pub fn insert(&mut self, word: &str) -> Report<NodeId> {
        let mut trace = Trace::new();
        let slots = match letter_slots(word) {
            Ok(slots) => slots,
            Err(e) => {
                trace.add(StepKind::Info, format!("rejecting the word: {e}"), vec![]);
                return Report::err(e, trace);
            }
        };

        let mut curr = self.root;
        for slot in slots {
            let c = letter(slot);
            match self.arena[curr as usize].children[slot] {
                Some(next) => {
                    trace.add(StepKind::Visit, format!("following the edge for '{c}'"), vec![next]);
                    curr = next;
                }
                None => {
                    let id = self.alloc(c, curr);
                    self.arena[curr as usize].children[slot] = Some(id);
                    trace.add(StepKind::Insert, format!("adding a node for '{c}'"), vec![id]);
                    curr = id;
                }
            }
        }

        if self.arena[curr as usize].terminal {
            trace.add(StepKind::Info, format!("{word:?} is already stored"), vec![curr]);
            return Report::err(EngineError::DuplicateKey, trace);
        }
        self.arena[curr as usize].terminal = true;
        self.len += 1;
        trace.add(StepKind::Update, format!("marking the end of {word:?}"), vec![curr]);
        Report::ok(curr, trace)
    }

    pub fn search(&self, word: &str) -> Report<SearchOutcome> {
        let mut trace = Trace::new();
        let slots = match letter_slots(word) {
            Ok(slots) => slots,
            Err(e) => {
                trace.add(StepKind::Info, format!("rejecting the word: {e}"), vec![]);
                return Report::err(e, trace);
            }
        };

        let mut path = Vec::new();
        let mut curr = self.root;
        for slot in slots {
            let c = letter(slot);
            match self.arena[curr as usize].children[slot] {
                Some(next) => {
                    trace.add(StepKind::Visit, format!("following the edge for '{c}'"), vec![next]);
                    curr = next;
                    path.push(next);
                }
                None => {
                    trace.add(
                        StepKind::NotFound,
                        format!("no edge for '{c}': {word:?} is not stored"),
                        path.clone(),
                    );
                    return Report::ok(SearchOutcome::miss(path), trace);
                }
            }
        }

        if self.arena[curr as usize].terminal {
            trace.add(StepKind::Found, format!("{word:?} is stored"), vec![curr]);
            Report::ok(SearchOutcome::hit(path), trace)
        } else {
            trace.add(
                StepKind::NotFound,
                format!("{word:?} is only a prefix of stored words"),
                vec![curr],
            );
            Report::ok(SearchOutcome::miss(path), trace)
        }
    }

    /// Unmark `word` and prune its unshared suffix nodes bottom-up.
    pub fn delete(&mut self, word: &str) -> Report<()> {
        let mut trace = Trace::new();
        let slots = match letter_slots(word) {
            Ok(slots) => slots,
            Err(e) => {
                trace.add(StepKind::Info, format!("rejecting the word: {e}"), vec![]);
                return Report::err(e, trace);
            }
        };

        let mut path = vec![self.root];
        let mut curr = self.root;
        for slot in &slots {
            let c = letter(*slot);
            match self.arena[curr as usize].children[*slot] {
                Some(next) => {
                    trace.add(StepKind::Visit, format!("following the edge for '{c}'"), vec![next]);
                    curr = next;
                    path.push(next);
                }
                None => {
                    trace.add(
                        StepKind::NotFound,
                        format!("no edge for '{c}': {word:?} is not stored"),
                        path[1..].to_vec(),
                    );
                    return Report::err(EngineError::NotFound, trace);
                }
            }
        }
        if !self.arena[curr as usize].terminal {
            trace.add(
                StepKind::NotFound,
                format!("{word:?} is a prefix of stored words, not a word itself"),
                vec![curr],
            );
            return Report::err(EngineError::NotFound, trace);
        }

        self.arena[curr as usize].terminal = false;
        self.len -= 1;
        trace.add(StepKind::Update, format!("unmarking the end of {word:?}"), vec![curr]);

        // path[i] was reached through slots[i - 1]; the root stays put
        for i in (1..path.len()).rev() {
            let n = path[i];
            let node = &self.arena[n as usize];
            if node.terminal || node.children.iter().any(|c| c.is_some()) {
                break;
            }
            let c = letter(slots[i - 1]);
            self.arena[path[i - 1] as usize].children[slots[i - 1]] = None;
            trace.add(
                StepKind::Remove,
                format!("pruning the childless node for '{c}'"),
                vec![n],
            );
        }
        Report::ok((), trace)
    }

    // ── inspection ────────────────────────────────────────────────────────

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn contains(&self, word: &str) -> bool {
        let Ok(slots) = letter_slots(word) else {
            return false;
        };
        let mut curr = self.root;
        for slot in slots {
            match self.arena[curr as usize].children[slot] {
                Some(next) => curr = next,
                None => return false,
            }
        }
        self.arena[curr as usize].terminal
    }

    /// True when some stored word starts with `prefix`.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        let Ok(slots) = letter_slots(prefix) else {
            return false;
        };
        let mut curr = self.root;
        for slot in slots {
            match self.arena[curr as usize].children[slot] {
                Some(next) => curr = next,
                None => return false,
            }
        }
        true
    }

    /// Every stored word in alphabetical order.
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut buf = String::new();
        self.collect(self.root, &mut buf, &mut out);
        out
    }

    fn collect(&self, n: NodeId, buf: &mut String, out: &mut Vec<String>) {
        let node = &self.arena[n as usize];
        if node.terminal {
            out.push(buf.clone());
        }
        for (slot, child) in node.children.iter().enumerate() {
            if let Some(c) = *child {
                buf.push(letter(slot));
                self.collect(c, buf, out);
                buf.pop();
            }
        }
    }

    /// Live nodes in level order.
    pub fn entries(&self) -> Vec<TrieEntry> {
        let mut out = Vec::new();
        let mut queue = std::collections::VecDeque::new();
        queue.push_back((self.root, 0usize));
        while let Some((id, depth)) = queue.pop_front() {
            let node = &self.arena[id as usize];
            out.push(TrieEntry {
                id,
                label: node.label,
                depth,
                parent: node.p,
                terminal: node.terminal,
            });
            for child in node.children.iter().flatten() {
                queue.push_back((*child, depth + 1));
            }
        }
        out
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut terminals = 0;
        self.check(self.root, None, &mut terminals)?;
        if terminals != self.len {
            return Err(format!(
                "len is {} but {terminals} terminal nodes are reachable",
                self.len
            ));
        }
        Ok(())
    }

    fn check(
        &self,
        n: NodeId,
        parent: Option<NodeId>,
        terminals: &mut usize,
    ) -> Result<(), String> {
        let node = &self.arena[n as usize];
        if node.p != parent {
            return Err(format!("node {n} has a stale parent link"));
        }
        if node.terminal {
            *terminals += 1;
        }
        let mut fanout = 0;
        for (slot, child) in node.children.iter().enumerate() {
            if let Some(c) = *child {
                fanout += 1;
                let expected = letter(slot);
                if self.arena[c as usize].label != Some(expected) {
                    return Err(format!(
                        "child {c} is filed under {expected:?} but labeled {:?}",
                        self.arena[c as usize].label
                    ));
                }
                self.check(c, Some(n), terminals)?;
            }
        }
        if fanout == 0 && !node.terminal && n != self.root {
            return Err(format!("node {n} is childless but not a word end"));
        }
        Ok(())
    }

    pub fn print(&self) -> String {
        self.print_node(self.root, "")
    }

    fn print_node(&self, n: NodeId, tab: &str) -> String {
        let node = &self.arena[n as usize];
        let name = match node.label {
            Some(c) => c.to_string(),
            None => "(root)".to_string(),
        };
        let mark = if node.terminal { " *" } else { "" };
        let mut out = format!("{name}{mark}\n");
        for child in node.children.iter().flatten() {
            out += &format!("{tab}  {}", self.print_node(*child, &format!("{tab}  ")));
        }
        out
    }
}
