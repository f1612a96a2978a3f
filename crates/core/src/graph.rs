//! A small nondeterministic string-transducer algebra.
//!
//! Grammars are built once from combinators and evaluated by exhaustive span
//! search. Every node maps a start position in the input to the set of
//! `(end, output)` pairs it can reach. Inputs are short (a single candidate
//! date span), so no determinization or minimization is performed.
//!
//! Result order is meaningful: union branches contribute left to right and
//! closures contribute shortest first. Callers that need a single answer take
//! the first one.
//!
//! ```
//! use datespeak_core::graph::Graph;
//!
//! let g = Graph::accep("a").then(Graph::cross("b", "B")).or(Graph::delete("c"));
//! assert_eq!(g.transduce("ab"), vec!["aB".to_string()]);
//! assert_eq!(g.transduce("c"), vec![String::new()]);
//! assert!(g.transduce("ba").is_empty());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Predicate over a single input character.
pub type CharClass = fn(char) -> bool;

type OutputRewrite = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;
type SpanFunction = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// Reachable `(end, output)` pairs from one start position.
type Paths = Vec<(usize, String)>;

/// An immutable, cheaply clonable transducer.
#[derive(Clone)]
pub struct Graph(Arc<Node>);

enum Node {
    /// Consume `input` literally and emit `output`.
    Cross { input: String, output: String },
    /// Consume one character matching `test`, echoing it when `keep` is set.
    Class {
        label: &'static str,
        test: CharClass,
        keep: bool,
    },
    /// Consume any key and emit each of its values.
    Table {
        entries: HashMap<String, Vec<String>>,
        lengths: Vec<usize>,
    },
    Union(Vec<Graph>),
    Concat(Vec<Graph>),
    Closure {
        inner: Graph,
        min: usize,
        max: Option<usize>,
    },
    /// Feed the output of the first graph through the second.
    Compose(Graph, Graph),
    /// Use the fallback only on spans the preferred graph rejects.
    Priority { preferred: Graph, fallback: Graph },
    /// Paths of the first graph whose consumed span the second rejects.
    Difference(Graph, Graph),
    Rewrite(Graph, OutputRewrite),
    Function(SpanFunction),
}

impl Graph {
    fn from_node(node: Node) -> Self {
        Self(Arc::new(node))
    }

    /// Accept `text` and emit it unchanged.
    pub fn accep(text: &str) -> Self {
        Self::cross(text, text)
    }

    /// Accept `input` and emit `output`.
    pub fn cross(input: &str, output: &str) -> Self {
        Self::from_node(Node::Cross {
            input: input.to_string(),
            output: output.to_string(),
        })
    }

    /// Accept `text` and emit nothing.
    pub fn delete(text: &str) -> Self {
        Self::cross(text, "")
    }

    /// Consume nothing and emit `text`.
    pub fn insert(text: &str) -> Self {
        Self::cross("", text)
    }

    /// Accept one character matching `test` and emit it.
    pub fn class(label: &'static str, test: CharClass) -> Self {
        Self::from_node(Node::Class {
            label,
            test,
            keep: true,
        })
    }

    /// Accept one character matching `test` and emit nothing.
    pub fn delete_class(label: &'static str, test: CharClass) -> Self {
        Self::from_node(Node::Class {
            label,
            test,
            keep: false,
        })
    }

    /// A string map: every key is accepted and rewritten to its value(s).
    ///
    /// Duplicate keys keep every value in insertion order.
    pub fn table<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in pairs {
            let values = entries.entry(key.into()).or_default();
            let value = value.into();
            if !values.contains(&value) {
                values.push(value);
            }
        }
        let mut lengths: Vec<usize> = entries.keys().map(String::len).collect();
        lengths.sort_unstable();
        lengths.dedup();
        Self::from_node(Node::Table { entries, lengths })
    }

    /// A graph that applies `f` to a whole consumed span.
    ///
    /// Every non-empty span starting at the current position is offered to
    /// `f`, so this is meant for the right-hand side of [`Graph::compose`].
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        Self::from_node(Node::Function(Arc::new(f)))
    }

    pub fn union<I: IntoIterator<Item = Graph>>(graphs: I) -> Self {
        Self::from_node(Node::Union(graphs.into_iter().collect()))
    }

    pub fn concat<I: IntoIterator<Item = Graph>>(graphs: I) -> Self {
        Self::from_node(Node::Concat(graphs.into_iter().collect()))
    }

    /// Concatenation.
    #[must_use]
    pub fn then(self, next: Graph) -> Self {
        match &*self.0 {
            Node::Concat(parts) => {
                let mut parts = parts.clone();
                parts.push(next);
                Self::concat(parts)
            }
            _ => Self::concat([self, next]),
        }
    }

    /// Union.
    #[must_use]
    pub fn or(self, other: Graph) -> Self {
        match &*self.0 {
            Node::Union(branches) => {
                let mut branches = branches.clone();
                branches.push(other);
                Self::union(branches)
            }
            _ => Self::union([self, other]),
        }
    }

    /// Between `min` and `max` repetitions (`None` for unbounded).
    #[must_use]
    pub fn closure(self, min: usize, max: Option<usize>) -> Self {
        Self::from_node(Node::Closure {
            inner: self,
            min,
            max,
        })
    }

    /// Zero or one repetition.
    #[must_use]
    pub fn optional(self) -> Self {
        self.closure(0, Some(1))
    }

    /// Zero or more repetitions.
    #[must_use]
    pub fn star(self) -> Self {
        self.closure(0, None)
    }

    /// One or more repetitions.
    #[must_use]
    pub fn plus(self) -> Self {
        self.closure(1, None)
    }

    /// Exactly `n` repetitions.
    #[must_use]
    pub fn repeat(self, n: usize) -> Self {
        self.closure(n, Some(n))
    }

    /// Sequential composition: `self`'s output becomes `next`'s input.
    #[must_use]
    pub fn compose(self, next: Graph) -> Self {
        Self::from_node(Node::Compose(self, next))
    }

    /// Priority union: spans accepted by `self` never reach `fallback`.
    #[must_use]
    pub fn prefer_over(self, fallback: Graph) -> Self {
        Self::from_node(Node::Priority {
            preferred: self,
            fallback,
        })
    }

    /// Restrict `self` to spans that `excluded` does not accept.
    #[must_use]
    pub fn minus(self, excluded: Graph) -> Self {
        Self::from_node(Node::Difference(self, excluded))
    }

    /// Rewrite each output with `f`, dropping outputs mapped to `None`.
    #[must_use]
    pub fn rewrite<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self::from_node(Node::Rewrite(self, Arc::new(f)))
    }

    /// All outputs of accepting paths over the whole input, in preference order.
    pub fn transduce(&self, input: &str) -> Vec<String> {
        let mut outputs: Vec<String> = Vec::new();
        for (end, output) in self.step(input, 0) {
            if end == input.len() && !outputs.contains(&output) {
                outputs.push(output);
            }
        }
        outputs
    }

    /// The preferred output, if any path accepts the whole input.
    pub fn transduce_first(&self, input: &str) -> Option<String> {
        self.step(input, 0)
            .into_iter()
            .find(|(end, _)| *end == input.len())
            .map(|(_, output)| output)
    }

    /// Whether any path accepts the whole input.
    pub fn accepts(&self, input: &str) -> bool {
        self.step(input, 0).iter().any(|(end, _)| *end == input.len())
    }

    fn step(&self, input: &str, pos: usize) -> Paths {
        match &*self.0 {
            Node::Cross {
                input: lit,
                output,
            } => {
                if input[pos..].starts_with(lit.as_str()) {
                    vec![(pos + lit.len(), output.clone())]
                } else {
                    vec![]
                }
            }
            Node::Class { test, keep, .. } => match input[pos..].chars().next() {
                Some(c) if test(c) => {
                    let emitted = if *keep { c.to_string() } else { String::new() };
                    vec![(pos + c.len_utf8(), emitted)]
                }
                _ => vec![],
            },
            Node::Table { entries, lengths } => {
                let mut paths = Vec::new();
                for &len in lengths {
                    let end = pos + len;
                    if end > input.len() || !input.is_char_boundary(end) {
                        continue;
                    }
                    if let Some(values) = entries.get(&input[pos..end]) {
                        for value in values {
                            push_unique(&mut paths, (end, value.clone()));
                        }
                    }
                }
                paths
            }
            Node::Union(branches) => {
                let mut paths = Vec::new();
                for branch in branches {
                    for path in branch.step(input, pos) {
                        push_unique(&mut paths, path);
                    }
                }
                paths
            }
            Node::Concat(parts) => {
                let mut frontier = vec![(pos, String::new())];
                for part in parts {
                    let mut next = Vec::new();
                    for (at, prefix) in &frontier {
                        for (end, output) in part.step(input, *at) {
                            push_unique(&mut next, (end, format!("{prefix}{output}")));
                        }
                    }
                    if next.is_empty() {
                        return next;
                    }
                    frontier = next;
                }
                frontier
            }
            Node::Closure { inner, min, max } => {
                let mut paths = Vec::new();
                let mut frontier = vec![(pos, String::new())];
                let mut count = 0;
                loop {
                    if count >= *min {
                        for path in &frontier {
                            push_unique(&mut paths, path.clone());
                        }
                    }
                    if max.is_some_and(|max| count >= max) {
                        break;
                    }
                    let mut next = Vec::new();
                    for (at, prefix) in &frontier {
                        for (end, output) in inner.step(input, *at) {
                            // unbounded repetition only advances on consumed input
                            if max.is_none() && end == *at {
                                continue;
                            }
                            push_unique(&mut next, (end, format!("{prefix}{output}")));
                        }
                    }
                    if next.is_empty() {
                        break;
                    }
                    frontier = next;
                    count += 1;
                }
                paths
            }
            Node::Compose(first, second) => {
                let mut paths = Vec::new();
                for (end, intermediate) in first.step(input, pos) {
                    for output in second.transduce(&intermediate) {
                        push_unique(&mut paths, (end, output));
                    }
                }
                paths
            }
            Node::Priority {
                preferred,
                fallback,
            } => {
                let mut paths = preferred.step(input, pos);
                let claimed: Vec<usize> = paths.iter().map(|(end, _)| *end).collect();
                for path in fallback.step(input, pos) {
                    if !claimed.contains(&path.0) {
                        push_unique(&mut paths, path);
                    }
                }
                paths
            }
            Node::Difference(graph, excluded) => graph
                .step(input, pos)
                .into_iter()
                .filter(|(end, _)| !excluded.accepts(&input[pos..*end]))
                .collect(),
            Node::Rewrite(graph, f) => {
                let mut paths = Vec::new();
                for (end, output) in graph.step(input, pos) {
                    if let Some(rewritten) = f(&output) {
                        push_unique(&mut paths, (end, rewritten));
                    }
                }
                paths
            }
            Node::Function(f) => {
                let mut paths = Vec::new();
                let rest = &input[pos..];
                for (offset, c) in rest.char_indices() {
                    let end = pos + offset + c.len_utf8();
                    for output in f(&input[pos..end]) {
                        push_unique(&mut paths, (end, output));
                    }
                }
                paths
            }
        }
    }
}

fn push_unique(paths: &mut Paths, path: (usize, String)) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            Node::Cross { input, output } => write!(f, "Cross({input:?} -> {output:?})"),
            Node::Class { label, keep, .. } => {
                write!(f, "Class({label}{})", if *keep { "" } else { ", deleted" })
            }
            Node::Table { entries, .. } => write!(f, "Table({} keys)", entries.len()),
            Node::Union(branches) => f.debug_tuple("Union").field(branches).finish(),
            Node::Concat(parts) => f.debug_tuple("Concat").field(parts).finish(),
            Node::Closure { inner, min, max } => f
                .debug_struct("Closure")
                .field("inner", inner)
                .field("min", min)
                .field("max", max)
                .finish(),
            Node::Compose(a, b) => f.debug_tuple("Compose").field(a).field(b).finish(),
            Node::Priority {
                preferred,
                fallback,
            } => f
                .debug_struct("Priority")
                .field("preferred", preferred)
                .field("fallback", fallback)
                .finish(),
            Node::Difference(a, b) => f.debug_tuple("Difference").field(a).field(b).finish(),
            Node::Rewrite(inner, _) => f.debug_tuple("Rewrite").field(inner).finish(),
            Node::Function(_) => f.write_str("Function"),
        }
    }
}

// =============================================================================
// Common character classes and spacing helpers
// =============================================================================

/// One ASCII digit.
pub fn digit() -> Graph {
    Graph::class("digit", |c| c.is_ascii_digit())
}

/// Any single character.
pub fn any_char() -> Graph {
    Graph::class("any", |_| true)
}

/// Emit a single space.
pub fn insert_space() -> Graph {
    Graph::insert(" ")
}

/// Delete any run of whitespace, including none.
pub fn delete_space() -> Graph {
    Graph::delete_class("space", char::is_whitespace).star()
}

/// Collapse one or more spaces into a single space.
pub fn delete_extra_space() -> Graph {
    Graph::delete(" ").plus().then(insert_space())
}
