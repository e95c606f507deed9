// ============================================================
// Layer 3 — TokenTree Domain Type
// ============================================================
// A corpus handed to the vocabulary builder can be nested to
// any depth: documents of sentences of tokens, or a mix of
// bare tokens and lists. TokenTree models that shape as a
// tagged union so flattening never needs runtime type checks.
//
// JSON mapping (serde untagged):
//   "word"              → Leaf("word")
//   ["a", ["b", "c"]]   → Seq([Leaf("a"), Seq([Leaf("b"), Leaf("c")])])
//
// Flattening order is depth-first, left to right. The
// vocabulary assigns ids in this order, so it must be stable.
//
// Reference: Rust Book §6 (Enums), §13 (Iterators)

use serde::{Deserialize, Serialize};
use std::slice;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenTree {
    /// A single token
    Leaf(String),

    /// An ordered list of nested nodes
    Seq(Vec<TokenTree>),
}

impl TokenTree {
    /// An empty sequence — a corpus with no tokens
    pub fn empty() -> Self {
        TokenTree::Seq(Vec::new())
    }

    /// Build a sequence node from anything convertible into nodes.
    ///
    /// Example:
    ///   TokenTree::seq([TokenTree::seq(["a", "b"]), "c".into()])
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TokenTree>,
    {
        TokenTree::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Iterate over every leaf token, depth-first.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { root: Some(self), stack: Vec::new() }
    }

    /// Number of leaf tokens (duplicates included)
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }
}

impl From<&str> for TokenTree {
    fn from(s: &str) -> Self {
        TokenTree::Leaf(s.to_string())
    }
}

impl From<String> for TokenTree {
    fn from(s: String) -> Self {
        TokenTree::Leaf(s)
    }
}

impl<T: Into<TokenTree>> From<Vec<T>> for TokenTree {
    fn from(items: Vec<T>) -> Self {
        TokenTree::seq(items)
    }
}

// ─── Leaves Iterator ──────────────────────────────────────────────────────────
/// Depth-first iterator over the leaves of a TokenTree.
///
/// Uses an explicit stack of child iterators instead of recursion,
/// so deeply nested corpora cannot overflow the call stack.
pub struct Leaves<'a> {
    root:  Option<&'a TokenTree>,
    stack: Vec<slice::Iter<'a, TokenTree>>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            match root {
                TokenTree::Leaf(token) => return Some(token.as_str()),
                TokenTree::Seq(children) => self.stack.push(children.iter()),
            }
        }

        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                None => {
                    self.stack.pop();
                }
                Some(TokenTree::Leaf(token)) => return Some(token.as_str()),
                Some(TokenTree::Seq(children)) => self.stack.push(children.iter()),
            }
        }
    }
}
