//! Chunk extraction: the minimal subtrees carrying a given label.
//!
//! A noun phrase chunk is an `NP` subtree that does not itself contain another `NP`.
//! Nested phrases only count through their innermost member.

use std::fmt;

use crate::syntree::SynTree;

pub const NOUN_PHRASE: &str = "NP";

/// A borrowed chunk of a parse tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chunk<'a> {
  pub tree: &'a SynTree<String, String>,
}

impl<'a> Chunk<'a> {
  pub fn words(&self) -> Vec<&'a str> {
    self.tree.leaves().into_iter().map(String::as_str).collect()
  }

  pub fn span(&self) -> (usize, usize) {
    self.tree.span()
  }
}

impl fmt::Display for Chunk<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.words().join(" "))
  }
}

/// Every subtree labelled `label` that has no descendant labelled `label`, in pre-order
pub fn chunks<'a>(tree: &'a SynTree<String, String>, label: &str) -> Vec<Chunk<'a>> {
  let label = label.to_string();
  tree
    .subtrees()
    .filter(|t| t.label() == Some(&label) && !t.contains_label(&label))
    .map(|tree| Chunk { tree })
    .collect()
}

/// Noun phrase chunks of a sentence tree
pub fn np_chunk(tree: &SynTree<String, String>) -> Vec<Chunk<'_>> {
  chunks(tree, NOUN_PHRASE)
}
