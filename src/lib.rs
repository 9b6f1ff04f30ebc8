//! Parse short English sentences against a small context-free grammar and
//! report their noun phrase chunks.
//!
//! ```
//! use npchunk::{Grammar, analyze};
//!
//! let g = Grammar::builtin();
//! let parsed = analyze(&g, "Holmes lit a pipe.", "NP").unwrap();
//! assert_eq!(parsed.tokens, vec!["holmes", "lit", "a", "pipe"]);
//! for sentence in parsed.trees.iter() {
//!   assert_eq!(sentence.chunks, vec!["holmes", "pipe"]);
//! }
//! ```

#[macro_use]
extern crate lazy_static;

pub mod chunk;
pub mod earley;
pub mod forest;
pub mod grammar;
pub mod parse_grammar;
pub mod pretty;
pub mod rules;
pub mod syntree;
pub mod tokenize;
pub mod utils;

use tracing::debug;

use crate::earley::Chart;
use crate::forest::Forest;
pub use crate::chunk::{Chunk, NOUN_PHRASE, chunks, np_chunk};
pub use crate::grammar::{BUILTIN_GRAMMAR, Grammar};
pub use crate::pretty::pretty;
pub use crate::syntree::SynTree;
pub use crate::tokenize::preprocess;
pub use crate::utils::{Error, Result};

impl Grammar {
  pub fn parse_chart(&self, input: &[&str]) -> Chart {
    earley::parse_chart(self, input)
  }

  fn parse_forest(&self, input: &[&str]) -> Forest {
    Forest::from(self.parse_chart(input))
  }

  /// Every parse tree for `input`, labelled with symbol names.
  /// Fails if the grammar's lexicon lacks any of the words.
  pub fn parse(&self, input: &[&str]) -> Result<Vec<SynTree<String, String>>> {
    self.check_coverage(input)?;

    let forest = self.parse_forest(input);
    let trees = forest
      .trees(self)
      .iter()
      .map(|t| t.map(|c| c.value.symbol.name.clone(), |w| w.value.clone()))
      .collect::<Vec<_>>();

    debug!(words = input.len(), trees = trees.len(), "parsed");
    Ok(trees)
  }
}

/// One parse of a sentence, with the chunks found in it
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTree {
  pub tree: SynTree<String, String>,
  pub chunks: Vec<String>,
}

/// A preprocessed sentence and all of its parses
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
  pub tokens: Vec<String>,
  pub trees: Vec<ParsedTree>,
}

/// Runs the whole pipeline on a raw sentence: preprocess, parse, then chunk each tree by `label`
pub fn analyze(g: &Grammar, sentence: &str, label: &str) -> Result<Parsed> {
  let tokens = preprocess(sentence);
  let words = tokens.iter().map(String::as_str).collect::<Vec<_>>();

  let trees = g
    .parse(&words)?
    .into_iter()
    .map(|tree| {
      let found = chunks(&tree, label).iter().map(Chunk::to_string).collect();
      ParsedTree {
        tree,
        chunks: found,
      }
    })
    .collect();

  Ok(Parsed { tokens, trees })
}
