use std::fmt;
use std::rc::Rc;

use crate::earley::Chart;
use crate::grammar::Grammar;
use crate::rules::Rule;
use crate::syntree::{Constituent, SynTree, Word};
use crate::utils::combinations;

type RuleTree = SynTree<Rc<Rule>, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct ForestState {
  rule: Rc<Rule>,
  span: (usize, usize),
}

impl ForestState {
  pub fn new(rule: &Rc<Rule>, start: usize, end: usize) -> Self {
    Self {
      rule: rule.clone(),
      span: (start, end),
    }
  }
}

impl fmt::Display for ForestState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}: {}", self.span.0, self.span.1, self.rule)
  }
}

impl From<&ForestState> for Constituent<Rc<Rule>> {
  fn from(state: &ForestState) -> Self {
    Constituent {
      value: state.rule.clone(),
      span: state.span,
    }
  }
}

/// Completed chart states indexed by origin, with the input they cover.
/// There is one column per input position plus one for the end of the input,
/// where only empty constituents can start.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
  columns: Vec<Vec<ForestState>>,
  words: Vec<String>,
}

impl Forest {
  /// Length of the parsed input, in tokens
  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Leaves are always complete. Branches are complete once they hold a child per production
  fn subtree_is_complete(node: &RuleTree) -> bool {
    match node.get_branch() {
      Some((cons, children)) => cons.value.len() == children.len(),
      None => true,
    }
  }

  /// Every way to tile `search_start..search_end` with the productions of `rule`
  /// from `prod_idx` on. Nonterminals become unfilled branches, terminals become leaves.
  ///
  /// For `NP -> Det NP` over "a pipe" (0..2), the forest holds
  ///
  /// ```text
  /// 0..1: Det -> "a"
  /// 1..2: NP -> N
  /// 1..2: N -> "pipe"
  /// ```
  ///
  /// and the single tiling is `[(Det, 0..1), (NP, 1..2)]`.
  ///
  /// A nullable production may take an empty span, so a tiling only fails when the
  /// productions and the span run out at different points.
  fn extend_out(
    &self,
    rule: &Rule,
    prod_idx: usize,
    search_start: usize,
    search_end: usize,
  ) -> Vec<Vec<RuleTree>> {
    if prod_idx == rule.len() {
      // one empty tiling if the span is used up too, none otherwise
      return if search_start == search_end {
        vec![Vec::new()]
      } else {
        Vec::new()
      };
    }

    let next_production = &rule.productions[prod_idx];
    if next_production.is_nonterminal() {
      let wanted_symbol = next_production.symbol_str();
      // candidates start at search_start and end inside the span
      self.columns[search_start]
        .iter()
        .filter(|s| s.span.1 <= search_end && s.rule.symbol.name == wanted_symbol)
        .flat_map(|state| {
          self
            .extend_out(rule, prod_idx + 1, state.span.1, search_end)
            .into_iter()
            .map(move |mut seq| {
              seq.insert(0, SynTree::Branch(state.into(), Vec::new()));
              seq
            })
        })
        .collect()
    } else if search_start == search_end
      || self.words[search_start] != next_production.symbol_str()
    {
      // a terminal needs a matching token at the search start
      Vec::new()
    } else {
      let leaf = SynTree::Leaf(Word {
        value: next_production.symbol_str().to_string(),
        span: (search_start, search_start + 1),
      });

      self
        .extend_out(rule, prod_idx + 1, search_start + 1, search_end)
        .into_iter()
        .map(move |mut seq| {
          seq.insert(0, leaf.clone());
          seq
        })
        .collect()
    }
  }

  /// Fills in an unfilled branch, returning every complete tree it can become.
  ///
  /// `ancestors` holds the (symbol, span) of every enclosing constituent. A constituent
  /// that repeats one of them can only come from a cyclic unit derivation, and is pruned.
  fn make_trees(&self, tree: RuleTree, ancestors: &mut Vec<(String, (usize, usize))>) -> Vec<RuleTree> {
    if Self::subtree_is_complete(&tree) {
      return vec![tree];
    }

    let Some((cons, _)) = tree.into_branch() else {
      return Vec::new();
    };

    let key = (cons.value.symbol.name.clone(), cons.span);
    if ancestors.contains(&key) {
      return Vec::new();
    }
    ancestors.push(key);

    let trees = self
      .extend_out(&cons.value, 0, cons.span.0, cons.span.1)
      .into_iter()
      .flat_map(|children| {
        let child_sets = children
          .into_iter()
          .map(|child| self.make_trees(child, ancestors))
          .collect::<Vec<_>>();
        combinations(&child_sets)
          .into_iter()
          .map(|set| SynTree::Branch(cons.clone(), set))
          .collect::<Vec<_>>()
      })
      .collect::<Vec<_>>();

    ancestors.pop();
    trees
  }

  /// Every complete parse of the input rooted in the start symbol. Empty input has none,
  /// even when the start symbol is nullable.
  pub fn trees(&self, g: &Grammar) -> Vec<RuleTree> {
    if self.is_empty() {
      return Vec::new();
    }

    // roots are start-symbol constituents spanning the whole input
    let root_states = self.columns[0]
      .iter()
      .filter(|state| state.span.1 == self.len() && state.rule.symbol.name == g.start)
      .map(|state| SynTree::Branch(state.into(), Vec::new()));
    let mut ancestors = Vec::new();
    root_states.fold(Vec::<RuleTree>::new(), |mut prev, tree| {
      let mut trees = self.make_trees(tree, &mut ancestors);
      prev.append(&mut trees);
      prev
    })
  }
}

impl From<Chart> for Forest {
  fn from(chart: Chart) -> Self {
    // the new chart will be indexed by origin location. origins never exceed
    // the column they complete in, so the column count carries over
    let (states, words) = chart.into_parts();
    let mut columns = vec![Vec::new(); states.len()];

    for (k, states) in states.into_iter().enumerate() {
      for state in states {
        // exclude unfinished rules that can't contribute to a tree
        if !state.lr0.is_active() {
          columns[state.origin].push(ForestState::new(&state.lr0.rule, state.origin, k));
        }
      }
    }

    Self { columns, words }
  }
}

impl fmt::Display for Forest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (k, column) in self.columns.iter().enumerate() {
      writeln!(f, "Origin {}:", k)?;
      for fs in column.iter() {
        writeln!(f, "  {}", fs)?;
      }
    }

    Ok(())
  }
}
