use std::fmt;
use std::rc::Rc;

use crate::grammar::Grammar;
use crate::rules::{Production, Rule};

#[derive(Debug, Clone, PartialEq)]
pub struct LR0 {
  pub rule: Rc<Rule>,
  pub pos: usize,
}

impl LR0 {
  pub fn new(rule: &Rc<Rule>) -> Self {
    Self {
      rule: rule.clone(),
      pos: 0,
    }
  }

  pub fn is_active(&self) -> bool {
    self.pos < self.rule.len()
  }

  pub fn advance(&self) -> Self {
    assert!(self.is_active());
    Self {
      rule: self.rule.clone(),
      pos: self.pos + 1,
    }
  }

  pub fn next_production(&self) -> Option<&Production> {
    self.rule.productions.get(self.pos)
  }
}

impl fmt::Display for LR0 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} →", self.rule.symbol)?;
    for idx in 0..self.rule.len() {
      if idx == self.pos {
        write!(f, " ・")?;
      }
      write!(f, " {}", self.rule.productions[idx])?;
    }
    if !self.is_active() {
      write!(f, " ・")?;
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
  pub lr0: LR0,
  pub origin: usize,
}

impl State {
  pub fn new(lr0: LR0, origin: usize) -> Self {
    Self { lr0, origin }
  }

  pub fn advance(&self) -> Self {
    Self::new(self.lr0.advance(), self.origin)
  }
}

/// Earley chart: one column of states per input position, plus the input itself
#[derive(Debug)]
pub struct Chart {
  columns: Vec<Vec<State>>,
  words: Vec<String>,
}

impl Chart {
  pub fn new(input: &[&str]) -> Self {
    Self {
      columns: vec![Vec::new(); input.len() + 1],
      words: input.iter().map(|w| w.to_string()).collect(),
    }
  }

  pub fn len(&self) -> usize {
    self.columns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn len_at(&self, k: usize) -> usize {
    self.columns[k].len()
  }

  /// Total number of states over all columns
  pub fn state_count(&self) -> usize {
    self.columns.iter().map(Vec::len).sum()
  }

  pub fn has(&self, k: usize, state: &State) -> bool {
    self.columns[k].contains(state)
  }

  pub fn add(&mut self, k: usize, state: State) {
    if !self.has(k, &state) {
      self.columns[k].push(state);
    }
  }

  /// Clones the state out, so the caller can add to the chart while holding it
  fn get_state(&self, k: usize, idx: usize) -> State {
    self.columns[k][idx].clone()
  }

  /// Splits the chart into its columns and its input words
  pub fn into_parts(self) -> (Vec<Vec<State>>, Vec<String>) {
    (self.columns, self.words)
  }
}

impl IntoIterator for Chart {
  type Item = (usize, Vec<State>);
  type IntoIter = std::iter::Enumerate<std::vec::IntoIter<Vec<State>>>;

  fn into_iter(self) -> Self::IntoIter {
    self.columns.into_iter().enumerate()
  }
}

impl fmt::Display for Chart {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for k in 0..self.len() {
      writeln!(f, "State {}:", k)?;
      for state in self.columns[k].iter() {
        writeln!(f, "  {}..{}: {}", state.origin, k, state.lr0)?;
      }
    }
    Ok(())
  }
}

pub fn parse_chart(g: &Grammar, input: &[&str]) -> Chart {
  let mut chart = Chart::new(input);

  for rule in g.rules_for(&g.start) {
    chart.add(0, State::new(LR0::new(rule), 0));
  }

  for k in 0..chart.len() {
    // column k grows while it is processed
    let mut idx = 0;
    while idx < chart.len_at(k) {
      let state = chart.get_state(k, idx);
      idx += 1;

      match state.lr0.next_production() {
        None => completer(&mut chart, k, &state),
        Some(Production::Nonterminal(symbol)) => predictor(g, &mut chart, k, &state, &symbol.name),
        Some(Production::Terminal(word)) => scanner(&mut chart, k, &state, word, input),
      };
    }
  }

  chart
}

fn completer(chart: &mut Chart, k: usize, state: &State) {
  assert!(!state.lr0.is_active(), "tried to complete active state");

  // advance every state at the origin column whose dot sits before this symbol
  for idx in 0..chart.len_at(state.origin) {
    let other = chart.get_state(state.origin, idx);

    if let Some(np) = other.lr0.next_production() {
      if np.is_nonterminal_named(state.lr0.rule.symbol_str()) {
        chart.add(k, other.advance())
      }
    }
  }
}

fn predictor(g: &Grammar, chart: &mut Chart, k: usize, state: &State, needed_symbol: &str) {
  assert!(state.lr0.is_active(), "tried to predict non-active state");

  // every rule for the needed symbol may start here. undefined symbols predict nothing
  for wanted_rule in g.rules_for(needed_symbol) {
    chart.add(k, State::new(LR0::new(wanted_rule), k));
  }

  if g.is_nullable(needed_symbol) {
    // step over a symbol that derives the empty string. its empty completion at k may
    // already have been processed, so the completer would never see `state`
    chart.add(k, state.advance());
  }
}

fn scanner(chart: &mut Chart, k: usize, state: &State, needed_word: &str, input: &[&str]) {
  assert!(state.lr0.is_active(), "tried to scan non-active state");

  if k < input.len() && input[k] == needed_word {
    // the word matches, so the state moves on to column k + 1
    chart.add(k + 1, state.advance());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn completed_spans(chart: Chart, symbol: &str) -> Vec<(usize, usize)> {
    chart
      .into_iter()
      .flat_map(|(k, states)| {
        states
          .into_iter()
          .filter(|s| !s.lr0.is_active() && s.lr0.rule.symbol_str() == symbol)
          .map(move |s| (s.origin, k))
      })
      .collect()
  }

  #[test]
  fn test_recognizes_simple_sentence() {
    let g = Grammar::builtin();
    let chart = parse_chart(&g, &["holmes", "sat"]);
    assert_eq!(chart.len(), 3);
    assert!(completed_spans(chart, "S").contains(&(0, 2)));
  }

  #[test]
  fn test_rejects_bad_order() {
    let g = Grammar::builtin();
    let chart = parse_chart(&g, &["sat", "the"]);
    assert!(!completed_spans(chart, "S").contains(&(0, 2)));
  }

  #[test]
  fn test_terminal_named_like_nonterminal() {
    // the quoted "A" must not be advanced over by a completed A
    let g: Grammar = r#"
      S -> "A" "b"
      A -> "b"
    "#
    .parse()
    .unwrap();

    let chart = parse_chart(&g, &["b", "b"]);
    assert!(completed_spans(chart, "S").is_empty());

    let chart = parse_chart(&g, &["A", "b"]);
    assert_eq!(completed_spans(chart, "S"), vec![(0, 2)]);
  }

  #[test]
  fn test_undefined_nonterminal_predicts_nothing() {
    let g: Grammar = "S -> Missing | \"x\"\n".parse().unwrap();
    let chart = parse_chart(&g, &["x"]);
    assert_eq!(completed_spans(chart, "S"), vec![(0, 1)]);
  }

  #[test]
  fn test_nullable_prefix() {
    let g: Grammar = r#"
      S -> Opt "x"
      Opt -> | "maybe"
    "#
    .parse()
    .unwrap();

    assert!(completed_spans(parse_chart(&g, &["x"]), "S").contains(&(0, 1)));
    assert!(completed_spans(parse_chart(&g, &["maybe", "x"]), "S").contains(&(0, 2)));
  }

  #[test]
  fn test_chart_display() {
    let g: Grammar = "S -> \"x\"\n".parse().unwrap();
    let chart = parse_chart(&g, &["x"]);
    assert_eq!(chart.state_count(), 2);
    assert_eq!(
      chart.to_string(),
      "State 0:\n  0..0: S → ・ \"x\"\nState 1:\n  0..1: S → \"x\" ・\n"
    );
  }
}
