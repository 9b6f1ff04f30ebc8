use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use tracing::warn;

use crate::rules::{Production, Rule};
use crate::utils::{Error, Result};

/// Grammar source for the built-in sentence grammar
pub const BUILTIN_GRAMMAR: &str = include_str!("../grammars/sentences.cfg");

#[derive(Debug)]
pub struct Grammar {
  pub start: String,
  pub rules: HashMap<String, Vec<Rc<Rule>>>,
  /// Left-hand sides in order of first appearance
  order: Vec<String>,
  nullables: HashSet<String>,
  terminals: HashSet<String>,
}

impl fmt::Display for Grammar {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "# start: {}", self.start)?;
    if !self.nullables.is_empty() {
      let mut nullables = self.nullables.iter().map(String::as_str).collect::<Vec<_>>();
      nullables.sort_unstable();
      writeln!(f, "# nullables: {}", nullables.join(" "))?;
    }

    for symbol in self.order.iter() {
      for rule in self.rules_for(symbol) {
        writeln!(f, "{}", rule)?;
      }
    }

    Ok(())
  }
}

impl Grammar {
  /// Builds a grammar from a non-empty list of rules. The first rule's symbol is the start symbol.
  pub(crate) fn new(rules: Vec<Rule>) -> Self {
    let start = rules[0].symbol.name.clone();

    let mut order = Vec::new();
    let mut by_symbol: HashMap<String, Vec<Rc<Rule>>> = HashMap::new();
    for rule in rules.into_iter() {
      let entry = by_symbol.entry(rule.symbol.name.clone()).or_insert_with(|| {
        order.push(rule.symbol.name.clone());
        Vec::new()
      });
      entry.push(Rc::new(rule));
    }

    let terminals = by_symbol
      .values()
      .flatten()
      .flat_map(|r| r.productions.iter())
      .filter(|p| p.is_terminal())
      .map(|p| p.symbol_str().to_string())
      .collect::<HashSet<_>>();

    let nullables = Self::find_nullables(&by_symbol);

    let g = Self {
      start,
      rules: by_symbol,
      order,
      nullables,
      terminals,
    };

    for name in g.undefined_nonterminals() {
      warn!(symbol = %name, "nonterminal is used but has no rules");
    }

    g
  }

  /// The sentence grammar shipped with the crate
  pub fn builtin() -> Self {
    BUILTIN_GRAMMAR
      .parse()
      .unwrap_or_else(|e| panic!("built-in grammar is malformed: {}", e))
  }

  pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
    fs::read_to_string(path)?.parse()
  }

  fn rule_is_nullable(nullables: &HashSet<String>, rule: &Rule) -> bool {
    rule.is_empty()
      || rule.productions.iter().all(|p| match p {
        Production::Nonterminal(s) => nullables.contains(&s.name),
        Production::Terminal(_) => false,
      })
  }

  fn find_nullables(rules: &HashMap<String, Vec<Rc<Rule>>>) -> HashSet<String> {
    let mut nullables: HashSet<String> = HashSet::new();

    let mut last_length = 1;
    while last_length != nullables.len() {
      last_length = nullables.len();
      for r in rules.values().flatten() {
        if !nullables.contains(&r.symbol.name) && Self::rule_is_nullable(&nullables, r) {
          nullables.insert(r.symbol.name.clone());
        }
      }
    }

    nullables
  }

  pub fn is_nullable(&self, s: &str) -> bool {
    self.nullables.contains(s)
  }

  /// All alternatives for `symbol`, in source order. Empty for unknown symbols.
  pub fn rules_for(&self, symbol: &str) -> impl Iterator<Item = &Rc<Rule>> {
    self.rules.get(symbol).into_iter().flatten()
  }

  /// Left-hand side symbols in order of first appearance
  pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
    self.order.iter().map(String::as_str)
  }

  /// Nonterminals that appear on some right-hand side but have no rules
  pub fn undefined_nonterminals(&self) -> Vec<&str> {
    let mut seen = HashSet::new();
    self
      .order
      .iter()
      .flat_map(|s| self.rules_for(s))
      .flat_map(|r| r.productions.iter())
      .filter_map(|p| match p {
        Production::Nonterminal(s) if !self.rules.contains_key(&s.name) => Some(s.name.as_str()),
        _ => None,
      })
      .filter(|name| seen.insert(*name))
      .collect()
  }

  /// True if `word` appears as a terminal somewhere in the grammar
  pub fn covers(&self, word: &str) -> bool {
    self.terminals.contains(word)
  }

  /// Fails with every word the lexicon lacks, each listed once in input order
  pub fn check_coverage(&self, input: &[&str]) -> Result<()> {
    let mut missing: Vec<String> = Vec::new();
    for word in input.iter().filter(|w| !self.covers(w)) {
      if !missing.iter().any(|m| m == word) {
        missing.push(word.to_string());
      }
    }

    if missing.is_empty() {
      Ok(())
    } else {
      Err(Error::UncoveredWords(missing))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builtin_grammar() {
    let g = Grammar::builtin();
    assert_eq!(g.start, "S");
    assert_eq!(g.rules_for("S").count(), 5);
    assert_eq!(g.rules_for("NP").count(), 6);
    assert_eq!(g.rules_for("N").count(), 20);
    assert_eq!(g.rules_for("V").count(), 10);
    assert!(g.covers("holmes"));
    assert!(g.covers("enigmatical"));
    assert!(!g.covers("Holmes"));
    assert!(g.undefined_nonterminals().is_empty());
    assert!(!g.is_nullable("S"));
  }

  #[test]
  fn test_nullables() {
    let g: Grammar = r#"
      S -> A B "x"
      A -> | "a"
      B -> A A
      C -> "c"
    "#
    .parse()
    .unwrap();

    assert!(g.is_nullable("A"));
    assert!(g.is_nullable("B"));
    assert!(!g.is_nullable("S"));
    assert!(!g.is_nullable("C"));
  }

  #[test]
  fn test_check_coverage() {
    let g = Grammar::builtin();
    assert!(g.check_coverage(&["holmes", "sat"]).is_ok());

    match g.check_coverage(&["holmes", "quickly", "sat", "quickly", "away"]) {
      Err(Error::UncoveredWords(words)) => assert_eq!(words, vec!["quickly", "away"]),
      other => panic!("expected uncovered words, got {:?}", other),
    }
  }

  #[test]
  fn test_undefined_nonterminals() {
    let g: Grammar = "S -> NP VP\nNP -> \"a\" | Det NP\n".parse().unwrap();
    assert_eq!(g.undefined_nonterminals(), vec!["VP", "Det"]);
  }

  #[test]
  fn test_display_reparses() {
    let g = Grammar::builtin();
    let printed = g.to_string();
    assert!(printed.starts_with("# start: S\nS -> NP VP\n"));

    let reparsed: Grammar = printed.parse().unwrap();
    assert_eq!(reparsed.start, g.start);
    for symbol in g.nonterminals() {
      let original = g.rules_for(symbol).collect::<Vec<_>>();
      let again = reparsed.rules_for(symbol).collect::<Vec<_>>();
      assert_eq!(original, again, "rules for {} differ", symbol);
    }
  }

  #[test]
  fn test_read_missing_file() {
    assert!(matches!(
      Grammar::read_from_file("/definitely/not/here.cfg"),
      Err(Error::Io(_))
    ));
  }
}
