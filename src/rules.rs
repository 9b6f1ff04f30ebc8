use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
  pub name: String,
}

impl Symbol {
  pub fn new(name: String) -> Self {
    Self { name }
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Production {
  Terminal(String),
  Nonterminal(Symbol),
}

impl Production {
  pub fn symbol_str(&self) -> &str {
    match self {
      Self::Terminal(s) => s,
      Self::Nonterminal(s) => &s.name,
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::Terminal(_))
  }

  pub fn is_nonterminal(&self) -> bool {
    matches!(self, Self::Nonterminal(_))
  }

  /// True if this is the nonterminal `name`. Terminals never match, even when spelled the same.
  pub fn is_nonterminal_named(&self, name: &str) -> bool {
    match self {
      Self::Nonterminal(s) => s.name == name,
      Self::Terminal(_) => false,
    }
  }
}

impl fmt::Display for Production {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Terminal(s) if s.contains('"') => write!(f, "'{}'", s),
      Self::Terminal(s) => write!(f, "\"{}\"", s),
      Self::Nonterminal(s) => write!(f, "{}", s),
    }
  }
}

/// One alternative of a rule group: `symbol -> productions...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
  pub symbol: Symbol,
  pub productions: Vec<Production>,
}

impl Rule {
  pub fn new(symbol: Symbol, productions: Vec<Production>) -> Self {
    Self {
      symbol,
      productions,
    }
  }

  pub fn len(&self) -> usize {
    self.productions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn symbol_str(&self) -> &str {
    &self.symbol.name
  }
}

impl fmt::Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ->", self.symbol)?;
    for p in self.productions.iter() {
      write!(f, " {}", p)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display_quotes_terminals() {
    let rule = Rule::new(
      Symbol::new("NP".to_string()),
      vec![
        Production::Nonterminal(Symbol::new("Det".to_string())),
        Production::Terminal("pipe".to_string()),
      ],
    );
    assert_eq!(rule.to_string(), r#"NP -> Det "pipe""#);

    let empty = Rule::new(Symbol::new("E".to_string()), Vec::new());
    assert!(empty.is_empty());
    assert_eq!(empty.to_string(), "E ->");
  }

  #[test]
  fn test_terminal_never_matches_nonterminal_name() {
    let t = Production::Terminal("NP".to_string());
    let nt = Production::Nonterminal(Symbol::new("NP".to_string()));
    assert!(!t.is_nonterminal_named("NP"));
    assert!(nt.is_nonterminal_named("NP"));
  }
}
