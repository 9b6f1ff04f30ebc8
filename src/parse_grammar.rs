//! Simple recursive-descent parsing of grammar files
//!
//! The format is the usual CFG notation, one rule group per line:
//!
//! ```text
//! # comment
//! NP -> Det N | N
//! N -> "holmes" | 'pipe'
//! ```
use regex::Regex;
use std::str::FromStr;

use crate::grammar::Grammar;
use crate::rules::{Production, Rule, Symbol};
use crate::utils::Error;

impl FromStr for Grammar {
  type Err = Error;

  /// Parses a grammar from a string. Assumes the first rule's symbol
  /// is the start symbol.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let rules = parse_rules(s)?;

    if rules.is_empty() {
      Err(Error::EmptyGrammar)
    } else {
      Ok(Self::new(rules))
    }
  }
}

/// A parse failure, remembering where in the input it happened
struct Failure<'a> {
  message: String,
  rest: &'a str,
}

impl<'a> Failure<'a> {
  fn new(message: impl Into<String>, rest: &'a str) -> Self {
    Self {
      message: message.into(),
      rest,
    }
  }

  fn context(self, what: &str) -> Self {
    Self {
      message: format!("{}: {}", what, self.message),
      rest: self.rest,
    }
  }
}

type Infallible<'a, T> = (T, &'a str);
type ParseResult<'a, T> = Result<(T, &'a str), Failure<'a>>;

/// helper macro for initializing a regex with lazy_static!
macro_rules! regex_static {
  ($name:ident, $pattern:expr) => {
    lazy_static! {
      static ref $name: Regex = Regex::new($pattern).unwrap();
    }
  };
}

/// Try to consume a regex, returning None if it doesn't match.
/// Patterns are expected to be anchored with `^`.
fn optional_re<'a>(re: &'static Regex, s: &'a str) -> Infallible<'a, Option<&'a str>> {
  match re.find(s) {
    Some(m) if m.start() == 0 => {
      let (_, rest) = s.split_at(m.end());
      (Some(m.as_str()), rest)
    }
    _ => (None, s),
  }
}

/// Try to consume a regex, failing if it doesn't match
fn needed_re<'a>(re: &'static Regex, what: &str, s: &'a str) -> ParseResult<'a, &'a str> {
  if let (Some(c), rest) = optional_re(re, s) {
    Ok((c, rest))
  } else {
    Err(Failure::new(format!("expected {} at {:?}", what, snippet(s)), s))
  }
}

/// Try to consume a char, returning None if it doesn't match
fn optional_char(c: char, s: &str) -> Infallible<'_, Option<char>> {
  match s.strip_prefix(c) {
    Some(rest) => (Some(c), rest),
    None => (None, s),
  }
}

/// The rest of the current line, for error messages
fn snippet(s: &str) -> &str {
  s.lines().next().unwrap_or("")
}

/// Skips spaces and tabs, but not newlines
fn skip_blanks(s: &str) -> &str {
  regex_static!(BLANKS, r"^[ \t\r]+");
  optional_re(&BLANKS, s).1
}

/// Skips any run of whitespace, newlines and `#` comments
fn skip_lines(s: &str) -> &str {
  regex_static!(WHITESPACE_OR_COMMENT, r"^(?:\s|#[^\n]*)+");
  optional_re(&WHITESPACE_OR_COMMENT, s).1
}

/// True at the end of a rule line: a newline, a comment, or the end of input
fn at_line_end(s: &str) -> bool {
  s.is_empty() || s.starts_with('\n') || s.starts_with('#')
}

/// Tries to parse a nonterminal name
fn parse_name(s: &str) -> ParseResult<'_, &str> {
  regex_static!(NAME, r"^[\w/][\w/^<>\-]*");
  needed_re(&NAME, "symbol name", s)
}

/// Parses a quoted terminal, with either quote style
fn parse_terminal(s: &str) -> ParseResult<'_, String> {
  regex_static!(DOUBLE_QUOTED, r#"^"([^"\n]*)""#);
  regex_static!(SINGLE_QUOTED, r"^'([^'\n]*)'");

  for re in [&*DOUBLE_QUOTED, &*SINGLE_QUOTED] {
    if let Some(caps) = re.captures(s) {
      let whole = caps.get(0).map_or(0, |m| m.end());
      let word = caps.get(1).map_or("", |m| m.as_str());
      return Ok((word.to_string(), &s[whole..]));
    }
  }

  Err(Failure::new(format!("unterminated terminal at {:?}", snippet(s)), s))
}

fn parse_production(s: &str) -> ParseResult<'_, Production> {
  if s.starts_with('"') || s.starts_with('\'') {
    let (word, s) = parse_terminal(s)?;
    Ok((Production::Terminal(word), s))
  } else {
    let (name, s) = parse_name(s).map_err(|e| e.context("production"))?;
    Ok((Production::Nonterminal(Symbol::new(name.to_string())), s))
  }
}

/// Symbol, arrow, `|`-separated alternatives, terminated by the end of the line.
/// Yields one rule per alternative.
fn parse_rule_group(s: &str) -> ParseResult<'_, Vec<Rule>> {
  regex_static!(ARROW, r"^->");

  let (name, s) = parse_name(s).map_err(|e| e.context("rule symbol"))?;
  let symbol = Symbol::new(name.to_string());
  let s = skip_blanks(s);
  let (_, s) = needed_re(&ARROW, "->", s).map_err(|e| e.context("rule arrow"))?;

  let mut rules = Vec::new();
  let mut productions = Vec::new();
  let mut rem = s;
  loop {
    rem = skip_blanks(rem);
    if at_line_end(rem) {
      rules.push(Rule::new(symbol, productions));
      return Ok((rules, rem));
    }
    if let (Some(_), s) = optional_char('|', rem) {
      rules.push(Rule::new(symbol.clone(), std::mem::take(&mut productions)));
      rem = s;
      continue;
    }
    let (prod, s) = parse_production(rem).map_err(|e| e.context(&format!("rule {}", name)))?;
    productions.push(prod);
    rem = s;
  }
}

/// 1-based line number of the position where `rest` starts inside `src`
fn line_of(src: &str, rest: &str) -> usize {
  let offset = src.len().saturating_sub(rest.len());
  src[..offset].matches('\n').count() + 1
}

pub(crate) fn parse_rules(src: &str) -> Result<Vec<Rule>, Error> {
  let mut rules = Vec::new();
  let mut rem = src;
  loop {
    rem = skip_lines(rem);
    if rem.is_empty() {
      return Ok(rules);
    }
    match parse_rule_group(rem) {
      Ok((mut group, s)) => {
        rules.append(&mut group);
        rem = s;
      }
      Err(failure) => {
        return Err(Error::Syntax {
          line: line_of(src, failure.rest),
          message: failure.message,
        });
      }
    }
  }
}
