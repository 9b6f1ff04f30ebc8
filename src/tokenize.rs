use regex::Regex;
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
  // english clitics that treebank-style tokenization splits off the word they attach to
  static ref CLITIC: Regex = Regex::new(r"(?i)^(.+?)(n['’]t|['’](?:s|m|d|ll|re|ve))$").unwrap();
}

/// Splits a trailing clitic off `word`: "holmes's" -> ["holmes", "'s"], "don't" -> ["do", "n't"]
fn split_clitic(word: &str) -> Vec<&str> {
  match CLITIC.captures(word) {
    Some(caps) => match (caps.get(1), caps.get(2)) {
      (Some(stem), Some(clitic)) => vec![stem.as_str(), clitic.as_str()],
      _ => vec![word],
    },
    None => vec![word],
  }
}

/// Splits a sentence into word tokens, keeping punctuation as separate tokens
pub fn word_tokenize(sentence: &str) -> Vec<&str> {
  sentence
    .split_word_bounds()
    .filter(|s| !s.trim().is_empty())
    .flat_map(split_clitic)
    .collect()
}

/// Converts `sentence` to a list of its words: lowercased, and without any token
/// that does not contain at least one alphabetic character
pub fn preprocess(sentence: &str) -> Vec<String> {
  let tokens = word_tokenize(sentence)
    .into_iter()
    .filter(|token| token.chars().any(char::is_alphabetic))
    .map(str::to_lowercase)
    .collect::<Vec<_>>();
  trace!(?tokens, "preprocessed sentence");
  tokens
}
