use std::io;

use thiserror::Error;

/// Errors produced while loading a grammar or parsing a sentence
#[derive(Error, Debug)]
pub enum Error {
  #[error(transparent)]
  Io(#[from] io::Error),
  #[error("grammar syntax error on line {line}: {message}")]
  Syntax { line: usize, message: String },
  #[error("empty ruleset")]
  EmptyGrammar,
  #[error("Grammar does not cover some of the input words: {}.", quote_list(.0))]
  UncoveredWords(Vec<String>),
}

pub type Result<T> = std::result::Result<T, Error>;

fn quote_list(words: &[String]) -> String {
  words
    .iter()
    .map(|w| format!("'{}'", w))
    .collect::<Vec<_>>()
    .join(", ")
}

/// Takes a list where each element is a set of choices, and returns all the possible sets
/// generated. Will clone the elements.
///
/// ```
/// let v = vec![
///   vec![1],
///   vec![2, 3],
///   vec![4],
///   vec![5, 6, 7],
/// ];
///
/// assert_eq!(npchunk::utils::combinations(&v), vec![
///   vec![1, 2, 4, 5],
///   vec![1, 3, 4, 5],
///   vec![1, 2, 4, 6],
///   vec![1, 3, 4, 6],
///   vec![1, 2, 4, 7],
///   vec![1, 3, 4, 7],
/// ]);
/// ```
pub fn combinations<T>(list: &[Vec<T>]) -> Vec<Vec<T>>
where
  T: Clone,
{
  if list.is_empty() {
    Vec::new()
  } else if list.len() == 1 {
    list[0].iter().map(|e| vec![e.clone()]).collect()
  } else {
    let (head, tail) = list.split_at(1);
    let head = &head[0];

    combinations(tail)
      .into_iter()
      .flat_map(|subseq| {
        // prepend every element of the head to every possible subseq
        head.iter().map(move |v| {
          let mut newseq = subseq.clone();
          newseq.insert(0, v.clone());
          newseq
        })
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_uncovered_words_message() {
    let err = Error::UncoveredWords(vec!["quickly".to_string(), "cat".to_string()]);
    assert_eq!(
      err.to_string(),
      "Grammar does not cover some of the input words: 'quickly', 'cat'."
    );
  }

  #[test]
  fn test_combinations_with_empty_choice() {
    let v: Vec<Vec<u8>> = vec![vec![1, 2], vec![]];
    assert!(combinations(&v).is_empty());
  }
}
