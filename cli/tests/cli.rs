use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn sentence_file(text: &str) -> NamedTempFile {
  let mut file = NamedTempFile::new().unwrap();
  file.write_all(text.as_bytes()).unwrap();
  file
}

#[test]
fn draws_tree_and_chunks_from_file() {
  let input = sentence_file("Holmes sat.\n");
  let expected = [
    "     S",
    "   __|___",
    "  |      |",
    "  NP     VP",
    "  |      |",
    "  |      |",
    "  N      V",
    "  |      |",
    "  |      |",
    "holmes  sat",
    "Noun Phrase Chunks",
    "holmes",
    "",
  ]
  .join("\n");

  let mut cmd = cargo_bin_cmd!("npchunk");
  cmd.arg(input.path());
  cmd.assert().success().stdout(expected);
}

#[test]
fn prompts_when_no_file_given() {
  let mut cmd = cargo_bin_cmd!("npchunk");
  cmd.arg("--bracketed").write_stdin("Holmes lit a pipe.\n");
  cmd.assert().success().stdout(
    predicate::str::starts_with("Sentence: ")
      .and(predicate::str::contains("(S (NP (N holmes)) (VP (V lit) (NP (Det a) (NP (N pipe)))))"))
      .and(predicate::str::contains("Noun Phrase Chunks\nholmes\npipe\n")),
  );
}

#[test]
fn bracketed_output() {
  let input = sentence_file("Holmes sat.");
  let mut cmd = cargo_bin_cmd!("npchunk");
  cmd.arg(input.path()).arg("-b");
  cmd
    .assert()
    .success()
    .stdout("(S (NP (N holmes)) (VP (V sat)))\nNoun Phrase Chunks\nholmes\n");
}

#[test]
fn reports_uncovered_words() {
  let input = sentence_file("Holmes sat quickly.");
  let mut cmd = cargo_bin_cmd!("npchunk");
  cmd.arg(input.path());
  cmd
    .assert()
    .success()
    .stdout("Grammar does not cover some of the input words: 'quickly'.\n");
}

#[test]
fn reports_unparseable_sentence() {
  let input = sentence_file("Sat holmes the.");
  let mut cmd = cargo_bin_cmd!("npchunk");
  cmd.arg(input.path());
  cmd.assert().success().stdout("Could not parse sentence.\n");
}

#[test]
fn prints_chart() {
  let input = sentence_file("Holmes sat.");
  let mut cmd = cargo_bin_cmd!("npchunk");
  cmd.arg(input.path()).arg("--chart").arg("--bracketed");
  cmd.assert().success().stdout(
    predicate::str::starts_with("chart:\nState 0:\n")
      .and(predicate::str::contains("0..2: S → NP VP ・"))
      .and(predicate::str::contains("(S (NP (N holmes)) (VP (V sat)))")),
  );
}

#[test]
fn custom_grammar_and_label() {
  let grammar = sentence_file(
    r#"
    # tiny grammar
    S -> NP V
    NP -> Det N | N
    Det -> "the"
    N -> "cat" | "dogs"
    V -> "sleeps" | "bark"
    "#,
  );
  let input = sentence_file("The cat sleeps.");

  let mut cmd = cargo_bin_cmd!("npchunk");
  cmd
    .arg(input.path())
    .arg("--grammar")
    .arg(grammar.path())
    .arg("--label")
    .arg("N")
    .arg("-b");
  cmd
    .assert()
    .success()
    .stdout("(S (NP (Det the) (N cat)) (V sleeps))\nNoun Phrase Chunks\ncat\n");
}

#[test]
fn missing_sentence_file_fails() {
  let mut cmd = cargo_bin_cmd!("npchunk");
  cmd.arg("/definitely/not/a/sentence.txt");
  cmd
    .assert()
    .failure()
    .stderr(predicate::str::contains("error:"));
}

#[test]
fn malformed_grammar_fails() {
  let grammar = sentence_file("S -> NP\nNP \"x\"\n");
  let input = sentence_file("x");

  let mut cmd = cargo_bin_cmd!("npchunk");
  cmd.arg(input.path()).arg("-g").arg(grammar.path());
  cmd
    .assert()
    .failure()
    .stderr(predicate::str::contains("grammar syntax error on line 2"));
}

#[test]
fn punctuation_only_input_has_no_parse() {
  let grammar = sentence_file("S -> | \"x\"\n");
  let input = sentence_file("!!");

  let mut cmd = cargo_bin_cmd!("npchunk");
  cmd.arg(input.path()).arg("--grammar").arg(grammar.path());
  cmd.assert().success().stdout("Could not parse sentence.\n");
}
