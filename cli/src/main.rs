use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use npchunk::{Grammar, NOUN_PHRASE, analyze, pretty};

/// Boxed static error type
type Err = Box<dyn Error + 'static>;

/// Parse a sentence with a context-free grammar and print its noun phrase chunks
#[derive(Parser, Debug)]
#[command(name = "npchunk", version, about)]
struct Args {
  /// File holding the sentence. Prompts for one when omitted
  file: Option<PathBuf>,

  /// Grammar file to use in place of the built-in sentence grammar
  #[arg(short, long)]
  grammar: Option<PathBuf>,

  /// Label of the constituents to report as chunks
  #[arg(short, long, default_value = NOUN_PHRASE)]
  label: String,

  /// Print the parse chart before the trees
  #[arg(short, long)]
  chart: bool,

  /// Print trees in bracketed notation instead of drawing them
  #[arg(short, long)]
  bracketed: bool,
}

fn read_sentence(file: Option<&PathBuf>) -> Result<String, Err> {
  if let Some(path) = file {
    return Ok(fs::read_to_string(path)?);
  }

  print!("Sentence: ");
  io::stdout().flush()?;

  let mut input = String::new();
  io::stdin().lock().read_line(&mut input)?;
  Ok(input)
}

fn run(opts: &Args) -> Result<(), Err> {
  let g = match &opts.grammar {
    Some(path) => Grammar::read_from_file(path)?,
    None => Grammar::builtin(),
  };
  debug!(start = %g.start, "grammar loaded");

  let sentence = read_sentence(opts.file.as_ref())?;

  let parsed = match analyze(&g, &sentence, &opts.label) {
    Ok(parsed) => parsed,
    Err(e @ npchunk::Error::UncoveredWords(_)) => {
      println!("{}", e);
      return Ok(());
    }
    Err(e) => return Err(e.into()),
  };

  if opts.chart {
    let words = parsed.tokens.iter().map(String::as_str).collect::<Vec<_>>();
    println!("chart:\n{}", g.parse_chart(&words));
  }

  if parsed.trees.is_empty() {
    println!("Could not parse sentence.");
    return Ok(());
  }

  for t in parsed.trees.iter() {
    if opts.bracketed {
      println!("{}", t.tree);
    } else {
      print!("{}", pretty(&t.tree));
    }

    println!("Noun Phrase Chunks");
    for chunk in t.chunks.iter() {
      println!("{}", chunk);
    }
  }

  Ok(())
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(io::stderr)
    .init();

  let opts = Args::parse();
  if let Err(e) = run(&opts) {
    eprintln!("error: {}", e);
    process::exit(1);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn test_args_are_consistent() {
    Args::command().debug_assert();
  }

  #[test]
  fn test_defaults() {
    let opts = Args::parse_from(["npchunk"]);
    assert!(opts.file.is_none());
    assert!(opts.grammar.is_none());
    assert_eq!(opts.label, "NP");
    assert!(!opts.chart);
    assert!(!opts.bracketed);
  }

  #[test]
  fn test_flags() {
    let opts = Args::parse_from(["npchunk", "s.txt", "-g", "g.cfg", "--label", "VP", "-c", "-b"]);
    assert_eq!(opts.file, Some(PathBuf::from("s.txt")));
    assert_eq!(opts.grammar, Some(PathBuf::from("g.cfg")));
    assert_eq!(opts.label, "VP");
    assert!(opts.chart);
    assert!(opts.bracketed);
  }
}
