//! ASCII drawings of parse trees.
//!
//! Parents sit centred over their children and are joined to them by a bar:
//!
//! ```text
//!      S
//!    __|___
//!   |      |
//!   NP     VP
//!   |      |
//!   |      |
//!   N      V
//!   |      |
//!   |      |
//! holmes  sat
//! ```
//!
//! Every level takes three lines (label, bar, drop), and all words share the bottom line.

use std::fmt;

use crate::syntree::SynTree;

/// Columns between neighbouring subtrees
const GAP: usize = 2;

/// Lines per tree level
const LEVEL: usize = 3;

/// A subtree measured for drawing. Columns are relative to the subtree's left edge.
struct Layout {
  label: String,
  width: usize,
  center: usize,
  children: Vec<(usize, Layout)>,
  leaf: bool,
}

fn label_len(label: &str) -> usize {
  label.chars().count().max(1)
}

/// Columns a label extends to the left of its center
fn half(label: &str) -> usize {
  (label_len(label) - 1) / 2
}

impl Layout {
  fn new<T, U>(tree: &SynTree<T, U>) -> Self
  where
    T: fmt::Display,
    U: fmt::Display,
  {
    match tree {
      SynTree::Leaf(w) => {
        let label = w.value.to_string();
        Self {
          width: label_len(&label),
          center: half(&label),
          label,
          children: Vec::new(),
          leaf: true,
        }
      }
      SynTree::Branch(c, subtrees) => {
        let label = c.value.to_string();

        let mut children = Vec::with_capacity(subtrees.len());
        let mut x = 0;
        for subtree in subtrees.iter() {
          let child = Self::new(subtree);
          let width = child.width;
          children.push((x, child));
          x += width + GAP;
        }
        let children_width = x.saturating_sub(GAP);

        let mut center = match (children.first(), children.last()) {
          (Some((first_off, first)), Some((last_off, last))) => {
            (first_off + first.center + last_off + last.center) / 2
          }
          _ => half(&label),
        };

        // a label wider than the children's midpoint allows pushes them right
        let shift = half(&label).saturating_sub(center);
        if shift > 0 {
          for (offset, _) in children.iter_mut() {
            *offset += shift;
          }
          center += shift;
        }

        let label_end = center - half(&label) + label_len(&label);
        Self {
          width: (children_width + shift).max(label_end),
          center,
          label,
          children,
          leaf: false,
        }
      }
    }
  }

  fn draw(&self, canvas: &mut Canvas, origin: usize, depth: usize, bottom: usize) {
    let center = origin + self.center;
    let start = center - half(&self.label);

    if self.leaf {
      canvas.text(bottom, start, &self.label);
      return;
    }

    let row = depth * LEVEL;
    canvas.text(row, start, &self.label);

    let centers = self
      .children
      .iter()
      .map(|(offset, child)| origin + offset + child.center)
      .collect::<Vec<_>>();
    let (Some(&first), Some(&last)) = (centers.first(), centers.last()) else {
      return;
    };

    for col in first + 1..last {
      canvas.put(row + 1, col, '_');
    }
    canvas.put(row + 1, center, '|');

    for (&col, (offset, child)) in centers.iter().zip(self.children.iter()) {
      canvas.put(row + 2, col, '|');
      if child.leaf {
        // words all sit on the bottom line
        for r in row + LEVEL..bottom {
          canvas.put(r, col, '|');
        }
      }
      child.draw(canvas, origin + offset, depth + 1, bottom);
    }
  }
}

struct Canvas {
  rows: Vec<Vec<char>>,
}

impl Canvas {
  fn new(height: usize) -> Self {
    Self {
      rows: vec![Vec::new(); height],
    }
  }

  fn put(&mut self, row: usize, col: usize, ch: char) {
    let line = &mut self.rows[row];
    if col >= line.len() {
      line.resize(col + 1, ' ');
    }
    line[col] = ch;
  }

  fn text(&mut self, row: usize, start: usize, s: &str) {
    for (i, ch) in s.chars().enumerate() {
      self.put(row, start + i, ch);
    }
  }
}

impl fmt::Display for Canvas {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for line in self.rows.iter() {
      let line = line.iter().collect::<String>();
      writeln!(f, "{}", line.trim_end())?;
    }
    Ok(())
  }
}

/// Draws `tree` as ASCII art, one line per row, ending with a newline
pub fn pretty<T, U>(tree: &SynTree<T, U>) -> String
where
  T: fmt::Display,
  U: fmt::Display,
{
  let layout = Layout::new(tree);
  let bottom = tree.height() * LEVEL;
  let mut canvas = Canvas::new(bottom + 1);
  layout.draw(&mut canvas, 0, 0, bottom);
  canvas.to_string()
}
