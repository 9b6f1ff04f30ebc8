use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub struct Constituent<T> {
  pub value: T,
  pub span: (usize, usize),
}

impl<T> fmt::Display for Constituent<T>
where
  T: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}: {}", self.span.0, self.span.1, self.value)
  }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Word<U> {
  pub value: U,
  pub span: (usize, usize),
}

impl<U> fmt::Display for Word<U>
where
  U: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}: {}", self.span.0, self.span.1, self.value)
  }
}

/// A parse tree. Branches are labelled constituents, leaves are input words,
/// and every node remembers the token span it covers.
#[derive(Debug, PartialEq, Clone)]
pub enum SynTree<T, U> {
  Branch(Constituent<T>, Vec<SynTree<T, U>>),
  Leaf(Word<U>),
}

impl<T, U> SynTree<T, U> {
  pub fn get_branch(&self) -> Option<(&Constituent<T>, &Vec<SynTree<T, U>>)> {
    match self {
      Self::Branch(c, cs) => Some((c, cs)),
      _ => None,
    }
  }

  pub fn into_branch(self) -> Option<(Constituent<T>, Vec<SynTree<T, U>>)> {
    match self {
      Self::Branch(c, cs) => Some((c, cs)),
      _ => None,
    }
  }

  pub fn span(&self) -> (usize, usize) {
    match self {
      Self::Branch(c, _) => c.span,
      Self::Leaf(w) => w.span,
    }
  }

  /// The constituent's label, or None for a leaf
  pub fn label(&self) -> Option<&T> {
    self.get_branch().map(|(c, _)| &c.value)
  }

  pub fn children(&self) -> &[SynTree<T, U>] {
    match self {
      Self::Branch(_, cs) => cs,
      Self::Leaf(_) => &[],
    }
  }

  /// The words under this node, left to right
  pub fn leaves(&self) -> Vec<&U> {
    let mut words = Vec::new();
    self.collect_leaves(&mut words);
    words
  }

  fn collect_leaves<'a>(&'a self, words: &mut Vec<&'a U>) {
    match self {
      Self::Leaf(w) => words.push(&w.value),
      Self::Branch(_, children) => {
        for child in children.iter() {
          child.collect_leaves(words);
        }
      }
    }
  }

  /// Every branch in the tree, in pre-order, starting with `self`
  pub fn subtrees(&self) -> Subtrees<'_, T, U> {
    Subtrees { stack: vec![self] }
  }

  /// Depth of the deepest leaf, counting a lone leaf as 0
  pub fn height(&self) -> usize {
    self.children().iter().map(|c| c.height() + 1).max().unwrap_or(0)
  }

  pub fn map<V, W>(
    &self,
    map_branch: fn(&Constituent<T>) -> V,
    map_leaf: fn(&Word<U>) -> W,
  ) -> SynTree<V, W> {
    match self {
      Self::Branch(t, children) => {
        let children = children
          .iter()
          .map(|c| c.map(map_branch, map_leaf))
          .collect::<Vec<_>>();
        SynTree::Branch(
          Constituent {
            span: t.span,
            value: map_branch(t),
          },
          children,
        )
      }
      Self::Leaf(u) => SynTree::Leaf(Word {
        span: u.span,
        value: map_leaf(u),
      }),
    }
  }
}

impl<T, U> SynTree<T, U>
where
  T: PartialEq,
{
  /// True if some branch strictly below this node is labelled `label`
  pub fn contains_label(&self, label: &T) -> bool {
    self
      .children()
      .iter()
      .flat_map(|c| c.subtrees())
      .any(|t| t.label() == Some(label))
  }
}

/// Pre-order iterator over the branches of a tree
pub struct Subtrees<'a, T, U> {
  stack: Vec<&'a SynTree<T, U>>,
}

impl<'a, T, U> Iterator for Subtrees<'a, T, U> {
  type Item = &'a SynTree<T, U>;

  fn next(&mut self) -> Option<Self::Item> {
    while let Some(node) = self.stack.pop() {
      if let SynTree::Branch(_, children) = node {
        self.stack.extend(children.iter().rev());
        return Some(node);
      }
    }
    None
  }
}

/// Bracketed notation: `(S (NP (N holmes)) (VP (V sat)))`
impl<T, U> fmt::Display for SynTree<T, U>
where
  T: fmt::Display,
  U: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Leaf(w) => write!(f, "{}", w.value),
      Self::Branch(c, children) => {
        write!(f, "({}", c.value)?;
        for child in children.iter() {
          write!(f, " {}", child)?;
        }
        write!(f, ")")
      }
    }
  }
}
