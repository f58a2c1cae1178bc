//! Dependency lookups for one document.
//!
//! Punctuation is filtered out of the head-to-dependents map: a punctuation
//! term's dependents are re-attached to its own heads. The unfiltered edges
//! stay available for reporting-verb analysis.

use super::terms::TermIndex;
use crate::error::Result;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

/// A dependency edge seen from one end: the term at the other end and the
/// relation label.
pub(crate) type Edge = (usize, String);

/// Head and dependent lookups over term positions.
#[derive(Debug, Default)]
pub struct DependencyIndex {
    head_to_deps: HashMap<usize, Vec<Edge>>,
    dep_to_heads: HashMap<usize, Vec<Edge>>,
    raw_head_to_deps: HashMap<usize, Vec<Edge>>,
    constituents: RefCell<HashMap<usize, BTreeSet<usize>>>,
}

fn push_unique(edges: &mut Vec<Edge>, edge: Edge) {
    if !edges.contains(&edge) {
        edges.push(edge);
    }
}

impl DependencyIndex {
    /// Build the index. Edges naming unknown terms are an error.
    pub(crate) fn build(index: &TermIndex<'_>, dependencies: &[super::Dependency]) -> Result<Self> {
        let keep = |position: usize| index.term(position).pos != "punct";

        let mut raw_head_to_deps: HashMap<usize, Vec<Edge>> = HashMap::new();
        let mut raw_dep_to_heads: HashMap<usize, Vec<Edge>> = HashMap::new();
        let mut heads_in_order = Vec::new();
        for dep in dependencies {
            let head = index.position(&dep.from)?;
            let to = index.position(&dep.to)?;
            let deps = raw_head_to_deps.entry(head).or_default();
            if deps.is_empty() {
                heads_in_order.push(head);
            }
            push_unique(deps, (to, dep.function.clone()));
            push_unique(raw_dep_to_heads.entry(to).or_default(), (head, dep.function.clone()));
        }

        let mut head_to_deps: HashMap<usize, Vec<Edge>> = HashMap::new();
        for &head in &heads_in_order {
            let kept: Vec<Edge> = raw_head_to_deps[&head]
                .iter()
                .filter(|(to, _)| keep(*to))
                .cloned()
                .collect();
            if keep(head) {
                let deps = head_to_deps.entry(head).or_default();
                for edge in kept {
                    push_unique(deps, edge);
                }
            } else {
                for (super_head, _) in raw_dep_to_heads.get(&head).into_iter().flatten() {
                    if keep(*super_head) {
                        let deps = head_to_deps.entry(*super_head).or_default();
                        for edge in &kept {
                            push_unique(deps, edge.clone());
                        }
                    }
                }
            }
        }

        let mut dep_to_heads: HashMap<usize, Vec<Edge>> = HashMap::new();
        for (&head, deps) in &head_to_deps {
            for (to, relation) in deps {
                push_unique(dep_to_heads.entry(*to).or_default(), (head, relation.clone()));
            }
        }
        for heads in dep_to_heads.values_mut() {
            heads.sort();
        }

        Ok(Self {
            head_to_deps,
            dep_to_heads,
            raw_head_to_deps,
            constituents: RefCell::default(),
        })
    }

    /// Dependents of a head, punctuation filtered.
    pub(crate) fn dependents(&self, head: usize) -> &[Edge] {
        self.head_to_deps.get(&head).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dependents of a head with the given relation.
    pub(crate) fn dependents_with<'s>(
        &'s self,
        head: usize,
        relation: &'s str,
    ) -> impl Iterator<Item = usize> + 's {
        self.dependents(head)
            .iter()
            .filter(move |(_, r)| r == relation)
            .map(|(to, _)| *to)
    }

    /// Heads of a dependent, punctuation filtered.
    pub(crate) fn heads(&self, dependent: usize) -> &[Edge] {
        self.dep_to_heads.get(&dependent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dependents of a head including punctuation.
    pub(crate) fn raw_dependents(&self, head: usize) -> &[Edge] {
        self.raw_head_to_deps.get(&head).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if the term heads at least one dependent.
    pub(crate) fn is_head(&self, term: usize) -> bool {
        !self.dependents(term).is_empty()
    }

    /// Every term transitively dominated by `head`, and `head` itself.
    ///
    /// Cycles in the dependency graph are cut where they are met.
    pub fn constituent(&self, head: usize) -> BTreeSet<usize> {
        if let Some(cached) = self.constituents.borrow().get(&head) {
            return cached.clone();
        }
        let mut members = BTreeSet::new();
        let mut stack = vec![head];
        while let Some(term) = stack.pop() {
            if members.insert(term) {
                stack.extend(self.dependents(term).iter().map(|(to, _)| *to));
            }
        }
        self.constituents.borrow_mut().insert(head, members.clone());
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{Dependency, Term};

    // de man , die lacht
    fn terms() -> Vec<Term> {
        vec![
            Term::new("t1", 0, "de", "det"),
            Term::new("t2", 3, "man", "noun"),
            Term::new("t3", 7, ",", "punct"),
            Term::new("t4", 9, "die", "pron"),
            Term::new("t5", 13, "lacht", "verb"),
        ]
    }

    #[test]
    fn punctuation_dependents_move_up() {
        let terms = terms();
        let index = TermIndex::new(&terms).unwrap();
        let deps = vec![
            Dependency::new("t2", "t1", "hd/det"),
            Dependency::new("t2", "t3", "hd/mod"),
            Dependency::new("t3", "t5", "--/--"),
            Dependency::new("t5", "t4", "hd/su"),
        ];
        let dx = DependencyIndex::build(&index, &deps).unwrap();
        let of_man: Vec<usize> = dx.dependents(1).iter().map(|(t, _)| *t).collect();
        assert_eq!(of_man, vec![0, 4]);
        assert_eq!(dx.constituent(1).into_iter().collect::<Vec<_>>(), vec![0, 1, 3, 4]);
        assert_eq!(dx.raw_dependents(2).len(), 1);
        assert_eq!(dx.heads(4), &[(1, "--/--".to_string())]);
    }

    #[test]
    fn cycles_terminate() {
        let terms = terms();
        let index = TermIndex::new(&terms).unwrap();
        let deps = vec![
            Dependency::new("t1", "t2", "a/b"),
            Dependency::new("t2", "t1", "a/b"),
        ];
        let dx = DependencyIndex::build(&index, &deps).unwrap();
        assert_eq!(dx.constituent(0).len(), 2);
        assert_eq!(dx.constituent(1).len(), 2);
        assert_eq!(dx.constituent(4).len(), 1);
    }

    #[test]
    fn unknown_term_is_an_error() {
        let terms = terms();
        let index = TermIndex::new(&terms).unwrap();
        let deps = vec![Dependency::new("t1", "t42", "hd/mod")];
        assert!(DependencyIndex::build(&index, &deps).is_err());
    }
}
