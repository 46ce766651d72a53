use crate::formula::{Clause, Literal};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct ClauseIdx(pub usize);

/// Both directions of the watch relation: for each clause, the literals it watches, and for
/// each literal, the clauses watching it. The two are only ever changed together, through
/// [`WatchIndex::move_watch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WatchIndex {
    watched: Vec<Vec<Literal>>,
    watchers: Vec<BTreeSet<ClauseIdx>>,
}

fn slot(literal: &Literal) -> usize {
    literal.idx() * 2 + if literal.is_positive() { 0 } else { 1 }
}

impl WatchIndex {
    /// Each clause watches its first literal and the first later literal over another variable.
    pub(crate) fn new(clauses: &[Clause], num_variables: usize) -> Self {
        let mut index = Self {
            watched: Vec::with_capacity(clauses.len()),
            watchers: vec![BTreeSet::new(); (num_variables + 1) * 2],
        };

        for (idx, clause) in clauses.iter().enumerate() {
            let mut literals = clause.literals();
            let mut watched = vec![];
            if let Some(first) = literals.next() {
                watched.push(*first);
                if let Some(second) = literals.find(|l| l.variable() != first.variable()) {
                    watched.push(*second);
                }
            }
            for literal in &watched {
                index.watchers[slot(literal)].insert(ClauseIdx(idx));
            }
            index.watched.push(watched);
        }

        index
    }

    /// The clauses currently watching `literal`, in index order.
    pub(crate) fn watchers(&self, literal: &Literal) -> Vec<ClauseIdx> {
        self.watchers[slot(literal)].iter().copied().collect()
    }

    pub(crate) fn watched(&self, clause: ClauseIdx) -> &[Literal] {
        &self.watched[clause.0]
    }

    /// Move one of `clause`'s watches from `from` to `to`, keeping both directions in step.
    pub(crate) fn move_watch(&mut self, clause: ClauseIdx, from: &Literal, to: &Literal) {
        let watched = &mut self.watched[clause.0];
        let pos = match watched.iter().position(|l| l == from) {
            Some(pos) => pos,
            None => return,
        };
        watched[pos] = *to;
        self.watchers[slot(from)].remove(&clause);
        self.watchers[slot(to)].insert(clause);

        log::trace!("clause {} watch {} -> {}", clause.0, from, to);
        debug_assert_eq!(self.check_invariants(), Ok(()));
    }

    /// Every clause is in the watcher set of exactly the literals it watches, and a clause's
    /// watches are on distinct variables.
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        for (idx, watched) in self.watched.iter().enumerate() {
            let clause = ClauseIdx(idx);
            if watched.len() > 2 {
                return Err(format!("clause {} watches {} literals", idx, watched.len()));
            }
            if watched.len() == 2 && watched[0].variable() == watched[1].variable() {
                return Err(format!("clause {} watches variable {} twice", idx, watched[0].idx()));
            }
            for literal in watched {
                if !self.watchers[slot(literal)].contains(&clause) {
                    return Err(format!("clause {} watches {} but is not indexed", idx, literal));
                }
            }
        }
        for (s, clauses) in self.watchers.iter().enumerate() {
            for clause in clauses {
                let listed = self
                    .watched
                    .get(clause.0)
                    .map_or(false, |watched| watched.iter().any(|l| slot(l) == s));
                if !listed {
                    return Err(format!("clause {} indexed under slot {} it does not watch", clause.0, s));
                }
            }
        }
        Ok(())
    }
}
