use crate::assignment::Assignment;
use crate::formula::{Clause, Literal};
use crate::watch::{ClauseIdx, WatchIndex};

#[derive(PartialEq, Eq, Clone, Debug)]
pub(crate) enum Propagation {
    Conflict(ClauseIdx),
    Consistent,
}

/// Process a literal that just became true: every clause watching its complement looks for a
/// new literal to watch, or reports a conflict if all of its literals are now false.
///
/// Only conflicts are detected here. A clause left with a single non-false literal does not
/// force that literal, so the assignment is never written.
pub(crate) fn propagate(
    clauses: &[Clause],
    assignment: &Assignment,
    watches: &mut WatchIndex,
    literal: Literal,
) -> Propagation {
    let mut queue = vec![literal];

    while let Some(literal) = queue.pop() {
        let falsified = literal.negated();

        for idx in watches.watchers(&falsified) {
            let clause = &clauses[idx.0];
            let other = watches
                .watched(idx)
                .iter()
                .find(|l| **l != falsified)
                .copied();

            let replacement = clause.literals().find(|l| {
                **l != falsified
                    && !assignment.is_falsified(l)
                    && other.map_or(true, |o| o.variable() != l.variable())
            });

            match replacement {
                Some(replacement) => watches.move_watch(idx, &falsified, replacement),
                // the other watch still holds the clause open
                None if other.map_or(false, |o| !assignment.is_falsified(&o)) => {}
                None if assignment.satisfies(clause) => {}
                None => {
                    log::trace!("conflict in clause {} after {}", idx.0, literal);
                    return Propagation::Conflict(idx);
                }
            }
        }
    }

    Propagation::Consistent
}
