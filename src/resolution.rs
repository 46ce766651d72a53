//! Saturation by resolution. Only used as a baseline for the DPLL solver.

use crate::formula::{is_tautology, Formula, Literal};
use crate::Decision;
use std::collections::BTreeSet;

type ResolutionClause = BTreeSet<Literal>;

/// The non-tautological resolvents of `c1` and `c2`, one per literal of `c1` whose complement
/// is in `c2`. Both clauses must be tautology-free.
pub(crate) fn resolvents(c1: &ResolutionClause, c2: &ResolutionClause) -> Vec<ResolutionClause> {
    c1.iter()
        .filter(|literal| c2.contains(&literal.negated()))
        .map(|literal| {
            let complement = literal.negated();
            c1.iter()
                .filter(|l| *l != literal)
                .chain(c2.iter().filter(|l| **l != complement))
                .copied()
                .collect::<ResolutionClause>()
        })
        .filter(|resolvent| !is_tautology(resolvent))
        .collect()
}

/// Resolve every pair of known clauses until the empty clause appears or nothing new is
/// derived. Each pair examined counts as a step.
pub fn decide(formula: &Formula) -> Decision {
    let mut clauses: Vec<ResolutionClause> = vec![];
    let mut known = BTreeSet::new();
    for clause in formula.clauses() {
        let clause: ResolutionClause = clause.literals().copied().collect();
        if is_tautology(&clause) {
            continue;
        }
        if known.insert(clause.clone()) {
            clauses.push(clause);
        }
    }

    if known.contains(&ResolutionClause::new()) {
        return Decision::new(false, 0);
    }

    let mut steps = 0;
    loop {
        let mut new = BTreeSet::new();
        for (i, ci) in clauses.iter().enumerate() {
            for cj in &clauses[i + 1..] {
                steps += 1;
                for resolvent in resolvents(ci, cj) {
                    if resolvent.is_empty() {
                        log::debug!("resolution derived the empty clause after {} steps", steps);
                        return Decision::new(false, steps);
                    }
                    new.insert(resolvent);
                }
            }
        }

        let fresh: Vec<_> = new.into_iter().filter(|c| !known.contains(c)).collect();
        if fresh.is_empty() {
            log::debug!("resolution saturated with {} clauses", clauses.len());
            return Decision::new(true, steps);
        }
        log::trace!("resolution round added {} clauses", fresh.len());
        for clause in fresh {
            known.insert(clause.clone());
            clauses.push(clause);
        }
    }
}
