//! Davis-Putnam variable elimination, the other baseline.

use crate::formula::{is_tautology, Formula, Literal};
use crate::Decision;
use std::collections::BTreeSet;

type EliminationClause = BTreeSet<Literal>;

/// Eliminate one variable at a time by replacing every clause that mentions it with all
/// resolvents on it. Each resolved pair counts as a step.
pub fn decide(formula: &Formula) -> Decision {
    let mut clauses: Vec<EliminationClause> = formula
        .clauses()
        .map(|clause| clause.literals().copied().collect::<EliminationClause>())
        .filter(|clause| !is_tautology(clause))
        .collect();
    let mut steps = 0;

    loop {
        if clauses.iter().any(BTreeSet::is_empty) {
            log::debug!("elimination reached the empty clause after {} steps", steps);
            return Decision::new(false, steps);
        }
        let literal = match clauses.first().and_then(|c| c.iter().next()) {
            Some(literal) => *literal,
            None => {
                log::debug!("elimination emptied the formula after {} steps", steps);
                return Decision::new(true, steps);
            }
        };
        let complement = literal.negated();

        let (mentioning, rest): (Vec<_>, Vec<_>) = clauses
            .into_iter()
            .partition(|c| c.contains(&literal) || c.contains(&complement));
        let with_literal = mentioning.iter().filter(|c| c.contains(&literal));
        let with_complement: Vec<_> = mentioning.iter().filter(|c| c.contains(&complement)).collect();

        let mut resolvents = BTreeSet::new();
        for c1 in with_literal {
            for c2 in &with_complement {
                steps += 1;
                let resolvent: EliminationClause = c1
                    .iter()
                    .chain(c2.iter())
                    .filter(|l| **l != literal && **l != complement)
                    .copied()
                    .collect();
                if !is_tautology(&resolvent) {
                    resolvents.insert(resolvent);
                }
            }
        }

        log::trace!(
            "eliminated {}: {} clauses removed, {} resolvents",
            literal.idx(),
            mentioning.len(),
            resolvents.len()
        );
        clauses = rest;
        clauses.extend(resolvents);
    }
}
