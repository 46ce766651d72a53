pub mod dimacs;

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::fmt::{self, Display, Formatter};

/// A propositional variable. Variables are numbered from 1, as in DIMACS.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }

    /// Signed-integer form; 0 is the clause terminator and has no literal.
    pub fn from_dimacs(l: i64) -> Option<Self> {
        if l > 0 {
            Some(Literal::Positive(Variable(l as usize)))
        } else if l < 0 {
            Some(Literal::Negative(Variable(l.unsigned_abs() as usize)))
        } else {
            None
        }
    }

    pub fn to_dimacs(&self) -> i64 {
        match self {
            Literal::Positive(Variable(x)) => *x as i64,
            Literal::Negative(Variable(x)) => -(*x as i64),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.to_dimacs())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
        }
    }

    /// The largest variable mentioned by any clause, or 0 if there are no literals at all.
    /// Only equal to the number of distinct variables once the formula is canonical.
    pub fn num_variables(&self) -> usize {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals.iter())
            .map(|literal| literal.idx())
            .max()
            .unwrap_or(0)
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub(crate) fn as_clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Renumber variables densely from 1, in order of first occurrence. Returns the map from
    /// each new variable back to the one it replaced.
    pub fn canonicalize(&mut self) -> HashMap<Variable, Variable> {
        let mut rewrite = HashMap::new();
        let mut original = HashMap::new();
        for clause in &mut self.clauses {
            for literal in &mut clause.literals {
                let next = Variable(rewrite.len() + 1);
                let dense = *rewrite.entry(*literal.variable()).or_insert(next);
                original.insert(dense, *literal.variable());
                *literal = if literal.is_positive() {
                    Literal::Positive(dense)
                } else {
                    Literal::Negative(dense)
                };
            }
        }
        original
    }
}

/// Whether some variable occurs in `clause` with both polarities.
pub(crate) fn is_tautology(clause: &BTreeSet<Literal>) -> bool {
    clause
        .iter()
        .any(|l| l.is_positive() && clause.contains(&l.negated()))
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.literals.len() != 1 {
                f.write_str("(")?;
            }
            let mut first_literal = true;
            for literal in &clause.literals {
                if first_literal {
                    first_literal = false;
                } else {
                    f.write_str(" | ")?;
                }
                match literal {
                    Literal::Positive(Variable(x)) => f.write_fmt(format_args!("{}", x))?,
                    Literal::Negative(Variable(x)) => f.write_fmt(format_args!("!{}", x))?,
                }
            }
            if clause.literals.len() != 1 {
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

#[cfg(test)]
pub(crate) fn formula_from_dimacs(clauses: &[&[i64]]) -> Formula {
    Formula::new(
        clauses
            .iter()
            .map(|c| Clause::new(c.iter().filter_map(|&l| Literal::from_dimacs(l)))),
    )
}

/// Random formulas over variables `1..=max_vars` with non-empty clauses.
#[cfg(test)]
pub(crate) fn formula_strategy(
    max_vars: usize,
    max_clauses: usize,
    max_clause_len: usize,
) -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    (1..=max_vars).prop_flat_map(move |num_vars| {
        let literal = (1..=num_vars, any::<bool>()).prop_map(|(v, positive)| {
            if positive {
                Literal::Positive(Variable(v))
            } else {
                Literal::Negative(Variable(v))
            }
        });
        prop::collection::vec(prop::collection::vec(literal, 1..=max_clause_len), 0..=max_clauses)
            .prop_map(|clauses| Formula::new(clauses.into_iter().map(Clause::new)))
    })
}

#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    formula_strategy(8, 24, 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_env_log::test;

    #[test]
    fn literal_dimacs_conversion() {
        assert_eq!(Literal::from_dimacs(3), Some(p(3)));
        assert_eq!(Literal::from_dimacs(-7), Some(n(7)));
        assert_eq!(Literal::from_dimacs(0), None);
        assert_eq!(n(7).to_dimacs(), -7);
        assert_eq!(format!("{}", n(12)), "-12");
        assert_eq!(p(4).negated(), n(4));
    }

    #[test]
    fn num_variables_is_largest_index() {
        let f = formula_from_dimacs(&[&[1, -5], &[3]]);
        assert_eq!(f.num_variables(), 5);
        assert_eq!(Formula::new(vec![]).num_variables(), 0);
        assert_eq!(Formula::new(vec![Clause::new(vec![])]).num_variables(), 0);
    }

    #[test]
    fn test_canonicalize() {
        let mut f = formula_from_dimacs(&[&[10, -3_000_000_000], &[-10], &[3_000_000_000, 7]]);
        let original = f.canonicalize();
        assert_eq!(f, formula_from_dimacs(&[&[1, -2], &[-1], &[2, 3]]));
        assert_eq!(f.num_variables(), 3);
        assert_eq!(original[&Variable(2)], Variable(3_000_000_000));
        assert_eq!(original[&Variable(3)], Variable(7));
        assert_eq!(original.len(), 3);
    }

    #[test]
    fn tautology_detection() {
        assert!(is_tautology(&[p(1), p(2), n(1)].iter().copied().collect()));
        assert!(!is_tautology(&[p(1), n(2)].iter().copied().collect()));
    }

    #[test]
    fn debug_rendering() {
        let f = formula_from_dimacs(&[&[1, -2], &[3], &[]]);
        assert_eq!(format!("{:?}", f), "(1 | !2) & 3 & ()");
        assert!(f.has_empty_clause());
    }
}
