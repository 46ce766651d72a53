pub mod formula;

mod assignment;
pub mod elimination;
mod propagate;
pub mod resolution;
mod solver;
mod watch;

#[cfg(test)]
mod brute_force;

use std::fmt;
use std::str::FromStr;

pub use assignment::{Model, Value};
pub use formula::{Clause, Formula, Literal, Variable};
pub use solver::Solver;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Model),
    Unsatisfiable,
}

/// The result of a DPLL search, with the number of consistent branches it took.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Outcome {
    pub result: SatResult,
    pub steps: usize,
}

impl Outcome {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self.result, SatResult::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match &self.result {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}

/// A bare verdict and step count, the common ground between all procedures.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Decision {
    pub satisfiable: bool,
    pub steps: usize,
}

impl Decision {
    pub fn new(satisfiable: bool, steps: usize) -> Self {
        Self { satisfiable, steps }
    }
}

impl From<&Outcome> for Decision {
    fn from(outcome: &Outcome) -> Self {
        Decision::new(outcome.is_satisfiable(), outcome.steps)
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Procedure {
    Dpll,
    Resolution,
    Elimination,
}

impl Procedure {
    pub fn all() -> [Procedure; 3] {
        [Procedure::Resolution, Procedure::Dpll, Procedure::Elimination]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Procedure::Dpll => "dpll",
            Procedure::Resolution => "resolution",
            Procedure::Elimination => "elimination",
        }
    }

    pub fn decide(&self, formula: &Formula) -> Decision {
        match self {
            Procedure::Dpll => Decision::from(&Solver::new(formula).solve()),
            Procedure::Resolution => resolution::decide(formula),
            Procedure::Elimination => elimination::decide(formula),
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Procedure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Procedure::all()
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| format!("unknown procedure '{}'", s))
    }
}

/// Decide `formula` with the watched-literal DPLL solver.
pub fn decide(formula: &Formula) -> Decision {
    Procedure::Dpll.decide(formula)
}
