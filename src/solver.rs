use crate::assignment::{Assignment, Value};
use crate::formula::{Formula, Literal, Variable};
use crate::propagate::{propagate, Propagation};
use crate::watch::WatchIndex;
use crate::{Outcome, SatResult};
use log::trace;
use std::collections::HashMap;

/// DPLL search over a fixed formula, using watched literals to notice conflicts early.
pub struct Solver {
    formula: Formula,
    variable_map: HashMap<Variable, Variable>,
    initial: SolverState,
}

/// Everything a branch can change. Cloned before each branch and restored when it fails.
#[derive(Clone, Debug)]
struct SolverState {
    assignment: Assignment,
    watches: WatchIndex,
}

/// A branch point: the variable chosen, the value currently being tried, whether that value
/// got past propagation, and the state to return to if it fails.
#[derive(Debug)]
struct Frame {
    variable: Variable,
    value: Value,
    descended: bool,
    snapshot: SolverState,
}

impl Frame {
    fn literal(&self) -> Literal {
        match self.value {
            Value::False => Literal::Negative(self.variable),
            _ => Literal::Positive(self.variable),
        }
    }
}

impl Solver {
    /// Variables are renumbered densely first, so the search state is sized by the number of
    /// distinct variables rather than the largest one.
    pub fn new(formula: &Formula) -> Self {
        let mut formula = formula.clone();
        let variable_map = formula.canonicalize();
        let num_variables = variable_map.len();
        let initial = SolverState {
            assignment: Assignment::new(num_variables),
            watches: WatchIndex::new(formula.as_clauses(), num_variables),
        };
        Self {
            formula,
            variable_map,
            initial,
        }
    }

    /// Run the search from scratch. Repeated calls give the same result and step count.
    ///
    /// A step is counted for every value that gets past propagation, and again whenever the
    /// search below such a value fails.
    pub fn solve(&self) -> Outcome {
        if self.formula.has_empty_clause() {
            trace!("formula contains an empty clause");
            return Outcome {
                result: SatResult::Unsatisfiable,
                steps: 0,
            };
        }

        let clauses = self.formula.as_clauses();
        let mut state = self.initial.clone();
        let mut frames: Vec<Frame> = vec![];
        let mut steps = 0;

        'select: loop {
            match state.assignment.unassigned_variable(clauses) {
                None => {
                    if state.assignment.satisfies_all(clauses) {
                        trace!("satisfied after {} steps", steps);
                        return Outcome {
                            result: SatResult::Satisfiable(state.assignment.to_model(&self.variable_map)),
                            steps,
                        };
                    }
                }
                Some(variable) => {
                    frames.push(Frame {
                        variable,
                        value: Value::True,
                        descended: false,
                        snapshot: state.clone(),
                    });
                    if self.branch(&mut state, &mut frames) {
                        steps += 1;
                        continue 'select;
                    }
                }
            }

            // Backtrack: retry the innermost frame with False, popping frames that have
            // already tried both values.
            loop {
                let frame = match frames.last_mut() {
                    Some(frame) => frame,
                    None => {
                        trace!("search space exhausted after {} steps", steps);
                        return Outcome {
                            result: SatResult::Unsatisfiable,
                            steps,
                        };
                    }
                };

                if frame.descended {
                    steps += 1;
                    frame.descended = false;
                }

                if frame.value == Value::True {
                    state = frame.snapshot.clone();
                    frame.value = Value::False;
                    if self.branch(&mut state, &mut frames) {
                        steps += 1;
                        continue 'select;
                    }
                } else if let Some(frame) = frames.pop() {
                    trace!("backtrack past {}", frame.variable.0);
                    state = frame.snapshot;
                }
            }
        }
    }

    /// Apply the innermost frame's value and propagate it. Returns whether the state stayed
    /// consistent.
    fn branch(&self, state: &mut SolverState, frames: &mut [Frame]) -> bool {
        let depth = frames.len();
        let frame = match frames.last_mut() {
            Some(frame) => frame,
            None => return false,
        };
        let literal = frame.literal();
        trace!("decide {} at depth {}", literal, depth);

        state.assignment.set(frame.variable, frame.value);
        frame.descended = propagate(
            self.formula.as_clauses(),
            &state.assignment,
            &mut state.watches,
            literal,
        ) == Propagation::Consistent;
        frame.descended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::solve_brute_force;
    use crate::formula::dimacs::parse_plain;
    use crate::formula::{formula_3sat_strategy, formula_from_dimacs, n, p, Clause};
    use proptest::prelude::*;
    use test_env_log::test;

    fn solve(f: &Formula) -> Outcome {
        Solver::new(f).solve()
    }

    fn assert_sat(f: &Formula) {
        match solve(f).result {
            SatResult::Satisfiable(model) => assert!(model.satisfies(f), "bad model for {:?}", f),
            SatResult::Unsatisfiable => panic!("{:?} should be satisfiable", f),
        }
    }

    fn assert_unsat(f: &Formula) {
        assert_eq!(solve(f).result, SatResult::Unsatisfiable, "{:?}", f);
    }

    #[test]
    fn solve_empty_formula() {
        let outcome = solve(&Formula::new(vec![]));
        assert!(outcome.is_satisfiable());
        assert_eq!(outcome.steps, 0);
    }

    #[test]
    fn solve_empty_clause() {
        let f = formula_from_dimacs(&[&[1, 2], &[]]);
        let outcome = solve(&f);
        assert_eq!(outcome.result, SatResult::Unsatisfiable);
        assert_eq!(outcome.steps, 0);
    }

    #[test]
    fn solve_bcp_sat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        assert_sat(&Formula::new(vec![c1, c2]));
    }

    #[test]
    fn solve_bcp_unsat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let c3 = Clause::new(vec![n(2)]);
        assert_unsat(&Formula::new(vec![c1, c2, c3]));
    }

    #[test]
    fn solve_conflict_sat() {
        let c1 = Clause::new(vec![p(1), p(2), p(3)]);
        let c2 = Clause::new(vec![n(1), n(2), p(3)]);
        let c3 = Clause::new(vec![n(2), n(3)]);
        assert_sat(&Formula::new(vec![c1, c2, c3]));
    }

    #[test]
    fn solve_forced_unsat() {
        assert_unsat(&formula_from_dimacs(&[&[1, 2], &[-1, 2], &[-2]]));
        assert_unsat(&formula_from_dimacs(&[&[1], &[-1]]));
    }

    #[test]
    fn solve_chain_sat() {
        let f = formula_from_dimacs(&[&[1, -2], &[2, 3]]);
        let outcome = solve(&f);
        match outcome.result {
            SatResult::Satisfiable(model) => {
                assert_eq!(model.value(Variable(1)), Some(true));
                assert_eq!(model.value(Variable(2)), Some(true));
                assert_eq!(model.value(Variable(3)), Some(true));
                assert!(model.satisfies(&f));
            }
            SatResult::Unsatisfiable => panic!("should be satisfiable"),
        }
        // every variable is decided true on the first try
        assert_eq!(outcome.steps, 3);
    }

    #[test]
    fn solve_counts_descents_and_failures() {
        // both values of 1 survive propagation and both subtrees fail; no value of 2 does
        let outcome = solve(&formula_from_dimacs(&[&[1, 2], &[-1, 2], &[-2]]));
        assert_eq!(outcome.result, SatResult::Unsatisfiable);
        assert_eq!(outcome.steps, 4);

        // neither value of 1 survives propagation
        let outcome = solve(&formula_from_dimacs(&[&[1], &[-1]]));
        assert_eq!(outcome.result, SatResult::Unsatisfiable);
        assert_eq!(outcome.steps, 0);
    }

    #[test]
    fn solve_duplicate_literals() {
        // (!1 | !1 | !1) & (!1 | !2 | !2) & (!2 | 3 | 4) & (!2 | 4 | !4)
        let f = formula_from_dimacs(&[&[-1, -1, -1], &[-1, -2, -2], &[-2, 3, 4], &[-2, 4, -4]]);
        assert_sat(&f);
    }

    #[test]
    fn solve_sparse_variables() {
        // variable 2 never appears and stays unassigned
        let f = formula_from_dimacs(&[&[3, 1], &[-3]]);
        match solve(&f).result {
            SatResult::Satisfiable(model) => {
                assert_eq!(model.value(Variable(2)), None);
                assert!(model.satisfies(&f));
            }
            SatResult::Unsatisfiable => panic!("should be satisfiable"),
        }
    }

    #[test]
    fn solve_counts_failed_subtree_before_sat() {
        // 1 = true descends but both values of 2 conflict; 1 = false then 2 = true succeeds
        let outcome = solve(&formula_from_dimacs(&[&[1, 2], &[-1, -2], &[-1, 2]]));
        match outcome.result {
            SatResult::Satisfiable(model) => {
                assert_eq!(model.value(Variable(1)), Some(false));
                assert_eq!(model.value(Variable(2)), Some(true));
            }
            SatResult::Unsatisfiable => panic!("should be satisfiable"),
        }
        assert_eq!(outcome.steps, 4);
    }

    #[test]
    fn solve_huge_variable_numbers() {
        let f = parse_plain("1 -3000000000\n3000000000 7\n-1\n".as_bytes()).unwrap();
        assert_eq!(f.num_variables(), 3_000_000_000);
        match solve(&f).result {
            SatResult::Satisfiable(model) => {
                assert_eq!(model.value(Variable(1)), Some(false));
                assert_eq!(model.value(Variable(3_000_000_000)), Some(false));
                assert_eq!(model.value(Variable(7)), Some(true));
                assert_eq!(model.value(Variable(2)), None);
                assert!(model.satisfies(&f));
            }
            SatResult::Unsatisfiable => panic!("should be satisfiable"),
        }
    }

    #[test]
    fn solve_is_repeatable() {
        let f = formula_from_dimacs(&[&[1, 2, -3], &[-1, 3], &[-2, -3], &[3, 2], &[-1, -2]]);
        let solver = Solver::new(&f);
        let first = solver.solve();
        let second = solver.solve();
        assert_eq!(first, second);
    }

    #[test]
    fn solve_pigeonhole_unsat() {
        // three pigeons, two holes: x(i, h) = 2 * i + h + 1
        let x = |i: i64, h: i64| 2 * i + h + 1;
        let mut clauses: Vec<Vec<i64>> = (0..3).map(|i| vec![x(i, 0), x(i, 1)]).collect();
        for h in 0..2 {
            for i in 0..3 {
                for j in (i + 1)..3 {
                    clauses.push(vec![-x(i, h), -x(j, h)]);
                }
            }
        }
        let refs: Vec<&[i64]> = clauses.iter().map(|c| c.as_slice()).collect();
        assert_unsat(&formula_from_dimacs(&refs));
    }

    proptest! {
        #[test]
        fn proptest_solve(f in formula_3sat_strategy()) {
            let brute_force = solve_brute_force(&f);
            let outcome = Solver::new(&f).solve();
            log::trace!("result = {:?}", outcome);
            prop_assert_eq!(outcome.is_satisfiable(), brute_force);
            if let SatResult::Satisfiable(model) = outcome.result {
                prop_assert!(model.satisfies(&f));
            }
        }
    }
}
