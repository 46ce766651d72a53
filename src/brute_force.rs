use crate::*;

// Simple brute-force decider for cross-checking the other procedures in tests
#[cfg(test)]
pub(crate) fn solve_brute_force(f: &Formula) -> bool {
    let num_variables = f.num_variables();
    assert!(num_variables <= 15); // just for safety

    fn assignment_for(assignment: u32, x: usize) -> bool {
        assignment & (1 << (x - 1)) == 0
    }

    'search: for assignment in 0..2u32.pow(num_variables as u32) {
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                if assignment_for(assignment, literal.idx()) == literal.is_positive() {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied, so we're done and satisfiable
        return true;
    }
    // no assignment is valid
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{formula_from_dimacs, n, p};
    use test_env_log::test;

    #[test]
    fn brute_force_sat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        assert!(solve_brute_force(&Formula::new(vec![c1, c2])));
        assert!(solve_brute_force(&Formula::new(vec![])));
    }

    #[test]
    fn brute_force_unsat() {
        assert!(!solve_brute_force(&formula_from_dimacs(&[&[1, 2], &[-1], &[-2]])));
        assert!(!solve_brute_force(&formula_from_dimacs(&[&[1], &[]])));
    }
}
