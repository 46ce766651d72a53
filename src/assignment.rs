use crate::formula::{Clause, Formula, Literal, Variable};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Value {
    True,
    False,
    Unassigned,
}

impl Value {
    pub fn from_bool(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }
}

/// The current partial interpretation, indexed by variable. Slot 0 is unused.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct Assignment {
    values: Vec<Value>,
}

impl Assignment {
    pub(crate) fn new(num_variables: usize) -> Self {
        Self {
            values: vec![Value::Unassigned; num_variables + 1],
        }
    }

    pub(crate) fn get(&self, variable: Variable) -> Value {
        self.values[variable.0]
    }

    pub(crate) fn set(&mut self, variable: Variable, value: Value) {
        self.values[variable.0] = value;
    }

    /// The value of `literal` under this assignment, accounting for its polarity.
    pub(crate) fn literal_value(&self, literal: &Literal) -> Value {
        match self.get(*literal.variable()) {
            Value::True => Value::from_bool(literal.is_positive()),
            Value::False => Value::from_bool(!literal.is_positive()),
            Value::Unassigned => Value::Unassigned,
        }
    }

    pub(crate) fn is_falsified(&self, literal: &Literal) -> bool {
        self.literal_value(literal) == Value::False
    }

    pub(crate) fn satisfies(&self, clause: &Clause) -> bool {
        clause
            .literals()
            .any(|literal| self.literal_value(literal) == Value::True)
    }

    pub(crate) fn satisfies_all(&self, clauses: &[Clause]) -> bool {
        clauses.iter().all(|clause| self.satisfies(clause))
    }

    /// The variable of the first literal, in clause order then literal order, that is still
    /// unassigned. Variables that appear in no clause are never returned.
    pub(crate) fn unassigned_variable(&self, clauses: &[Clause]) -> Option<Variable> {
        clauses
            .iter()
            .flat_map(|clause| clause.literals())
            .map(|literal| *literal.variable())
            .find(|&variable| self.get(variable) == Value::Unassigned)
    }

    /// The decided variables, renamed back through `original` (canonical to original).
    pub(crate) fn to_model(&self, original: &HashMap<Variable, Variable>) -> Model {
        let values = self
            .values
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(i, value)| {
                let variable = *original.get(&Variable(i))?;
                match value {
                    Value::True => Some((variable, true)),
                    Value::False => Some((variable, false)),
                    Value::Unassigned => None,
                }
            })
            .collect();
        Model { values }
    }
}

/// A satisfying assignment over the caller's variable numbers. Variables the search never had
/// to decide have no value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Model {
    values: BTreeMap<Variable, bool>,
}

impl Model {
    pub fn value(&self, variable: Variable) -> Option<bool> {
        self.values.get(&variable).copied()
    }

    /// Checks every clause against the model directly.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula.clauses().all(|clause| {
            clause
                .literals()
                .any(|literal| self.value(*literal.variable()) == Some(literal.is_positive()))
        })
    }

    /// The assigned variables as literals, in variable order.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.values.iter().map(|(&variable, &value)| {
            if value {
                Literal::Positive(variable)
            } else {
                Literal::Negative(variable)
            }
        })
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for literal in self.literals() {
            write!(f, "{} ", literal)?;
        }
        f.write_str("0")
    }
}
