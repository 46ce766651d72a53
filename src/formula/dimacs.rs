use crate::formula::{Clause, Formula, Literal};
use std::fmt;
use std::io::{BufRead, BufReader, Read};

/// Parse a DIMACS CNF file. A `p cnf` header is required before the first clause.
pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut num_clauses = None;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::format(lineno, "missing 'cnf'"));
                }

                let _num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::format(lineno, "invalid num_variables"))?;

                num_clauses = Some(
                    line.next()
                        .and_then(|c| c.parse::<usize>().ok())
                        .ok_or_else(|| DimacsParseError::format(lineno, "invalid num_clauses"))?,
                );
            }
            Some(_) => {
                let expected = match num_clauses {
                    Some(n) => n,
                    None => {
                        return Err(DimacsParseError::format(
                            lineno,
                            "missing 'p' line before clauses",
                        ))
                    }
                };

                let mut clause = vec![];
                for x in line {
                    match parse_literal(lineno, x)? {
                        Some(l) => clause.push(l),
                        None => break,
                    }
                }
                if !clause.is_empty() {
                    clauses.push(Clause::new(clause));
                }

                if clauses.len() >= expected {
                    break;
                }
            }
        }
    }

    if num_clauses.is_none() {
        return Err(DimacsParseError::Format("missing 'p' line before clauses".into()));
    }

    log::debug!("parsed {} clauses", clauses.len());
    Ok(Formula::new(clauses))
}

/// Parse the headerless format: one clause per line, literals separated by whitespace.
/// Any `0` on a line is ignored rather than ending the clause.
pub fn parse_plain<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let mut clause = vec![];
        for x in line.split_whitespace() {
            if let Some(l) = parse_literal(lineno, x)? {
                clause.push(l);
            }
        }
        if !clause.is_empty() {
            clauses.push(Clause::new(clause));
        }
    }

    log::debug!("parsed {} clauses", clauses.len());
    Ok(Formula::new(clauses))
}

fn parse_literal(lineno: usize, s: &str) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<i64>()
        .map_err(|_| DimacsParseError::format(lineno, &format!("invalid literal '{}'", s)))?;
    Ok(Literal::from_dimacs(l))
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl DimacsParseError {
    fn format(lineno: usize, message: &str) -> Self {
        Self::Format(format!("line {}: {}", lineno + 1, message))
    }
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl fmt::Display for DimacsParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DimacsParseError::Io(e) => write!(f, "i/o error: {}", e),
            DimacsParseError::Format(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DimacsParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimacsParseError::Io(e) => Some(e),
            DimacsParseError::Format(_) => None,
        }
    }
}
