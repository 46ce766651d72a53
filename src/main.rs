use clap::{App, Arg};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::time::Instant;
use watchsat::formula::dimacs::{parse, parse_plain, DimacsParseError};
use watchsat::*;

fn main() {
    env_logger::init();

    let matches = App::new("watchsat")
        .about("Decides CNF satisfiability with watched-literal DPLL and baseline procedures")
        .arg(Arg::with_name("INPUT").help("input file (stdin if absent)").index(1))
        .arg(
            Arg::with_name("format")
                .long("format")
                .short("f")
                .takes_value(true)
                .possible_values(&["dimacs", "plain"])
                .default_value("dimacs")
                .help("dimacs with a 'p cnf' header, or plain lines of literals"),
        )
        .arg(
            Arg::with_name("procedure")
                .long("procedure")
                .short("p")
                .takes_value(true)
                .possible_values(&["dpll", "resolution", "elimination", "all"])
                .default_value("dpll"),
        )
        .arg(Arg::with_name("model").long("model").short("m").help("print the DPLL model"))
        .arg(
            Arg::with_name("cross-check")
                .long("cross-check")
                .help("run every procedure and fail if their verdicts differ"),
        )
        .get_matches();

    let plain = matches.value_of("format") == Some("plain");
    let f = match matches.value_of("INPUT") {
        Some(path) => parse_from_file(path, plain),
        None => parse_from(std::io::stdin(), plain),
    };

    let f = match f {
        Ok(f) => f,
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    };
    debug!("{} variables, {} clauses", f.num_variables(), f.num_clauses());

    let procedures: Vec<Procedure> = if matches.is_present("cross-check") {
        Procedure::all().to_vec()
    } else {
        match matches.value_of("procedure") {
            Some("all") => Procedure::all().to_vec(),
            Some(name) => match name.parse() {
                Ok(procedure) => vec![procedure],
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(-1);
                }
            },
            None => vec![Procedure::Dpll],
        }
    };

    let mut verdicts = vec![];
    for procedure in procedures {
        let start = Instant::now();
        let (decision, model) = match procedure {
            Procedure::Dpll => {
                let outcome = Solver::new(&f).solve();
                (Decision::from(&outcome), outcome.model().cloned())
            }
            _ => (procedure.decide(&f), None),
        };
        let elapsed = start.elapsed();

        println!("------ {} ------", procedure);
        println!("{}", if decision.satisfiable { "SATISFIABLE" } else { "UNSATISFIABLE" });
        println!("time: {:.6} s", elapsed.as_secs_f64());
        println!("steps: {}", decision.steps);
        if let (true, Some(model)) = (matches.is_present("model"), model) {
            println!("v {}", model);
        }
        verdicts.push(decision.satisfiable);
    }

    if verdicts.windows(2).any(|w| w[0] != w[1]) {
        eprintln!("procedures disagree");
        std::process::exit(2);
    }

    let exit_code = match verdicts.first() {
        Some(true) => 0,
        _ => 1,
    };
    std::process::exit(exit_code);
}

fn parse_from<R: Read>(reader: R, plain: bool) -> Result<Formula, DimacsParseError> {
    if plain {
        parse_plain(reader)
    } else {
        parse(reader)
    }
}

fn parse_from_file(path: &str, plain: bool) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse_from(file, plain)
}
