//! Human readable output of the drivers.

use std::fmt::Display;
use std::io::{self, Write};
use std::time::Duration;
use fxhash::FxHashSet;
use crate::cnf::{CnfFormula, Literal, Satisfiability};
use crate::graph::UGraph;

/// Formats `set` as `{a, b, c}` in ascending order.
pub fn format_set(set: &FxHashSet<usize>) -> String {
    let mut nodes: Vec<usize> = set.iter().copied().collect();
    nodes.sort_unstable();
    let inner: Vec<String> = nodes.iter().map(|node| node.to_string()).collect();
    format!("{{{}}}", inner.join(", "))
}

pub fn write_cover_header<W: Write>(mut out: W, file: &str) -> io::Result<()> {
    writeln!(out, "* A Minimum Vertex Cover of every graph in {} *", file)?;
    writeln!(out, "   (|V|,|E|)   (size, ms used) Vertex Cover")
}

pub fn write_clique_header<W: Write>(mut out: W, file: &str, k: Option<usize>) -> io::Result<()> {
    match k {
        Some(k) => writeln!(out, "* {}-Cliques in graphs in {} (reduced to K-Vertex Cover) *", k, file)?,
        None => writeln!(out, "* Max Cliques in graphs in {} (reduced to K-Vertex Cover) *", file)?,
    }
    writeln!(out, "    (|V|,|E|)   (size, ms used) Cliques")
}

/// Writes one result line `G1(4, 3) (size=2, ms=0) {1, 2}`.
pub fn write_graph_line<W: Write>(mut out: W, index: usize, graph: &UGraph, set: &FxHashSet<usize>,
                                  elapsed: Duration) -> io::Result<()> {
    writeln!(out, "G{}({}, {}) (size={}, ms={}) {}", index, graph.num_nodes(), graph.num_edges(),
             set.len(), elapsed.as_millis(), format_set(set))
}

/// Writes one line for an instance that could not be read.
pub fn write_skipped<W: Write>(mut out: W, label: &str, err: &dyn Display) -> io::Result<()> {
    writeln!(out, "{}: skipped, {}", label, err)
}

/// Formats an assignment as `1:T 2:F `.
pub fn format_assignment(assignment: &[bool]) -> String {
    assignment.iter()
        .enumerate()
        .map(|(i, value)| format!("{}:{} ", i + 1, if *value { "T" } else { "F" }))
        .collect()
}

fn format_clauses<F: Fn(&Literal) -> String>(formula: &CnfFormula, render: F) -> String {
    let clauses: Vec<String> = formula.clauses()
        .map(|clause| clause.iter().map(&render).collect::<Vec<_>>().join("|"))
        .collect();
    format!("({})", clauses.join(")^("))
}

/// Formats `formula` as `( 1| 2|-3)^(-1| 2| 3)`.
pub fn format_formula(formula: &CnfFormula) -> String {
    format_clauses(formula, |lit| format!("{:>2}", lit.to_int()))
}

/// Formats the value of every literal of `formula` under `assignment`, as `( T| F| T)`.
pub fn format_evaluated(formula: &CnfFormula, assignment: &[bool]) -> String {
    format_clauses(formula, |lit| {
        if lit.is_satisfied_by(assignment) { " T".to_owned() } else { " F".to_owned() }
    })
}

/// Writes the result block of one formula.
pub fn write_cnf_result<W: Write>(mut out: W, index: usize, formula: &CnfFormula,
                                  result: &Satisfiability, elapsed: Duration) -> io::Result<()> {
    write!(out, "3CNF No. {}: [n={} k={}] ({} ms) ", index, formula.num_vars(),
           formula.num_clauses(), elapsed.as_millis())?;
    match result {
        Satisfiability::Satisfiable(assignment) => {
            writeln!(out, "Solution:[{}]", format_assignment(assignment))?;
            writeln!(out, "{} ==>", format_formula(formula))?;
            writeln!(out, "{}", format_evaluated(formula, assignment))?;
        }
        Satisfiability::Unsatisfiable => {
            writeln!(out, "No Solution")?;
            writeln!(out, "{}", format_formula(formula))?;
        }
    }
    writeln!(out, " ")
}
