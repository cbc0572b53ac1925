//! 3-CNF satisfiability via the reduction to vertex cover.
//!
//! A formula with `n` variables and `m` clauses is turned into a gadget graph:
//! * one edge `x_i - ¬x_i` per variable (nodes `2(i-1)` and `2(i-1)+1`),
//! * one triangle per clause, one node per literal occurrence (nodes from `2n` on),
//! * an edge from every clause node to the variable node of the same literal.
//!
//! Every cover holds at least one node per variable edge and two nodes per triangle, so it has
//! at least `n + 2m` nodes. A cover of exactly that size exists iff the formula is satisfiable:
//! the variable node inside the cover is the true literal, and the clause node left out of each
//! triangle is covered through its edge to that literal.
//!
//! Gadget nodes carry no self-loops: a self-loop forces its node into every cover, which would
//! rule out any cover of size `n + 2m`.

use std::fmt;
use std::io::BufRead;
use fxhash::{FxHashMap, FxHashSet};
use log::debug;
use crate::bounded_search::k_vertex_cover;
use crate::cust_error::ImportError;
use crate::graph::UGraph;

/// A variable together with a polarity.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Literal {
    /// Variable id, starting at 1.
    pub var: usize,
    pub positive: bool,
}

impl Literal {

    pub fn new(var: usize, positive: bool) -> Self {
        Literal { var, positive }
    }

    /// Largest variable id a literal may carry.
    pub const MAX_VAR: usize = i32::MAX as usize;

    /// Converts a signed integer in DIMACS convention. Returns `None` for `0` and for ids above
    /// `Literal::MAX_VAR`.
    pub fn from_int(value: i64) -> Option<Self> {
        if value == 0 || value.unsigned_abs() > Self::MAX_VAR as u64 {
            return None
        }
        Some(Literal::new(value.unsigned_abs() as usize, value > 0))
    }

    pub fn to_int(&self) -> i64 {
        if self.positive { self.var as i64 } else { -(self.var as i64) }
    }

    pub fn negated(&self) -> Self {
        Literal::new(self.var, !self.positive)
    }

    /// Checks if `self` is true under `assignment`, where `assignment[i]` is the value of
    /// variable `i + 1`. Unassigned variables satisfy nothing.
    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        assignment.get(self.var - 1).map_or(false, |value| *value == self.positive)
    }

}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_int())
    }
}

/// A node of the gadget graph.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GadgetNode {
    pub literal: Literal,
    /// `true` for clause triangle nodes, `false` for variable nodes.
    pub clause: bool,
}

/// A formula in conjunctive normal form with exactly three literals per clause.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CnfFormula {
    literals: Vec<Literal>,
    num_vars: usize,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Satisfiability {
    /// `assignment[i]` holds the value of variable `i + 1`.
    Satisfiable(Vec<bool>),
    Unsatisfiable,
}

impl CnfFormula {

    /// Creates a formula from a flat sequence of literals, grouped into clauses of three in
    /// order. The number of variables is the largest variable id.
    pub fn new(values: &[i64]) -> Result<Self, ImportError> {
        if values.len() % 3 != 0 {
            return Err(ImportError::FormatError(
                format!("{} literals do not form clauses of three", values.len())))
        }
        let literals = values.iter()
            .map(|value| Literal::from_int(*value).ok_or_else(|| match *value {
                0 => ImportError::FormatError("literal 0 is not allowed".to_owned()),
                _ => ImportError::FormatError(
                    format!("literal {} exceeds the largest variable id {}", value, Literal::MAX_VAR)),
            }))
            .collect::<Result<Vec<_>, _>>()?;
        let num_vars = literals.iter().map(|lit| lit.var).max().unwrap_or(0);
        Ok(CnfFormula { literals, num_vars })
    }

    /// Parses one line of whitespace separated signed integers.
    pub fn parse_line(line: &str) -> Result<Self, ImportError> {
        let values = line.split_whitespace()
            .map(|token| token.parse::<i64>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&values)
    }

    /// Reads one formula per non-empty line.
    ///
    /// Returns an `ImportError` if reading fails, otherwise one result per formula, so a
    /// malformed line does not stop the remaining ones from being read.
    pub fn read_batch<R: BufRead>(input: R) -> Result<Vec<Result<Self, ImportError>>, ImportError> {
        let mut formulas = Vec::new();
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue
            }
            formulas.push(Self::parse_line(&line));
        }
        Ok(formulas)
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_clauses(&self) -> usize {
        self.literals.len() / 3
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Returns an iterator over the clauses.
    pub fn clauses(&self) -> impl Iterator<Item=&[Literal]> + '_ {
        self.literals.chunks(3)
    }

    /// Checks if `assignment` satisfies every clause.
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        self.clauses()
            .all(|clause| clause.iter().any(|lit| lit.is_satisfied_by(assignment)))
    }

    /// Builds the gadget graph of `self`.
    pub fn gadget(&self) -> CnfGadget {
        let n = self.num_vars;
        let mut nodes = Vec::with_capacity(2 * n + self.literals.len());
        for var in 1..=n {
            nodes.push(GadgetNode { literal: Literal::new(var, true), clause: false });
            nodes.push(GadgetNode { literal: Literal::new(var, false), clause: false });
        }
        nodes.extend(self.literals.iter().map(|lit| GadgetNode { literal: *lit, clause: true }));

        let mut graph = UGraph::new(nodes.len());
        let mut variable_nodes: FxHashMap<Literal, usize> = FxHashMap::default();
        for (id, node) in nodes.iter().enumerate().take(2 * n) {
            variable_nodes.insert(node.literal, id);
        }
        for var in 0..n {
            graph.add_edge(2 * var, 2 * var + 1);
        }
        for clause in 0..self.num_clauses() {
            let first = 2 * n + 3 * clause;
            graph.add_edge(first, first + 1);
            graph.add_edge(first, first + 2);
            graph.add_edge(first + 1, first + 2);
        }
        for (id, node) in nodes.iter().enumerate().skip(2 * n) {
            let var_node = *variable_nodes
                .get(&node.literal)
                .expect("every variable up to `num_vars` has a gadget");
            graph.add_edge(id, var_node);
        }
        CnfGadget {
            graph,
            nodes,
            num_vars: n,
            num_clauses: self.num_clauses(),
        }
    }

    /// Decides satisfiability of `self` by searching a vertex cover of size `n + 2m` in the
    /// gadget graph and reads the assignment off the variable gadgets.
    pub fn satisfy(&self) -> Satisfiability {
        let gadget = self.gadget();
        let k = gadget.target_cover_size();
        let cover = k_vertex_cover(&gadget.graph, k);
        debug!("satisfy: n={} m={} |V|={} k={} cover size={}",
               self.num_vars, self.num_clauses(), gadget.graph.num_nodes(), k, cover.len());
        if cover.len() != k {
            return Satisfiability::Unsatisfiable
        }
        let assignment = gadget
            .assignment_from_cover(&cover)
            .expect("a cover of size n + 2m holds exactly one node per variable gadget");
        Satisfiability::Satisfiable(assignment)
    }

}

/// The gadget graph of a `CnfFormula` together with the meaning of its nodes.
#[derive(Debug, Clone)]
pub struct CnfGadget {
    pub graph: UGraph,
    pub nodes: Vec<GadgetNode>,
    num_vars: usize,
    num_clauses: usize,
}

impl CnfGadget {

    /// Size `n + 2m` of a cover that encodes a satisfying assignment.
    pub fn target_cover_size(&self) -> usize {
        self.num_vars + 2 * self.num_clauses
    }

    /// Returns the variable node of `literal`.
    pub fn variable_node(&self, literal: Literal) -> usize {
        2 * (literal.var - 1) + if literal.positive { 0 } else { 1 }
    }

    /// Reads an assignment off `cover`: if `¬x_i` is left out, `x_i` is true, if `x_i` is left
    /// out, it is false. Returns `None` if some variable gadget does not have exactly one node
    /// in `cover`.
    pub fn assignment_from_cover(&self, cover: &FxHashSet<usize>) -> Option<Vec<bool>> {
        (1..=self.num_vars)
            .map(|var| {
                let pos = cover.contains(&self.variable_node(Literal::new(var, true)));
                let neg = cover.contains(&self.variable_node(Literal::new(var, false)));
                match (pos, neg) {
                    (true, false) => Some(true),
                    (false, true) => Some(false),
                    _ => None,
                }
            })
            .collect()
    }

}
