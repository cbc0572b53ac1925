//! Exact vertex cover search and the Cook reductions of maximum clique and 3-CNF
//! satisfiability onto vertex cover.

pub mod graph;
pub mod cust_error;
pub mod vc_instance;
pub mod bounded_search;
pub mod clique;
pub mod cnf;
pub mod report;
pub mod cli;
