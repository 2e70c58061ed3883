//! A DPLL based SAT solver using the two-watched-literal propagation scheme.
//!
//! The solver decides satisfiability of CNF formulas by chronological
//! backtracking search: assert a branching literal, propagate all forced
//! consequences through watched literals, and on conflict flip the most
//! recent decision. There is no clause learning and no restarting; a
//! conflict with no decision left on the trail means the formula is
//! unsatisfiable, and a trail covering every variable of the formula means
//! it is satisfiable.

pub mod config;
pub mod solver;

mod clause;
mod context;
mod decision;
mod dpll;
mod formula;
mod load;
mod prop;
mod state;
mod storage;
mod tmp;
mod vars;


pub use chronosat_formula::{CnfFormula, Lit, Var};
pub use solver::Solver;
pub use state::SatState;
