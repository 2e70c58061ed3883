//! Formula data types used by the chronosat SAT solver.

/// Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! lit {
    ($x:expr) => {
        $crate::Lit::from_dimacs($x)
    };
}

/// Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! var {
    ($x:expr) => {
        $crate::Var::from_dimacs($x)
    };
}

/// Clause of DIMACS integers, as a `Vec<Lit>`. Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! lits {
    ( $( $x:expr ),* $(,)? ) => {
        vec![ $( $crate::lit!( $x ) ),* ]
    };
}

/// Semicolon-separated clauses of DIMACS integers, as a `Vec<Vec<Lit>>`.
/// Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! cnf {
    ( $( $( $x:expr ),* );* ; ) => {
        vec![ $( $crate::lits![ $( $x ),* ] ),* ]
    };
}

/// [`cnf!`] collected into a [`CnfFormula`]. Shortcut for tests
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! cnf_formula {
    ( $( $t:tt )* ) => {
        $crate::CnfFormula::from($crate::cnf![ $( $t )* ])
    };
}

pub mod cnf;
pub mod lit;


pub use cnf::CnfFormula;
pub use lit::{Lit, Var};
