//! Boolean satisfiability solver front end.
use std::io;

use anyhow::{ensure, Error};
use log::info;
use partial_ref::{IntoPartialRefMut, PartialRef};

use chronosat_formula::{CnfFormula, Lit};

use crate::config::SolverConfig;
use crate::context::{set_var_count, Context, SolverStateP, TrialP};
use crate::dpll::search;
use crate::load::load_formula;
use crate::state::SatState;

/// A DPLL satisfiability solver.
///
/// Collects a raw formula through [`add_clause`](Solver::add_clause),
/// [`add_formula`](Solver::add_formula) or
/// [`add_dimacs_cnf`](Solver::add_dimacs_cnf) and decides it with
/// [`solve`](Solver::solve). Each solve runs on fresh search state built
/// from the collected formula, so repeated calls return the same verdict.
#[derive(Default)]
pub struct Solver {
    config: SolverConfig,
    formula: CnfFormula,
    model: Option<Vec<Lit>>,
}

impl Solver {
    /// Create a new solver with default configuration.
    pub fn new() -> Solver {
        Solver::default()
    }

    /// Create a new solver with the given configuration.
    pub fn with_config(config: SolverConfig) -> Solver {
        Solver {
            config,
            ..Solver::default()
        }
    }

    /// Add a clause to the formula.
    ///
    /// Variable indices must stay within [`Var::max_var`](chronosat_formula::Var::max_var).
    pub fn add_clause(&mut self, lits: &[Lit]) {
        self.formula.add_clause(lits);
        self.model = None;
    }

    /// Add all clauses of a formula.
    pub fn add_formula(&mut self, formula: &CnfFormula) {
        self.formula.set_var_count(formula.var_count());
        for clause in formula.iter() {
            self.formula.add_clause(clause);
        }
        self.model = None;
    }

    /// Read and add a formula in DIMACS CNF format.
    ///
    /// Fails on malformed input and when the input declares more variables
    /// than the configured limit.
    pub fn add_dimacs_cnf(&mut self, input: impl io::Read) -> Result<(), Error> {
        let parsed = chronosat_dimacs::parse_dimacs(input)?;

        ensure!(
            parsed.var_count() <= self.config.max_vars,
            "formula has {} variables while the limit is {}",
            parsed.var_count(),
            self.config.max_vars
        );

        info!(
            "parsed formula with {} variables and {} clauses",
            parsed.var_count(),
            parsed.len()
        );

        self.add_formula(&parsed);
        Ok(())
    }

    /// Decide satisfiability of the current formula.
    pub fn solve(&mut self) -> bool {
        let mut ctx = Context::default();
        let verdict;
        let assignment;
        {
            let mut ctx_ref = ctx.into_partial_ref_mut();
            set_var_count(ctx_ref.borrow(), self.formula.var_count());

            load_formula(ctx_ref.borrow(), &self.formula);

            verdict = match ctx_ref.part(SolverStateP).sat_state {
                SatState::Unknown => search(ctx_ref.borrow()),
                decided => decided,
            };

            assignment = ctx_ref
                .part(TrialP)
                .assigned()
                .iter()
                .map(|lit| lit.strip_decision())
                .collect::<Vec<_>>();
        }

        info!("verdict: {:?}", verdict);

        self.model = match verdict {
            SatState::Sat => Some(assignment),
            _ => None,
        };

        verdict == SatState::Sat
    }

    /// A satisfying assignment found by the most recent
    /// [`solve`](Solver::solve), as a set of true literals.
    ///
    /// Variables the formula never constrained may be missing; they can take
    /// either value.
    pub fn model(&self) -> Option<Vec<Lit>> {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use chronosat_formula::{cnf_formula, lits, test::*};
    use chronosat_dimacs::write_dimacs;

    #[test]
    fn trivial_formulas() {
        let mut solver = Solver::new();
        assert!(solver.solve());

        solver.add_clause(&lits![1]);
        assert!(solver.solve());

        solver.add_clause(&lits![-1]);
        assert!(!solver.solve());
    }

    #[test]
    fn verdicts_for_small_formulas() {
        let cases = vec![
            (cnf_formula![1;], true),
            (cnf_formula![1; -1;], false),
            (cnf_formula![1, 2; -1, 3; -2, -3;], true),
            (cnf_formula![1, 2; -1, 2; 1, -2; -1, -2;], false),
            (cnf_formula![1, -1, 2; 3;], true),
            (
                cnf_formula![1, 2; -1, 3; -2, 4; -3, -4; -1, -2, -3, -4;],
                true,
            ),
        ];

        for (formula, expected) in cases {
            let mut solver = Solver::new();
            solver.add_formula(&formula);
            assert_eq!(solver.solve(), expected, "formula {:?}", formula);
        }
    }

    #[test]
    fn model_satisfies_input() {
        let formula = cnf_formula![
            1, 2;
            -1, 3;
            -2, 4;
            -3, -4;
        ];

        let mut solver = Solver::new();
        solver.add_formula(&formula);
        assert!(solver.solve());

        let model = solver.model().unwrap();
        for clause in formula.iter() {
            assert!(clause.iter().any(|lit| model.contains(lit)));
        }
    }

    #[test]
    fn model_is_cleared_by_new_clauses() {
        let mut solver = Solver::new();
        solver.add_clause(&lits![1]);
        assert!(solver.solve());
        assert!(solver.model().is_some());

        solver.add_clause(&lits![-1]);
        assert!(solver.model().is_none());
        assert!(!solver.solve());
        assert!(solver.model().is_none());
    }

    #[test]
    fn repeated_solves_are_deterministic() {
        let mut solver = Solver::new();
        solver.add_formula(&cnf_formula![1, 2; -1, 3; -2, -3;]);

        let first = solver.solve();
        for _ in 0..3 {
            assert_eq!(solver.solve(), first);
        }
    }

    #[test]
    fn pigeonholes_are_unsat() {
        for holes in 1..5 {
            let mut solver = Solver::new();
            solver.add_formula(&pigeonhole_formula(holes));
            assert!(!solver.solve(), "{} holes", holes);
        }
    }

    #[test]
    fn dimacs_input() {
        let mut solver = Solver::new();
        solver
            .add_dimacs_cnf(b"p cnf 3 3\n1 2 0\n-1 3 0\n-2 -3 0\n" as &[_])
            .unwrap();
        assert!(solver.solve());
    }

    #[test]
    fn dimacs_var_limit() {
        let mut solver = Solver::with_config(SolverConfig { max_vars: 4 });

        let err = solver
            .add_dimacs_cnf(b"p cnf 5 1\n5 0\n" as &[_])
            .unwrap_err();
        assert!(err.to_string().contains("limit"));

        solver
            .add_dimacs_cnf(b"p cnf 4 1\n4 0\n" as &[_])
            .unwrap();
    }

    proptest! {
        #[test]
        fn sat(formula in sat_formula(4..20usize, 10..100, 0..6)) {
            let mut solver = Solver::new();

            solver.add_formula(&formula);

            prop_assert!(solver.solve());

            let model = solver.model().unwrap();

            for clause in formula.iter() {
                prop_assert!(clause.iter().any(|lit| model.contains(lit)));
            }
        }

        #[test]
        fn sat_via_dimacs(formula in sat_formula(4..20usize, 10..100, 0..6)) {
            let mut solver = Solver::new();

            let mut dimacs = vec![];

            write_dimacs(&mut dimacs, &formula).unwrap();

            solver.add_dimacs_cnf(&mut &dimacs[..]).unwrap();

            prop_assert!(solver.solve());
        }
    }
}
