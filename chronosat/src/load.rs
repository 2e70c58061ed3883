//! Loading a raw formula into the solver.
//!
//! Every input clause is normalized against the trial built so far:
//! falsified literals are dropped, satisfied and tautological clauses are
//! discarded, duplicate literals collapse. What remains decides the clause's
//! fate: nothing left proves the input unsatisfiable, a single literal is
//! asserted and propagated to fixpoint before the next clause is looked at,
//! and anything longer is stored and watched through its first two literals.
//! The stored formula therefore never contains a clause shorter than two
//! literals, which keeps the watch scheme total.
use partial_ref::{partial, PartialRef};

use chronosat_formula::{CnfFormula, Lit};

use crate::clause::Clause;
use crate::context::{Context, FormulaP, SolverStateP, TmpDataP, TrialP, WatchlistsP};
use crate::prop::{do_assert, propagate};
use crate::state::SatState;

/// Normalize and load a whole formula.
///
/// Leaves the state at `Unsat` when normalization derives the empty clause,
/// at `Sat` when every clause was discharged during loading, and at
/// `Unknown` otherwise, with the watch index covering all stored clauses.
pub fn load_formula(
    mut ctx: partial!(
        Context,
        mut FormulaP,
        mut SolverStateP,
        mut TmpDataP,
        mut TrialP,
        mut WatchlistsP,
    ),
    formula: &CnfFormula,
) {
    for clause in formula.iter() {
        load_clause(ctx.borrow(), clause);
        if ctx.part(SolverStateP).sat_state == SatState::Unsat {
            return;
        }
    }

    if ctx.part(FormulaP).is_empty() {
        ctx.part_mut(SolverStateP).sat_state = SatState::Sat;
    }
}

/// Normalize and load a single clause.
///
/// Duplicate and tautology detection scans the in-progress clause linearly;
/// clauses are short enough that this beats keeping them ordered.
pub fn load_clause(
    mut ctx: partial!(
        Context,
        mut FormulaP,
        mut SolverStateP,
        mut TmpDataP,
        mut TrialP,
        mut WatchlistsP,
    ),
    lits: &[Lit],
) {
    if ctx.part(SolverStateP).sat_state == SatState::Unsat {
        return;
    }

    let (tmp, mut ctx) = ctx.split_part_mut(TmpDataP);
    tmp.lits.clear();

    for &lit in lits {
        // Implications of earlier unit clauses already decide some literals.
        if ctx.part(TrialP).is_false(lit) {
            continue;
        }
        if ctx.part(TrialP).is_true(lit) {
            return;
        }

        if let Some(&seen) = tmp.lits.iter().find(|seen| seen.var() == lit.var()) {
            if seen == lit {
                continue;
            }
            // Opposite polarity: the clause is a tautology.
            return;
        }

        tmp.lits.push(lit);
        ctx.part_mut(TrialP).add_candidate(lit.var());
        ctx.part_mut(FormulaP).mark_var(lit.var());
    }

    match tmp.lits[..] {
        [] => {
            ctx.part_mut(SolverStateP).sat_state = SatState::Unsat;
        }
        [lit] => {
            do_assert(ctx.borrow(), lit);
            propagate(ctx.borrow());
        }
        _ => {
            let clause = Clause::new(&tmp.lits);
            let watches = [clause.watch1(), clause.watch2()];
            let cref = ctx.part_mut(FormulaP).insert(clause);
            ctx.part_mut(WatchlistsP).watch_clause(cref, watches);
        }
    }
}
