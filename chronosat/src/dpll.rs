//! The decide / propagate / backtrack search loop.
use log::debug;
use partial_ref::{partial, PartialRef};

use crate::context::{Context, FormulaP, TrialP, WatchlistsP};
use crate::decision::make_decision;
use crate::prop::{do_assert, propagate};
use crate::state::SatState;

/// Run the search on a loaded formula until a verdict is reached.
///
/// Expects the preprocessor to have left the state undecided: all stored
/// clauses have two or more literals and the watch index covers them.
pub fn search(mut ctx: partial!(Context, mut FormulaP, mut TrialP, mut WatchlistsP)) -> SatState {
    loop {
        propagate(ctx.borrow());

        if ctx.part(TrialP).conflict() {
            if ctx.part(TrialP).level() == 0 {
                // Falsified without a single open decision.
                return SatState::Unsat;
            }
            backtrack(ctx.borrow());
        } else if ctx
            .part(TrialP)
            .vars_in()
            .equal_support(ctx.part(FormulaP).appears())
        {
            // Every formula variable has a value and nothing is falsified.
            return SatState::Sat;
        } else {
            make_decision(ctx.borrow());
        }
    }
}

/// Undo the most recent decision and assert its negation in its place.
///
/// The flipped literal carries no decision marker, so it now belongs to the
/// enclosing level: flipping the only alternative of a refuted branch is a
/// forced consequence, not a new choice.
pub fn backtrack(mut ctx: partial!(Context, mut FormulaP, mut TrialP, mut WatchlistsP)) {
    let decision = ctx.part_mut(TrialP).pop_through_last_decision();
    ctx.part_mut(TrialP).clear_conflict();

    let flipped = !decision.strip_decision();

    debug!(
        "backtrack to level {}, flipping {}",
        ctx.part(TrialP).level(),
        decision.strip_decision()
    );

    do_assert(ctx.borrow(), flipped);
}
