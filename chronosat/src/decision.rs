//! Branching.
use log::debug;
use partial_ref::{partial, PartialRef};

use crate::context::{Context, FormulaP, TrialP, WatchlistsP};
use crate::prop::do_assert;

/// Pick an open variable and assert it as a decision.
///
/// Branches on the positive literal first; the opposite polarity is reached
/// through backtracking. Must only be called while some variable is open,
/// which the search loop guarantees by checking for a full assignment first.
pub fn make_decision(mut ctx: partial!(Context, mut FormulaP, mut TrialP, mut WatchlistsP)) {
    let lit = ctx
        .part_mut(TrialP)
        .pop_branch_candidate()
        .expect("decision requested with every variable assigned");

    debug!("decide {} at level {}", lit, ctx.part(TrialP).level() + 1);

    do_assert(ctx.borrow(), lit.as_decision());
}
