//! Assertion of literals and propagation to fixpoint.
//!
//! Asserting a literal falsifies its negation, so only the clauses watching
//! that negation can have become unit or false. Their list is rebuilt in one
//! pass: clauses that are already satisfied or that find a replacement watch
//! leave the list, clauses with no replacement stay and either imply their
//! other watch or raise a conflict. The scan runs to completion even after a
//! conflict so the watch invariant holds when it returns; the search loop
//! observes the conflict flag afterwards.
use log::trace;
use partial_ref::{partial, PartialRef};

use chronosat_formula::Lit;

use crate::context::{Context, FormulaP, TrialP, WatchlistsP};
use crate::storage::Buf;

/// Assert a literal and notify the watchers of its negation.
///
/// The literal's variable must be unassigned. The decision marker is kept on
/// the trial but stripped before computing the newly falsified literal, as
/// watchlists are keyed by marker-free literals.
pub fn do_assert(
    mut ctx: partial!(Context, mut FormulaP, mut TrialP, mut WatchlistsP),
    lit: Lit,
) {
    debug_assert!(ctx.part(TrialP).is_undef(lit));

    ctx.part_mut(TrialP).assert_lit(lit);

    let falsified = !lit.strip_decision();
    notify_watches(ctx.borrow(), falsified);
}

/// Assert queued implications until the queue runs dry or a conflict shows
/// up.
pub fn propagate(mut ctx: partial!(Context, mut FormulaP, mut TrialP, mut WatchlistsP)) {
    while !ctx.part(TrialP).conflict() {
        match ctx.part_mut(TrialP).take_implied() {
            Some(lit) => {
                trace!("propagate {}", lit);
                do_assert(ctx.borrow(), lit);
            }
            None => break,
        }
    }
}

/// Restore the watch invariant for all clauses watching `falsified`.
fn notify_watches(
    mut ctx: partial!(Context, mut FormulaP, mut TrialP, mut WatchlistsP),
    falsified: Lit,
) {
    let (watchlists, mut ctx) = ctx.split_part_mut(WatchlistsP);

    let old_list = watchlists.take_list(falsified);
    let mut kept = Buf::with_capacity(old_list.len());

    for &cref in old_list.iter() {
        let (watch1, watch2) = {
            let clause = ctx.part(FormulaP).clause(cref);
            (clause.watch1(), clause.watch2())
        };

        // Already satisfied through the primary watch: nothing to do.
        if ctx.part(TrialP).is_true(watch1) {
            kept.push(cref);
            continue;
        }

        // Stale entry, neither watch is the falsified literal.
        if watch1 != falsified && watch2 != falsified {
            kept.push(cref);
            continue;
        }

        // Move the falsified literal into the secondary watch position.
        if watch1 == falsified {
            ctx.part_mut(FormulaP).clause_mut(cref).swap_watches();
        }

        let watch1 = ctx.part(FormulaP).clause(cref).watch1();
        if ctx.part(TrialP).is_true(watch1) {
            kept.push(cref);
            continue;
        }

        // Look for a non-false literal beyond the watches to take over.
        let len = ctx.part(FormulaP).clause(cref).len();
        let mut replacement = None;
        for index in 2..len {
            let lit = ctx.part(FormulaP).clause(cref).lits()[index];
            if !ctx.part(TrialP).is_false(lit) {
                replacement = Some((index, lit));
                break;
            }
        }

        match replacement {
            Some((index, lit)) => {
                // The clause migrates to the replacement's list.
                debug_assert!(lit != falsified);
                ctx.part_mut(FormulaP).clause_mut(cref).set_watch2(index);
                watchlists.add_watch(lit, cref);
            }
            None => {
                kept.push(cref);
                if ctx.part(TrialP).is_false(watch1) {
                    ctx.part_mut(TrialP).set_conflict();
                } else {
                    ctx.part_mut(TrialP).queue_implied(watch1);
                }
            }
        }
    }

    watchlists.install_list(falsified, kept);
}

#[cfg(test)]
mod tests {
    use super::*;

    use partial_ref::IntoPartialRefMut;

    use chronosat_formula::{lit, lits};

    use crate::clause::{Clause, ClauseIdx};
    use crate::context::set_var_count;

    fn context_with_clauses(clauses: &[&[Lit]]) -> Context {
        let mut ctx = Context::default();
        {
            let mut ctx_ref = ctx.into_partial_ref_mut();
            let var_count = clauses
                .iter()
                .flat_map(|clause| clause.iter().map(|lit| lit.index() + 1))
                .max()
                .unwrap_or(0);
            set_var_count(ctx_ref.borrow(), var_count);

            for &clause_lits in clauses {
                for &lit in clause_lits {
                    ctx_ref.part_mut(TrialP).add_candidate(lit.var());
                    ctx_ref.part_mut(FormulaP).mark_var(lit.var());
                }
                let clause = Clause::new(clause_lits);
                let watches = [clause.watch1(), clause.watch2()];
                let cref = ctx_ref.part_mut(FormulaP).insert(clause);
                ctx_ref.part_mut(WatchlistsP).watch_clause(cref, watches);
            }
        }
        ctx
    }

    #[test]
    fn watch_migrates_to_healthy_literal() {
        let mut ctx = context_with_clauses(&[&lits![1, 2, 3][..]]);
        let mut ctx = ctx.into_partial_ref_mut();

        do_assert(ctx.borrow(), lit!(-1));

        // Position 0/1 now hold non-false literals and the lists follow.
        let clause = ctx.part(FormulaP).clause(ClauseIdx::new(0));
        assert_eq!(clause.watch1(), lit!(2));
        assert_eq!(clause.watch2(), lit!(3));

        assert!(ctx.part(WatchlistsP).watched_by(lit!(1)).is_empty());
        assert_eq!(ctx.part(WatchlistsP).watched_by(lit!(3)).len(), 1);
        assert!(ctx.part(TrialP).queued().is_empty());
        assert!(!ctx.part(TrialP).conflict());
    }

    #[test]
    fn unit_clause_queues_its_watch() {
        let mut ctx = context_with_clauses(&[&lits![1, 2][..]]);
        let mut ctx = ctx.into_partial_ref_mut();

        do_assert(ctx.borrow(), lit!(-1));

        assert_eq!(ctx.part(TrialP).queued(), &[lit!(2)]);

        propagate(ctx.borrow());

        assert!(ctx.part(TrialP).is_true(lit!(2)));
        assert!(!ctx.part(TrialP).conflict());
    }

    #[test]
    fn contradicting_implications_conflict() {
        let mut ctx = context_with_clauses(&[&lits![1, 2][..], &lits![1, -2][..]]);
        let mut ctx = ctx.into_partial_ref_mut();

        do_assert(ctx.borrow(), lit!(-1).as_decision());
        propagate(ctx.borrow());

        assert!(ctx.part(TrialP).conflict());
    }

    #[test]
    fn satisfied_clause_is_left_alone() {
        let mut ctx = context_with_clauses(&[&lits![1, 2, 3][..]]);
        let mut ctx = ctx.into_partial_ref_mut();

        do_assert(ctx.borrow(), lit!(1));
        do_assert(ctx.borrow(), lit!(-2));

        // Satisfied through watch1, so the watches stay where they are.
        let clause = ctx.part(FormulaP).clause(ClauseIdx::new(0));
        assert_eq!(clause.watch1(), lit!(1));
        assert_eq!(clause.watch2(), lit!(2));
        assert_eq!(ctx.part(WatchlistsP).watched_by(lit!(2)).len(), 1);
    }
}
