//! The assertion trial: assignment stack, decision levels and the
//! implication queue.
use chronosat_formula::{Lit, Var};

use crate::storage::{Buf, SortedBuf};
use crate::vars::VarSet;

/// Search state of the solver.
///
/// `assigned` holds all asserted literals in assertion order, decision
/// markers preserved. `queue` holds literals that are implied but not yet
/// asserted. `vars_in` is the current assignment; `vars_out` holds the
/// formula variables still open for branching. Together they always cover
/// exactly the formula's appears-in set, and they never overlap.
#[derive(Default)]
pub struct Trial {
    assigned: Buf<Lit>,
    queue: SortedBuf<Lit>,
    level: usize,
    vars_in: VarSet,
    vars_out: VarSet,
    conflict: bool,
}

impl Trial {
    /// Update structures for a new variable count.
    pub fn set_var_count(&mut self, count: usize) {
        self.vars_in.set_var_count(count);
        self.vars_out.set_var_count(count);
    }

    /// Current decision level: the number of decision-marked literals on the
    /// stack.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Append an asserted literal.
    ///
    /// Bumps the level for decision-marked literals and moves the variable
    /// from `vars_out` to `vars_in`.
    pub fn assert_lit(&mut self, lit: Lit) {
        self.assigned.push(lit);
        if lit.is_decision() {
            self.level += 1;
        }
        self.vars_in.assert_lit(lit);
        self.vars_out.retract(lit.var());
    }

    /// Queue an implied literal for later assertion. Duplicates are
    /// suppressed.
    pub fn queue_implied(&mut self, lit: Lit) {
        debug_assert!(!lit.is_decision());
        if !self.queue.contains(&lit) {
            self.queue.insert_sorted(lit);
        }
    }

    /// Remove and return one queued literal.
    pub fn take_implied(&mut self) -> Option<Lit> {
        self.queue.pop()
    }

    /// Undo all assertions up to and including the most recent decision,
    /// which is returned.
    ///
    /// Drops any queued implications; the popped variables move back to
    /// `vars_out`. Panics if no decision is on the stack, which cannot
    /// happen for any valid input.
    pub fn pop_through_last_decision(&mut self) -> Lit {
        self.queue.clear();
        loop {
            let lit = self
                .assigned
                .pop()
                .expect("backtrack requested with no decision on the trial");
            self.vars_in.retract(lit.var());
            self.vars_out.insert_var(lit.var());
            if lit.is_decision() {
                self.level -= 1;
                return lit;
            }
        }
    }

    /// Register a variable as open for branching.
    pub fn add_candidate(&mut self, var: Var) {
        debug_assert!(!self.vars_in.contains(var));
        self.vars_out.insert_var(var);
    }

    /// Remove and return some variable open for branching, as a positive
    /// literal.
    pub fn pop_branch_candidate(&mut self) -> Option<Lit> {
        self.vars_out.pop_any()
    }

    /// Whether `lit` is true under the current assignment.
    pub fn is_true(&self, lit: Lit) -> bool {
        self.vars_in.is_true(lit)
    }

    /// Whether `lit` is false under the current assignment.
    pub fn is_false(&self, lit: Lit) -> bool {
        self.vars_in.is_false(lit)
    }

    /// Whether `lit`'s variable is unassigned.
    pub fn is_undef(&self, lit: Lit) -> bool {
        self.vars_in.is_undef(lit)
    }

    /// The current assignment.
    pub fn vars_in(&self) -> &VarSet {
        &self.vars_in
    }

    /// Whether a falsified clause was detected since the last backtrack.
    pub fn conflict(&self) -> bool {
        self.conflict
    }

    pub fn set_conflict(&mut self) {
        self.conflict = true;
    }

    pub fn clear_conflict(&mut self) {
        self.conflict = false;
    }

    /// All asserted literals in assertion order, decision markers preserved.
    pub fn assigned(&self) -> &[Lit] {
        self.assigned.as_slice()
    }

    /// The queued implications, in queue order.
    pub fn queued(&self) -> &[Lit] {
        self.queue.as_slice()
    }
}
