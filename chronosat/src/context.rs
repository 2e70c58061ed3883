//! Central solver data structure.
//!
//! This module defines the `Context` struct which holds all data used while
//! solving. Functions operating on several parts of it take partial
//! references, which document their data dependencies and satisfy the borrow
//! checker without passing long lists of individual references.
use partial_ref::{part, partial, PartialRef, PartialRefTarget};

use crate::formula::Formula;
use crate::prop::{Trial, Watchlists};
use crate::state::SolverState;
use crate::tmp::TmpData;

/// Part declarations for the [`Context`] struct.
pub mod parts {
    use super::*;

    part!(pub FormulaP: Formula);
    part!(pub SolverStateP: SolverState);
    part!(pub TmpDataP: TmpData);
    part!(pub TrialP: Trial);
    part!(pub WatchlistsP: Watchlists);
}

pub use parts::*;

/// Central solver data structure.
#[derive(PartialRefTarget, Default)]
pub struct Context {
    #[part(FormulaP)]
    pub formula: Formula,
    #[part(SolverStateP)]
    pub solver_state: SolverState,
    #[part(TmpDataP)]
    pub tmp_data: TmpData,
    #[part(TrialP)]
    pub trial: Trial,
    #[part(WatchlistsP)]
    pub watchlists: Watchlists,
}

/// Update structures for a new variable count.
pub fn set_var_count(
    mut ctx: partial!(Context, mut FormulaP, mut TrialP, mut WatchlistsP),
    count: usize,
) {
    ctx.part_mut(FormulaP).set_var_count(count);
    ctx.part_mut(TrialP).set_var_count(count);
    ctx.part_mut(WatchlistsP).set_var_count(count);
}
