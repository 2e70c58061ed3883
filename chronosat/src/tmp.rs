//! Temporary data.
use chronosat_formula::Lit;

/// Scratch space reused across clause normalizations.
#[derive(Default)]
pub struct TmpData {
    pub lits: Vec<Lit>,
}
