//! Solver configuration.

/// Configurable parameters used during solving.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Largest number of variables accepted from input files. (Default: 2048)
    pub max_vars: usize,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig { max_vars: 2048 }
    }
}
