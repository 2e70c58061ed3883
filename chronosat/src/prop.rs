//! Unit propagation.
pub mod propagate;
pub mod trial;
pub mod watch;

pub use propagate::{do_assert, propagate};
pub use trial::Trial;
pub use watch::Watchlists;
