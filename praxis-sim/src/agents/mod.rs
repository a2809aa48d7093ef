//! Reference agents for simulation runs.

mod random;
mod tabular;

pub use random::RandomAgent;
pub use tabular::{TabularAgent, TabularConfig};
