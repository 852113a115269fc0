//! Genetic adaptation: fitness scoring and generational trait rewriting.

mod fitness;
mod strategy;

pub use fitness::*;
pub use strategy::*;
