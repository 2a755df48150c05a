//! Random number generation module, built on the "rand" crate ecosystem.
//!
//! A single generator is created by the driver, seeded once, and lent to each
//! processing step in turn. Every consumer draws from it in a fixed order, which
//! is what makes a run reproducible for a given seed.

mod standard;

/// Select the RNG implementation in use
pub use self::standard::RandGenerator as RandomGenerator;
