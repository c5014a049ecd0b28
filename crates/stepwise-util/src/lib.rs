//! stepwise-util - Seeded deterministic generators for the stepwise engines.
//!
//! Test suites and demo bins draw their values, arrays, and random
//! connected graphs from here so every run is reproducible from a seed.

pub mod gen;

// Re-exports for convenience
pub use gen::SeededGen;
