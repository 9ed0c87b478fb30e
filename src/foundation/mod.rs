/// Geometry, frame timing and color primitives.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Seeded cosmetic randomness.
pub mod rng;
