/// Rate functions.
pub mod ease;
/// Animation kinds and their parameters.
pub mod kind;
