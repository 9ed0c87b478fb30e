/// Cosmetic per-object offsets.
pub mod jitter;
pub mod layout;
/// Visual objects: geometry, pose and style.
pub mod object;
/// Semantic key lookup.
pub mod registry;
pub mod script;
