//! Chunk resolution: grouping, tuple sizing, implicit domains and broadcasting.

/// Broadcast curve counting and per-curve option reconciliation.
pub mod broadcast;
/// Chunk Builder and the resolved [`builder::Chunk`] type.
pub mod builder;
/// Implicit-domain synthesis.
pub mod domain;
/// Tuple-size resolution.
pub mod tuple;
