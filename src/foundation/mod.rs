/// Core value types shared by every pipeline stage.
pub mod core;
/// Crate-wide error taxonomy.
pub mod error;
