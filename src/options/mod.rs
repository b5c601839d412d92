/// Cumulative option state and parsed fragments.
pub mod state;
/// Static option vocabulary.
pub mod vocab;
