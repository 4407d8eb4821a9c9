//! Candidate lookups and their distributions

/// Colour-keyed candidate indices
pub mod indices;
/// Distribution summaries of the indices
pub mod statistics;
