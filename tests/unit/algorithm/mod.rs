pub mod bitset;
pub mod constraint;
pub mod executor;
pub mod propagation;
