//! Service layer: curriculum evaluation

pub mod trainer;

pub use trainer::{Evaluation, Trainer};
