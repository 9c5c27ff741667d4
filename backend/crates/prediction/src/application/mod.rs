//! Application Layer
//!
//! Use cases and application services.

pub mod reference_data;
pub mod submit_prediction;

// Re-exports
pub use reference_data::ReferenceDataUseCase;
pub use submit_prediction::{
    SubmitPredictionInput, SubmitPredictionOutput, SubmitPredictionUseCase,
};
