//! Contratos de step: descripción ejecutada, outcome, metadatos y librería.

mod description;
mod library;
mod outcome;
mod run_result;

pub use description::ExecutedStepDescription;
pub use library::{StepLibrary, StepLibraryMetadata, StepSpec};
pub use outcome::StepOutcome;
pub use run_result::StepRunResult;
