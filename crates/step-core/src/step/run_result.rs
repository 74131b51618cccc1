use crate::errors::StepFailure;

/// Resultado abstracto de ejecutar el cuerpo de un step.
///
/// El interceptor traduce esto a un `StepOutcome`: `Success` -> SUCCESS,
/// `Failure` -> FAILURE + activación de la cascada. Pending, ignored y
/// skipped nunca salen del cuerpo: los decide el interceptor antes de
/// invocarlo.
pub enum StepRunResult {
    Success,
    Failure { error: StepFailure },
}
