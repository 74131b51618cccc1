//! steptrace-rust: fachada de la librería de trazado de steps
//!
//! Este crate actúa como punto de entrada del workspace:
//! - Re-exporta el motor (`step-core`) y los adaptadores de referencia
//!   (`step-adapters`).
//! - Expone `config` para la configuración por entorno del binario demo.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;

pub use step_adapters as adapters;
pub use step_core as engine;

#[cfg(test)]
mod tests {
    use step_core::errors::{InterceptError, StepFailure};

    #[test]
    fn step_failure_display() {
        let f = StepFailure::Assertion("oh bother".into()).to_string();
        assert_eq!(f, "assertion failed: oh bother");
    }

    #[test]
    fn intercept_error_keeps_failure_identity() {
        let original = StepFailure::Unchecked("boom".into());
        let err = InterceptError::from(original.clone());
        assert_eq!(err.into_failure(), original);
    }
}
