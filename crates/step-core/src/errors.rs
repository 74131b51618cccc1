//! Errores específicos del motor de steps (taxonomía mínima).
//!
//! - `ConstructionError`: el interceptor no puede construirse sobre la
//!   librería dada. Fatal para el setup del escenario.
//! - `StepFailure`: fallo señalado por el cuerpo de un step. Se registra
//!   como outcome `Failure`, activa la cascada de skips y se re-señaliza
//!   al caller sin alterar su contenido.
//! - `ListenerError`: fallo aislado de un listener durante una
//!   notificación. Se reporta al sink de diagnóstico y nunca interrumpe
//!   el despacho al resto de listeners.
//! - `InterceptError`: resultado a nivel de invocación interceptada.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallo señalado por el cuerpo de un step.
///
/// `Assertion` cubre condiciones esperadas no cumplidas (estilo aserción);
/// `Unchecked` cualquier otro fallo no controlado. Ambos activan la
/// cascada: una vez registrado un fallo, los steps siguientes del run se
/// saltan en lugar de ejecutarse.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum StepFailure {
    #[error("assertion failed: {0}")] Assertion(String),
    #[error("step error: {0}")] Unchecked(String),
}

/// El interceptor no puede construirse sobre la librería dada.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConstructionError {
    #[error("step library has no group identity")] MissingGroupIdentity,
    #[error("duplicate step '{step}' in group '{group}'")] DuplicateStep { group: String, step: String },
}

/// Fallo de un listener al manejar un evento. Aislado: no aborta el
/// despacho ni altera el outcome del step.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("listener failure: {0}")]
pub struct ListenerError(pub String);

/// Error observable por el caller de una invocación interceptada.
///
/// `Failure` conserva la identidad del `StepFailure` original (se
/// re-señaliza tras la contabilidad, no se suprime). Las variantes de
/// direccionamiento cubren el equivalente Rust a "el método no existe":
/// nombres de step o de grupo anidado que los metadatos no declaran.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InterceptError {
    #[error(transparent)]
    Failure(#[from] StepFailure),
    #[error("unknown step '{group}.{step}'")]
    UnknownStep { group: String, step: String },
    #[error("unknown nested step group '{group}'")]
    UnknownGroup { group: String },
}

impl InterceptError {
    /// Colapsa a un `StepFailure` para cuerpos que re-propagan el fallo de
    /// un step anidado como fallo propio.
    pub fn into_failure(self) -> StepFailure {
        match self {
            InterceptError::Failure(error) => error,
            other => StepFailure::Unchecked(other.to_string()),
        }
    }
}
