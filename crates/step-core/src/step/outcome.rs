//! Clasificación terminal de una invocación de step.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cómo concluyó una invocación de step.
///
/// Se asigna exactamente una vez por invocación, en el momento en que el
/// step concluye (retorno normal, fallo o skip preventivo). Las
/// transiciones las decide el interceptor; un outcome nunca se revisa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepOutcome {
    /// El cuerpo retornó normalmente.
    Success,
    /// El cuerpo señaló un fallo (aserción o error no controlado).
    Failure,
    /// El step está marcado como ignorado en sus metadatos; el cuerpo no
    /// se invoca y no hay cascada.
    Ignored,
    /// Skip preventivo: el run ya había fallado, el cuerpo no se invoca.
    Skipped,
    /// El step está declarado como no implementado aún; el cuerpo no se
    /// invoca y el fallo no cascada.
    Pending,
}

impl StepOutcome {
    /// Los skips post-fallo se reportan a los listeners en la categoría
    /// "ignored", igual que los steps marcados ignorados.
    pub fn reported_as_ignored(self) -> bool {
        matches!(self, Self::Ignored | Self::Skipped)
    }

    /// Etiqueta usada por renderizadores de consola.
    pub fn console_tag(self) -> &'static str {
        match self {
            Self::Success => "STEP DONE",
            Self::Failure => "STEP FAILED",
            Self::Ignored | Self::Skipped => "STEP IGNORED",
            Self::Pending => "STEP PENDING",
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Ignored => "IGNORED",
            Self::Skipped => "SKIPPED",
            Self::Pending => "PENDING",
        };
        write!(f, "{label}")
    }
}
