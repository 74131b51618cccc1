//! Listener de referencia estilo consola.
//!
//! Renderiza cada step iniciado indentado por su profundidad, seguido al
//! concluir por una línea marcadora cuya flecha también escala con la
//! profundidad, y una etiqueta según el outcome:
//!
//! ```text
//! place_order
//! -reserve_unit
//! ---> STEP DONE
//! --> STEP DONE
//! ```
//!
//! Existe para que el contrato del interceptor sea testeable sin un
//! renderizador de reportes completo. Acumula en un buffer; no escribe a
//! stdout por sí mismo.

use std::fmt;

use super::StepListener;
use crate::errors::ListenerError;
use crate::step::{ExecutedStepDescription, StepOutcome};

pub struct ConsoleStepListener {
    buffer: String,
    depth: usize,
}

impl Default for ConsoleStepListener {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleStepListener {
    pub fn new() -> Self {
        Self { buffer: String::new(), depth: 0 }
    }

    /// Transcripción acumulada hasta el momento.
    pub fn output(&self) -> &str {
        &self.buffer
    }
}

impl StepListener for ConsoleStepListener {
    fn step_started(&mut self, description: &ExecutedStepDescription) -> Result<(), ListenerError> {
        let indent = "-".repeat(self.depth);
        self.buffer.push_str(&indent);
        self.buffer.push_str(&description.rendered_name());
        self.buffer.push('\n');
        self.depth += 1;
        Ok(())
    }

    fn step_finished(&mut self, outcome: StepOutcome) -> Result<(), ListenerError> {
        self.depth = self.depth.saturating_sub(1);
        // La flecha crece con la profundidad: "--> " en raíz, "---> " a
        // profundidad 1, etc.
        let marker = "-".repeat(self.depth + 2);
        self.buffer.push_str(&marker);
        self.buffer.push_str("> ");
        self.buffer.push_str(outcome.console_tag());
        self.buffer.push('\n');
        Ok(())
    }
}

impl fmt::Display for ConsoleStepListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.buffer)
    }
}
