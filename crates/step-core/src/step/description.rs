//! Identidad inmutable de una ocurrencia de step.
//!
//! Se construye en el momento en que el step method es invocado, con los
//! argumentos reales ya stringificados en orden de llamada. No se muta
//! nunca: los listeners y el registro de eventos comparten clones.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::MAX_ARGUMENT_LENGTH;

/// Valor inmutable que identifica una ocurrencia de step: grupo dueño,
/// nombre del step y la secuencia de argumentos stringificados.
///
/// La identidad compara por grupo + nombre + argumentos.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutedStepDescription {
    step_group: String,
    step_name: String,
    arguments: Vec<String>,
}

impl ExecutedStepDescription {
    /// Descripción de un step sin argumentos.
    pub fn new(step_group: impl Into<String>, step_name: impl Into<String>) -> Self {
        Self { step_group: step_group.into(),
               step_name: step_name.into(),
               arguments: Vec::new() }
    }

    /// Descripción con los argumentos reales de la llamada, stringificados
    /// en orden. Los valores string se renderizan sin comillas.
    pub fn with_arguments(step_group: impl Into<String>, step_name: impl Into<String>, args: &[Value]) -> Self {
        Self { step_group: step_group.into(),
               step_name: step_name.into(),
               arguments: args.iter().map(render_argument).collect() }
    }

    /// Grupo (librería de steps) dueño de la ocurrencia.
    pub fn step_group(&self) -> &str {
        &self.step_group
    }

    /// Nombre del step tal como lo declaran los metadatos.
    pub fn step_name(&self) -> &str {
        &self.step_name
    }

    /// Argumentos stringificados, en orden de llamada.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Nombre con argumentos y sin el grupo, para renderizadores de consola.
    pub fn rendered_name(&self) -> String {
        if self.arguments.is_empty() {
            self.step_name.clone()
        } else {
            format!("{}({})", self.step_name, self.arguments.join(", "))
        }
    }
}

impl fmt::Display for ExecutedStepDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arguments.is_empty() {
            write!(f, "{}.{}", self.step_group, self.step_name)
        } else {
            write!(f, "{}.{}({})", self.step_group, self.step_name, self.arguments.join(", "))
        }
    }
}

/// Stringifica un argumento JSON. Strings sin comillas; el resto en su
/// forma JSON compacta. Truncado a `MAX_ARGUMENT_LENGTH` caracteres.
fn render_argument(value: &Value) -> String {
    let rendered = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if rendered.chars().count() > MAX_ARGUMENT_LENGTH {
        let truncated: String = rendered.chars().take(MAX_ARGUMENT_LENGTH).collect();
        format!("{truncated}...")
    } else {
        rendered
    }
}
