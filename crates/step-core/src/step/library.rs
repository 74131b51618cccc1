//! Contrato de librería de steps y sus metadatos resueltos.
//!
//! El core NO descubre qué métodos son steps: esa clasificación llega ya
//! resuelta en `StepLibraryMetadata` (proveedor de metadatos externo). La
//! librería sólo despacha la ejecución del cuerpo a partir del nombre.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::intercept::StepContext;
use crate::step::StepRunResult;

/// Especificación de un step individual, resuelta por el proveedor de
/// metadatos: nombre y marcas de pending / ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    pub name: String,
    /// Declarado "no implementado aún": el cuerpo no se invoca y el
    /// outcome es PENDING (sin cascada).
    pub pending: bool,
    /// Marcado como ignorado: el cuerpo no se invoca y el outcome es
    /// IGNORED (sin cascada).
    pub ignored: bool,
}

impl StepSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), pending: false, ignored: false }
    }

    pub fn pending(name: impl Into<String>) -> Self {
        Self { name: name.into(), pending: true, ignored: false }
    }

    pub fn ignored(name: impl Into<String>) -> Self {
        Self { name: name.into(), pending: false, ignored: true }
    }
}

/// Metadatos de una librería: identidad del grupo y sus steps declarados.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLibraryMetadata {
    pub group: String,
    pub steps: Vec<StepSpec>,
}

impl StepLibraryMetadata {
    pub fn new(group: impl Into<String>, steps: Vec<StepSpec>) -> Self {
        Self { group: group.into(), steps }
    }

    /// Busca la especificación de un step por nombre.
    pub fn spec(&self, name: &str) -> Option<&StepSpec> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Una librería sin steps es válida: simplemente no hay nada que
    /// interceptar.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Trait que define una librería de steps interceptable.
///
/// Implementaciones agrupan steps relacionados y, opcionalmente, declaran
/// referencias a otras librerías (steps anidados). El interceptor envuelve
/// la librería y todas sus anidadas en construcción, de modo que el autor
/// de la librería no necesita saber nada de la intercepción.
pub trait StepLibrary {
    /// Metadatos ya resueltos de la librería (el core no hace discovery).
    fn metadata(&self) -> StepLibraryMetadata;

    /// Despacha la ejecución del cuerpo del step `step` con los argumentos
    /// reales de la llamada. El `ctx` da acceso a las librerías anidadas ya
    /// interceptadas, para que las llamadas anidadas pasen por el mismo bus.
    fn run_step(&self, step: &str, args: &[Value], ctx: &mut StepContext<'_>) -> StepRunResult;

    /// Librerías anidadas referenciadas por esta librería. El interceptor
    /// las envuelve recursivamente en construcción.
    fn nested(&self) -> Vec<Rc<dyn StepLibrary>> {
        Vec::new()
    }
}
